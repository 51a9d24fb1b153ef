//! `show` command handler.

use serde::Serialize;

use recipebook_core::document::Slug;
use recipebook_core::document::frontmatter::FrontMatter;
use recipebook_site::render::Heading;
use recipebook_site::{Catalog, CatalogEntry, render_markdown};

use super::{load_sources, warn_failures};
use crate::cli::args::{ShowArgs, ShowFormat};
use crate::error::RecipebookError;

/// JSON shape of `show --format json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecipeOutput<'a> {
    #[serde(flatten)]
    entry: &'a CatalogEntry,
    path: String,
    front_matter: &'a FrontMatter,
    headings: &'a [Heading],
    backlinks: &'a [Slug],
}

/// Execute `show`.
///
/// # Errors
///
/// Returns `RecipebookError::RecipeNotFound` (with the closest slug as a
/// suggestion) if no recipe has the requested slug.
pub fn run(args: &ShowArgs) -> Result<(), RecipebookError> {
    let sources = load_sources(&args.source)?;
    warn_failures(&sources.report);
    let store = &sources.report.store;

    let Some(doc) = store.get(&args.slug) else {
        return Err(RecipebookError::RecipeNotFound {
            slug: args.slug.clone(),
            suggestion: store.suggest(&args.slug),
        });
    };

    let rendered = render_markdown(&doc.body);
    if args.format == ShowFormat::Html {
        print!("{}", rendered.html);
        return Ok(());
    }

    let catalog = Catalog::build(store);
    let Some(entry) = catalog.get(&args.slug) else {
        return Err(RecipebookError::RecipeNotFound {
            slug: args.slug.clone(),
            suggestion: None,
        });
    };
    let backlinks = catalog.backlinks(&args.slug);

    if args.format == ShowFormat::Json {
        let output = RecipeOutput {
            entry,
            path: doc.path.display().to_string(),
            front_matter: &doc.front_matter,
            headings: &rendered.headings,
            backlinks,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let meta = &doc.meta;
    println!("{}", entry.title);
    if let Some(ref description) = meta.description {
        println!("{description}");
    }
    println!();

    let mut fields: Vec<(&str, String)> = vec![
        ("Slug", entry.slug.to_string()),
        ("Path", doc.path.display().to_string()),
        ("Category", sources.site.category_name(&entry.category)),
    ];
    if let Some(ref difficulty) = meta.difficulty {
        fields.push(("Difficulty", difficulty.clone()));
    }
    if let Some(ref date) = meta.publish_date {
        fields.push(("Published", date.clone()));
    }
    if let Some(ref time) = meta.time_to_complete {
        fields.push(("Time", time.clone()));
    }
    if let Some(ref version) = meta.kubernetes_version {
        fields.push(("Kubernetes", version.clone()));
    }
    if let Some(ref author) = meta.author {
        fields.push(("Author", author.clone()));
    }
    if !meta.tags.is_empty() {
        fields.push(("Tags", meta.tags.join(", ")));
    }
    fields.push(("Reading", format!("{} min", entry.reading_minutes)));
    for (label, value) in &fields {
        println!("{label:<12}{value}");
    }

    print_list("Prerequisites", meta.prerequisites.iter().map(String::as_str));
    print_list(
        "Related recipes",
        meta.related_recipes.iter().map(Slug::as_str),
    );
    print_list("Referenced by", backlinks.iter().map(Slug::as_str));

    let outline: Vec<String> = rendered
        .headings
        .iter()
        .map(|h| {
            format!(
                "{}{}",
                "  ".repeat(usize::from(h.level.saturating_sub(1))),
                h.text
            )
        })
        .collect();
    print_list("Outline", outline.iter().map(String::as_str));

    Ok(())
}

fn print_list<'a>(title: &str, items: impl Iterator<Item = &'a str>) {
    let items: Vec<&str> = items.collect();
    if items.is_empty() {
        return;
    }
    println!();
    println!("{title}:");
    for item in items {
        println!("  - {item}");
    }
}
