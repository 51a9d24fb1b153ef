//! `list` command handler.

use recipebook_site::{Catalog, CatalogEntry, CatalogQuery};

use super::{load_sources, warn_failures};
use crate::cli::args::{ListArgs, OutputFormat};
use crate::error::RecipebookError;

/// Execute `list`.
///
/// # Errors
///
/// Returns an error if the recipes cannot be loaded or JSON output
/// cannot be serialized.
pub fn run(args: &ListArgs) -> Result<(), RecipebookError> {
    let sources = load_sources(&args.source)?;
    warn_failures(&sources.report);

    let catalog = Catalog::build(&sources.report.store);
    let query = CatalogQuery {
        category: args.category.clone(),
        tag: args.tag.clone(),
        difficulty: args.difficulty.clone(),
    };
    let entries = catalog.filter(&query);

    match args.format {
        OutputFormat::Human => print_table(&entries),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
    }
    Ok(())
}

fn print_table(entries: &[&CatalogEntry]) {
    if entries.is_empty() {
        println!("No recipes found");
        return;
    }

    let slug_width = entries
        .iter()
        .map(|e| e.slug.as_str().len())
        .max()
        .unwrap_or(0)
        .max("SLUG".len());
    let category_width = entries
        .iter()
        .map(|e| e.category.len())
        .max()
        .unwrap_or(0)
        .max("CATEGORY".len());

    println!(
        "{:<slug_width$}  {:<12}  {:<category_width$}  {:<10}  TITLE",
        "SLUG", "DIFFICULTY", "CATEGORY", "PUBLISHED"
    );
    for entry in entries {
        let difficulty = entry.difficulty.map_or("-", |d| d.as_str());
        let published = entry
            .publish_date
            .map_or_else(|| "-".to_string(), |d| d.format("%Y-%m-%d").to_string());
        println!(
            "{:<slug_width$}  {:<12}  {:<category_width$}  {:<10}  {}",
            entry.slug.as_str(),
            difficulty,
            entry.category,
            published,
            entry.title
        );
    }
    println!();
    println!("{} recipe(s)", entries.len());
}
