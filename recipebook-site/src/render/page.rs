//! Per-recipe HTML page generation.
//!
//! Assembles the metadata card, tags, prerequisites, table of contents,
//! rendered body and the related/backlink sections into a complete page.

use recipebook_core::config::SiteConfig;
use recipebook_core::document::RecipeDocument;

use super::RenderedBody;
use super::layout::{PageShell, render_shell};
use crate::catalog::{Catalog, category_key};
use crate::escape::{escape_html, slugify};
use crate::urls;

/// Generate the complete HTML page for a recipe.
#[must_use]
pub fn render_recipe_page(
    doc: &RecipeDocument,
    rendered: &RenderedBody,
    catalog: &Catalog,
    site: &SiteConfig,
) -> String {
    let title = doc.display_title();
    let description = doc.meta.description.as_deref().unwrap_or_default();
    let mut sections = Vec::new();

    sections.push("<article class=\"recipe\">".to_string());
    sections.push(format!("<h1>{}</h1>", escape_html(title)));
    if !description.is_empty() {
        sections.push(format!(
            "<p class=\"lead\">{}</p>",
            escape_html(description)
        ));
    }

    render_meta_card(&mut sections, doc, catalog, site);
    render_tags(&mut sections, doc);
    render_prerequisites(&mut sections, doc);
    render_toc(&mut sections, rendered);

    sections.push("<div class=\"recipe-body\">".to_string());
    sections.push(rendered.html.trim_end().to_string());
    sections.push("</div>".to_string());

    render_related(&mut sections, doc, catalog);
    render_backlinks(&mut sections, doc, catalog);
    sections.push("</article>".to_string());

    render_shell(
        &site.site,
        &PageShell {
            title,
            description,
            main: &sections.join("\n"),
            mermaid: rendered.has_mermaid(),
        },
    )
}

/// Render the metadata card.
fn render_meta_card(
    sections: &mut Vec<String>,
    doc: &RecipeDocument,
    catalog: &Catalog,
    site: &SiteConfig,
) {
    let meta = &doc.meta;
    let mut rows = Vec::new();

    if let Some(ref category) = meta.category {
        let key = category_key(Some(category));
        rows.push((
            "Category",
            format!(
                "<a href=\"{}\">{}</a>",
                urls::category(&key),
                escape_html(&site.category_name(category))
            ),
        ));
    }
    match (meta.difficulty_level(), meta.difficulty.as_deref()) {
        (Some(level), _) => rows.push((
            "Difficulty",
            format!(
                "<a class=\"difficulty-{}\" href=\"{}\">{}</a>",
                level.as_str(),
                urls::difficulty(level),
                level.label()
            ),
        )),
        (None, Some(raw)) => rows.push(("Difficulty", escape_html(raw))),
        (None, None) => {}
    }
    if let Some(ref time) = meta.time_to_complete {
        rows.push(("Time to complete", escape_html(time)));
    }
    if let Some(entry) = catalog.get(doc.slug.as_str()) {
        rows.push(("Reading time", format!("{} min", entry.reading_minutes)));
    }
    if let Some(ref version) = meta.kubernetes_version {
        rows.push(("Kubernetes version", escape_html(version)));
    }
    match (meta.publish_date_parsed(), meta.publish_date.as_deref()) {
        (Some(date), _) => rows.push((
            "Published",
            format!(
                "<time datetime=\"{}\">{}</time>",
                date.format("%Y-%m-%d"),
                date.format("%B %-d, %Y")
            ),
        )),
        (None, Some(raw)) => rows.push(("Published", escape_html(raw))),
        (None, None) => {}
    }
    if let Some(ref author) = meta.author {
        rows.push(("Author", escape_html(author)));
    }

    if rows.is_empty() {
        return;
    }

    sections.push("<aside class=\"meta-card\">".to_string());
    sections.push("<dl>".to_string());
    for (label, value) in rows {
        sections.push(format!("<dt>{label}</dt><dd>{value}</dd>"));
    }
    sections.push("</dl>".to_string());
    sections.push("</aside>".to_string());
}

/// Render tag links.
fn render_tags(sections: &mut Vec<String>, doc: &RecipeDocument) {
    let links: Vec<String> = doc
        .meta
        .tags
        .iter()
        .filter_map(|tag| {
            let key = slugify(tag);
            (!key.is_empty()).then(|| {
                format!(
                    "<li><a href=\"{}\">{}</a></li>",
                    urls::tag(&key),
                    escape_html(tag.trim())
                )
            })
        })
        .collect();

    if links.is_empty() {
        return;
    }
    sections.push("<ul class=\"tags\">".to_string());
    sections.extend(links);
    sections.push("</ul>".to_string());
}

/// Render the prerequisites list.
fn render_prerequisites(sections: &mut Vec<String>, doc: &RecipeDocument) {
    if doc.meta.prerequisites.is_empty() {
        return;
    }

    sections.push("<section class=\"prerequisites\">".to_string());
    sections.push("<h2>Prerequisites</h2>".to_string());
    sections.push("<ul>".to_string());
    for item in &doc.meta.prerequisites {
        sections.push(format!("<li>{}</li>", escape_html(item)));
    }
    sections.push("</ul>".to_string());
    sections.push("</section>".to_string());
}

/// Render the table of contents from h2/h3 headings.
fn render_toc(sections: &mut Vec<String>, rendered: &RenderedBody) {
    let entries: Vec<_> = rendered
        .headings
        .iter()
        .filter(|h| matches!(h.level, 2 | 3))
        .collect();
    if entries.is_empty() {
        return;
    }

    sections.push("<nav class=\"toc\">".to_string());
    sections.push("<h2>Contents</h2>".to_string());
    sections.push("<ul>".to_string());
    for heading in entries {
        sections.push(format!(
            "<li class=\"toc-h{}\"><a href=\"#{}\">{}</a></li>",
            heading.level,
            escape_html(&heading.id),
            escape_html(&heading.text)
        ));
    }
    sections.push("</ul>".to_string());
    sections.push("</nav>".to_string());
}

/// Render related recipes. Unresolved slugs are listed as plain text.
fn render_related(sections: &mut Vec<String>, doc: &RecipeDocument, catalog: &Catalog) {
    let related: Vec<_> = doc
        .meta
        .related_recipes
        .iter()
        .filter(|slug| **slug != doc.slug)
        .collect();
    if related.is_empty() {
        return;
    }

    sections.push("<section class=\"related\">".to_string());
    sections.push("<h2>Related recipes</h2>".to_string());
    sections.push("<ul>".to_string());
    for slug in related {
        match catalog.get(slug.as_str()) {
            Some(entry) => sections.push(format!(
                "<li><a href=\"{}\">{}</a></li>",
                escape_html(&entry.url),
                escape_html(&entry.title)
            )),
            None => sections.push(format!("<li>{}</li>", escape_html(slug.as_str()))),
        }
    }
    sections.push("</ul>".to_string());
    sections.push("</section>".to_string());
}

/// Render the "Referenced by" section.
fn render_backlinks(sections: &mut Vec<String>, doc: &RecipeDocument, catalog: &Catalog) {
    let backlinks = catalog.backlinks(doc.slug.as_str());
    if backlinks.is_empty() {
        return;
    }

    sections.push("<section class=\"backlinks\">".to_string());
    sections.push("<h2>Referenced by</h2>".to_string());
    sections.push("<ul>".to_string());
    for entry in catalog.resolve(backlinks) {
        sections.push(format!(
            "<li><a href=\"{}\">{}</a></li>",
            escape_html(&entry.url),
            escape_html(&entry.title)
        ));
    }
    sections.push("</ul>".to_string());
    sections.push("</section>".to_string());
}
