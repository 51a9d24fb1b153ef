//! Listing pages and sitemap.
//!
//! Generates `index.html` (every recipe grouped by category), one page
//! per category, tag and difficulty level, and `sitemap.xml`.

use recipebook_core::config::SiteConfig;
use recipebook_core::document::{Difficulty, Slug};

use crate::catalog::{Catalog, category_key};
use crate::escape::{escape_html, escape_xml};
use crate::render::layout::{PageShell, render_shell};
use crate::urls;

/// Category keys in display order: declared categories first, in
/// declared order, then the remaining keys alphabetically. Only keys
/// with at least one recipe are returned.
#[must_use]
pub fn category_order(catalog: &Catalog, site: &SiteConfig) -> Vec<String> {
    let mut order: Vec<String> = site
        .categories
        .iter()
        .map(|c| category_key(Some(&c.id)))
        .filter(|key| catalog.by_category().contains_key(key))
        .collect();
    for key in catalog.by_category().keys() {
        if !order.contains(key) {
            order.push(key.clone());
        }
    }
    order
}

/// Generate the home page.
#[must_use]
pub fn render_index(catalog: &Catalog, site: &SiteConfig) -> String {
    let mut sections = Vec::new();

    sections.push(format!("<h1>{}</h1>", escape_html(&site.site.title)));
    if !site.site.description.is_empty() {
        sections.push(format!(
            "<p class=\"lead\">{}</p>",
            escape_html(&site.site.description)
        ));
    }
    sections.push(format!(
        "<p>{} recipe{}.</p>",
        catalog.len(),
        if catalog.len() == 1 { "" } else { "s" }
    ));

    // Difficulty links
    let levels: Vec<String> = Difficulty::ALL
        .iter()
        .filter_map(|level| {
            let count = catalog.by_difficulty().get(level.as_str())?.len();
            Some(format!(
                "<li><a class=\"difficulty-{}\" href=\"{}\">{}</a> ({count})</li>",
                level.as_str(),
                urls::difficulty(*level),
                level.label()
            ))
        })
        .collect();
    if !levels.is_empty() {
        sections.push("<h2>By difficulty</h2>".to_string());
        sections.push("<ul class=\"difficulties\">".to_string());
        sections.extend(levels);
        sections.push("</ul>".to_string());
    }

    // Category tables
    for key in category_order(catalog, site) {
        let Some(slugs) = catalog.by_category().get(&key) else {
            continue;
        };
        sections.push(format!(
            "<h2><a href=\"{}\">{}</a></h2>",
            urls::category(&key),
            escape_html(&site.category_name(&key))
        ));
        if let Some(desc) = site
            .declared_category(&key)
            .and_then(|c| c.description.as_deref())
        {
            sections.push(format!("<p>{}</p>", escape_html(desc)));
        }
        sections.extend(listing_table(catalog, site, slugs));
    }

    // Tag cloud
    if !catalog.by_tag().is_empty() {
        sections.push("<h2>Tags</h2>".to_string());
        sections.push("<ul class=\"tags\">".to_string());
        for (key, slugs) in catalog.by_tag() {
            sections.push(format!(
                "<li><a href=\"{}\">{}</a> ({})</li>",
                urls::tag(key),
                escape_html(catalog.tag_name(key)),
                slugs.len()
            ));
        }
        sections.push("</ul>".to_string());
    }

    render_shell(
        &site.site,
        &PageShell {
            title: &site.site.title,
            description: &site.site.description,
            main: &sections.join("\n"),
            mermaid: false,
        },
    )
}

/// Generate the listing page for one category key.
#[must_use]
pub fn render_category_page(catalog: &Catalog, site: &SiteConfig, key: &str) -> String {
    let name = site.category_name(key);
    let description = site
        .declared_category(key)
        .and_then(|c| c.description.clone())
        .unwrap_or_default();
    listing_page(
        catalog,
        site,
        &name,
        &description,
        slugs_or_empty(catalog.by_category().get(key)),
    )
}

/// Generate the listing page for one tag key.
#[must_use]
pub fn render_tag_page(catalog: &Catalog, site: &SiteConfig, key: &str) -> String {
    let title = format!("Tag: {}", catalog.tag_name(key));
    listing_page(
        catalog,
        site,
        &title,
        "",
        slugs_or_empty(catalog.by_tag().get(key)),
    )
}

/// Generate the listing page for one difficulty level.
#[must_use]
pub fn render_difficulty_page(catalog: &Catalog, site: &SiteConfig, level: Difficulty) -> String {
    let title = format!("{} recipes", level.label());
    listing_page(
        catalog,
        site,
        &title,
        "",
        slugs_or_empty(catalog.by_difficulty().get(level.as_str())),
    )
}

/// Generate `sitemap.xml`: home, every recipe and every listing page.
#[must_use]
pub fn render_sitemap(catalog: &Catalog, base_url: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let mut urls_out = vec![urls::INDEX.to_string()];
    urls_out.extend(catalog.entries().iter().map(|e| e.url.clone()));
    urls_out.extend(catalog.by_category().keys().map(|k| urls::category(k)));
    urls_out.extend(catalog.by_tag().keys().map(|k| urls::tag(k)));
    urls_out.extend(
        Difficulty::ALL
            .iter()
            .filter(|l| catalog.by_difficulty().contains_key(l.as_str()))
            .map(|l| urls::difficulty(*l)),
    );
    urls_out.dedup();

    let mut sections = Vec::new();
    sections.push("<?xml version=\"1.0\" encoding=\"UTF-8\"?>".to_string());
    sections.push(
        "<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">".to_string(),
    );
    for url in &urls_out {
        let lastmod = catalog
            .entries()
            .iter()
            .find(|e| e.url == *url)
            .and_then(|e| e.publish_date);
        match lastmod {
            Some(date) => sections.push(format!(
                "  <url><loc>{}</loc><lastmod>{}</lastmod></url>",
                escape_xml(&format!("{base}{url}")),
                date.format("%Y-%m-%d")
            )),
            None => sections.push(format!(
                "  <url><loc>{}</loc></url>",
                escape_xml(&format!("{base}{url}"))
            )),
        }
    }
    sections.push("</urlset>".to_string());
    sections.push(String::new());

    sections.join("\n")
}

fn listing_page(
    catalog: &Catalog,
    site: &SiteConfig,
    title: &str,
    description: &str,
    slugs: &[Slug],
) -> String {
    let mut sections = Vec::new();
    sections.push(format!("<h1>{}</h1>", escape_html(title)));
    if !description.is_empty() {
        sections.push(format!("<p class=\"lead\">{}</p>", escape_html(description)));
    }
    if slugs.is_empty() {
        sections.push("<p>No recipes yet.</p>".to_string());
    } else {
        sections.extend(listing_table(catalog, site, slugs));
    }

    render_shell(
        &site.site,
        &PageShell {
            title,
            description,
            main: &sections.join("\n"),
            mermaid: false,
        },
    )
}

fn slugs_or_empty(slugs: Option<&Vec<Slug>>) -> &[Slug] {
    slugs.map(Vec::as_slice).unwrap_or_default()
}

/// Build an HTML table listing the given recipes.
fn listing_table(catalog: &Catalog, site: &SiteConfig, slugs: &[Slug]) -> Vec<String> {
    let mut rows = Vec::new();
    rows.push("<table>".to_string());
    rows.push(
        "<thead><tr><th>Recipe</th><th>Category</th><th>Difficulty</th><th>Published</th><th>Reading time</th></tr></thead>"
            .to_string(),
    );
    rows.push("<tbody>".to_string());
    for entry in catalog.resolve(slugs) {
        let difficulty = entry.difficulty.map_or_else(
            || "-".to_string(),
            |level| {
                format!(
                    "<a class=\"difficulty-{}\" href=\"{}\">{}</a>",
                    level.as_str(),
                    urls::difficulty(level),
                    level.label()
                )
            },
        );
        let published = entry
            .publish_date
            .map_or_else(|| "-".to_string(), |d| d.format("%Y-%m-%d").to_string());
        rows.push(format!(
            "<tr><td><a href=\"{}\">{}</a></td><td><a href=\"{}\">{}</a></td><td>{difficulty}</td><td>{published}</td><td>{} min</td></tr>",
            escape_html(&entry.url),
            escape_html(&entry.title),
            urls::category(&entry.category),
            escape_html(&site.category_name(&entry.category)),
            entry.reading_minutes
        ));
    }
    rows.push("</tbody>".to_string());
    rows.push("</table>".to_string());
    rows
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use recipebook_core::config::{CategoryConfig, SiteInfo};
    use recipebook_core::document::RecipeDocument;
    use recipebook_core::store::ContentStore;

    use super::*;

    fn doc(slug: &str, front_matter: &str) -> RecipeDocument {
        let raw = format!("---\n{front_matter}---\nBody text.\n");
        RecipeDocument::parse(Path::new(&format!("{slug}.md")), &raw).unwrap()
    }

    fn fixture() -> (Catalog, SiteConfig) {
        let store = ContentStore::from_documents(
            "content",
            vec![
                doc(
                    "argocd-gitops",
                    "title: Argo CD\ncategory: gitops\ndifficulty: beginner\npublishDate: 2024-01-05\ntags: [argocd]\n",
                ),
                doc(
                    "opa-gatekeeper",
                    "title: OPA Gatekeeper\ncategory: security\ndifficulty: advanced\npublishDate: 2024-04-01\ntags: [policy, OPA]\n",
                ),
                doc("cert-manager", "title: cert-manager\ncategory: networking\n"),
            ],
        );
        let site = SiteConfig {
            site: SiteInfo {
                title: "Kubernetes Recipes".to_string(),
                description: "Practical recipes".to_string(),
                base_url: Some("https://recipes.example.com/".to_string()),
            },
            categories: vec![
                CategoryConfig {
                    id: "security".to_string(),
                    name: "Security & Policy".to_string(),
                    description: Some("Admission control".to_string()),
                },
                CategoryConfig {
                    id: "storage".to_string(),
                    name: "Storage".to_string(),
                    description: None,
                },
                CategoryConfig {
                    id: "gitops".to_string(),
                    name: "GitOps".to_string(),
                    description: None,
                },
            ],
            ..SiteConfig::default()
        };
        (Catalog::build(&store), site)
    }

    #[test]
    fn test_category_order() {
        let (catalog, site) = fixture();
        assert_eq!(
            category_order(&catalog, &site),
            vec!["security", "gitops", "networking"]
        );
    }

    #[test]
    fn test_index_page() {
        let (catalog, site) = fixture();
        let html = render_index(&catalog, &site);
        assert!(html.contains("<h1>Kubernetes Recipes</h1>"));
        assert!(html.contains("<p>3 recipes.</p>"));
        assert!(html.contains(
            "<h2><a href=\"/categories/security.html\">Security &amp; Policy</a></h2>"
        ));
        assert!(html.contains("<p>Admission control</p>"));
        assert!(html.contains("<a href=\"/recipes/opa-gatekeeper.html\">OPA Gatekeeper</a>"));
        assert!(html.contains("<li><a href=\"/tags/opa.html\">OPA</a> (1)</li>"));
        assert!(html.contains("href=\"/difficulty/advanced.html\">Advanced</a> (1)"));
        assert!(!html.contains("/difficulty/intermediate.html"));

        let security = html.find("Security &amp; Policy").unwrap();
        let gitops = html.find(">GitOps</a></h2>").unwrap();
        assert!(security < gitops);
    }

    #[test]
    fn test_category_page() {
        let (catalog, site) = fixture();
        let html = render_category_page(&catalog, &site, "networking");
        assert!(html.contains("<h1>Networking</h1>"));
        assert!(html.contains("cert-manager"));
        assert!(!html.contains("argocd-gitops"));
    }

    #[test]
    fn test_empty_listing() {
        let (catalog, site) = fixture();
        let html = render_category_page(&catalog, &site, "storage");
        assert!(html.contains("<p>No recipes yet.</p>"));
    }

    #[test]
    fn test_tag_and_difficulty_pages() {
        let (catalog, site) = fixture();
        let tag = render_tag_page(&catalog, &site, "policy");
        assert!(tag.contains("<h1>Tag: policy</h1>"));
        assert!(tag.contains("OPA Gatekeeper"));

        let level = render_difficulty_page(&catalog, &site, Difficulty::Beginner);
        assert!(level.contains("<h1>Beginner recipes</h1>"));
        assert!(level.contains("Argo CD"));
        assert!(!level.contains("OPA Gatekeeper"));
    }

    #[test]
    fn test_listing_escapes_recipe_url() {
        let store = ContentStore::from_documents(
            "content",
            vec![doc("a\"b", "title: Quoted\ncategory: storage\n")],
        );
        let catalog = Catalog::build(&store);
        let html = render_category_page(&catalog, &SiteConfig::default(), "storage");
        assert!(html.contains("<a href=\"/recipes/a&quot;b.html\">Quoted</a>"));
    }

    #[test]
    fn test_sitemap() {
        let (catalog, _) = fixture();
        let xml = render_sitemap(&catalog, "https://recipes.example.com/");
        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("<loc>https://recipes.example.com/index.html</loc>"));
        assert!(xml.contains(
            "<url><loc>https://recipes.example.com/recipes/opa-gatekeeper.html</loc><lastmod>2024-04-01</lastmod></url>"
        ));
        assert!(xml.contains("<loc>https://recipes.example.com/recipes/cert-manager.html</loc></url>"));
        assert!(xml.contains("<loc>https://recipes.example.com/categories/gitops.html</loc>"));
        assert!(xml.contains("<loc>https://recipes.example.com/tags/opa.html</loc>"));
        assert!(xml.contains("<loc>https://recipes.example.com/difficulty/beginner.html</loc>"));
        assert!(!xml.contains("difficulty/intermediate.html"));
    }
}
