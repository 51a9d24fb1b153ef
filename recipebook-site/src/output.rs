//! Static site writer.
//!
//! Renders every recipe and listing page and writes them below the
//! output directory:
//!
//! ```text
//! <output>/
//!   index.html
//!   style.css
//!   catalog.json
//!   sitemap.xml            (only with site.base_url)
//!   recipes/<slug>.html
//!   categories/<id>.html
//!   tags/<tag>.html
//!   difficulty/<level>.html
//! ```
//!
//! Existing files are overwritten; nothing else in the output directory
//! is removed.

use std::fs;
use std::path::{Path, PathBuf};

use recipebook_core::config::SiteConfig;
use recipebook_core::document::Difficulty;
use recipebook_core::store::ContentStore;
use serde::Serialize;

use crate::catalog::Catalog;
use crate::error::SiteError;
use crate::index::{
    render_category_page, render_difficulty_page, render_index, render_sitemap, render_tag_page,
};
use crate::render::layout::STYLE_CSS;
use crate::render::{render_markdown, render_recipe_page};
use crate::urls;

/// Counts reported after a build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildSummary {
    /// Directory the site was written to.
    pub output_dir: PathBuf,
    /// Recipe pages written.
    pub recipes: usize,
    /// Category pages written.
    pub categories: usize,
    /// Tag pages written.
    pub tags: usize,
    /// Difficulty pages written.
    pub difficulties: usize,
    /// Whether `sitemap.xml` was written.
    pub sitemap: bool,
}

impl BuildSummary {
    /// Total number of HTML pages, including the home page.
    #[must_use]
    pub const fn pages(&self) -> usize {
        1 + self.recipes + self.categories + self.tags + self.difficulties
    }
}

/// Render the whole site into `output`.
///
/// # Errors
///
/// Returns `SiteError::Io` if a directory or file cannot be written and
/// `SiteError::Json` if the catalog cannot be serialized.
pub fn write_site(
    store: &ContentStore,
    site: &SiteConfig,
    output: &Path,
) -> Result<BuildSummary, SiteError> {
    let catalog = Catalog::build(store);
    tracing::debug!(
        output = %output.display(),
        recipes = catalog.len(),
        "writing site"
    );

    for dir in ["recipes", "categories", "tags", "difficulty"] {
        create_dir(&output.join(dir))?;
    }

    for doc in store.unique_documents() {
        let rendered = render_markdown(&doc.body);
        let page = render_recipe_page(doc, &rendered, &catalog, site);
        let url = urls::recipe(doc.slug.as_str());
        write_page(output, &url, &page)?;
        tracing::trace!(slug = %doc.slug, "rendered recipe");
    }

    write_page(output, urls::INDEX, &render_index(&catalog, site))?;

    for key in catalog.by_category().keys() {
        write_page(output, &urls::category(key), &render_category_page(&catalog, site, key))?;
    }
    for key in catalog.by_tag().keys() {
        write_page(output, &urls::tag(key), &render_tag_page(&catalog, site, key))?;
    }
    let mut difficulties = 0;
    for level in Difficulty::ALL {
        if catalog.by_difficulty().contains_key(level.as_str()) {
            write_page(
                output,
                &urls::difficulty(level),
                &render_difficulty_page(&catalog, site, level),
            )?;
            difficulties += 1;
        }
    }

    write_file(&output.join("catalog.json"), &catalog.to_json()?)?;
    write_file(&output.join(urls::file_path(urls::STYLESHEET)), STYLE_CSS)?;

    let sitemap = match site.site.base_url.as_deref() {
        Some(base_url) => {
            write_file(
                &output.join("sitemap.xml"),
                &render_sitemap(&catalog, base_url),
            )?;
            true
        }
        None => false,
    };

    let summary = BuildSummary {
        output_dir: output.to_path_buf(),
        recipes: catalog.len(),
        categories: catalog.by_category().len(),
        tags: catalog.by_tag().len(),
        difficulties,
        sitemap,
    };
    tracing::debug!(pages = summary.pages(), sitemap, "site written");
    Ok(summary)
}

fn write_page(output: &Path, url: &str, content: &str) -> Result<(), SiteError> {
    write_file(&output.join(urls::file_path(url)), content)
}

fn create_dir(path: &Path) -> Result<(), SiteError> {
    fs::create_dir_all(path).map_err(|source| SiteError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, content: &str) -> Result<(), SiteError> {
    fs::write(path, content).map_err(|source| SiteError::Io {
        path: path.to_path_buf(),
        source,
    })
}
