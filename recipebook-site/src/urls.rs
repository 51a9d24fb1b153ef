//! Site URL scheme.
//!
//! Every page has a root-relative URL and a matching path below the
//! output directory.

use std::path::PathBuf;

use recipebook_core::document::Difficulty;

/// Home page URL.
pub const INDEX: &str = "/index.html";

/// Stylesheet URL.
pub const STYLESHEET: &str = "/style.css";

/// URL of a recipe page.
#[must_use]
pub fn recipe(slug: &str) -> String {
    format!("/recipes/{slug}.html")
}

/// URL of a category listing. `key` is the catalog category key.
#[must_use]
pub fn category(key: &str) -> String {
    format!("/categories/{key}.html")
}

/// URL of a tag listing. `key` is the catalog tag key.
#[must_use]
pub fn tag(key: &str) -> String {
    format!("/tags/{key}.html")
}

/// URL of a difficulty listing.
#[must_use]
pub fn difficulty(level: Difficulty) -> String {
    format!("/difficulty/{}.html", level.as_str())
}

/// Output-relative file path for a root-relative URL.
#[must_use]
pub fn file_path(url: &str) -> PathBuf {
    PathBuf::from(url.trim_start_matches('/'))
}
