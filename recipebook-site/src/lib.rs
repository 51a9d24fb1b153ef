//! `recipebook` site generation
//!
//! Renders recipe bodies to HTML, aggregates front matter into a
//! catalog, validates the corpus and writes the static site.

pub mod catalog;
pub mod error;
pub mod escape;
pub mod index;
pub mod output;
pub mod render;
pub mod urls;
pub mod validate;

pub use catalog::{Catalog, CatalogEntry, CatalogQuery};
pub use error::SiteError;
pub use output::{BuildSummary, write_site};
pub use render::{RenderedBody, render_markdown};
pub use validate::{ValidationError, ValidationReport, validate_corpus};
