//! Recipe documents.
//!
//! A recipe is one Markdown file: a front-matter block followed by the
//! body. Its identity is the slug derived from the file name.

pub mod frontmatter;
pub mod meta;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::ContentError;
use frontmatter::{FrontMatter, split_front_matter};
use meta::RecipeMeta;

pub use frontmatter::{FrontMatterError, FrontMatterValue};
pub use meta::Difficulty;

static SLUG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("valid regex"));

/// Filename-derived recipe identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Wrap a slug string as-is.
    #[must_use]
    pub fn new(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    /// Derive the slug from a file path (its stem).
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        let stem = path.file_stem().map_or_else(
            || path.to_string_lossy().into_owned(),
            |s| s.to_string_lossy().into_owned(),
        );
        Self(stem)
    }

    /// The slug text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` for lowercase kebab-case slugs (`[a-z0-9]+(-[a-z0-9]+)*`).
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        SLUG_PATTERN.is_match(&self.0)
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for Slug {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A parsed recipe file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDocument {
    /// Identifier derived from the file name.
    pub slug: Slug,
    /// Path the document was read from.
    pub path: PathBuf,
    /// Raw front-matter mapping, in source order.
    pub front_matter: FrontMatter,
    /// Typed view over the front matter.
    pub meta: RecipeMeta,
    /// Markdown body following the closing delimiter.
    pub body: String,
}

impl RecipeDocument {
    /// Parse raw file text read from `path`.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::MalformedFrontMatter` if the delimiters are
    /// missing or the YAML block does not parse.
    pub fn parse(path: &Path, raw: &str) -> Result<Self, ContentError> {
        let malformed = |source| ContentError::MalformedFrontMatter {
            path: path.to_path_buf(),
            source,
        };

        let (yaml, body) = split_front_matter(raw).map_err(malformed)?;
        let front_matter = FrontMatter::parse(yaml).map_err(malformed)?;
        let meta = RecipeMeta::from_front_matter(&front_matter);

        Ok(Self {
            slug: Slug::from_path(path),
            path: path.to_path_buf(),
            front_matter,
            meta,
            body: body.to_string(),
        })
    }

    /// Reassemble the file text from the front matter and body.
    #[must_use]
    pub fn to_source(&self) -> String {
        format!("{}\n{}", self.front_matter.to_yaml_block(), self.body)
    }

    /// Title for display, falling back to the slug.
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.meta
            .title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| self.slug.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &str = "---\ntitle: \"Admission Webhooks: Validating and Mutating\"\ndescription: Build admission webhooks\ncategory: security\ndifficulty: advanced\npublishDate: 2024-03-01\ntags:\n  - webhooks\n---\n\n# Admission Webhooks\n\n```yaml\nkind: ValidatingWebhookConfiguration\n```\n";

    #[test]
    fn test_slug_from_path() {
        let slug = Slug::from_path(Path::new("src/content/recipes/admission-webhooks.md"));
        assert_eq!(slug.as_str(), "admission-webhooks");
        assert!(slug.is_well_formed());
    }

    #[test]
    fn test_slug_well_formed() {
        assert!(Slug::new("hpa").is_well_formed());
        assert!(Slug::new("k8s-1-28-upgrade").is_well_formed());
        assert!(!Slug::new("Admission_Webhooks").is_well_formed());
        assert!(!Slug::new("trailing-").is_well_formed());
        assert!(!Slug::new("double--dash").is_well_formed());
        assert!(!Slug::new("").is_well_formed());
    }

    #[test]
    fn test_parse_document() {
        let doc = RecipeDocument::parse(Path::new("recipes/admission-webhooks.md"), RAW).unwrap();
        assert_eq!(doc.slug.as_str(), "admission-webhooks");
        assert_eq!(
            doc.display_title(),
            "Admission Webhooks: Validating and Mutating"
        );
        assert_eq!(doc.meta.category.as_deref(), Some("security"));
        assert_eq!(doc.meta.tags, vec!["webhooks"]);
        assert!(doc.body.starts_with("\n# Admission Webhooks"));
    }

    #[test]
    fn test_parse_malformed() {
        let err = RecipeDocument::parse(Path::new("recipes/broken.md"), "# no front matter\n")
            .unwrap_err();
        assert!(matches!(
            err,
            ContentError::MalformedFrontMatter {
                source: FrontMatterError::MissingOpeningDelimiter,
                ..
            }
        ));
    }

    #[test]
    fn test_display_title_falls_back_to_slug() {
        let doc = RecipeDocument::parse(Path::new("r/untitled.md"), "---\ncategory: x\n---\n").unwrap();
        assert_eq!(doc.display_title(), "untitled");
    }

    #[test]
    fn test_to_source_round_trip() {
        let doc = RecipeDocument::parse(Path::new("recipes/admission-webhooks.md"), RAW).unwrap();
        let again = RecipeDocument::parse(&doc.path, &doc.to_source()).unwrap();
        assert_eq!(again, doc);
    }
}
