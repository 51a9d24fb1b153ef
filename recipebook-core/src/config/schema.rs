//! Site configuration schema (`recipebook.yaml`).
//!
//! Controls site metadata, where recipes are read from and written to,
//! the declared category set and the fence languages the renderer is
//! expected to highlight.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default content directory, relative to the configuration file.
pub const DEFAULT_CONTENT_DIR: &str = "src/content/recipes";

/// Default output directory, relative to the configuration file.
pub const DEFAULT_OUTPUT_DIR: &str = "dist";

/// Fence languages accepted when the configuration does not list any.
pub const DEFAULT_LANGUAGES: &[&str] = &[
    "yaml",
    "yml",
    "bash",
    "sh",
    "shell",
    "console",
    "go",
    "python",
    "json",
    "toml",
    "text",
    "plaintext",
    "dockerfile",
    "hcl",
    "rego",
    "promql",
    "mermaid",
    "diff",
    "ini",
    "javascript",
    "typescript",
    "rust",
    "sql",
    "xml",
    "html",
    "css",
    "makefile",
];

/// Parsed site configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site-level metadata.
    #[serde(default)]
    pub site: SiteInfo,

    /// Directory holding the recipe Markdown files.
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,

    /// Directory the static site is written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Declared categories, in display order. Empty means the category
    /// set is open.
    #[serde(default)]
    pub categories: Vec<CategoryConfig>,

    /// Fence languages the site highlights.
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site: SiteInfo::default(),
            content_dir: default_content_dir(),
            output_dir: default_output_dir(),
            categories: Vec::new(),
            languages: default_languages(),
        }
    }
}

impl SiteConfig {
    /// Returns `true` if the configuration declares a category set.
    #[must_use]
    pub fn has_declared_categories(&self) -> bool {
        !self.categories.is_empty()
    }

    /// Look up a declared category by identifier (case-insensitive).
    #[must_use]
    pub fn declared_category(&self, id: &str) -> Option<&CategoryConfig> {
        self.categories
            .iter()
            .find(|c| c.id.eq_ignore_ascii_case(id.trim()))
    }

    /// Display name for a category: the declared name, or the identifier
    /// with dashes turned into spaces and words capitalised.
    #[must_use]
    pub fn category_name(&self, id: &str) -> String {
        self.declared_category(id)
            .map_or_else(|| humanize(id), |c| c.name.clone())
    }

    /// Returns `true` if `language` is in the configured set
    /// (case-insensitive).
    #[must_use]
    pub fn is_known_language(&self, language: &str) -> bool {
        self.languages
            .iter()
            .any(|l| l.eq_ignore_ascii_case(language))
    }
}

/// Site-level metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteInfo {
    /// Site title.
    #[serde(default = "default_title")]
    pub title: String,

    /// Site description.
    #[serde(default)]
    pub description: String,

    /// Absolute base URL; enables `sitemap.xml`.
    #[serde(default)]
    pub base_url: Option<String>,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            title: default_title(),
            description: String::new(),
            base_url: None,
        }
    }
}

/// A declared recipe category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryConfig {
    /// Identifier as used in front matter and URLs.
    pub id: String,

    /// Human-readable name.
    pub name: String,

    /// Category description shown on listing pages.
    #[serde(default)]
    pub description: Option<String>,
}

fn default_title() -> String {
    "Kubernetes Recipes".to_string()
}

fn default_content_dir() -> PathBuf {
    PathBuf::from(DEFAULT_CONTENT_DIR)
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

fn default_languages() -> Vec<String> {
    DEFAULT_LANGUAGES.iter().map(ToString::to_string).collect()
}

fn humanize(id: &str) -> String {
    id.trim()
        .split(['-', '_', ' '])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SiteConfig::default();
        assert_eq!(config.content_dir, PathBuf::from("src/content/recipes"));
        assert_eq!(config.output_dir, PathBuf::from("dist"));
        assert_eq!(config.site.title, "Kubernetes Recipes");
        assert!(!config.has_declared_categories());
        assert!(config.is_known_language("YAML"));
        assert!(config.is_known_language("mermaid"));
        assert!(!config.is_known_language("cobol"));
    }

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config: SiteConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.languages.len(), DEFAULT_LANGUAGES.len());
        assert_eq!(config.output_dir, PathBuf::from("dist"));
    }

    #[test]
    fn test_category_lookup() {
        let yaml = r"
categories:
  - id: security
    name: Security & Policy
  - id: gitops
    name: GitOps
    description: Argo CD and Flux
";
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.has_declared_categories());
        assert_eq!(config.category_name("Security"), "Security & Policy");
        assert_eq!(
            config.declared_category("gitops").unwrap().description.as_deref(),
            Some("Argo CD and Flux")
        );
        assert_eq!(config.category_name("service-mesh"), "Service Mesh");
        assert!(config.declared_category("storage").is_none());
    }

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("backup_restore"), "Backup Restore");
        assert_eq!(humanize("helm"), "Helm");
        assert_eq!(humanize(""), "");
    }
}
