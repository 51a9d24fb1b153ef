//! Site configuration loader.
//!
//! Loading steps:
//! 1. Locate the file (explicit path, or `recipebook.yaml` in the
//!    working directory, or built-in defaults)
//! 2. YAML parsing
//! 3. Validation
//! 4. Resolve relative directories against the file's directory

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use super::schema::SiteConfig;
use crate::error::ConfigError;

/// Configuration file looked up when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "recipebook.yaml";

/// Load the site configuration.
///
/// With `Some(path)` the file must exist. With `None`, `recipebook.yaml`
/// in the working directory is used when present and built-in defaults
/// otherwise.
///
/// # Errors
///
/// Returns `ConfigError` if the file is missing (explicit path only),
/// unreadable, not valid YAML, or fails validation.
pub fn load_config(path: Option<&Path>) -> Result<SiteConfig, ConfigError> {
    let path = match path {
        Some(path) if !path.exists() => {
            return Err(ConfigError::MissingFile {
                path: path.to_path_buf(),
            });
        }
        Some(path) => path.to_path_buf(),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !default.exists() {
                return Ok(SiteConfig::default());
            }
            default
        }
    };

    let content = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;

    let mut config = parse_config(&content, &path)?;
    let base = path.parent().unwrap_or_else(|| Path::new(""));
    config.content_dir = resolve(base, &config.content_dir);
    config.output_dir = resolve(base, &config.output_dir);
    Ok(config)
}

/// Parse and validate configuration text. `path` is used for error
/// messages only.
///
/// # Errors
///
/// Returns `ConfigError::ParseError` for invalid YAML and
/// `ConfigError::InvalidValue` for semantic problems.
pub fn parse_config(content: &str, path: &Path) -> Result<SiteConfig, ConfigError> {
    let config: SiteConfig = if content.trim().is_empty() {
        SiteConfig::default()
    } else {
        serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            line: e.location().map(|l| l.line()),
            message: e.to_string(),
        })?
    };

    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for category in &config.categories {
        let id = category.id.trim().to_ascii_lowercase();
        if id.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "categories[].id".to_string(),
                value: category.id.clone(),
                expected: "a non-empty identifier".to_string(),
            });
        }
        if !seen.insert(id) {
            return Err(ConfigError::InvalidValue {
                field: "categories[].id".to_string(),
                value: category.id.clone(),
                expected: "unique category identifiers".to_string(),
            });
        }
    }

    if let Some(ref base_url) = config.site.base_url {
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "site.base_url".to_string(),
                value: base_url.clone(),
                expected: "an absolute http(s) URL".to_string(),
            });
        }
    }

    Ok(())
}

fn resolve(base: &Path, dir: &Path) -> PathBuf {
    if dir.is_absolute() || base.as_os_str().is_empty() {
        dir.to_path_buf()
    } else {
        base.join(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let yaml = r"
site:
  title: Kubernetes Recipes
  description: Practical recipes for operating Kubernetes
  base_url: https://recipes.example.com
content_dir: content
output_dir: public
categories:
  - id: security
    name: Security
  - id: storage
    name: Storage
languages: [yaml, bash]
";
        let config = parse_config(yaml, Path::new("recipebook.yaml")).unwrap();
        assert_eq!(
            config.site.base_url.as_deref(),
            Some("https://recipes.example.com")
        );
        assert_eq!(config.categories.len(), 2);
        assert_eq!(config.languages, vec!["yaml", "bash"]);
        assert_eq!(config.content_dir, PathBuf::from("content"));
    }

    #[test]
    fn test_empty_file_is_default() {
        let config = parse_config("   \n", Path::new("recipebook.yaml")).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("dist"));
    }

    #[test]
    fn test_parse_error_has_line() {
        let err = parse_config("site:\n  title: [x\n", Path::new("recipebook.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { line: Some(_), .. }));
    }

    #[test]
    fn test_duplicate_category_rejected() {
        let yaml = "categories:\n  - id: helm\n    name: Helm\n  - id: Helm\n    name: Helm again\n";
        let err = parse_config(yaml, Path::new("recipebook.yaml")).unwrap_err();
        assert!(err.to_string().contains("unique"));
    }

    #[test]
    fn test_relative_base_url_rejected() {
        let yaml = "site:\n  base_url: /recipes\n";
        let err = parse_config(yaml, Path::new("recipebook.yaml")).unwrap_err();
        assert!(err.to_string().contains("site.base_url"));
    }

    #[test]
    fn test_load_resolves_relative_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recipebook.yaml");
        fs::write(&path, "content_dir: recipes\noutput_dir: /tmp/out\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.content_dir, dir.path().join("recipes"));
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let err = load_config(Some(Path::new("/nonexistent/recipebook.yaml"))).unwrap_err();
        assert!(matches!(err, ConfigError::MissingFile { .. }));
    }
}
