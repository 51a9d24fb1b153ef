//! Corpus validation.
//!
//! Checks every recipe's front matter against the site rules, resolves
//! `relatedRecipes` references and detects duplicate slugs across the
//! store. Files that failed to load are reported alongside.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use recipebook_core::config::SiteConfig;
use recipebook_core::document::meta::{keys, parse_date};
use recipebook_core::document::{Difficulty, FrontMatterValue, RecipeDocument};
use recipebook_core::error::{ContentError, Severity};
use recipebook_core::store::ContentStore;
use recipebook_core::suggest::closest_match;
use serde::Serialize;

use crate::render::render_markdown;

/// A validation issue with path context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Path to the recipe file.
    pub path: String,
    /// Field that failed validation.
    pub field: String,
    /// Human-readable message.
    pub message: String,
    /// Whether the issue blocks publishing.
    pub severity: Severity,
}

impl ValidationError {
    fn error(path: &str, field: &str, message: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            field: field.to_string(),
            message: message.into(),
            severity: Severity::Error,
        }
    }

    fn warning(path: &str, field: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(path, field, message)
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}\n  \u{2192} {}: {}",
            self.severity.label(),
            self.path,
            self.field,
            self.message
        )
    }
}

/// Outcome of validating a corpus.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    /// Number of recipes that loaded and were checked.
    pub documents_checked: usize,
    /// Issues in discovery order.
    pub issues: Vec<ValidationError>,
}

impl ValidationReport {
    /// Issues with `Error` severity.
    pub fn errors(&self) -> impl Iterator<Item = &ValidationError> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    /// Issues with `Warning` severity.
    pub fn warnings(&self) -> impl Iterator<Item = &ValidationError> {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
    }

    /// Number of errors.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    /// Number of warnings.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// Returns `true` if the corpus must not be published. In strict
    /// mode warnings count as errors.
    #[must_use]
    pub fn has_errors(&self, strict: bool) -> bool {
        self.error_count() > 0 || (strict && self.warning_count() > 0)
    }

    /// Returns `true` if no issues were found.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Validate a loaded corpus.
///
/// `failures` are the per-file load failures from the store; each is
/// reported as an error.
#[must_use]
pub fn validate_corpus(
    store: &ContentStore,
    failures: &[ContentError],
    site: &SiteConfig,
) -> ValidationReport {
    let mut issues: Vec<ValidationError> = failures.iter().map(load_failure).collect();

    for doc in store.documents() {
        issues.extend(validate_document(doc, store, site));
    }
    issues.extend(detect_duplicate_slugs(store));

    ValidationReport {
        documents_checked: store.len(),
        issues,
    }
}

/// Validate a single recipe.
///
/// `store` resolves `relatedRecipes`; `site` supplies the declared
/// categories and known fence languages.
#[must_use]
pub fn validate_document(
    doc: &RecipeDocument,
    store: &ContentStore,
    site: &SiteConfig,
) -> Vec<ValidationError> {
    let path = doc.path.display().to_string();
    let mut issues = Vec::new();

    // Required scalar fields
    for key in keys::REQUIRED {
        match doc.front_matter.get(key) {
            None => issues.push(ValidationError::error(&path, key, "missing required field")),
            Some(FrontMatterValue::List(_)) => issues.push(ValidationError::error(
                &path,
                key,
                "expected a single value, got a list",
            )),
            Some(FrontMatterValue::Scalar(s)) if s.trim().is_empty() => {
                issues.push(ValidationError::error(&path, key, "must not be empty"));
            }
            Some(FrontMatterValue::Scalar(_)) => {}
        }
    }

    if let Some(raw) = doc.meta.difficulty.as_deref() {
        if let Err(e) = raw.parse::<Difficulty>() {
            issues.push(ValidationError::error(&path, keys::DIFFICULTY, e.to_string()));
        }
    }

    if let Some(raw) = doc.meta.publish_date.as_deref() {
        if parse_date(raw).is_none() {
            issues.push(ValidationError::error(
                &path,
                keys::PUBLISH_DATE,
                format!("expected a date (YYYY-MM-DD), got \"{raw}\""),
            ));
        }
    }

    // Related recipes
    for related in &doc.meta.related_recipes {
        if *related == doc.slug {
            issues.push(ValidationError::warning(
                &path,
                keys::RELATED_RECIPES,
                format!("\"{related}\" references the recipe itself"),
            ));
        } else if !store.contains(related.as_str()) {
            let mut message = format!("unknown recipe \"{related}\"");
            if let Some(suggestion) = store.suggest(related.as_str()) {
                message.push_str(&format!("; did you mean \"{suggestion}\"?"));
            }
            issues.push(ValidationError::error(&path, keys::RELATED_RECIPES, message));
        }
    }

    // Declared category set
    if let Some(category) = doc.meta.category.as_deref() {
        if site.has_declared_categories() && site.declared_category(category).is_none() {
            let mut message = format!("category \"{category}\" is not declared");
            if let Some(suggestion) =
                closest_match(category, site.categories.iter().map(|c| c.id.as_str()))
            {
                message.push_str(&format!("; did you mean \"{suggestion}\"?"));
            }
            issues.push(ValidationError::warning(&path, keys::CATEGORY, message));
        }
    }

    if doc.meta.tags.is_empty() {
        issues.push(ValidationError::warning(
            &path,
            keys::TAGS,
            "no tags; the recipe will not appear on any tag page",
        ));
    }

    // Fence languages
    let unknown: BTreeSet<String> = render_markdown(&doc.body)
        .code_blocks
        .into_iter()
        .filter_map(|block| block.language)
        .filter(|lang| !site.is_known_language(lang))
        .collect();
    for lang in unknown {
        issues.push(ValidationError::warning(
            &path,
            "body",
            format!("unknown code fence language \"{lang}\""),
        ));
    }

    if !doc.slug.is_well_formed() {
        issues.push(ValidationError::warning(
            &path,
            "slug",
            format!(
                "\"{}\" is not lowercase kebab-case; rename the file",
                doc.slug
            ),
        ));
    }

    issues
}

/// Detect recipes sharing a slug across the store.
///
/// Every occurrence after the first is reported, naming the first.
#[must_use]
pub fn detect_duplicate_slugs(store: &ContentStore) -> Vec<ValidationError> {
    let mut seen: HashMap<&str, String> = HashMap::new();
    let mut errors = Vec::new();

    for doc in store.documents() {
        let path = doc.path.display().to_string();
        if let Some(first_path) = seen.get(doc.slug.as_str()) {
            errors.push(ValidationError::error(
                &path,
                "slug",
                format!("duplicate slug \"{}\", first seen in {first_path}", doc.slug),
            ));
        } else {
            seen.insert(doc.slug.as_str(), path);
        }
    }

    errors
}

fn load_failure(failure: &ContentError) -> ValidationError {
    let path = failure
        .path()
        .map_or_else(|| "<content>".to_string(), |p| p.display().to_string());
    match failure {
        ContentError::MalformedFrontMatter { source, .. } => {
            ValidationError::error(&path, "front matter", source.to_string())
        }
        other => ValidationError::error(&path, "file", other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use recipebook_core::config::CategoryConfig;
    use recipebook_core::document::FrontMatterError;

    use super::*;

    const COMPLETE: &str = "title: T\ndescription: D\ncategory: storage\ndifficulty: beginner\npublishDate: 2024-01-01\ntags: [x]\n";

    fn doc(path: &str, front_matter: &str, body: &str) -> RecipeDocument {
        let raw = format!("---\n{front_matter}---\n{body}");
        RecipeDocument::parse(Path::new(path), &raw).unwrap()
    }

    fn fields(issues: &[ValidationError]) -> Vec<(&str, Severity)> {
        issues
            .iter()
            .map(|i| (i.field.as_str(), i.severity))
            .collect()
    }

    fn check(front_matter: &str, body: &str) -> Vec<ValidationError> {
        let d = doc("recipes/sample.md", front_matter, body);
        let store = ContentStore::from_documents("recipes", vec![d.clone()]);
        validate_document(&d, &store, &SiteConfig::default())
    }

    #[test]
    fn test_complete_recipe_is_clean() {
        assert!(check(COMPLETE, "```yaml\na: 1\n```\n").is_empty());
    }

    #[test]
    fn test_missing_required_fields() {
        let issues = check("title: Only\ntags: [x]\n", "");
        assert_eq!(
            fields(&issues),
            vec![
                ("description", Severity::Error),
                ("category", Severity::Error),
                ("difficulty", Severity::Error),
                ("publishDate", Severity::Error),
            ]
        );
        assert_eq!(issues[0].message, "missing required field");
    }

    #[test]
    fn test_list_and_empty_values() {
        let fm = COMPLETE
            .replace("title: T", "title: [a, b]")
            .replace("description: D", "description: ''");
        let issues = check(&fm, "");
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].message, "expected a single value, got a list");
        assert_eq!(issues[1].message, "must not be empty");
    }

    #[test]
    fn test_invalid_difficulty_and_date() {
        let fm = COMPLETE
            .replace("difficulty: beginner", "difficulty: expert")
            .replace("publishDate: 2024-01-01", "publishDate: soon");
        let issues = check(&fm, "");
        assert_eq!(
            fields(&issues),
            vec![("difficulty", Severity::Error), ("publishDate", Severity::Error)]
        );
        assert!(issues[0].message.contains("expert"));
        assert!(issues[1].message.contains("\"soon\""));
    }

    #[test]
    fn test_related_recipes_resolution() {
        let a = doc(
            "admission-webhooks.md",
            &format!("{COMPLETE}relatedRecipes: [argocd-gitop, admission-webhooks, pod-security]\n"),
            "",
        );
        let b = doc("argocd-gitops.md", COMPLETE, "");
        let c = doc("pod-security.md", COMPLETE, "");
        let store = ContentStore::from_documents(".", vec![a.clone(), b, c]);

        let issues = validate_document(&a, &store, &SiteConfig::default());
        assert_eq!(
            fields(&issues),
            vec![
                ("relatedRecipes", Severity::Error),
                ("relatedRecipes", Severity::Warning),
            ]
        );
        assert_eq!(
            issues[0].message,
            "unknown recipe \"argocd-gitop\"; did you mean \"argocd-gitops\"?"
        );
    }

    #[test]
    fn test_undeclared_category() {
        let d = doc("sample.md", &COMPLETE.replace("storage", "storag"), "");
        let store = ContentStore::from_documents(".", vec![d.clone()]);
        let mut site = SiteConfig::default();
        assert!(validate_document(&d, &store, &site).is_empty());

        site.categories.push(CategoryConfig {
            id: "storage".to_string(),
            name: "Storage".to_string(),
            description: None,
        });
        let issues = validate_document(&d, &store, &site);
        assert_eq!(fields(&issues), vec![("category", Severity::Warning)]);
        assert!(issues[0].message.ends_with("did you mean \"storage\"?"));
    }

    #[test]
    fn test_unknown_languages_reported_once() {
        let body = "```cobol\nX\n```\n\n```cobol\nY\n```\n\n```Bash\nls\n```\n";
        let issues = check(COMPLETE, body);
        assert_eq!(fields(&issues), vec![("body", Severity::Warning)]);
        assert_eq!(issues[0].message, "unknown code fence language \"cobol\"");
    }

    #[test]
    fn test_no_tags_and_bad_slug() {
        let d = doc("Helm_Charts.md", &COMPLETE.replace("tags: [x]\n", ""), "");
        let store = ContentStore::from_documents(".", vec![d.clone()]);
        let issues = validate_document(&d, &store, &SiteConfig::default());
        assert_eq!(
            fields(&issues),
            vec![("tags", Severity::Warning), ("slug", Severity::Warning)]
        );
    }

    #[test]
    fn test_duplicate_slugs() {
        let store = ContentStore::from_documents(
            ".",
            vec![
                doc("a/helm.md", COMPLETE, ""),
                doc("b/helm.md", COMPLETE, ""),
                doc("c/helm.md", COMPLETE, ""),
            ],
        );
        let errors = detect_duplicate_slugs(&store);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].path, "b/helm.md");
        assert_eq!(errors[1].message, "duplicate slug \"helm\", first seen in a/helm.md");
    }

    #[test]
    fn test_corpus_report() {
        let store = ContentStore::from_documents(
            ".",
            vec![doc("ok.md", COMPLETE, ""), doc("partial.md", "title: P\ntags: [x]\n", "")],
        );
        let failures = vec![ContentError::MalformedFrontMatter {
            path: PathBuf::from("broken.md"),
            source: FrontMatterError::MissingClosingDelimiter,
        }];

        let report = validate_corpus(&store, &failures, &SiteConfig::default());
        assert_eq!(report.documents_checked, 2);
        assert_eq!(report.error_count(), 5);
        assert_eq!(report.warning_count(), 0);
        assert_eq!(report.issues[0].path, "broken.md");
        assert_eq!(report.issues[0].field, "front matter");
        assert!(report.has_errors(false));
    }

    #[test]
    fn test_strict_mode() {
        let store = ContentStore::from_documents(".", vec![doc("ok.md", &COMPLETE.replace("tags: [x]\n", ""), "")]);
        let report = validate_corpus(&store, &[], &SiteConfig::default());
        assert_eq!(report.error_count(), 0);
        assert_eq!(report.warning_count(), 1);
        assert!(!report.has_errors(false));
        assert!(report.has_errors(true));
    }

    #[test]
    fn test_display_format() {
        let err = ValidationError::error("recipes/hpa.md", "difficulty", "bad value");
        assert_eq!(
            err.to_string(),
            "ERROR recipes/hpa.md\n  \u{2192} difficulty: bad value"
        );
        let warn = ValidationError::warning("recipes/hpa.md", "tags", "none");
        assert!(warn.to_string().starts_with("WARNING "));
    }
}
