//! On-disk content store.
//!
//! Discovers recipe files below a content directory, reads and parses
//! them. Discovery is sorted by path so every load sees the same order.
//! Files that fail to read or parse are collected in the load report
//! rather than aborting the load.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::document::{RecipeDocument, Slug};
use crate::error::ContentError;
use crate::suggest::closest_match;

/// Default discovery pattern, relative to the content directory.
pub const DEFAULT_PATTERN: &str = "**/*.md";

/// Default per-file size limit (1 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024;

/// Options controlling discovery.
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// Glob pattern relative to the content directory.
    pub pattern: String,

    /// Files larger than this are rejected before parsing.
    pub max_file_size: u64,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.to_string(),
            max_file_size: env_or("RECIPEBOOK_MAX_FILE_SIZE", DEFAULT_MAX_FILE_SIZE),
        }
    }
}

/// Result of loading a content directory.
#[derive(Debug)]
pub struct LoadReport {
    /// Successfully parsed documents.
    pub store: ContentStore,

    /// Files that could not be read or parsed.
    pub failures: Vec<ContentError>,
}

/// The set of recipe documents, in path order.
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    root: PathBuf,
    documents: Vec<RecipeDocument>,
}

impl ContentStore {
    /// Load every recipe below `root`.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::ContentDirNotFound` if `root` is not a
    /// directory and `ContentError::InvalidPattern` if the discovery
    /// pattern does not compile. Per-file failures land in
    /// [`LoadReport::failures`].
    pub fn load(root: &Path, options: &StoreOptions) -> Result<LoadReport, ContentError> {
        if !root.is_dir() {
            return Err(ContentError::ContentDirNotFound {
                path: root.to_path_buf(),
            });
        }

        let pattern = format!(
            "{}/{}",
            glob::Pattern::escape(&root.to_string_lossy()),
            options.pattern
        );
        let entries = glob::glob(&pattern).map_err(|e| ContentError::InvalidPattern {
            pattern: pattern.clone(),
            message: e.to_string(),
        })?;

        let mut failures = Vec::new();
        let mut paths = Vec::new();
        for entry in entries {
            match entry {
                Ok(path) if path.is_file() => paths.push(path),
                Ok(_) => {}
                Err(e) => failures.push(ContentError::Io {
                    path: e.path().to_path_buf(),
                    source: e.into_error(),
                }),
            }
        }
        paths.sort();

        let mut documents = Vec::with_capacity(paths.len());
        for path in paths {
            match read_document(&path, options.max_file_size) {
                Ok(doc) => documents.push(doc),
                Err(e) => failures.push(e),
            }
        }

        Ok(LoadReport {
            store: Self {
                root: root.to_path_buf(),
                documents,
            },
            failures,
        })
    }

    /// Build a store from already parsed documents, keeping their order.
    #[must_use]
    pub fn from_documents(root: impl Into<PathBuf>, documents: Vec<RecipeDocument>) -> Self {
        Self {
            root: root.into(),
            documents,
        }
    }

    /// Content directory the store was loaded from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All documents in path order.
    #[must_use]
    pub fn documents(&self) -> &[RecipeDocument] {
        &self.documents
    }

    /// Documents in path order, keeping only the first of each slug (the
    /// one [`ContentStore::get`] returns).
    pub fn unique_documents(&self) -> impl Iterator<Item = &RecipeDocument> {
        let mut seen = HashSet::new();
        self.documents
            .iter()
            .filter(move |d| seen.insert(d.slug.as_str()))
    }

    /// First document with the given slug.
    #[must_use]
    pub fn get(&self, slug: &str) -> Option<&RecipeDocument> {
        self.documents.iter().find(|d| d.slug.as_str() == slug)
    }

    /// Returns `true` if a document with this slug exists.
    #[must_use]
    pub fn contains(&self, slug: &str) -> bool {
        self.get(slug).is_some()
    }

    /// Slugs in path order (duplicates included).
    pub fn slugs(&self) -> impl Iterator<Item = &Slug> {
        self.documents.iter().map(|d| &d.slug)
    }

    /// Closest existing slug for typo correction.
    #[must_use]
    pub fn suggest(&self, slug: &str) -> Option<String> {
        closest_match(slug, self.slugs().map(Slug::as_str))
    }

    /// Number of documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns `true` if no documents were loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

fn read_document(path: &Path, max_file_size: u64) -> Result<RecipeDocument, ContentError> {
    let io_error = |source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    };

    let size = fs::metadata(path).map_err(io_error)?.len();
    if size > max_file_size {
        return Err(ContentError::FileTooLarge {
            path: path.to_path_buf(),
            size,
            limit: max_file_size,
        });
    }

    let raw = fs::read_to_string(path).map_err(io_error)?;
    RecipeDocument::parse(path, &raw)
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
