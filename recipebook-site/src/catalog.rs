//! Recipe catalog.
//!
//! Aggregates the front matter of every loaded recipe into the listings
//! the site is built from: entries in publication order, category, tag
//! and difficulty groupings, and reverse `relatedRecipes` links. The
//! catalog is derived data and can be rebuilt from the store at any time.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use recipebook_core::document::{Difficulty, RecipeDocument, Slug};
use recipebook_core::store::ContentStore;
use serde::Serialize;

use crate::escape::slugify;
use crate::render::reading_minutes;
use crate::urls;

/// Category key for recipes without a (usable) category.
pub const UNCATEGORIZED: &str = "uncategorized";

/// One recipe as it appears in listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    /// Recipe identifier.
    pub slug: Slug,
    /// Display title (falls back to the slug).
    pub title: String,
    /// Summary, if present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Category key (slugified category, or `uncategorized`).
    pub category: String,
    /// Parsed difficulty, if valid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    /// Tags as written.
    pub tags: Vec<String>,
    /// Parsed publication date, if valid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<NaiveDate>,
    /// Estimated reading time.
    pub reading_minutes: u32,
    /// Page URL.
    pub url: String,
    /// Related recipe slugs as written.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related_recipes: Vec<Slug>,
}

impl CatalogEntry {
    fn from_document(doc: &RecipeDocument) -> Self {
        Self {
            slug: doc.slug.clone(),
            title: doc.display_title().to_string(),
            description: doc.meta.description.clone(),
            category: category_key(doc.meta.category.as_deref()),
            difficulty: doc.meta.difficulty_level(),
            tags: doc.meta.tags.clone(),
            publish_date: doc.meta.publish_date_parsed(),
            reading_minutes: reading_minutes(&doc.body),
            url: urls::recipe(doc.slug.as_str()),
            related_recipes: doc.meta.related_recipes.clone(),
        }
    }
}

/// Conjunctive listing filter. Matching is case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct CatalogQuery {
    /// Category identifier.
    pub category: Option<String>,
    /// Tag.
    pub tag: Option<String>,
    /// Difficulty level.
    pub difficulty: Option<String>,
}

impl CatalogQuery {
    fn matches(&self, entry: &CatalogEntry) -> bool {
        let category = self
            .category
            .as_deref()
            .is_none_or(|c| category_key(Some(c)) == entry.category);
        let tag = self.tag.as_deref().is_none_or(|t| {
            let key = slugify(t);
            entry.tags.iter().any(|tag| slugify(tag) == key)
        });
        let difficulty = self.difficulty.as_deref().is_none_or(|d| {
            entry
                .difficulty
                .is_some_and(|level| level.as_str().eq_ignore_ascii_case(d.trim()))
        });
        category && tag && difficulty
    }
}

/// Aggregated view over every recipe in a store.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    by_category: BTreeMap<String, Vec<Slug>>,
    by_tag: BTreeMap<String, Vec<Slug>>,
    by_difficulty: BTreeMap<String, Vec<Slug>>,
    #[serde(skip)]
    tag_names: BTreeMap<String, String>,
    #[serde(skip)]
    backlinks: BTreeMap<Slug, Vec<Slug>>,
}

impl Catalog {
    /// Build the catalog from a store.
    ///
    /// Entries are ordered by publication date, newest first, then by
    /// slug; recipes without a valid date come last. Grouping lists
    /// follow the same order. A duplicated slug is listed once, for the
    /// document [`ContentStore::get`] returns.
    #[must_use]
    pub fn build(store: &ContentStore) -> Self {
        let mut entries: Vec<CatalogEntry> = store
            .unique_documents()
            .map(CatalogEntry::from_document)
            .collect();
        entries.sort_by(|a, b| {
            b.publish_date
                .cmp(&a.publish_date)
                .then_with(|| a.slug.cmp(&b.slug))
        });

        let mut catalog = Self::default();
        for entry in &entries {
            catalog
                .by_category
                .entry(entry.category.clone())
                .or_default()
                .push(entry.slug.clone());

            let mut seen_tags = Vec::new();
            for tag in &entry.tags {
                let key = slugify(tag);
                if key.is_empty() || seen_tags.contains(&key) {
                    continue;
                }
                catalog
                    .tag_names
                    .entry(key.clone())
                    .or_insert_with(|| tag.trim().to_string());
                catalog
                    .by_tag
                    .entry(key.clone())
                    .or_default()
                    .push(entry.slug.clone());
                seen_tags.push(key);
            }

            if let Some(level) = entry.difficulty {
                catalog
                    .by_difficulty
                    .entry(level.as_str().to_string())
                    .or_default()
                    .push(entry.slug.clone());
            }

            let mut seen_related: Vec<&Slug> = Vec::new();
            for related in &entry.related_recipes {
                if *related == entry.slug || seen_related.contains(&related) {
                    continue;
                }
                catalog
                    .backlinks
                    .entry(related.clone())
                    .or_default()
                    .push(entry.slug.clone());
                seen_related.push(related);
            }
        }

        catalog.entries = entries;
        catalog
    }

    /// All entries in catalog order.
    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Entry for a slug.
    #[must_use]
    pub fn get(&self, slug: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.slug.as_str() == slug)
    }

    /// Slugs grouped by category key.
    #[must_use]
    pub const fn by_category(&self) -> &BTreeMap<String, Vec<Slug>> {
        &self.by_category
    }

    /// Slugs grouped by tag key (slugified tag).
    #[must_use]
    pub const fn by_tag(&self) -> &BTreeMap<String, Vec<Slug>> {
        &self.by_tag
    }

    /// Slugs grouped by difficulty level.
    #[must_use]
    pub const fn by_difficulty(&self) -> &BTreeMap<String, Vec<Slug>> {
        &self.by_difficulty
    }

    /// Display text for a tag key: the first spelling seen.
    #[must_use]
    pub fn tag_name<'a>(&'a self, key: &'a str) -> &'a str {
        self.tag_names.get(key).map_or(key, String::as_str)
    }

    /// Recipes whose `relatedRecipes` reference `slug`, in catalog order.
    #[must_use]
    pub fn backlinks(&self, slug: &str) -> &[Slug] {
        self.backlinks
            .get(slug)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Entries matching every criterion of the query, in catalog order.
    #[must_use]
    pub fn filter(&self, query: &CatalogQuery) -> Vec<&CatalogEntry> {
        self.entries.iter().filter(|e| query.matches(e)).collect()
    }

    /// Resolve slugs to entries, skipping unknown ones.
    pub fn resolve<'a>(&'a self, slugs: &'a [Slug]) -> impl Iterator<Item = &'a CatalogEntry> + 'a {
        slugs.iter().filter_map(|s| self.get(s.as_str()))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pretty-printed JSON (`catalog.json`).
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Catalog key for a front-matter category.
#[must_use]
pub fn category_key(category: Option<&str>) -> String {
    match category.map(slugify) {
        Some(key) if !key.is_empty() => key,
        _ => UNCATEGORIZED.to_string(),
    }
}
