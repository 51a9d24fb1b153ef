//! Typed view over recipe front matter.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;

use super::Slug;
use super::frontmatter::FrontMatter;

/// Front-matter keys recognised by the pipeline.
pub mod keys {
    /// Human-readable heading.
    pub const TITLE: &str = "title";
    /// Summary for listings and the description meta tag.
    pub const DESCRIPTION: &str = "description";
    /// Listing category.
    pub const CATEGORY: &str = "category";
    /// One of beginner, intermediate, advanced.
    pub const DIFFICULTY: &str = "difficulty";
    /// Publication date.
    pub const PUBLISH_DATE: &str = "publishDate";
    /// Free-form tags.
    pub const TAGS: &str = "tags";
    /// Estimated time to complete, free text.
    pub const TIME_TO_COMPLETE: &str = "timeToComplete";
    /// Kubernetes version the recipe was written against.
    pub const KUBERNETES_VERSION: &str = "kubernetesVersion";
    /// Things the reader needs before starting.
    pub const PREREQUISITES: &str = "prerequisites";
    /// Slugs of related recipes.
    pub const RELATED_RECIPES: &str = "relatedRecipes";
    /// Recipe author.
    pub const AUTHOR: &str = "author";

    /// Keys every publishable recipe must carry.
    pub const REQUIRED: [&str; 5] = [TITLE, DESCRIPTION, CATEGORY, DIFFICULTY, PUBLISH_DATE];
}

/// Recipe difficulty level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// No prior cluster experience assumed
    Beginner,
    /// Comfortable with core Kubernetes objects
    Intermediate,
    /// Operates clusters and extends the API
    Advanced,
}

impl Difficulty {
    /// All levels, easiest first.
    pub const ALL: [Self; 3] = [Self::Beginner, Self::Intermediate, Self::Advanced];

    /// Lowercase identifier used in front matter and URLs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    /// Capitalised display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a difficulty string is not a known level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDifficulty(pub String);

impl fmt::Display for UnknownDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown difficulty \"{}\", expected one of beginner, intermediate, advanced",
            self.0
        )
    }
}

impl std::error::Error for UnknownDifficulty {}

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            _ => Err(UnknownDifficulty(s.to_string())),
        }
    }
}

/// Typed recipe metadata.
///
/// Every field is optional so partially filled recipes still load; the
/// validator reports what is missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeMeta {
    /// Human-readable heading.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Summary for listings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Listing category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Difficulty as written; see [`RecipeMeta::difficulty_level`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,

    /// Publication date as written; see [`RecipeMeta::publish_date_parsed`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<String>,

    /// Free-form tags in source order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Estimated time to complete.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_to_complete: Option<String>,

    /// Target Kubernetes version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kubernetes_version: Option<String>,

    /// Prerequisites in source order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub prerequisites: Vec<String>,

    /// Slugs of related recipes.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related_recipes: Vec<Slug>,

    /// Recipe author.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl RecipeMeta {
    /// Build the typed view from a parsed front-matter block.
    #[must_use]
    pub fn from_front_matter(fm: &FrontMatter) -> Self {
        let text = |key: &str| {
            fm.get_str(key)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        Self {
            title: text(keys::TITLE),
            description: text(keys::DESCRIPTION),
            category: text(keys::CATEGORY),
            difficulty: text(keys::DIFFICULTY),
            publish_date: text(keys::PUBLISH_DATE),
            tags: fm.get_list(keys::TAGS),
            time_to_complete: text(keys::TIME_TO_COMPLETE),
            kubernetes_version: text(keys::KUBERNETES_VERSION),
            prerequisites: fm.get_list(keys::PREREQUISITES),
            related_recipes: fm
                .get_list(keys::RELATED_RECIPES)
                .into_iter()
                .map(|s| Slug::new(s.trim()))
                .collect(),
            author: text(keys::AUTHOR),
        }
    }

    /// Parsed difficulty, `None` when absent or unknown.
    #[must_use]
    pub fn difficulty_level(&self) -> Option<Difficulty> {
        self.difficulty.as_deref().and_then(|d| d.parse().ok())
    }

    /// Parsed publication date, `None` when absent or unparsable.
    #[must_use]
    pub fn publish_date_parsed(&self) -> Option<NaiveDate> {
        self.publish_date.as_deref().and_then(parse_date)
    }
}

/// Parse `YYYY-MM-DD`, an RFC 3339 timestamp, or a naive `YYYY-MM-DDTHH:MM:SS`.
#[must_use]
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|d| d.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|d| d.date())
        })
}
