//! Front-matter extraction, parsing and serialization.
//!
//! A recipe opens with a YAML block delimited by lines containing exactly
//! `---`. Values are restricted to scalars and lists of scalars. Key order
//! is preserved so a parsed block serializes back in source order.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;
use serde::de::{DeserializeSeed, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde_yaml::Value;
use thiserror::Error;

/// Line that opens and closes the front-matter block.
pub const DELIMITER: &str = "---";

/// Errors produced while splitting or parsing a front-matter block.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrontMatterError {
    /// The first line of the file is not `---`.
    #[error("missing opening `---` delimiter on the first line")]
    MissingOpeningDelimiter,

    /// No `---` line terminates the block.
    #[error("missing closing `---` delimiter")]
    MissingClosingDelimiter,

    /// The block is not valid YAML.
    #[error("invalid YAML: {0}")]
    InvalidYaml(String),

    /// The block is valid YAML but not a mapping.
    #[error("front matter must be a mapping of keys to values")]
    NotAMapping,

    /// A value is a nested mapping or a list holding non-scalars.
    #[error("unsupported value for '{key}': only strings and lists of strings are allowed")]
    UnsupportedValue {
        /// Key holding the offending value
        key: String,
    },
}

/// A single front-matter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FrontMatterValue {
    /// A scalar, kept in its textual form.
    Scalar(String),
    /// A sequence of scalars.
    List(Vec<String>),
}

impl FrontMatterValue {
    /// Returns the scalar text, or `None` for lists.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => Some(s),
            Self::List(_) => None,
        }
    }

    /// Returns the value as a list. A non-empty scalar becomes a
    /// one-element list.
    #[must_use]
    pub fn to_list(&self) -> Vec<String> {
        match self {
            Self::Scalar(s) if s.trim().is_empty() => Vec::new(),
            Self::Scalar(s) => vec![s.clone()],
            Self::List(items) => items.clone(),
        }
    }
}

/// Ordered key/value mapping parsed from a front-matter block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FrontMatter {
    entries: IndexMap<String, FrontMatterValue>,
}

impl FrontMatter {
    /// Parse the YAML text between the delimiters.
    ///
    /// Numbers and booleans keep their textual form; `null` entries are
    /// dropped. An empty block yields an empty mapping.
    ///
    /// # Errors
    ///
    /// Returns `FrontMatterError` if the text is not YAML, not a mapping,
    /// or holds nested structures.
    pub fn parse(yaml: &str) -> Result<Self, FrontMatterError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let value: Value =
            serde_yaml::from_str(yaml).map_err(|e| FrontMatterError::InvalidYaml(e.to_string()))?;

        let mapping = match value {
            Value::Mapping(mapping) => mapping,
            Value::Null => return Ok(Self::default()),
            _ => return Err(FrontMatterError::NotAMapping),
        };

        let mut shapes = Vec::with_capacity(mapping.len());
        for (key, value) in &mapping {
            if !is_scalar(key) {
                return Err(FrontMatterError::NotAMapping);
            }
            let shape = match value {
                Value::Null => Shape::Skip,
                Value::Sequence(items) if items.iter().all(is_scalar) => Shape::List,
                other if is_scalar(other) => Shape::Scalar,
                _ => {
                    return Err(FrontMatterError::UnsupportedValue {
                        key: scalar_label(key),
                    });
                }
            };
            shapes.push(shape);
        }

        // Second pass over the same text: scalars are read as strings so
        // `1.30` stays `1.30` instead of going through a float.
        let entries = ShapedBlock(&shapes)
            .deserialize(serde_yaml::Deserializer::from_str(yaml))
            .map_err(|e| FrontMatterError::InvalidYaml(e.to_string()))?;

        Ok(Self { entries })
    }

    /// Look up a value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FrontMatterValue> {
        self.entries.get(key)
    }

    /// Look up a scalar by key. Lists yield `None`.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(FrontMatterValue::as_str)
    }

    /// Look up a list by key. Missing keys yield an empty list.
    #[must_use]
    pub fn get_list(&self, key: &str) -> Vec<String> {
        self.get(key).map(FrontMatterValue::to_list).unwrap_or_default()
    }

    /// Insert or replace a value, keeping the original position of an
    /// existing key.
    pub fn insert(&mut self, key: impl Into<String>, value: FrontMatterValue) {
        self.entries.insert(key.into(), value);
    }

    /// Keys in source order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FrontMatterValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the block has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize back to a delimited block (`---` ... `---`, no trailing
    /// newline). Scalars are written plain when they read back unchanged,
    /// double-quoted otherwise.
    #[must_use]
    pub fn to_yaml_block(&self) -> String {
        let mut lines = Vec::with_capacity(self.entries.len() + 2);
        lines.push(DELIMITER.to_string());

        for (key, value) in &self.entries {
            let key = quote_yaml_string(key);
            match value {
                FrontMatterValue::Scalar(s) => {
                    lines.push(format!("{key}: {}", quote_yaml_string(s)));
                }
                FrontMatterValue::List(items) if items.is_empty() => {
                    lines.push(format!("{key}: []"));
                }
                FrontMatterValue::List(items) => {
                    lines.push(format!("{key}:"));
                    for item in items {
                        lines.push(format!("  - {}", quote_yaml_string(item)));
                    }
                }
            }
        }

        lines.push(DELIMITER.to_string());
        lines.join("\n")
    }
}

/// Split raw file text into the YAML block and the Markdown body.
///
/// A leading BOM is ignored and delimiter lines may carry trailing
/// whitespace (including `\r`). The body starts on the line after the
/// closing delimiter.
///
/// # Errors
///
/// Returns `MissingOpeningDelimiter` if the first line is not `---` and
/// `MissingClosingDelimiter` if no later line is.
pub fn split_front_matter(raw: &str) -> Result<(&str, &str), FrontMatterError> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let (first, rest) = raw.split_once('\n').unwrap_or((raw, ""));

    if !is_delimiter(first) {
        return Err(FrontMatterError::MissingOpeningDelimiter);
    }

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if is_delimiter(line) {
            return Ok((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }

    Err(FrontMatterError::MissingClosingDelimiter)
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == DELIMITER
}

fn is_scalar(value: &Value) -> bool {
    match value {
        Value::String(_) | Value::Number(_) | Value::Bool(_) => true,
        Value::Tagged(tagged) => is_scalar(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => false,
    }
}

/// Key text for error messages.
fn scalar_label(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Tagged(tagged) => scalar_label(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => String::new(),
    }
}

/// How each mapping entry is read on the second pass, in source order.
#[derive(Debug, Clone, Copy)]
enum Shape {
    Skip,
    Scalar,
    List,
}

/// Reads a mapping whose entry shapes are already known, taking every
/// scalar as its source text.
struct ShapedBlock<'a>(&'a [Shape]);

impl<'de> DeserializeSeed<'de> for ShapedBlock<'_> {
    type Value = IndexMap<String, FrontMatterValue>;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_map(self)
    }
}

impl<'de> Visitor<'de> for ShapedBlock<'_> {
    type Value = IndexMap<String, FrontMatterValue>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a mapping of keys to scalars or lists of scalars")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut entries = IndexMap::with_capacity(self.0.len());
        for shape in self.0 {
            let Some(key) = map.next_key::<String>()? else {
                break;
            };
            let value = match shape {
                Shape::Skip => {
                    map.next_value::<IgnoredAny>()?;
                    continue;
                }
                Shape::Scalar => FrontMatterValue::Scalar(map.next_value()?),
                Shape::List => FrontMatterValue::List(map.next_value()?),
            };
            entries.insert(key, value);
        }
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(entries)
    }
}

/// Quote a YAML string value unless its plain form parses back to the
/// same string.
fn quote_yaml_string(s: &str) -> String {
    if reads_back_plain(s) {
        s.to_string()
    } else {
        double_quote(s)
    }
}

fn reads_back_plain(s: &str) -> bool {
    if s.is_empty() || s.chars().any(|c| c.is_control() || is_unicode_break(c)) {
        return false;
    }
    matches!(serde_yaml::from_str::<Value>(s), Ok(Value::String(parsed)) if parsed == s)
}

fn double_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() || is_unicode_break(c) => {
                out.push_str(&format!("\\u{:04X}", u32::from(c)));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

const fn is_unicode_break(c: char) -> bool {
    matches!(c, '\u{2028}' | '\u{2029}' | '\u{feff}')
}
