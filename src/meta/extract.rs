//! Front-matter extraction.
//!
//! Documents start with a YAML block fenced by `---` lines:
//!
//! ```text
//! ---
//! title: "item title"
//! source: "https://example.com/article"
//! author:
//!   - "[[Jane Doe]]"
//! created: 2025-06-03T12:54:50+09:00
//! tags:
//!   - clippings
//! ---
//! body...
//! ```

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Deserializer, de::Error as _};
use serde_yaml::Value;
use thiserror::Error;

use super::Metadata;

/// Front-matter extraction errors.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("no front-matter block")]
    Missing,

    #[error("front-matter block is not terminated by `---`")]
    Unterminated,

    #[error("invalid front-matter: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Parse the metadata record from document text.
pub fn parse_metadata(text: &str) -> Result<Metadata, ParseError> {
    let block = front_matter(text)?;
    if block.trim().is_empty() {
        return Ok(Metadata::default());
    }
    Ok(serde_yaml::from_str(block)?)
}

/// Locate the front-matter block.
///
/// The opening fence must be the first line (a UTF-8 BOM is tolerated);
/// the block ends at the next line consisting of `---` alone.
fn front_matter(text: &str) -> Result<&str, ParseError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut lines = text.split_inclusive('\n');
    let first = lines.next().ok_or(ParseError::Missing)?;
    if first.trim_end() != "---" {
        return Err(ParseError::Missing);
    }

    let start = first.len();
    let mut offset = start;
    for line in lines {
        if line.trim_end() == "---" {
            return Ok(&text[start..offset]);
        }
        offset += line.len();
    }

    Err(ParseError::Unterminated)
}

// ============================================================================
// Field deserializers
// ============================================================================

/// Any YAML scalar as a string; `null` is empty.
pub(super) fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    value_to_string(value).ok_or_else(|| D::Error::custom("expected a scalar value"))
}

/// A single scalar or a sequence of scalars; `null` is empty.
pub(super) fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(Vec::new()),
        Value::Sequence(items) => items
            .into_iter()
            .filter(|item| !item.is_null())
            .map(|item| {
                value_to_string(item)
                    .ok_or_else(|| D::Error::custom("expected a list of scalar values"))
            })
            .collect(),
        scalar => value_to_string(scalar)
            .map(|s| if s.is_empty() { Vec::new() } else { vec![s] })
            .ok_or_else(|| D::Error::custom("expected a scalar or a list")),
    }
}

/// RFC 3339 timestamp or `YYYY-MM-DD` date (midnight UTC); `null` is unset.
pub(super) fn timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<FixedOffset>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match Value::deserialize(deserializer)? {
        Value::Null => return Ok(None),
        Value::String(s) => s,
        _ => return Err(D::Error::custom("expected a timestamp string")),
    };

    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    parse_timestamp(raw)
        .map(Some)
        .ok_or_else(|| D::Error::custom(format!("invalid timestamp `{raw}`")))
}

fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc().fixed_offset())
}

fn value_to_string(value: Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::String(s) => Some(s),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Tagged(tagged) => value_to_string(tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => None,
    }
}
