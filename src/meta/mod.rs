//! Clipping metadata.
//!
//! - `extract` - front-matter → [`Metadata`]
//! - `select` - filter, order and cap a scanned list

pub mod extract;
pub mod select;

use std::path::Path;

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

pub use extract::parse_metadata;
pub use select::select;

/// File extension of source documents (compared case-insensitively).
pub const DOCUMENT_EXTENSION: &str = ".md";

/// Check whether a path names a source document.
pub fn has_document_extension(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| name.to_ascii_lowercase().ends_with(DOCUMENT_EXTENSION))
}

/// Metadata of a single clipping, one per source document.
///
/// # Front-matter keys
///
/// | Key           | Field         | Notes                                  |
/// |---------------|---------------|----------------------------------------|
/// | `title`       | `title`       | defaults to the file name when empty   |
/// | `site`        | `site`        |                                        |
/// | `source`      | `source`      | item link and id                       |
/// | `author`      | `authors`     | string or list                         |
/// | `published`   | `published`   | shown as written, never parsed         |
/// | `created`     | `created`     | RFC 3339 or `YYYY-MM-DD`, else mtime   |
/// | `description` | `description` |                                        |
/// | `tags`        | `tags`        | string or list                         |
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Metadata {
    #[serde(deserialize_with = "extract::scalar_string")]
    pub title: String,
    #[serde(deserialize_with = "extract::scalar_string")]
    pub site: String,
    #[serde(deserialize_with = "extract::scalar_string")]
    pub source: String,
    #[serde(rename = "author", deserialize_with = "extract::string_list")]
    pub authors: Vec<String>,
    #[serde(deserialize_with = "extract::scalar_string")]
    pub published: String,
    /// `None` is the zero timestamp: not given by the front-matter.
    #[serde(deserialize_with = "extract::timestamp")]
    pub created: Option<DateTime<FixedOffset>>,
    #[serde(deserialize_with = "extract::scalar_string")]
    pub description: String,
    #[serde(deserialize_with = "extract::string_list")]
    pub tags: Vec<String>,
}

impl Metadata {
    /// A record is published only with both a title and a source.
    pub fn is_valid(&self) -> bool {
        !self.title.is_empty() && !self.source.is_empty()
    }
}
