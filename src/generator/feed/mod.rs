//! Feed generation (RSS, Atom, JSON Feed).
//!
//! [`build_feed`] maps the selected metadata to one in-memory [`Feed`];
//! [`render`] serializes it:
//!
//! - **RSS 2.0**: `feed.rss`
//! - **Atom 1.0**: `feed.atom`
//! - **JSON Feed 1.1**: `feed.json`

pub mod atom;
mod format;
pub mod json;
pub mod rss;

use chrono::{DateTime, FixedOffset};
use thiserror::Error;

use crate::meta::Metadata;

pub use format::FeedFormat;

/// Feed rendering errors.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("unsupported feed format `{0}` (supported: rss, atom, json)")]
    UnsupportedFormat(String),

    #[error("RSS serialization failed: {0}")]
    Rss(#[from] ::rss::Error),

    #[error("Atom serialization failed: {0}")]
    Atom(#[from] ::atom_syndication::Error),

    #[error("JSON Feed serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Feed-level settings, fixed for one regeneration.
#[derive(Debug, Clone)]
pub struct FeedSettings {
    pub title: String,
    pub link: String,
    pub description: String,
    pub author: String,
    pub created: DateTime<FixedOffset>,
    /// `0` means unlimited.
    pub max_items: usize,
    pub hide_description: bool,
}

/// In-memory feed shared by every renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Feed {
    pub title: String,
    pub link: String,
    pub description: String,
    pub author: String,
    pub created: DateTime<FixedOffset>,
    pub items: Vec<FeedItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    /// Always equal to `link`; existing subscribers key on it.
    pub id: String,
    pub author: String,
    pub description: String,
    pub created: Option<DateTime<FixedOffset>>,
}

/// Build the feed from already selected metadata.
pub fn build_feed(metadata: &[Metadata], settings: &FeedSettings) -> Feed {
    Feed {
        title: settings.title.clone(),
        link: settings.link.clone(),
        description: settings.description.clone(),
        author: settings.author.clone(),
        created: settings.created,
        items: metadata
            .iter()
            .map(|meta| FeedItem {
                title: meta.title.clone(),
                link: meta.source.clone(),
                id: meta.source.clone(),
                author: meta.authors.join(", "),
                description: describe(meta, settings.hide_description),
                created: meta.created,
            })
            .collect(),
    }
}

/// Compose an item description.
///
/// Order is fixed: description, authors, tags, site. Tags are rendered as
/// `[a b]`, matching feeds already published by earlier versions.
pub fn describe(meta: &Metadata, hide_description: bool) -> String {
    if hide_description {
        return String::new();
    }

    let mut description = meta.description.clone();
    if !meta.authors.is_empty() {
        description.push_str(&format!("\n\nAuthor(s): {}", meta.authors.join(", ")));
    }
    if !meta.tags.is_empty() {
        description.push_str(&format!("\n\nTags: [{}]", meta.tags.join(" ")));
    }
    if !meta.site.is_empty() {
        description.push_str(&format!("\n\nSite: {}", meta.site));
    }
    description
}

/// Serialize the feed in the given format.
pub fn render(feed: &Feed, format: FeedFormat) -> Result<Vec<u8>, FeedError> {
    match format {
        FeedFormat::Rss => rss::render(feed),
        FeedFormat::Atom => atom::render(feed),
        FeedFormat::Json => json::render(feed),
    }
}
