//! JSON Feed 1.1 rendering.
//!
//! See <https://www.jsonfeed.org/version/1.1/>.

use serde::Serialize;

use super::{Feed, FeedError, FeedItem};

const VERSION: &str = "https://jsonfeed.org/version/1.1";

#[derive(Debug, Serialize)]
struct JsonFeed<'a> {
    version: &'static str,
    title: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    home_page_url: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    authors: Vec<JsonAuthor<'a>>,
    items: Vec<JsonItem<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonAuthor<'a> {
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct JsonItem<'a> {
    id: &'a str,
    url: &'a str,
    title: &'a str,
    /// `content_text` is required when there is no HTML content.
    content_text: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    summary: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    date_published: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    authors: Vec<JsonAuthor<'a>>,
}

/// Render the feed as a JSON Feed 1.1 document.
pub fn render(feed: &Feed) -> Result<Vec<u8>, FeedError> {
    let doc = JsonFeed {
        version: VERSION,
        title: &feed.title,
        home_page_url: &feed.link,
        description: &feed.description,
        authors: authors(&feed.author),
        items: feed.items.iter().map(to_item).collect(),
    };
    Ok(serde_json::to_vec_pretty(&doc)?)
}

fn to_item(item: &FeedItem) -> JsonItem<'_> {
    JsonItem {
        id: &item.id,
        url: &item.link,
        title: &item.title,
        content_text: &item.description,
        summary: &item.description,
        date_published: item.created.map(|dt| dt.to_rfc3339()),
        authors: authors(&item.author),
    }
}

fn authors(name: &str) -> Vec<JsonAuthor<'_>> {
    if name.is_empty() {
        Vec::new()
    } else {
        vec![JsonAuthor { name }]
    }
}
