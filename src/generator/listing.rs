//! Listing page (`index.html`).
//!
//! A human-readable view of the same selected list the feeds carry.

use std::fmt::Write as _;
use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, Local};

use crate::embed::listing::{INDEX_HTML, ITEM_HTML, IndexVars, ItemVars};
use crate::generator::feed::FeedFormat;
use crate::meta::Metadata;
use crate::utils::html::{escape, escape_attr};

/// How the outputs are kept up to date; shown in the page footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    Watcher,
    OneShot,
}

impl UpdateMode {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Watcher => "file watcher",
            Self::OneShot => "one-shot build",
        }
    }
}

/// Page-level values for [`render_index`].
#[derive(Debug, Clone)]
pub struct ListingVars<'a> {
    pub title: &'a str,
    pub description: &'a str,
    /// Configured feed outputs, relative to the output directory.
    pub outputs: &'a [PathBuf],
    pub target_dir: &'a Path,
    pub updated: DateTime<Local>,
    pub mode: UpdateMode,
}

/// Render the listing page for `metadata`.
pub fn render_index(metadata: &[Metadata], vars: &ListingVars<'_>) -> String {
    let items: String = metadata.iter().map(render_item).collect();
    let target_dir = vars.target_dir.display().to_string();

    INDEX_HTML.render(&IndexVars {
        title: &escape(vars.title),
        description: &escape(vars.description),
        feed_links: &feed_links(vars.outputs),
        item_count: &metadata.len().to_string(),
        target_dir: &escape(&target_dir),
        items: &items,
        last_updated: &vars.updated.format("%Y-%m-%d %H:%M:%S").to_string(),
        update_mode: vars.mode.label(),
    })
}

fn render_item(meta: &Metadata) -> String {
    let authors = if meta.authors.is_empty() {
        "Unknown".to_string()
    } else {
        meta.authors.join(", ")
    };
    let tags = if meta.tags.is_empty() {
        "No tags".to_string()
    } else {
        meta.tags.join(", ")
    };

    ITEM_HTML.render(&ItemVars {
        title: &escape(&meta.title),
        source: &escape_attr(&meta.source),
        authors: &escape(&authors),
        site: &escape(&meta.site),
        published: &escape(&meta.published),
        description: &escape(&meta.description),
        tags: &escape(&tags),
    })
}

/// One link per output with a known format; unsupported outputs are never
/// written, so they get no link.
fn feed_links(outputs: &[PathBuf]) -> String {
    let mut links = String::new();
    for output in outputs {
        let Ok(format) = FeedFormat::from_path(output) else {
            continue;
        };
        let _ = writeln!(
            links,
            r#"        <a href="{}">{}</a>"#,
            escape_attr(&url_path(output)),
            format.label()
        );
    }
    links
}

/// Relative URL for an output path, `/`-separated on every platform.
fn url_path(path: &Path) -> String {
    let segments: Vec<_> = path
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy()),
            _ => None,
        })
        .collect();
    segments.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn outputs() -> Vec<PathBuf> {
        ["feed.rss", "feed.atom", "feed.json"]
            .into_iter()
            .map(PathBuf::from)
            .collect()
    }

    fn render(metadata: &[Metadata], mode: UpdateMode) -> String {
        let outputs = outputs();
        let vars = ListingVars {
            title: "Clippings",
            description: "Saved <articles>",
            outputs: &outputs,
            target_dir: Path::new("/vault/Clippings"),
            updated: Local.with_ymd_and_hms(2025, 6, 3, 9, 5, 7).unwrap(),
            mode,
        };
        render_index(metadata, &vars)
    }

    fn meta(title: &str) -> Metadata {
        Metadata {
            title: title.to_string(),
            source: format!("https://example.com/{title}"),
            ..Default::default()
        }
    }

    #[test]
    fn test_header_and_footer() {
        let html = render(&[], UpdateMode::Watcher);
        assert!(html.contains("<h1>Clippings</h1>"));
        assert!(html.contains("Saved &lt;articles&gt;"));
        assert!(html.contains("0 items found in directory: /vault/Clippings"));
        assert!(html.contains("Last updated: 2025-06-03 09:05:07 (update mode: file watcher)"));
        assert!(!html.contains("__"));
    }

    #[test]
    fn test_one_shot_mode_label() {
        let html = render(&[], UpdateMode::OneShot);
        assert!(html.contains("(update mode: one-shot build)"));
    }

    #[test]
    fn test_feed_links() {
        let html = render(&[], UpdateMode::Watcher);
        assert!(html.contains(r#"<a href="feed.rss">RSS</a>"#));
        assert!(html.contains(r#"<a href="feed.atom">Atom</a>"#));
        assert!(html.contains(r#"<a href="feed.json">JSON</a>"#));
    }

    #[test]
    fn test_unsupported_outputs_not_linked() {
        let links = feed_links(&[PathBuf::from("feed.xml"), PathBuf::from("sub/feed.rss")]);
        assert!(!links.contains("feed.xml"));
        assert!(links.contains(r#"href="sub/feed.rss""#));
    }

    #[test]
    fn test_item_fallbacks() {
        let html = render(&[meta("plain")], UpdateMode::Watcher);
        assert!(html.contains("1 items found"));
        assert!(html.contains(r#"<a href="https://example.com/plain" target="_blank">plain</a>"#));
        assert!(html.contains("Author(s): Unknown"));
        assert!(html.contains("Tags: No tags"));
    }

    #[test]
    fn test_item_fields() {
        let mut item = meta("full");
        item.authors = vec!["A".into(), "B".into()];
        item.tags = vec!["x".into(), "y".into()];
        item.site = "s.com".into();
        item.published = "2025-06-01".into();
        item.description = "desc".into();

        let html = render(&[item], UpdateMode::Watcher);
        assert!(html.contains("Author(s): A, B | Site: s.com | Published: 2025-06-01"));
        assert!(html.contains(r#"<div class="item-desc">desc</div>"#));
        assert!(html.contains("Tags: x, y"));
    }

    #[test]
    fn test_values_are_escaped() {
        let mut item = meta("x");
        item.title = "<b>bold</b> & __ITEMS__".into();
        item.source = r#"https://e.com/?q="1"&r=2"#.into();

        let html = render(&[item], UpdateMode::Watcher);
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt; &amp; __ITEMS__"));
        assert!(html.contains(r#"href="https://e.com/?q=&quot;1&quot;&amp;r=2""#));
        assert!(!html.contains("<b>bold</b>"));
    }

    #[test]
    fn test_items_in_given_order() {
        let html = render(&[meta("first"), meta("second")], UpdateMode::Watcher);
        let first = html.find(">first<").unwrap();
        let second = html.find(">second<").unwrap();
        assert!(first < second);
    }
}
