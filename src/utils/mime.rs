//! MIME type detection for served output files.

use std::path::Path;

/// MIME types of the files a regeneration writes.
pub mod types {
    pub const HTML: &str = "text/html; charset=utf-8";
    pub const PLAIN: &str = "text/plain; charset=utf-8";

    // Web feeds
    pub const RSS: &str = "application/rss+xml";
    pub const ATOM: &str = "application/atom+xml";
    pub const FEED_JSON: &str = "application/feed+json";

    pub const OCTET_STREAM: &str = "application/octet-stream";
}

/// Guess MIME type from file extension.
///
/// `.json` is served as JSON Feed: the output directory holds nothing else.
pub fn from_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("html" | "htm") => types::HTML,
        Some("rss") => types::RSS,
        Some("atom") => types::ATOM,
        Some("json") => types::FEED_JSON,
        _ => types::OCTET_STREAM,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_feed_types() {
        assert_eq!(from_path(&PathBuf::from("feed.rss")), "application/rss+xml");
        assert_eq!(from_path(&PathBuf::from("feed.atom")), "application/atom+xml");
        assert_eq!(from_path(&PathBuf::from("feed.json")), "application/feed+json");
    }

    #[test]
    fn test_from_path() {
        assert_eq!(from_path(&PathBuf::from("index.html")), types::HTML);
        assert_eq!(from_path(&PathBuf::from("INDEX.HTML")), types::HTML);
        assert_eq!(from_path(&PathBuf::from("unknown.xyz")), types::OCTET_STREAM);
        assert_eq!(from_path(&PathBuf::from("style.css")), types::OCTET_STREAM);
        assert_eq!(from_path(&PathBuf::from("noext")), types::OCTET_STREAM);
    }
}
