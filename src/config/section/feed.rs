//! `[feed]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [feed]
//! title = "Obsidian Clippings Feed"
//! link = "http://localhost:8080"
//! description = "RSS feed from Obsidian clippings"
//! author = "Obsidian User"
//! max_items = 0                   # 0 = unlimited
//! hide_description = false
//! outputs = ["feed.rss", "feed.atom", "feed.json"]
//! ```
//!
//! The format of each output is inferred from its extension.

use serde::Deserialize;
use std::path::PathBuf;

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::generator::feed::FeedFormat;
use crate::utils::path::is_contained;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedSectionConfig {
    pub title: String,
    pub link: String,
    pub description: String,
    pub author: String,
    /// Maximum number of items; `0` means unlimited.
    pub max_items: usize,
    /// Publish items with empty descriptions.
    pub hide_description: bool,
    /// Output files, relative to the output directory.
    pub outputs: Vec<PathBuf>,
}

impl FeedSectionConfig {
    pub const TITLE: FieldPath = FieldPath::new("feed.title");
    pub const OUTPUTS: FieldPath = FieldPath::new("feed.outputs");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.title.trim().is_empty() {
            diag.error(Self::TITLE, "feed title must not be empty");
        }

        if self.outputs.is_empty() {
            diag.error_with_hint(
                Self::OUTPUTS,
                "at least one output is required",
                r#"outputs = ["feed.rss", "feed.atom", "feed.json"]"#,
            );
        }

        for output in &self.outputs {
            if !is_contained(output) || output.file_name().is_none() {
                diag.error(
                    Self::OUTPUTS,
                    format!(
                        "`{}` must be a relative file path inside the output directory",
                        output.display()
                    ),
                );
            } else if let Err(e) = FeedFormat::from_path(output) {
                // Reported again on every regeneration; the other outputs still work.
                diag.warn(Self::OUTPUTS, format!("`{}`: {}", output.display(), e));
            }
        }
    }
}

impl Default for FeedSectionConfig {
    fn default() -> Self {
        Self {
            title: "Obsidian Clippings Feed".to_string(),
            link: "http://localhost:8080".to_string(),
            description: "RSS feed from Obsidian clippings".to_string(),
            author: "Obsidian User".to_string(),
            max_items: 0,
            hide_description: false,
            outputs: ["feed.rss", "feed.atom", "feed.json"]
                .into_iter()
                .map(PathBuf::from)
                .collect(),
        }
    }
}
