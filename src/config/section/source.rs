//! `[source]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [source]
//! target = "~/Obsidian/Clippings"   # Scanned recursively for .md files
//! ```

use serde::Deserialize;
use std::path::PathBuf;

use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Root directory to scan and watch.
    pub target: PathBuf,
}

impl SourceConfig {
    pub const TARGET: FieldPath = FieldPath::new("source.target");

    /// Requires normalized paths.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.target.is_dir() {
            diag.error_with_hint(
                Self::TARGET,
                format!("`{}` is not a directory", self.target.display()),
                "set [source] target, --target or FEED_TARGET_DIR",
            );
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            target: PathBuf::from("./"),
        }
    }
}
