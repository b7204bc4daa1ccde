//! `[watch]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [watch]
//! debounce_ms = 10000    # Quiet period after the last change
//! ```

use serde::Deserialize;
use std::time::Duration;

use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Quiet period in milliseconds; a regeneration runs this long after
    /// the last qualifying change.
    pub debounce_ms: u64,
}

impl WatchConfig {
    pub const DEBOUNCE_MS: FieldPath = FieldPath::new("watch.debounce_ms");

    pub const fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.debounce_ms == 0 {
            diag.error_with_hint(
                Self::DEBOUNCE_MS,
                "debounce must be positive",
                "the default is 10000 (10 seconds)",
            );
        }
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self { debounce_ms: 10_000 }
    }
}
