//! `[serve]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [serve]
//! interface = "127.0.0.1"     # Network interface (127.0.0.1 = localhost only)
//! port = 8080                 # HTTP port number
//! watch = true                # Regenerate on clipping changes
//! output = "public"           # Optional; a temporary directory when unset
//! ```
//!
//! Use `interface = "0.0.0.0"` to make the server accessible from LAN.

use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

use serde::Deserialize;

use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServeConfig {
    /// Network interface to bind.
    /// - `127.0.0.1` (default): localhost only
    /// - `0.0.0.0`: all interfaces (LAN accessible)
    pub interface: IpAddr,

    /// HTTP port number.
    pub port: u16,

    /// Enable the change watcher.
    pub watch: bool,

    /// Directory the outputs are written to and served from.
    pub output: Option<PathBuf>,
}

impl ServeConfig {
    pub const OUTPUT: FieldPath = FieldPath::new("serve.output");

    /// Requires normalized paths.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if let Some(output) = &self.output
            && output.exists()
            && !output.is_dir()
        {
            diag.error(
                Self::OUTPUT,
                format!("`{}` exists and is not a directory", output.display()),
            );
        }
    }
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            interface: IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)),
            port: 8080,
            watch: true,
            output: None,
        }
    }
}
