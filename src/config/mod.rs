//! Configuration management for `clippings-feed.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── feed       # [feed]
//! │   ├── serve      # [serve]
//! │   ├── source     # [source]
//! │   └── watch      # [watch]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # FeedConfig (this file)
//! ```
//!
//! The file is optional. Values are layered: built-in defaults, then the
//! file, then command-line flags (which also read `FEED_*` environment
//! variables). Relative paths in the file resolve against the file's
//! directory; relative paths from the command line resolve against the
//! working directory.

pub mod section;
pub mod types;

pub use section::{FeedSectionConfig, ServeConfig, SourceConfig, WatchConfig};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::cli::{Cli, FeedArgs, ServeArgs};
use crate::utils::path::normalize_path;
use crate::{debug, log};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// `build` output directory when none is configured, relative to the root.
pub const DEFAULT_BUILD_OUTPUT: &str = "public";

/// Root configuration structure representing clippings-feed.toml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedConfig {
    /// Absolute path to the config file, whether or not it exists (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Base for relative paths in the file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub feed: FeedSectionConfig,

    #[serde(default)]
    pub serve: ServeConfig,

    #[serde(default)]
    pub watch: WatchConfig,
}

impl FeedConfig {
    /// Load configuration from CLI arguments.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        let config_path = normalize_path(&cwd.join(&cli.config));

        let mut config = if config_path.is_file() {
            debug!("config"; "loading {}", config_path.display());
            Self::from_path(&config_path)?
        } else {
            debug!("config"; "{} not found, using defaults", config_path.display());
            Self::default()
        };

        config.root = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| cwd.clone());
        config.config_path = config_path;

        config.normalize_paths();
        config.apply_cli(cli, &cwd);
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {} are ignored:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-line overrides (flags and `FEED_*` variables).
    fn apply_cli(&mut self, cli: &Cli, cwd: &Path) {
        crate::logger::set_verbose(cli.verbose);

        if let Some(target) = &cli.target {
            self.source.target = resolve(target, cwd);
        }
        if let Some(output) = &cli.output {
            self.serve.output = Some(resolve(output, cwd));
        }

        self.apply_feed_args(&cli.feed);
        self.apply_serve_args(&cli.serve);
    }

    fn apply_feed_args(&mut self, args: &FeedArgs) {
        let feed = &mut self.feed;
        Self::update_option(&mut feed.title, args.title.as_ref());
        Self::update_option(&mut feed.link, args.link.as_ref());
        Self::update_option(&mut feed.description, args.description.as_ref());
        Self::update_option(&mut feed.author, args.author.as_ref());
        Self::update_option(&mut feed.max_items, args.max_items.as_ref());
        Self::update_option(&mut feed.hide_description, args.hide_description.as_ref());
    }

    fn apply_serve_args(&mut self, args: &ServeArgs) {
        Self::update_option(&mut self.serve.interface, args.interface.as_ref());
        Self::update_option(&mut self.serve.port, args.port.as_ref());
        Self::update_option(&mut self.serve.watch, args.watch.as_ref());

        if let Some(debounce) = args.debounce {
            self.watch.debounce_ms = u64::try_from(debounce.as_millis()).unwrap_or(u64::MAX);
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // path normalization
    // ========================================================================

    /// Resolve file paths against the config file's directory.
    fn normalize_paths(&mut self) {
        self.source.target = resolve(&self.source.target, &self.root);
        if let Some(output) = self.serve.output.take() {
            self.serve.output = Some(resolve(&output, &self.root));
        }
    }

    /// Output directory for `build`: the configured one, else `<root>/public`.
    pub fn build_output_dir(&self) -> PathBuf {
        self.serve
            .output
            .clone()
            .unwrap_or_else(|| self.root.join(DEFAULT_BUILD_OUTPUT))
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate the final configuration, reporting every problem at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.source.validate(&mut diag);
        self.feed.validate(&mut diag);
        self.serve.validate(&mut diag);
        self.watch.validate(&mut diag);

        diag.print_warnings();
        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

/// Expand `~` and make `path` absolute against `base`.
fn resolve(path: &Path, base: &Path) -> PathBuf {
    let expanded = match path.to_str() {
        Some(s) => PathBuf::from(shellexpand::tilde(s).into_owned()),
        None => path.to_path_buf(),
    };
    let full_path = if expanded.is_relative() {
        base.join(expanded)
    } else {
        expanded
    };
    normalize_path(&full_path)
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config text.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> FeedConfig {
    let (parsed, ignored) = FeedConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
