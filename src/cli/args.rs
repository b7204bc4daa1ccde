//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Feed generator for Obsidian web clippings
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (optional; defaults apply when missing)
    #[arg(short = 'C', long, global = true, default_value = "clippings-feed.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Directory of clippings to scan and watch
    #[arg(short, long, global = true, env = "FEED_TARGET_DIR", value_hint = clap::ValueHint::DirPath)]
    pub target: Option<PathBuf>,

    /// Output directory (serve defaults to a temporary directory)
    #[arg(short, long, global = true, env = "FEED_OUTPUT_DIR", value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub feed: FeedArgs,

    #[command(flatten)]
    pub serve: ServeArgs,

    /// subcommands (default: serve)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Generate feeds, then watch the target and serve the output
    #[command(visible_alias = "s")]
    Serve,

    /// Generate feeds once into the output directory
    #[command(visible_alias = "b")]
    Build,
}

/// Feed metadata overrides
#[derive(clap::Args, Debug, Clone, Default)]
#[command(next_help_heading = "Feed")]
pub struct FeedArgs {
    /// Feed title
    #[arg(long, global = true, env = "FEED_TITLE")]
    pub title: Option<String>,

    /// Feed link
    #[arg(long, global = true, env = "FEED_LINK", value_hint = clap::ValueHint::Url)]
    pub link: Option<String>,

    /// Feed description
    #[arg(long, global = true, env = "FEED_DESC")]
    pub description: Option<String>,

    /// Feed author
    #[arg(long, global = true, env = "FEED_AUTHOR")]
    pub author: Option<String>,

    /// Maximum number of items (0 = unlimited)
    #[arg(long, global = true, env = "FEED_MAX_ITEMS")]
    pub max_items: Option<usize>,

    /// Omit item descriptions
    #[arg(long, global = true, env = "FEED_HIDE_DESCRIPTION", action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub hide_description: Option<bool>,
}

/// Server and watcher options (ignored by `build`)
#[derive(clap::Args, Debug, Clone, Default)]
#[command(next_help_heading = "Serve")]
pub struct ServeArgs {
    /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
    #[arg(short, long, global = true)]
    pub interface: Option<IpAddr>,

    /// Port number to listen on
    #[arg(short, long, global = true, env = "FEED_PORT")]
    pub port: Option<u16>,

    /// Enable file watching for auto-regeneration
    #[arg(short, long, global = true, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub watch: Option<bool>,

    /// Quiet period before regenerating (e.g. 10s, 500ms, 2m)
    #[arg(short, long, global = true, env = "FEED_DEBOUNCE_DELAY", value_parser = parse_duration)]
    pub debounce: Option<Duration>,
}

impl Cli {
    /// The selected command; `serve` when none is given.
    pub fn effective_command(&self) -> Commands {
        self.command.unwrap_or(Commands::Serve)
    }
}

/// Parse `<n>ms`, `<n>s`, `<n>m` or a bare number of milliseconds.
fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    let (digits, unit_ms) = if let Some(n) = s.strip_suffix("ms") {
        (n, 1)
    } else if let Some(n) = s.strip_suffix('s') {
        (n, 1_000)
    } else if let Some(n) = s.strip_suffix('m') {
        (n, 60_000)
    } else {
        (s, 1)
    };

    let value: u64 = digits
        .trim()
        .parse()
        .map_err(|_| format!("invalid duration `{s}` (expected e.g. 10s, 500ms, 2m)"))?;
    value
        .checked_mul(unit_ms)
        .map(Duration::from_millis)
        .ok_or_else(|| format!("duration `{s}` is too large"))
}
