//! clippings-feed - RSS, Atom and JSON feeds from Obsidian web clippings.

mod actor;
mod cli;
mod config;
mod core;
mod embed;
mod generator;
mod logger;
mod meta;
mod scan;
mod utils;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use tempfile::TempDir;

use actor::Coordinator;
use cli::{Cli, Commands};
use config::FeedConfig;
use generator::listing::UpdateMode;
use generator::{GenerateError, Generator};
use logger::{status_error, status_success};

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = FeedConfig::load(&cli)?;

    match cli.effective_command() {
        Commands::Build => build(&config),
        Commands::Serve => serve(&config),
    }
}

// =============================================================================
// Build Command
// =============================================================================

/// Generate once. Any failed output makes the build fail; the outputs
/// that succeeded stay written.
fn build(config: &FeedConfig) -> Result<()> {
    let generator = Generator::new(config, config.build_output_dir(), UpdateMode::OneShot);
    let report = generator.regenerate()?;

    crate::log!(
        "generate";
        "{} items, {} files written to {}",
        report.items,
        report.written.len(),
        generator.output_dir().display()
    );
    Ok(())
}

// =============================================================================
// Serve Command
// =============================================================================

fn serve(config: &FeedConfig) -> Result<()> {
    let (output_dir, _temp) = serve_output_dir(config)?;

    let mode = if config.serve.watch {
        UpdateMode::Watcher
    } else {
        UpdateMode::OneShot
    };
    let generator = Arc::new(Generator::new(config, output_dir.clone(), mode));

    // Attach the watcher before the initial generation so no change is missed.
    let watcher = if config.serve.watch {
        let coordinator = Coordinator::prepare(Arc::clone(&generator), config.watch.quiet_period())
            .with_context(|| format!("failed to watch {}", generator.target().display()))?;
        Some(coordinator)
    } else {
        None
    };

    initial_generation(&generator)?;
    cli::serve::serve(&config.serve, output_dir, watcher)
}

/// The configured output directory, or a temporary one removed on exit.
fn serve_output_dir(config: &FeedConfig) -> Result<(PathBuf, Option<TempDir>)> {
    if let Some(dir) = &config.serve.output {
        return Ok((dir.clone(), None));
    }

    let temp = tempfile::Builder::new()
        .prefix("clippings-feed-")
        .tempdir()
        .context("failed to create temporary output directory")?;
    let path = temp.path().to_path_buf();
    core::register_temp_output(path.clone());
    crate::debug!("serve"; "temporary output {}", path.display());
    Ok((path, Some(temp)))
}

/// Any failure of the first generation aborts startup.
fn initial_generation(generator: &Generator) -> Result<()> {
    match generator.regenerate() {
        Ok(report) => {
            status_success(&format!("generated {} items", report.items));
            Ok(())
        }
        Err(GenerateError::Partial(report)) => {
            status_error(
                &format!("generated {} items, some outputs failed", report.items),
                &report.failure_summary(),
            );
            Err(GenerateError::Partial(report)).context("initial generation failed")
        }
        Err(e) => Err(e).context("initial generation failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use std::fs;

    fn generator(temp: &TempDir, extra: &str) -> Generator {
        let target = temp.path().join("clips");
        fs::create_dir_all(&target).unwrap();
        fs::write(
            target.join("a.md"),
            "---\ntitle: A\nsource: https://example.com/a\n---\n",
        )
        .unwrap();

        let mut config = test_parse_config(extra);
        config.source.target = target;
        Generator::new(&config, temp.path().join("out"), UpdateMode::Watcher)
    }

    #[test]
    fn test_initial_generation_succeeds() {
        let temp = TempDir::new().unwrap();
        initial_generation(&generator(&temp, "")).unwrap();
        assert!(temp.path().join("out/feed.rss").is_file());
    }

    #[test]
    fn test_initial_generation_failed_output_is_fatal() {
        let temp = TempDir::new().unwrap();
        let generator = generator(&temp, "[feed]\noutputs = [\"feed.rss\", \"feed.xml\"]");

        let err = initial_generation(&generator).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GenerateError>(),
            Some(GenerateError::Partial(_))
        ));
        assert!(temp.path().join("out/feed.rss").is_file());
    }

    #[test]
    fn test_initial_generation_missing_target_is_fatal() {
        let temp = TempDir::new().unwrap();
        let mut config = test_parse_config("");
        config.source.target = temp.path().join("missing");
        let generator = Generator::new(&config, temp.path().join("out"), UpdateMode::Watcher);

        let err = initial_generation(&generator).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GenerateError>(),
            Some(GenerateError::Scan(_))
        ));
    }
}
