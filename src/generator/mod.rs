//! Regeneration: scan the target, select, then write every output.
//!
//! One regeneration reads the directory once and renders every configured
//! feed plus the listing page from the same selected list:
//!
//! ```text
//! scan ─► select ─► build_feed ─┬─► feed.rss
//!                               ├─► feed.atom
//!                               ├─► feed.json
//!                               └─► index.html
//! ```
//!
//! An output that fails is reported and the rest are still written.

pub mod feed;
pub mod listing;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::config::{FeedConfig, FeedSectionConfig};
use crate::meta::select;
use crate::scan::{ScanError, scan_documents};
use crate::{debug, log};

use feed::{FeedError, FeedFormat, FeedSettings, build_feed, render};
use listing::{ListingVars, UpdateMode, render_index};

/// File name of the listing page inside the output directory.
pub const INDEX_FILE: &str = "index.html";

/// A regeneration that did not complete cleanly.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Nothing was written.
    #[error("failed to scan target directory")]
    Scan(#[from] ScanError),

    /// Some outputs were written, the listed ones were not.
    #[error("{} of {} outputs failed", .0.failures.len(), .0.failures.len() + .0.written.len())]
    Partial(RegenReport),
}

/// Why a single output was not written.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error(transparent)]
    Feed(#[from] FeedError),

    #[error("write failed: {0}")]
    Write(#[from] io::Error),
}

#[derive(Debug)]
pub struct OutputFailure {
    pub path: PathBuf,
    pub error: OutputError,
}

/// Outcome of one regeneration.
#[derive(Debug, Default)]
pub struct RegenReport {
    /// Number of selected items.
    pub items: usize,
    /// Outputs written, listing page included.
    pub written: Vec<PathBuf>,
    pub failures: Vec<OutputFailure>,
}

impl RegenReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// One line per failure, for status display.
    pub fn failure_summary(&self) -> String {
        self.failures
            .iter()
            .map(|f| format!("{}: {}", f.path.display(), f.error))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Regenerates every output of one target into one output directory.
#[derive(Debug, Clone)]
pub struct Generator {
    target: PathBuf,
    output_dir: PathBuf,
    feed: FeedSectionConfig,
    mode: UpdateMode,
}

impl Generator {
    pub fn new(config: &FeedConfig, output_dir: PathBuf, mode: UpdateMode) -> Self {
        Self {
            target: config.source.target.clone(),
            output_dir,
            feed: config.feed.clone(),
            mode,
        }
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Run one full regeneration.
    pub fn regenerate(&self) -> Result<RegenReport, GenerateError> {
        let scanned = scan_documents(&self.target)?;

        let now = Local::now();
        let settings = FeedSettings {
            title: self.feed.title.clone(),
            link: self.feed.link.clone(),
            description: self.feed.description.clone(),
            author: self.feed.author.clone(),
            created: now.fixed_offset(),
            max_items: self.feed.max_items,
            hide_description: self.feed.hide_description,
        };
        let selected = select(scanned, settings.max_items);
        let feed = build_feed(&selected, &settings);

        let mut report = RegenReport {
            items: selected.len(),
            ..Default::default()
        };

        for output in &self.feed.outputs {
            let path = self.output_dir.join(output);
            let result = FeedFormat::from_path(output)
                .and_then(|format| render(&feed, format))
                .map_err(OutputError::from)
                .and_then(|bytes| write_output(&path, &bytes).map_err(OutputError::from));
            record(&mut report, path, result);
        }

        let index = render_index(
            &selected,
            &ListingVars {
                title: &self.feed.title,
                description: &self.feed.description,
                outputs: &self.feed.outputs,
                target_dir: &self.target,
                updated: now,
                mode: self.mode,
            },
        );
        let index_path = self.output_dir.join(INDEX_FILE);
        let result = write_output(&index_path, index.as_bytes()).map_err(OutputError::from);
        record(&mut report, index_path, result);

        if report.is_complete() {
            debug!("generate"; "{} items, {} files", report.items, report.written.len());
            Ok(report)
        } else {
            Err(GenerateError::Partial(report))
        }
    }
}

fn record(report: &mut RegenReport, path: PathBuf, result: Result<(), OutputError>) {
    match result {
        Ok(()) => report.written.push(path),
        Err(error) => {
            log!("generate"; "{}: {}", path.display(), error);
            report.failures.push(OutputFailure { path, error });
        }
    }
}

/// Replace `path` with `content` atomically so readers never see a
/// partially written file.
fn write_output(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    fs::create_dir_all(dir)?;

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(content)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))?;
    }
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use tempfile::TempDir;

    struct Fixture {
        _temp: TempDir,
        target: PathBuf,
        output: PathBuf,
    }

    fn fixture() -> Fixture {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("clips");
        let output = temp.path().join("out");
        fs::create_dir(&target).unwrap();
        Fixture {
            _temp: temp,
            target,
            output,
        }
    }

    fn generator(fx: &Fixture, extra: &str) -> Generator {
        let mut config = test_parse_config(extra);
        config.source.target = fx.target.clone();
        Generator::new(&config, fx.output.clone(), UpdateMode::OneShot)
    }

    fn clipping(dir: &Path, name: &str, title: &str, created: &str) {
        fs::write(
            dir.join(name),
            format!(
                "---\ntitle: \"{title}\"\nsource: \"https://example.com/{name}\"\ncreated: {created}\n---\nbody"
            ),
        )
        .unwrap();
    }

    #[test]
    fn test_regenerate_writes_all_outputs() {
        let fx = fixture();
        clipping(&fx.target, "a.md", "Older", "2025-01-01T00:00:00Z");
        clipping(&fx.target, "b.md", "Newer", "2025-02-01T00:00:00Z");

        let report = generator(&fx, "").regenerate().unwrap();
        assert_eq!(report.items, 2);
        assert_eq!(report.written.len(), 4);

        for name in ["feed.rss", "feed.atom", "feed.json", INDEX_FILE] {
            assert!(fx.output.join(name).is_file(), "{name}");
        }

        let rss = fs::read_to_string(fx.output.join("feed.rss")).unwrap();
        assert!(rss.find("Newer").unwrap() < rss.find("Older").unwrap());
    }

    #[test]
    fn test_unsupported_output_is_partial_failure() {
        let fx = fixture();
        clipping(&fx.target, "a.md", "Only", "2025-01-01T00:00:00Z");

        let generator = generator(&fx, "[feed]\noutputs = [\"feed.rss\", \"feed.xml\", \"feed.atom\"]");
        let Err(GenerateError::Partial(report)) = generator.regenerate() else {
            panic!("expected partial failure");
        };

        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].path.ends_with("feed.xml"));
        assert!(matches!(
            report.failures[0].error,
            OutputError::Feed(FeedError::UnsupportedFormat(_))
        ));
        assert!(!fx.output.join("feed.xml").exists());
        assert!(fx.output.join("feed.rss").is_file());
        assert!(fx.output.join("feed.atom").is_file());
        assert!(fx.output.join(INDEX_FILE).is_file());
    }

    #[test]
    fn test_write_failure_is_partial_failure() {
        let fx = fixture();
        clipping(&fx.target, "a.md", "Only", "2025-01-01T00:00:00Z");
        // A directory in the way makes the final rename fail.
        fs::create_dir_all(fx.output.join("feed.rss")).unwrap();

        let Err(GenerateError::Partial(report)) = generator(&fx, "").regenerate() else {
            panic!("expected partial failure");
        };

        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].path.ends_with("feed.rss"));
        assert!(matches!(report.failures[0].error, OutputError::Write(_)));
        assert_eq!(report.written.len(), 3);
        assert!(fx.output.join("feed.rss").is_dir());
        for name in ["feed.atom", "feed.json", INDEX_FILE] {
            assert!(fx.output.join(name).is_file(), "{name}");
        }
    }

    #[test]
    fn test_scan_failure_writes_nothing() {
        let fx = fixture();
        let mut config = test_parse_config("");
        config.source.target = fx.target.join("missing");
        let generator = Generator::new(&config, fx.output.clone(), UpdateMode::OneShot);

        assert!(matches!(generator.regenerate(), Err(GenerateError::Scan(_))));
        assert!(!fx.output.exists());
    }

    #[test]
    fn test_outputs_share_the_selection() {
        let fx = fixture();
        clipping(&fx.target, "a.md", "First", "2025-01-01T00:00:00Z");
        clipping(&fx.target, "b.md", "Second", "2025-01-02T00:00:00Z");
        clipping(&fx.target, "c.md", "Third", "2025-01-03T00:00:00Z");
        fs::write(fx.target.join("invalid.md"), "---\ntitle: No source\n---\n").unwrap();

        let report = generator(&fx, "[feed]\nmax_items = 2").regenerate().unwrap();
        assert_eq!(report.items, 2);

        for name in ["feed.rss", "feed.atom", "feed.json", INDEX_FILE] {
            let content = fs::read_to_string(fx.output.join(name)).unwrap();
            assert!(content.contains("Third"), "{name}");
            assert!(content.contains("Second"), "{name}");
            assert!(!content.contains("First"), "{name}");
            assert!(!content.contains("No source"), "{name}");
        }

        let index = fs::read_to_string(fx.output.join(INDEX_FILE)).unwrap();
        assert!(index.contains("2 items found"));
        assert!(index.contains("one-shot build"));
    }

    #[test]
    fn test_regenerate_overwrites() {
        let fx = fixture();
        clipping(&fx.target, "a.md", "Before", "2025-01-01T00:00:00Z");
        let generator = generator(&fx, "");
        generator.regenerate().unwrap();

        clipping(&fx.target, "a.md", "After", "2025-01-01T00:00:00Z");
        generator.regenerate().unwrap();

        let json = fs::read_to_string(fx.output.join("feed.json")).unwrap();
        assert!(json.contains("After"));
        assert!(!json.contains("Before"));
    }

    #[test]
    fn test_nested_output_directory_created() {
        let fx = fixture();
        let report = generator(&fx, "[feed]\noutputs = [\"feeds/all.rss\"]")
            .regenerate()
            .unwrap();
        assert_eq!(report.items, 0);
        assert!(fx.output.join("feeds/all.rss").is_file());
    }

    #[test]
    fn test_partial_error_message() {
        let report = RegenReport {
            items: 0,
            written: vec![PathBuf::from("a"), PathBuf::from("b")],
            failures: vec![OutputFailure {
                path: PathBuf::from("feed.xml"),
                error: FeedError::UnsupportedFormat("xml".into()).into(),
            }],
        };
        assert!(report.failure_summary().starts_with("feed.xml: unsupported feed format"));
        assert_eq!(GenerateError::Partial(report).to_string(), "1 of 3 outputs failed");
    }
}
