//! Directory scanning.
//!
//! Walks the target directory, extracts metadata from every document and
//! fills in the fallbacks for missing fields. Individual files that cannot be
//! read or parsed are logged and skipped; only an unusable root aborts.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use jwalk::WalkDir;
use thiserror::Error;

use crate::meta::{Metadata, has_document_extension, parse_metadata};
use crate::{debug, log};

/// Scan failure that leaves no usable result.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("cannot read target directory `{0}`")]
    RootUnreadable(PathBuf, #[source] io::Error),

    #[error("target `{0}` is not a directory")]
    NotADirectory(PathBuf),
}

/// Scan `root` recursively and return one record per parsed document.
///
/// Entries are visited in file-name order so repeated scans of an unchanged
/// tree yield the same list.
pub fn scan_documents(root: &Path) -> Result<Vec<Metadata>, ScanError> {
    check_root(root)?;

    let mut metadata = Vec::new();
    for entry in WalkDir::new(root).sort(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log!("scan"; "skipping unreadable entry: {}", e);
                continue;
            }
        };

        if entry.file_type().is_dir() {
            continue;
        }

        let path = entry.path();
        if !has_document_extension(&path) {
            continue;
        }

        if let Some(meta) = scan_file(&path) {
            metadata.push(meta);
        }
    }

    debug!("scan"; "{} documents in {}", metadata.len(), root.display());
    Ok(metadata)
}

fn check_root(root: &Path) -> Result<(), ScanError> {
    let stat =
        fs::metadata(root).map_err(|e| ScanError::RootUnreadable(root.to_path_buf(), e))?;
    if !stat.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }
    // Permission problems only show up when listing.
    fs::read_dir(root).map_err(|e| ScanError::RootUnreadable(root.to_path_buf(), e))?;
    Ok(())
}

/// Read and parse one document, applying the title and `created` fallbacks.
fn scan_file(path: &Path) -> Option<Metadata> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            log!("scan"; "error reading {}: {}", path.display(), e);
            return None;
        }
    };

    let mut meta = match parse_metadata(&content) {
        Ok(meta) => meta,
        Err(e) => {
            log!("scan"; "error parsing metadata from {}: {}", path.display(), e);
            return None;
        }
    };

    if meta.title.is_empty() {
        meta.title = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
    }

    if meta.created.is_none()
        && let Ok(modified) = fs::metadata(path).and_then(|m| m.modified())
    {
        meta.created = Some(DateTime::<Local>::from(modified).fixed_offset());
    }

    Some(meta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::select;
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, content: &str) -> PathBuf {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_valid_and_invalid_document() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "valid.md",
            "---\ntitle: \"T\"\nsource: \"https://x/1\"\n---\nbody",
        );
        write(temp.path(), "invalid.md", "---\ntitle: \"No source\"\n---\nbody");

        let scanned = scan_documents(temp.path()).unwrap();
        assert_eq!(scanned.len(), 2);

        let selected = select(scanned, 0);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].title, "T");
    }

    #[test]
    fn test_title_falls_back_to_file_name() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "Some Clipping.md", "---\nsource: https://x/1\n---\n");

        let scanned = scan_documents(temp.path()).unwrap();
        assert_eq!(scanned[0].title, "Some Clipping.md");
    }

    #[test]
    fn test_created_falls_back_to_mtime() {
        let temp = TempDir::new().unwrap();
        let path = write(temp.path(), "a.md", "---\ntitle: A\n---\n");
        let mtime = fs::metadata(&path).unwrap().modified().unwrap();

        let scanned = scan_documents(temp.path()).unwrap();
        let created = scanned[0].created.expect("created from mtime");
        assert_eq!(created, DateTime::<Local>::from(mtime).fixed_offset());
    }

    #[test]
    fn test_front_matter_created_wins_over_mtime() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "a.md", "---\ncreated: 2020-01-02T03:04:05Z\n---\n");

        let scanned = scan_documents(temp.path()).unwrap();
        assert_eq!(
            scanned[0].created.unwrap().to_rfc3339(),
            "2020-01-02T03:04:05+00:00"
        );
    }

    #[test]
    fn test_recursive_and_case_insensitive() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "top.md", "---\ntitle: top\n---\n");
        write(temp.path(), "nested/deeper/UPPER.MD", "---\ntitle: upper\n---\n");
        write(temp.path(), "nested/notes.txt", "---\ntitle: txt\n---\n");

        let scanned = scan_documents(temp.path()).unwrap();
        let mut titles: Vec<_> = scanned.iter().map(|m| m.title.as_str()).collect();
        titles.sort_unstable();
        assert_eq!(titles, vec!["top", "upper"]);
    }

    #[test]
    fn test_unparseable_file_is_skipped() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "plain.md", "no front-matter here");
        write(temp.path(), "broken.md", "---\ntitle: [oops\n---\n");
        write(temp.path(), "ok.md", "---\ntitle: ok\n---\n");

        let scanned = scan_documents(temp.path()).unwrap();
        assert_eq!(scanned.len(), 1);
        assert_eq!(scanned[0].title, "ok");
    }

    #[test]
    fn test_non_utf8_file_is_skipped() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("binary.md"), [0xff, 0xfe, 0x00, 0x80]).unwrap();
        write(temp.path(), "ok.md", "---\ntitle: ok\n---\n");

        let scanned = scan_documents(temp.path()).unwrap();
        assert_eq!(scanned.len(), 1);
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing");
        assert!(matches!(
            scan_documents(&missing),
            Err(ScanError::RootUnreadable(..))
        ));
    }

    #[test]
    fn test_file_root_is_an_error() {
        let temp = TempDir::new().unwrap();
        let file = write(temp.path(), "a.md", "---\n---\n");
        assert!(matches!(
            scan_documents(&file),
            Err(ScanError::NotADirectory(_))
        ));
    }

    #[test]
    fn test_empty_directory() {
        let temp = TempDir::new().unwrap();
        assert!(scan_documents(temp.path()).unwrap().is_empty());
    }
}
