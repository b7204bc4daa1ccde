//! URL to filesystem path resolution.

use std::path::{Path, PathBuf};

use percent_encoding::percent_decode_str;

use crate::generator::INDEX_FILE;
use crate::utils::path::is_contained;

/// Resolve a request URL to a file under `serve_root`.
///
/// `/` and directories map to their `index.html`. Anything that would
/// leave `serve_root`, including through symlinks, resolves to nothing.
pub fn resolve_path(url: &str, serve_root: &Path) -> Option<PathBuf> {
    let clean = normalize_url(url)?;

    let local = if clean.is_empty() {
        serve_root.join(INDEX_FILE)
    } else {
        if !is_contained(Path::new(&clean)) {
            return None;
        }
        serve_root.join(&clean)
    };

    let canonical = local.canonicalize().ok()?;
    let root_canonical = serve_root.canonicalize().ok()?;
    if !canonical.starts_with(&root_canonical) {
        return None;
    }

    if canonical.is_file() {
        return Some(canonical);
    }

    if canonical.is_dir() {
        let index = canonical.join(INDEX_FILE);
        if index.is_file() {
            return Some(index);
        }
    }

    None
}

/// Decode, strip query string and fragment, trim slashes.
///
/// Invalid UTF-8 after decoding yields `None`.
fn normalize_url(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let decoded = percent_decode_str(path).decode_utf8().ok()?;
    Some(decoded.trim_matches('/').to_string())
}
