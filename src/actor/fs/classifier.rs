//! Event classification: which notify events matter, and what they do to
//! the watch set.

use std::path::PathBuf;

use notify::event::{ModifyKind, RenameMode};
use notify::{Event, EventKind};

use crate::meta::has_document_extension;

/// Whether `event` should schedule a regeneration.
///
/// Content writes, creations, removals and renames of a document qualify.
/// Metadata-only changes (chmod, mtime) and access events never do.
pub(super) fn qualifies(event: &Event) -> bool {
    let kind_matches = match event.kind {
        EventKind::Create(_) | EventKind::Remove(_) => true,
        EventKind::Modify(modify) => matches!(
            modify,
            ModifyKind::Data(_) | ModifyKind::Name(_) | ModifyKind::Any
        ),
        EventKind::Access(_) | EventKind::Any | EventKind::Other => false,
    };

    kind_matches && event.paths.iter().any(|p| has_document_extension(p))
}

/// Directories that appeared under the tree and need a watch.
///
/// Covers creations and the destination of a rename; the path must still
/// be a directory when the event is handled.
pub(super) fn added_dirs(event: &Event) -> Vec<PathBuf> {
    let candidates: &[PathBuf] = match event.kind {
        EventKind::Create(_) => &event.paths,
        EventKind::Modify(ModifyKind::Name(RenameMode::To)) => &event.paths,
        EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => tail(&event.paths),
        _ => &[],
    };

    candidates.iter().filter(|p| p.is_dir()).cloned().collect()
}

/// Paths that left the tree; any watched directory among them (or below
/// them) is pruned.
pub(super) fn removed_paths(event: &Event) -> Vec<PathBuf> {
    match event.kind {
        EventKind::Remove(_) => event.paths.clone(),
        EventKind::Modify(ModifyKind::Name(RenameMode::From)) => event.paths.clone(),
        EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => {
            event.paths.first().cloned().into_iter().collect()
        }
        _ => Vec::new(),
    }
}

fn tail(paths: &[PathBuf]) -> &[PathBuf] {
    paths.get(1..).unwrap_or_default()
}

/// Short label for debug logging.
pub(super) fn describe(event: &Event) -> String {
    format!("{:?} {:?}", event.kind, event.paths)
}
