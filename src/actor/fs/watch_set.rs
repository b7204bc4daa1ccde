use std::path::{Path, PathBuf};

use jwalk::WalkDir;
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use rustc_hash::FxHashSet;

use crate::{debug, log};

/// Per-directory watch registration.
///
/// Kept as a seam so the watch set can be exercised without an OS watcher.
pub trait DirWatcher {
    fn watch_dir(&mut self, path: &Path) -> notify::Result<()>;
    fn unwatch_dir(&mut self, path: &Path) -> notify::Result<()>;
}

impl DirWatcher for RecommendedWatcher {
    fn watch_dir(&mut self, path: &Path) -> notify::Result<()> {
        self.watch(path, RecursiveMode::NonRecursive)
    }

    fn unwatch_dir(&mut self, path: &Path) -> notify::Result<()> {
        self.unwatch(path)
    }
}

/// The set of monitored directories.
///
/// Every directory of the tree is watched non-recursively, so directories
/// created later have to be added explicitly and removed ones pruned.
pub(super) struct WatchSet<W> {
    pub(super) watcher: W,
    watched: FxHashSet<PathBuf>,
}

impl<W: DirWatcher> WatchSet<W> {
    pub(super) fn new(watcher: W) -> Self {
        Self {
            watcher,
            watched: FxHashSet::default(),
        }
    }

    /// Watch `root` itself; failure leaves nothing to monitor and is returned.
    pub(super) fn register_root(&mut self, root: &Path) -> notify::Result<()> {
        self.watcher.watch_dir(root)?;
        self.watched.insert(root.to_path_buf());
        Ok(())
    }

    /// Watch one directory. Failures are logged; the subtree then goes
    /// unmonitored.
    pub(super) fn register(&mut self, dir: &Path) -> bool {
        if self.watched.contains(dir) {
            return true;
        }
        match self.watcher.watch_dir(dir) {
            Ok(()) => {
                debug!("watch"; "watching {}", dir.display());
                self.watched.insert(dir.to_path_buf());
                true
            }
            Err(e) => {
                log!("watch"; "cannot watch {}: {}", dir.display(), e);
                false
            }
        }
    }

    /// Watch `dir` and every directory below it. Returns how many were added.
    pub(super) fn register_tree(&mut self, dir: &Path) -> usize {
        let before = self.watched.len();
        for entry in WalkDir::new(dir).sort(true) {
            match entry {
                Ok(entry) if entry.file_type().is_dir() => {
                    self.register(&entry.path());
                }
                Ok(_) => {}
                Err(e) => log!("watch"; "cannot list {}: {}", dir.display(), e),
            }
        }
        self.watched.len() - before
    }

    /// Forget `path` and every watched directory below it.
    pub(super) fn prune(&mut self, path: &Path) -> usize {
        let gone: Vec<PathBuf> = self
            .watched
            .iter()
            .filter(|p| p.starts_with(path))
            .cloned()
            .collect();

        for dir in &gone {
            self.watched.remove(dir);
            // The OS usually dropped the watch together with the directory.
            if let Err(e) = self.watcher.unwatch_dir(dir) {
                debug!("watch"; "unwatch {}: {}", dir.display(), e);
            }
            debug!("watch"; "pruned {}", dir.display());
        }
        gone.len()
    }

    #[cfg(test)]
    pub(super) fn contains(&self, dir: &Path) -> bool {
        self.watched.contains(dir)
    }

    #[cfg(test)]
    pub(super) fn len(&self) -> usize {
        self.watched.len()
    }
}
