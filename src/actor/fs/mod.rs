//! FileSystem Actor
//!
//! Watches the target tree and sends a debounced `Regenerate` to the
//! GeneratorActor. Implements the "Watcher-First" pattern: the watcher is
//! attached in [`FsActor::new`], so changes made during the initial
//! generation are buffered rather than lost.
//!
//! Architecture:
//! ```text
//! notify → bridge thread → Classifier (watch set upkeep, filtering)
//!                        → Debouncer (pure timing) → GeneratorMsg
//! ```

use std::path::Path;
use std::time::Duration;

use notify::RecommendedWatcher;
use tokio::sync::mpsc;

use super::messages::GeneratorMsg;
use crate::{debug, log};

// Event filtering and watch set changes.
mod classifier;
// Pure timing.
mod debouncer;
// Per-directory watch registrations.
mod watch_set;


use debouncer::Debouncer;
pub use watch_set::DirWatcher;
use watch_set::WatchSet;

/// Capacity of the notify → actor bridge.
const EVENT_BUFFER: usize = 256;

/// FileSystem Actor - watches for document changes
pub struct FsActor<W: DirWatcher = RecommendedWatcher> {
    /// Events forwarded from the notify callback thread
    events: mpsc::Receiver<notify::Event>,
    /// Watcher handle and the directories it covers
    watch_set: WatchSet<W>,
    /// Channel to send messages to GeneratorActor
    generator_tx: mpsc::Sender<GeneratorMsg>,
    /// Debouncer state
    debouncer: Debouncer,
}

impl FsActor {
    /// Create the watcher and register the whole tree below `root`.
    ///
    /// Fails only when the platform watcher cannot be created or `root`
    /// itself cannot be watched. Does not need a running tokio runtime.
    pub fn new(
        root: &Path,
        generator_tx: mpsc::Sender<GeneratorMsg>,
        quiet_period: Duration,
    ) -> notify::Result<Self> {
        // notify is sync only
        let (notify_tx, notify_rx) = std::sync::mpsc::channel();
        let watcher = notify::recommended_watcher(move |res| {
            let _ = notify_tx.send(res);
        })?;

        let (event_tx, events) = mpsc::channel(EVENT_BUFFER);
        std::thread::Builder::new()
            .name("watch-bridge".into())
            .spawn(move || {
                while let Ok(result) = notify_rx.recv() {
                    match result {
                        Ok(event) => {
                            if event_tx.blocking_send(event).is_err() {
                                break; // Actor dropped
                            }
                        }
                        Err(e) => log!("watch"; "notify error: {}", e),
                    }
                }
            })?;

        let mut watch_set = WatchSet::new(watcher);
        watch_set.register_root(root)?;
        let count = watch_set.register_tree(root);
        debug!("watch"; "watching {} directories under {}", count.max(1), root.display());

        Ok(Self::with_parts(events, watch_set, generator_tx, quiet_period))
    }
}

impl<W: DirWatcher> FsActor<W> {
    fn with_parts(
        events: mpsc::Receiver<notify::Event>,
        watch_set: WatchSet<W>,
        generator_tx: mpsc::Sender<GeneratorMsg>,
        quiet_period: Duration,
    ) -> Self {
        Self {
            events,
            watch_set,
            generator_tx,
            debouncer: Debouncer::new(quiet_period),
        }
    }

    /// Run the actor event loop.
    ///
    /// Returns when the event source closes or the GeneratorActor is gone.
    pub async fn run(mut self) {
        loop {
            let deadline = self.debouncer.deadline();
            tokio::select! {
                event = self.events.recv() => match event {
                    Some(event) => self.handle_event(&event),
                    None => break,
                },
                _ = sleep_until(deadline), if self.debouncer.is_armed() => {
                    if !self.debouncer.take_if_ready() {
                        continue;
                    }
                    debug!("watch"; "quiet period elapsed, regenerating");
                    if self.generator_tx.send(GeneratorMsg::Regenerate).await.is_err() {
                        break;
                    }
                }
            }
        }
    }

    fn handle_event(&mut self, event: &notify::Event) {
        debug!("watch"; "event {}", classifier::describe(event));

        for path in classifier::removed_paths(event) {
            self.watch_set.prune(&path);
        }
        for dir in classifier::added_dirs(event) {
            self.watch_set.register_tree(&dir);
        }

        if classifier::qualifies(event) {
            self.debouncer.arm();
        }
    }
}

async fn sleep_until(deadline: Option<tokio::time::Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
