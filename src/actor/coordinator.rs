//! Actor Coordinator - wires up the watch-mode actor system
//!
//! A thin orchestrator: it creates the channels, wires the actors together
//! and runs them until shutdown.
//!
//! ```text
//! FsActor ──GeneratorMsg──► GeneratorActor
//! ```

use std::sync::Arc;
use std::time::Duration;

use crossbeam::channel::Receiver;
use tokio::sync::mpsc;

use super::fs::FsActor;
use super::generator::GeneratorActor;
use super::messages::GeneratorMsg;
use crate::debug;
use crate::generator::Generator;

/// Channel buffer size
const CHANNEL_BUFFER: usize = 32;

/// How long a running regeneration may take to finish on shutdown.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Coordinator - wires up and runs the actor system
pub struct Coordinator {
    fs: FsActor,
    generator: GeneratorActor,
    generator_tx: mpsc::Sender<GeneratorMsg>,
    /// Optional shutdown signal receiver
    shutdown_rx: Option<Receiver<()>>,
}

impl Coordinator {
    /// Attach the watcher and build both actors.
    ///
    /// Watching starts here, before any runtime exists, so changes made
    /// between this call and [`run`](Self::run) are not lost.
    pub fn prepare(generator: Arc<Generator>, quiet_period: Duration) -> notify::Result<Self> {
        let (generator_tx, generator_rx) = mpsc::channel::<GeneratorMsg>(CHANNEL_BUFFER);
        let fs = FsActor::new(generator.target(), generator_tx.clone(), quiet_period)?;
        let generator = GeneratorActor::new(generator_rx, generator);

        Ok(Self {
            fs,
            generator,
            generator_tx,
            shutdown_rx: None,
        })
    }

    /// Set shutdown signal receiver
    pub fn with_shutdown_signal(mut self, rx: Receiver<()>) -> Self {
        self.shutdown_rx = Some(rx);
        self
    }

    /// Run the actor system until a shutdown signal or an actor exits.
    pub async fn run(self) {
        let Self {
            fs,
            generator,
            generator_tx,
            shutdown_rx,
        } = self;

        let mut fs_handle = tokio::spawn(fs.run());
        let mut generator_handle = tokio::spawn(generator.run());
        debug!("actor"; "start");

        tokio::select! {
            _ = wait_for_signal(shutdown_rx) => {
                debug!("actor"; "shutdown signal received");
            }
            _ = &mut fs_handle => {
                debug!("actor"; "watcher stopped");
            }
            _ = &mut generator_handle => {
                debug!("actor"; "generator stopped");
            }
        }

        // Stop watching first so no new work is queued.
        fs_handle.abort();
        let _ = generator_tx.send(GeneratorMsg::Shutdown).await;
        drop(generator_tx);

        if tokio::time::timeout(SHUTDOWN_GRACE, &mut generator_handle)
            .await
            .is_err()
        {
            debug!("actor"; "generator did not stop in time");
            generator_handle.abort();
        }

        debug!("actor"; "stopped");
    }
}

/// Poll-based wait, the signal arrives on a crossbeam channel.
async fn wait_for_signal(rx: Option<Receiver<()>>) {
    let Some(rx) = rx else {
        return std::future::pending().await;
    };

    loop {
        if rx.try_recv().is_ok() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::config::test_parse_config;
    use crate::generator::listing::UpdateMode;

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_shutdown_signal_stops_actors() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("clips");
        fs::create_dir(&target).unwrap();

        let mut config = test_parse_config("");
        config.source.target = target;
        let generator = Arc::new(Generator::new(
            &config,
            temp.path().join("out"),
            UpdateMode::Watcher,
        ));

        let (tx, rx) = crossbeam::channel::bounded(1);
        let coordinator = Coordinator::prepare(generator, Duration::from_millis(50))
            .unwrap()
            .with_shutdown_signal(rx);

        let handle = tokio::spawn(coordinator.run());
        tx.send(()).unwrap();

        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("coordinator did not stop")
            .unwrap();
    }

    #[test]
    fn test_prepare_fails_for_missing_target() {
        let temp = TempDir::new().unwrap();
        let mut config = test_parse_config("");
        config.source.target = temp.path().join("missing");
        let generator = Arc::new(Generator::new(
            &config,
            temp.path().join("out"),
            UpdateMode::Watcher,
        ));

        assert!(Coordinator::prepare(generator, Duration::from_secs(1)).is_err());
    }
}
