//! Generator Actor - sequential regeneration worker
//!
//! Runs [`Generator::regenerate`] off the async runtime, one at a time.
//! Requests that queue up while a regeneration is running are coalesced
//! into a single follow-up run.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::task::JoinError;

use super::messages::GeneratorMsg;
use crate::generator::{GenerateError, Generator, RegenReport};
use crate::logger::{status_error, status_success};

pub struct GeneratorActor {
    rx: mpsc::Receiver<GeneratorMsg>,
    generator: Arc<Generator>,
}

impl GeneratorActor {
    pub fn new(rx: mpsc::Receiver<GeneratorMsg>, generator: Arc<Generator>) -> Self {
        Self { rx, generator }
    }

    /// Main event loop. Returns the number of regenerations run.
    pub async fn run(mut self) -> usize {
        let mut runs = 0;

        while let Some(msg) = self.rx.recv().await {
            match msg {
                GeneratorMsg::Regenerate => {
                    let shutdown = self.drain_pending();
                    self.regenerate().await;
                    runs += 1;
                    if shutdown {
                        break;
                    }
                }
                GeneratorMsg::Shutdown => break,
            }
        }

        crate::debug!("generate"; "actor stopped after {} runs", runs);
        runs
    }

    /// Swallow queued `Regenerate` requests. Returns whether a shutdown
    /// was among them.
    fn drain_pending(&mut self) -> bool {
        loop {
            match self.rx.try_recv() {
                Ok(GeneratorMsg::Regenerate) => continue,
                Ok(GeneratorMsg::Shutdown) => return true,
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => return false,
            }
        }
    }

    async fn regenerate(&self) {
        let generator = Arc::clone(&self.generator);
        let result = tokio::task::spawn_blocking(move || generator.regenerate()).await;
        report(result);
    }
}

fn report(result: Result<Result<RegenReport, GenerateError>, JoinError>) {
    match result {
        Ok(Ok(report)) => {
            status_success(&format!("regenerated {} items", report.items));
        }
        Ok(Err(GenerateError::Partial(report))) => {
            status_error(
                &format!("regenerated {} items, some outputs failed", report.items),
                &report.failure_summary(),
            );
        }
        Ok(Err(e)) => {
            status_error("regeneration failed", &format!("{:#}", anyhow::Error::from(e)));
        }
        Err(e) => {
            status_error("regeneration aborted", &e.to_string());
        }
    }
}
