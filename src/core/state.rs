//! Shutdown state for serve mode.
//!
//! Ctrl+C either unblocks the registered HTTP server (graceful path) or,
//! before a server exists, exits at once after removing any temporary
//! output directory.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;
use tiny_http::Server;

/// Shutdown has been requested (Ctrl+C received)
static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// HTTP server reference for graceful shutdown
static SERVER: OnceLock<Arc<Server>> = OnceLock::new();

/// Shutdown signal sender for actor system
static SHUTDOWN_TX: OnceLock<crossbeam::channel::Sender<()>> = OnceLock::new();

/// Temporary output directory to remove on an early exit
static TEMP_OUTPUT: Mutex<Option<PathBuf>> = Mutex::new(None);

/// Setup the global Ctrl+C handler. Call once at program start
///
/// The handler behavior depends on whether a server has been registered:
/// - Before `register_server()`: removes the temporary output, then exits
/// - After `register_server()`: Graceful shutdown (unblock server, notify actors)
pub fn setup_shutdown_handler() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        SHUTDOWN.store(true, Ordering::SeqCst);

        // Notify actor system
        if let Some(tx) = SHUTDOWN_TX.get() {
            let _ = tx.send(());
        }

        if let Some(server) = SERVER.get() {
            crate::log!("serve"; "shutting down...");
            server.unblock();
        } else {
            // Still in the initial generation, nothing to wind down
            remove_temp_output();
            std::process::exit(0);
        }
    })
    .map_err(|e| anyhow::anyhow!("failed to set Ctrl+C handler: {}", e))
}

/// Register the HTTP server for graceful shutdown
///
/// Call this after binding the server, before entering the request loop
pub fn register_server(server: Arc<Server>, shutdown_tx: crossbeam::channel::Sender<()>) {
    let _ = SERVER.set(server);
    let _ = SHUTDOWN_TX.set(shutdown_tx);
}

/// Remember a temporary output directory so an early Ctrl+C can remove it.
///
/// Normal exits drop the owning `TempDir` instead.
pub fn register_temp_output(path: PathBuf) {
    *TEMP_OUTPUT.lock() = Some(path);
}

fn remove_temp_output() {
    if let Some(path) = TEMP_OUTPUT.lock().take() {
        let _ = std::fs::remove_dir_all(path);
    }
}

/// Check if shutdown has been requested
///
/// Uses Relaxed ordering - worst case is serving one more request
pub fn is_shutdown() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_temp_output() {
        let temp = tempfile::TempDir::new().unwrap();
        let dir = temp.path().join("feed-out");
        std::fs::create_dir(&dir).unwrap();

        register_temp_output(dir.clone());
        remove_temp_output();

        assert!(!dir.exists());
        assert!(TEMP_OUTPUT.lock().is_none());
    }

    #[test]
    fn test_not_shutdown_by_default() {
        assert!(!is_shutdown());
    }
}
