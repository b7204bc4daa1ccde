//! Static server for the generated output.
//!
//! Serves the output directory over HTTP while the actor system (when
//! watching is enabled) keeps regenerating it in the background.

mod lifecycle;
mod path;
mod response;

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use crossbeam::channel;
use tiny_http::{Request, Server};

use crate::actor::Coordinator;
use crate::config::ServeConfig;
use crate::core::{is_shutdown, register_server};
use crate::{debug, log};

/// Worker threads answering requests.
const REQUEST_THREADS: usize = 4;

/// Bind, start watching (if a coordinator is given) and serve until Ctrl+C.
pub fn serve(config: &ServeConfig, output_dir: PathBuf, watcher: Option<Coordinator>) -> Result<()> {
    let (server, addr) = lifecycle::bind_with_retry(config.interface, config.port)?;
    let server = Arc::new(server);

    let (shutdown_tx, shutdown_rx) = channel::unbounded::<()>();
    register_server(Arc::clone(&server), shutdown_tx);

    log!("serve"; "http://{}", addr);
    debug!("serve"; "serving {}", output_dir.display());

    let actors = match watcher {
        Some(coordinator) => Some(lifecycle::spawn_actors(coordinator, shutdown_rx)?),
        None => None,
    };

    run_request_loop(&server, Arc::new(output_dir))?;
    lifecycle::wait_for_shutdown(actors);
    Ok(())
}

fn run_request_loop(server: &Server, root: Arc<PathBuf>) -> Result<()> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(REQUEST_THREADS)
        .thread_name(|i| format!("http-{i}"))
        .build()?;

    for request in server.incoming_requests() {
        let root = Arc::clone(&root);
        pool.spawn(move || {
            if let Err(e) = handle_request(request, &root) {
                log!("serve"; "request error: {e:#}");
            }
        });
    }
    Ok(())
}

/// Handle a single HTTP request
fn handle_request(request: Request, root: &Path) -> Result<()> {
    if is_shutdown() {
        return response::respond_unavailable(request);
    }

    if !response::is_read_request(&request) {
        return response::respond_method_not_allowed(request);
    }

    debug!("serve"; "{} {}", request.method(), request.url());
    match path::resolve_path(request.url(), root) {
        Some(file) => response::respond_file(request, &file),
        None => response::respond_not_found(request),
    }
}
