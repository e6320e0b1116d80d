// Connection handling module
// Serves a single TCP connection in its own local task

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::{TokioIo, TokioTimer};
use std::sync::Arc;
use std::time::Duration;

use crate::config::AppState;
use crate::handler;
use crate::logger;

/// Accept a connection and serve it in a spawned local task.
///
/// `read_timeout` bounds how long a client may take to send request
/// headers. Response bodies are not limited, so large files keep
/// streaming for as long as the client reads them.
///
/// # Arguments
///
/// * `stream` - The TCP stream to handle
/// * `peer_addr` - The peer's socket address
/// * `state` - Shared application state
pub fn accept_connection(
    stream: tokio::net::TcpStream,
    peer_addr: std::net::SocketAddr,
    state: &Arc<AppState>,
) {
    if state.config.logging.access_log {
        logger::log_connection_accepted(&peer_addr);
    }

    let state = Arc::clone(state);
    tokio::task::spawn_local(async move {
        let io = TokioIo::new(stream);
        let header_timeout = Duration::from_secs(state.config.server.read_timeout);

        // Build HTTP/1 connection with keep-alive support
        let mut builder = http1::Builder::new();
        builder
            .keep_alive(true)
            .timer(TokioTimer::new())
            .header_read_timeout(header_timeout);

        let conn = builder.serve_connection(
            io,
            service_fn(move |req| handler::handle_request(req, Arc::clone(&state))),
        );

        if let Err(err) = conn.await {
            logger::log_connection_error(&err);
        }
    });
}
