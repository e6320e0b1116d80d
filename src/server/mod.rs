// Server module entry point
// Listener setup, accept loop and per-connection tasks

pub mod connection;
pub mod listener;

use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::AppState;
use crate::logger;
use connection::accept_connection;

pub use listener::create_reusable_listener;

/// Accept connections until Ctrl-C
///
/// Must run inside a `LocalSet`: connections are served with `spawn_local`.
pub async fn run(
    listener: TcpListener,
    state: Arc<AppState>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => accept_connection(stream, peer_addr, &state),
                    Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
                }
            }

            signal = tokio::signal::ctrl_c() => {
                signal?;
                println!("\n[SHUTDOWN] Ctrl-C received, stopping preview server");
                return Ok(());
            }
        }
    }
}
