// Configuration module entry point
// Loads typed configuration and builds the shared application state

mod state;
mod types;

use std::net::SocketAddr;

pub use state::AppState;
pub use types::{Config, LoggingConfig, PreviewConfig, ServerConfig, WorkspaceConfig};

/// Config file used when none is given on the command line
pub const DEFAULT_CONFIG_PATH: &str = "live-preview";

impl Config {
    /// Load configuration from specified file path (without extension)
    ///
    /// The file is optional; `LIVE_PREVIEW_*` environment variables override
    /// it (e.g. `LIVE_PREVIEW_SERVER__PORT=4000`).
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("LIVE_PREVIEW")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.read_timeout", 30)?
            .set_default("logging.access_log", true)?
            .set_default(
                "preview.injected_script_path",
                "/___live_preview_injected_script",
            )?
            .set_default("preview.reload_socket_url", "ws://127.0.0.1:3001")?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}
