// Configuration types module
// Defines all configuration-related data structures

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub preview: PreviewConfig,
    /// Open workspace roots, in display order
    #[serde(default)]
    pub workspaces: Vec<WorkspaceConfig>,
}

/// Server configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds a client may take to send request headers
    pub read_timeout: u64,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

/// Live preview configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PreviewConfig {
    /// URL path the injected script tag points at
    pub injected_script_path: String,
    /// WebSocket the injected script listens on for reload messages
    pub reload_socket_url: String,
}

/// A workspace root served by the preview
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct WorkspaceConfig {
    pub name: String,
    pub path: String,
}
