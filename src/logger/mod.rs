//! Logger module
//!
//! Provides logging utilities for the preview server including:
//! - Server lifecycle logging
//! - Access logging
//! - Content layer events
//! - Error and warning logging

pub mod writer;

use crate::config::Config;
use chrono::Local;
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Write to info/access log
fn write_info(message: &str) {
    match writer::get() {
        Some(writer) => writer.write_info(message),
        None => println!("{message}"),
    }
}

/// Write to error log
fn write_error(message: &str) {
    match writer::get() {
        Some(writer) => writer.write_error(message),
        None => eprintln!("{message}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    write_info("======================================");
    write_info("Live preview server started");
    write_info(&format!("Listening on: http://{addr}"));
    match config.workspaces.len() {
        0 => write_info("Workspaces: none open"),
        1 => write_info(&format!("Serving: {}", config.workspaces[0].path)),
        n => {
            write_info(&format!("Workspaces: {n} (multi-root)"));
            for workspace in &config.workspaces {
                write_info(&format!("  - {} -> {}", workspace.name, workspace.path));
            }
        }
    }
    write_info(&format!(
        "Injected script: {}",
        config.preview.injected_script_path
    ));
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info("======================================\n");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    write_info(&format!("[Connection] Accepted from: {peer_addr}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

/// One access line per answered request
pub fn log_access(method: &hyper::Method, path: &str, status: u16, content_type: Option<&str>) {
    write_info(&format!(
        "[{}] {method} {path} {status} {}",
        Local::now().format("%d/%b/%Y:%H:%M:%S %z"),
        content_type.unwrap_or("-")
    ));
}

/// Synthetic page generated by the content layer
pub fn log_page_event(name: &str) {
    write_info(&format!("[Event] {name}"));
}

pub fn log_served_paths_reset(count: usize) {
    write_info(&format!("[Served] Reset {count} tracked path(s)"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}
