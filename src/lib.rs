//! Live preview content server
//!
//! Serves workspace files for a browser preview. HTML is rewritten on the
//! fly to load a live-reload script, open editor buffers take precedence
//! over the disk, and directories without an index get a generated listing.

pub mod config;
pub mod content;
pub mod handler;
pub mod host;
pub mod http;
pub mod logger;
pub mod server;
pub mod util;
