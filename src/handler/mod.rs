//! Request handler module
//!
//! Maps request paths onto workspaces and dispatches to the content layer.

pub mod mounts;
pub mod router;

// Re-export main entry point
pub use mounts::{MountTarget, Mounts};
pub use router::handle_request;
