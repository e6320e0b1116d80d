//! HTTP protocol layer module
//!
//! Content type detection and response building, decoupled from routing.

pub mod mime;
pub mod response;

// Re-export commonly used types
pub use response::{
    build_404_response, build_405_response, build_500_response, build_content_response,
    build_redirect_response, PreviewBody,
};
