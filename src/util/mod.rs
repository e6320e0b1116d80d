//! Small pure helpers shared by the content layer.

pub mod format;
pub mod path;

pub use format::{format_date_time, format_file_size};
pub use path::path_equals;
