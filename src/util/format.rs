//! Human-readable formatting for directory listings.

use chrono::{DateTime, Local};
use std::time::SystemTime;

const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Format a byte count for display
///
/// Plain bytes are shown as an integer, larger sizes with one decimal.
///
/// # Examples
/// ```
/// use live_preview::util::format_file_size;
/// assert_eq!(format_file_size(10), "10 B");
/// assert_eq!(format_file_size(1234), "1.2 KB");
/// ```
pub fn format_file_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes} B");
    }

    #[allow(clippy::cast_precision_loss)]
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    format!("{size:.1} {}", SIZE_UNITS[unit])
}

/// Format a modification time in the local timezone
pub fn format_date_time(time: SystemTime) -> String {
    DateTime::<Local>::from(time)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}
