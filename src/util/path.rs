//! Filesystem path comparison across separator and case conventions.

use std::path::Path;

/// Whether path comparison ignores case on this platform
const CASE_INSENSITIVE: bool = cfg!(any(windows, target_os = "macos"));

/// Compare two paths after lexical normalization
///
/// Backslashes count as separators, `.` segments and duplicate separators
/// are dropped and `..` is folded into its parent. On Windows and macOS the
/// comparison is case-insensitive. The filesystem is never touched.
pub fn path_equals(a: &Path, b: &Path) -> bool {
    normalize(a) == normalize(b)
}

fn normalize(path: &Path) -> String {
    let raw = path.to_string_lossy().replace('\\', "/");
    let absolute = raw.starts_with('/');

    let mut segments: Vec<&str> = Vec::new();
    for segment in raw.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|last| *last != "..") {
                    segments.pop();
                } else if !absolute {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }

    let mut normalized = segments.join("/");
    if absolute {
        normalized.insert(0, '/');
    }

    if CASE_INSENSITIVE {
        normalized.to_lowercase()
    } else {
        normalized
    }
}
