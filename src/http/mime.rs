//! MIME type detection module
//!
//! Maps file extensions to bare content types and decides which files get
//! the live-reload script injected.

use std::path::Path;

/// Fallback for extensions the table does not know
pub const PLAIN_TEXT: &str = "text/plain";

/// Content type of every HTML payload produced by the content layer
pub const HTML: &str = "text/html";

/// Extensions whose content is rewritten with the live-reload script tag
const INJECTABLE_EXTENSIONS: [&str; 3] = ["html", "htm", "xhtml"];

/// Get the bare MIME type for a path, `None` if the extension is unknown
///
/// # Examples
/// ```
/// use std::path::Path;
/// use live_preview::http::mime::content_type_for;
/// assert_eq!(content_type_for(Path::new("index.HTML")), Some("text/html"));
/// assert_eq!(content_type_for(Path::new("clip.mp4")), Some("video/mp4"));
/// assert_eq!(content_type_for(Path::new("Makefile")), None);
/// ```
pub fn content_type_for(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();

    let content_type = match extension.as_str() {
        // Text
        "html" | "htm" => "text/html",
        "xhtml" => "application/xhtml+xml",
        "css" => "text/css",
        "txt" => "text/plain",
        "md" | "markdown" => "text/markdown",
        "csv" => "text/csv",
        "xml" => "application/xml",

        // JavaScript/WASM
        "js" | "mjs" | "cjs" => "text/javascript",
        "json" | "map" => "application/json",
        "wasm" => "application/wasm",

        // Images
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "bmp" => "image/bmp",

        // Video
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "ogv" => "video/ogg",
        "mov" => "video/quicktime",
        "avi" => "video/x-msvideo",

        // Audio
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" | "oga" => "audio/ogg",
        "flac" => "audio/flac",
        "m4a" => "audio/mp4",

        // Fonts
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "otf" => "font/otf",
        "eot" => "application/vnd.ms-fontobject",

        // Documents
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "gz" | "gzip" => "application/gzip",
        "tar" => "application/x-tar",

        _ => return None,
    };

    Some(content_type)
}

/// Whether a file's content should carry the live-reload script
pub fn is_injectable(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            INJECTABLE_EXTENSIONS
                .iter()
                .any(|candidate| ext.eq_ignore_ascii_case(candidate))
        })
}

/// Declare UTF-8 on `text/*` types, leave everything else untouched
pub fn with_charset(content_type: &str) -> String {
    if content_type.starts_with("text/") {
        format!("{content_type}; charset=UTF-8")
    } else {
        content_type.to_string()
    }
}
