//! Content resolution: editor buffer, injected HTML, or raw file stream

use super::{buffered_stream, file_stream, ContentError, ContentLoader, ResponseInfo};
use crate::host::{EditorDocument, HTML_LANGUAGE_ID};
use crate::http::mime;
use crate::util::path_equals;
use std::io;
use std::path::Path;
use std::sync::Arc;
use tokio::fs::{self, File};

impl ContentLoader {
    /// Load the content served for `path`
    ///
    /// An open editor buffer wins over the disk. Untitled buffers are
    /// skipped for filesystem-backed requests since they have no file behind
    /// them. HTML, from a buffer or from an injectable file, gets the
    /// live-reload script; any other file is streamed as is.
    ///
    /// The path is recorded as served before anything else, so the watcher
    /// sees it even when resolution fails.
    pub async fn resolve_content(
        &self,
        path: &Path,
        in_filesystem: bool,
    ) -> Result<ResponseInfo, ContentError> {
        self.served.record(path);

        let mut content_type = mime::content_type_for(path).unwrap_or(mime::PLAIN_TEXT);

        let stream = if let Some(document) = self.live_document(path, in_filesystem) {
            let mut text = document.text();
            if document.language_id() == HTML_LANGUAGE_ID {
                text = self.injector.inject(&text);
                content_type = mime::HTML;
            }
            Some(buffered_stream(text.into()))
        } else if in_filesystem {
            self.load_from_disk(path).await?
        } else {
            None
        };

        Ok(match stream {
            Some(stream) => ResponseInfo::Found {
                content_type: mime::with_charset(content_type),
                stream,
            },
            None => ResponseInfo::NotFound,
        })
    }

    /// First open document at `path` that may stand in for it
    fn live_document(&self, path: &Path, in_filesystem: bool) -> Option<Arc<dyn EditorDocument>> {
        self.documents
            .documents()
            .into_iter()
            .filter(|doc| !(in_filesystem && doc.is_untitled()))
            .find(|doc| path_equals(path, doc.path()))
    }

    async fn load_from_disk(&self, path: &Path) -> Result<Option<super::ByteStream>, ContentError> {
        let read_error = |source| ContentError::Read {
            path: path.to_path_buf(),
            source,
        };

        if mime::is_injectable(path) {
            return match fs::read(path).await {
                Ok(bytes) => {
                    let contents = String::from_utf8_lossy(&bytes);
                    Ok(Some(buffered_stream(self.injector.inject(&contents).into())))
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
                Err(e) => Err(read_error(e)),
            };
        }

        match File::open(path).await {
            Ok(file) => Ok(Some(file_stream(file))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(read_error(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use crate::host::{OpenDocument, OpenDocuments};
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    fn loader_with_docs(docs: Vec<OpenDocument>) -> super::ContentLoader {
        let registry = Arc::new(OpenDocuments::new());
        for doc in docs {
            registry.open(doc);
        }
        loader_with(registry, Vec::new())
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let loader = loader();
        let info = loader
            .resolve_content(Path::new("/missing/file.txt"), true)
            .await
            .unwrap();
        assert!(!info.is_found());
        assert!(loader.served_paths().contains(Path::new("/missing/file.txt")));
    }

    #[tokio::test]
    async fn test_not_filesystem_backed_without_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exists.txt");
        std::fs::write(&path, "on disk").unwrap();

        let info = loader().resolve_content(&path, false).await.unwrap();
        assert!(!info.is_found());
    }

    #[tokio::test]
    async fn test_served_paths_accumulate_until_reset() {
        let loader = loader();
        for p in ["/a.txt", "/b/c.html", "/a.txt"] {
            loader.resolve_content(Path::new(p), true).await.unwrap();
        }
        let served = loader.served_paths();
        assert_eq!(served.len(), 2);
        assert!(served.contains(&PathBuf::from("/b/c.html")));

        loader.reset_served_paths();
        assert!(loader.served_paths().is_empty());
    }

    #[tokio::test]
    async fn test_live_html_buffer_is_injected() {
        let loader = loader_with_docs(vec![OpenDocument::new(
            "/site/page.php",
            "html",
            "<html>\n<head><title>edit</title></head>",
        )]);

        let info = loader
            .resolve_content(Path::new("/site/page.php"), true)
            .await
            .unwrap();
        assert_eq!(info.content_type(), Some("text/html; charset=UTF-8"));
        let body = body_text(info).await;
        assert_eq!(
            body,
            format!(
                "<html>\n<head>{}<title>edit</title></head>",
                loader.injector().markup()
            )
        );
    }

    #[tokio::test]
    async fn test_live_buffer_preferred_over_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("style.css");
        std::fs::write(&path, "body { color: red; }").unwrap();

        let loader = loader_with_docs(vec![OpenDocument::new(
            &path,
            "css",
            "body { color: blue; }",
        )]);
        let info = loader.resolve_content(&path, true).await.unwrap();
        assert_eq!(info.content_type(), Some("text/css; charset=UTF-8"));
        assert_eq!(body_text(info).await, "body { color: blue; }");
    }

    #[tokio::test]
    async fn test_untitled_buffer_skipped_for_filesystem_request() {
        let path = Path::new("/nowhere/Untitled-1.html");
        let loader = loader_with_docs(vec![
            OpenDocument::new(path, "html", "<p>draft</p>").untitled()
        ]);

        let info = loader.resolve_content(path, true).await.unwrap();
        assert!(!info.is_found());

        let info = loader.resolve_content(path, false).await.unwrap();
        assert!(body_text(info).await.ends_with("<p>draft</p>"));
    }

    #[tokio::test]
    async fn test_untitled_skip_continues_to_next_document() {
        let path = Path::new("/site/notes.txt");
        let loader = loader_with_docs(vec![
            OpenDocument::new(path, "plaintext", "untitled").untitled(),
            OpenDocument::new(path, "plaintext", "saved"),
        ]);

        let info = loader.resolve_content(path, true).await.unwrap();
        assert_eq!(body_text(info).await, "saved");
    }

    #[tokio::test]
    async fn test_injectable_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.html");
        std::fs::write(&path, "<!DOCTYPE html>\n<head></head>\n<body>x</body>").unwrap();

        let loader = loader();
        let info = loader.resolve_content(&path, true).await.unwrap();
        assert_eq!(info.content_type(), Some("text/html; charset=UTF-8"));
        let body = body_text(info).await;
        assert_eq!(
            body,
            format!(
                "<!DOCTYPE html>\n<head>{}</head>\n<body>x</body>",
                loader.injector().markup()
            )
        );
    }

    #[tokio::test]
    async fn test_non_utf8_html_is_decoded_lossily() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.html");
        std::fs::write(&path, b"<head></head><p>caf\xe9</p>").unwrap();

        let loader = loader();
        let info = loader.resolve_content(&path, true).await.unwrap();
        assert_eq!(info.content_type(), Some("text/html; charset=UTF-8"));
        assert_eq!(
            body_text(info).await,
            format!("<head>{}</head><p>caf\u{fffd}</p>", loader.injector().markup())
        );
    }

    #[tokio::test]
    async fn test_binary_file_streamed_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        let data = vec![0x89, b'P', b'N', b'G', 0, 0xff, b'<', b'h', b'e', b'a', b'd', b'>'];
        std::fs::write(&path, &data).unwrap();

        let info = loader().resolve_content(&path, true).await.unwrap();
        assert_eq!(info.content_type(), Some("image/png"));
        let bytes = info.read_all().await.unwrap().unwrap();
        assert_eq!(bytes.as_ref(), data.as_slice());
    }

    #[tokio::test]
    async fn test_unknown_extension_defaults_to_plain_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("LICENSE");
        std::fs::write(&path, "MIT").unwrap();

        let info = loader().resolve_content(&path, true).await.unwrap();
        assert_eq!(info.content_type(), Some("text/plain; charset=UTF-8"));
        assert_eq!(body_text(info).await, "MIT");
    }
}
