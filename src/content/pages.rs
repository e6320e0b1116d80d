//! Synthetic HTML pages: not found, no server root, directory index

use super::{ContentError, ContentLoader, ResponseInfo, HTML_UTF8};
use crate::logger;
use crate::util::{format_date_time, format_file_size};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use std::path::Path;
use tokio::fs;

/// Characters escaped in a path segment of a listing link
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'/');

/// One row of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
struct IndexEntry {
    link_target: String,
    display_name: String,
    /// `None` for directories
    size: Option<String>,
    modified: String,
}

impl IndexEntry {
    fn parent() -> Self {
        Self {
            link_target: "..".to_string(),
            display_name: "..".to_string(),
            size: None,
            modified: String::new(),
        }
    }

    fn render(&self, out: &mut String) {
        let link = escape_html(&self.link_target);
        let name = escape_html(&self.display_name);
        let row = match &self.size {
            None => format!(
                "\n\t\t\t\t<tr>\n\t\t\t\t<td><a href=\"{link}/\">{name}/</a></td>\n\t\t\t\t<td></td>\n\t\t\t\t<td>{}</td>\n\t\t\t\t</tr>\n",
                self.modified
            ),
            Some(size) => format!(
                "\n\t\t\t\t<tr>\n\t\t\t\t<td><a href=\"{link}\">{name}</a></td>\n\t\t\t\t<td>{size}</td>\n\t\t\t\t<td>{}</td>\n\t\t\t\t</tr>\n",
                self.modified
            ),
        };
        out.push_str(&row);
    }
}

impl ContentLoader {
    /// Page paired with a 404 for a path that does not exist
    pub fn not_found_page(&self, relative_path: &str) -> ResponseInfo {
        self.page_event("server.pageDoesNotExist");

        let path = escape_html(relative_path);
        let html = format!(
            r#"<!DOCTYPE html>
<html>
	<head>
		<title>File not found</title>
	</head>
	<body>
		<h1>File not found</h1>
		<p>The file <b>"{path}"</b> cannot be found. It may have been moved, edited, or deleted.</p>
	</body>
</html>
"#
        );

        self.html_page(&html)
    }

    /// Index for a server without a single root to serve from
    ///
    /// With no workspace open there is nothing to link to; with several,
    /// every workspace gets a link to its own root.
    pub fn no_root_page(&self) -> ResponseInfo {
        self.page_event("server.noRootPage");

        let message = if self.workspaces.workspace_count() == 0 {
            "<p>You have no workspace open, so the index does not direct to anything.</p>"
                .to_string()
        } else {
            let mut message = String::from(
                "<p>You are in a multi-root workspace, so the index does not lead to one specific workspace. Access your workspaces using the links below:</p>\n\t\t<ul>",
            );
            for workspace in self.workspaces.workspaces() {
                let href = self.encoder.encode_path(&workspace.path);
                message.push_str(&format!(
                    "\n\t\t\t<li><a href=\"{}/\">{}</a></li>",
                    escape_html(&href),
                    escape_html(&workspace.name)
                ));
            }
            message.push_str("\n\t\t</ul>");
            message
        };

        let html = format!(
            r"<!DOCTYPE html>
<html>
	<head>
		<title>No Server Root</title>
	</head>
	<body>
		<h1>No Server Root</h1>
		{message}
	</body>
</html>
"
        );

        self.html_page(&html)
    }

    /// Listing for a directory without an index file
    ///
    /// Directories come before files; inside each group the order is the
    /// one the filesystem reports. Outside the root a `..` row leads up.
    pub async fn directory_index_page(
        &self,
        absolute_path: &Path,
        relative_path: &str,
        title_path: Option<&str>,
    ) -> Result<ResponseInfo, ContentError> {
        self.page_event("server.indexPage");

        let (directories, files) = list_directory(absolute_path, relative_path).await?;

        let mut rows = String::new();
        for entry in directories.iter().chain(&files) {
            entry.render(&mut rows);
        }

        let title = escape_html(&format!("Index of {}", title_path.unwrap_or(relative_path)));
        let html = format!(
            r"<!DOCTYPE html>
<html>
	<head>
		<style>
			table td {{
				padding:4px;
			}}
		</style>
		<title>{title}</title>
	</head>
	<body>
	<h1>{title}</h1>

	<table>
		<th>Name</th><th>Size</th><th>Date Modified</th>
		{rows}
	</table>
	</body>
</html>
"
        );

        Ok(self.html_page(&html))
    }

    fn html_page(&self, html: &str) -> ResponseInfo {
        ResponseInfo::buffered(HTML_UTF8, self.injector.inject(html))
    }

    fn page_event(&self, name: &str) {
        logger::log_page_event(name);
        self.telemetry.send_event(name);
    }
}

/// Stat every child of `absolute_path`, split into directories and files
async fn list_directory(
    absolute_path: &Path,
    relative_path: &str,
) -> Result<(Vec<IndexEntry>, Vec<IndexEntry>), ContentError> {
    let list_error = |source| ContentError::ListDirectory {
        path: absolute_path.to_path_buf(),
        source,
    };

    let mut directories = Vec::new();
    let mut files = Vec::new();

    if relative_path != "/" {
        directories.push(IndexEntry::parent());
    }

    let base = encode_url_path(relative_path);
    let mut children = fs::read_dir(absolute_path).await.map_err(list_error)?;
    while let Some(child) = children.next_entry().await.map_err(list_error)? {
        let name = child.file_name().to_string_lossy().into_owned();
        let child_path = child.path();
        let metadata = fs::metadata(&child_path)
            .await
            .map_err(|source| ContentError::Stat {
                path: child_path.clone(),
                source,
            })?;

        let modified = metadata
            .modified()
            .map(format_date_time)
            .unwrap_or_default();
        let link_target = format!("{base}/{}", utf8_percent_encode(&name, SEGMENT));

        if metadata.is_dir() {
            directories.push(IndexEntry {
                link_target,
                display_name: name,
                size: None,
                modified,
            });
        } else {
            files.push(IndexEntry {
                link_target,
                display_name: name,
                size: Some(format_file_size(metadata.len())),
                modified,
            });
        }
    }

    Ok((directories, files))
}

/// Percent-encode every segment of a URL path, without a trailing `/`
fn encode_url_path(path: &str) -> String {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| format!("/{}", utf8_percent_encode(segment, SEGMENT)))
        .collect()
}

/// Escape text interpolated into generated HTML
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::host::{OpenDocuments, WorkspaceFolder};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_not_found_page() {
        let telemetry = Arc::new(RecordingTelemetry::default());
        let loader = loader().with_telemetry(telemetry.clone());

        let info = loader.not_found_page("/docs/<gone>.html");
        assert_eq!(info.content_type(), Some(HTML_UTF8));
        let body = body_text(info).await;
        assert!(body.contains("<h1>File not found</h1>"));
        assert!(body.contains(r#"<b>"/docs/&lt;gone&gt;.html"</b>"#));
        assert!(body.contains(&format!("<head>{}", loader.injector().markup())));
        assert_eq!(*telemetry.0.lock().unwrap(), vec!["server.pageDoesNotExist"]);
    }

    #[tokio::test]
    async fn test_no_root_page_without_workspaces() {
        let loader = loader();
        let body = body_text(loader.no_root_page()).await;
        assert!(body.contains("You have no workspace open"));
        assert!(!body.contains("<a href"));
        assert!(!body.contains("<ul>"));
        assert!(body.contains(loader.injector().markup()));
    }

    #[tokio::test]
    async fn test_no_root_page_links_each_workspace() {
        let loader = loader_with(
            Arc::new(OpenDocuments::new()),
            vec![
                WorkspaceFolder {
                    path: "/work/alpha".into(),
                    name: "alpha".to_string(),
                },
                WorkspaceFolder {
                    path: "/work/beta".into(),
                    name: "Beta Site".to_string(),
                },
            ],
        );

        let body = body_text(loader.no_root_page()).await;
        assert_eq!(body.matches("<li><a href=").count(), 2);
        assert!(body.contains(r#"<li><a href="/encoded/work/alpha/">alpha</a></li>"#));
        assert!(body.contains(r#"<li><a href="/encoded/work/beta/">Beta Site</a></li>"#));
        assert!(body.contains("multi-root workspace"));
    }

    #[tokio::test]
    async fn test_directory_index_page() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "0123456789").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();

        let telemetry = Arc::new(RecordingTelemetry::default());
        let loader = loader().with_telemetry(telemetry.clone());
        let info = loader
            .directory_index_page(dir.path(), "/x", None)
            .await
            .unwrap();
        assert_eq!(info.content_type(), Some(HTML_UTF8));
        let body = body_text(info).await;

        assert_eq!(body.matches(r#"<a href="../">../</a>"#).count(), 1);
        assert!(body.contains("<td><a href=\"/x/sub/\">sub/</a></td>\n\t\t\t\t<td></td>"));
        assert!(body.contains("<td><a href=\"/x/a.txt\">a.txt</a></td>\n\t\t\t\t<td>10 B</td>"));
        assert!(body.contains("<title>Index of /x</title>"));
        assert!(body.contains(loader.injector().markup()));

        let sub = body.find("sub/</a>").unwrap();
        let file = body.find("a.txt</a>").unwrap();
        assert!(sub < file, "directories are listed before files");
        assert_eq!(*telemetry.0.lock().unwrap(), vec!["server.indexPage"]);
    }

    #[tokio::test]
    async fn test_directory_index_at_root_has_no_parent_row() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("my page.html"), "<p>hi</p>").unwrap();

        let body = body_text(
            loader()
                .directory_index_page(dir.path(), "/", Some("/site"))
                .await
                .unwrap(),
        )
        .await;

        assert!(!body.contains("../"));
        assert!(body.contains(r#"<a href="/my%20page.html">my page.html</a>"#));
        assert!(body.contains("<title>Index of /site</title>"));
    }

    #[tokio::test]
    async fn test_directory_index_on_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain.txt");
        std::fs::write(&file, "x").unwrap();

        let err = loader()
            .directory_index_page(&file, "/plain.txt", None)
            .await
            .unwrap_err();
        assert!(matches!(err, ContentError::ListDirectory { .. }));
    }

    #[tokio::test]
    async fn test_directory_index_encodes_parent_segments() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("x.txt"), "x").unwrap();

        let body = body_text(
            loader()
                .directory_index_page(dir.path(), "/notes #1/50%/", None)
                .await
                .unwrap(),
        )
        .await;

        assert!(body.contains(r#"<a href="/notes%20%231/50%25/x.txt">x.txt</a>"#));
    }

    #[test]
    fn test_encode_url_path() {
        assert_eq!(encode_url_path("/"), "");
        assert_eq!(encode_url_path("/a b/c?d/"), "/a%20b/c%3Fd");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<a href="x">&</a>"#), "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
    }
}
