//! Host collaborators consumed by the content layer
//!
//! The editor, the workspace list, URL encoding and telemetry live outside
//! this crate. The traits here are the seams; the small structs are the
//! in-process implementations the preview server and the tests use.

use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

/// Language id the editor reports for HTML buffers
pub const HTML_LANGUAGE_ID: &str = "html";

/// Read-only view of a document open in the editor
pub trait EditorDocument: Send + Sync {
    fn path(&self) -> &Path;

    /// Unsaved buffer without a file on disk
    fn is_untitled(&self) -> bool;

    fn language_id(&self) -> &str;

    /// Current buffer contents, including unsaved edits
    fn text(&self) -> String;
}

/// Enumerates the documents currently open in the editor
pub trait DocumentProvider: Send + Sync {
    fn documents(&self) -> Vec<Arc<dyn EditorDocument>>;
}

/// One open workspace root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceFolder {
    pub path: PathBuf,
    pub name: String,
}

/// Enumerates the open workspace roots
pub trait WorkspaceProvider: Send + Sync {
    fn workspaces(&self) -> Vec<WorkspaceFolder>;

    fn workspace_count(&self) -> usize {
        self.workspaces().len()
    }
}

/// Turns an absolute filesystem path into a servable URL path
pub trait PathEncoder: Send + Sync {
    fn encode_path(&self, path: &Path) -> String;
}

/// Receives named usage events
pub trait Telemetry: Send + Sync {
    fn send_event(&self, name: &str);
}

/// Telemetry sink that drops every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTelemetry;

impl Telemetry for NoTelemetry {
    fn send_event(&self, _name: &str) {}
}

/// Snapshot of an editor buffer
#[derive(Debug, Clone)]
pub struct OpenDocument {
    pub path: PathBuf,
    pub untitled: bool,
    pub language_id: String,
    pub text: String,
}

impl OpenDocument {
    pub fn new(path: impl Into<PathBuf>, language_id: &str, text: &str) -> Self {
        Self {
            path: path.into(),
            untitled: false,
            language_id: language_id.to_string(),
            text: text.to_string(),
        }
    }

    /// Mark the buffer as never saved
    #[must_use]
    pub const fn untitled(mut self) -> Self {
        self.untitled = true;
        self
    }
}

impl EditorDocument for OpenDocument {
    fn path(&self) -> &Path {
        &self.path
    }

    fn is_untitled(&self) -> bool {
        self.untitled
    }

    fn language_id(&self) -> &str {
        &self.language_id
    }

    fn text(&self) -> String {
        self.text.clone()
    }
}

/// In-process document registry, in open order
#[derive(Default)]
pub struct OpenDocuments {
    documents: RwLock<Vec<Arc<dyn EditorDocument>>>,
}

impl OpenDocuments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&self, document: impl EditorDocument + 'static) {
        self.documents
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::new(document));
    }

    /// Close every document at exactly this path
    pub fn close(&self, path: &Path) {
        self.documents
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|doc| doc.path() != path);
    }
}

impl DocumentProvider for OpenDocuments {
    fn documents(&self) -> Vec<Arc<dyn EditorDocument>> {
        self.documents
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
