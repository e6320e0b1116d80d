// Application state module
// Shared by every connection: configuration, mounts and the content loader

use std::sync::Arc;

use super::types::Config;
use crate::content::{ContentLoader, ScriptInjector};
use crate::handler::Mounts;
use crate::host::OpenDocuments;

/// Application state
pub struct AppState {
    pub config: Config,
    pub mounts: Arc<Mounts>,
    /// Buffers pushed by an attached editor, empty when running standalone
    pub documents: Arc<OpenDocuments>,
    pub content: ContentLoader,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let mounts = Arc::new(Mounts::from_config(&config.workspaces));
        let documents = Arc::new(OpenDocuments::new());
        let injector = ScriptInjector::new(
            &config.preview.injected_script_path,
            &config.preview.reload_socket_url,
        );
        let content = ContentLoader::new(
            injector,
            documents.clone(),
            mounts.clone(),
            mounts.clone(),
        );

        Self {
            config,
            mounts,
            documents,
            content,
        }
    }
}
