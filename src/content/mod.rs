//! Response generation for the preview server
//!
//! Decides what bytes and content type go back for a request path, builds
//! the synthetic pages (not found, no root, directory index) and rewrites
//! every HTML payload to load the live-reload script.

mod error;
pub mod inject;
mod pages;
mod resolver;
mod served;

pub use error::ContentError;
pub use inject::ScriptInjector;
pub use served::ServedPaths;

use crate::host::{DocumentProvider, NoTelemetry, PathEncoder, Telemetry, WorkspaceProvider};
use crate::logger;
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use hyper::body::Bytes;
use std::collections::HashSet;
use std::fmt;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs::File;
use tokio::io::AsyncReadExt;

/// Content type of synthetic pages
pub const HTML_UTF8: &str = "text/html; charset=UTF-8";

/// Content type of the injected live-reload script
pub const JAVASCRIPT_UTF8: &str = "text/javascript; charset=UTF-8";

const FILE_CHUNK_SIZE: usize = 64 * 1024;

/// Pull-based response body, dropping it releases the underlying file
pub type ByteStream = BoxStream<'static, io::Result<Bytes>>;

/// Outcome of a content request
pub enum ResponseInfo {
    Found {
        content_type: String,
        stream: ByteStream,
    },
    /// Neither an editor buffer nor a disk entry backs the path
    NotFound,
}

impl ResponseInfo {
    /// Response carrying an in-memory payload
    pub fn buffered(content_type: impl Into<String>, body: impl Into<Bytes>) -> Self {
        Self::Found {
            content_type: content_type.into(),
            stream: buffered_stream(body.into()),
        }
    }

    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    pub fn content_type(&self) -> Option<&str> {
        match self {
            Self::Found { content_type, .. } => Some(content_type),
            Self::NotFound => None,
        }
    }

    /// Drain the stream into one buffer, `None` for [`ResponseInfo::NotFound`]
    pub async fn read_all(self) -> io::Result<Option<Bytes>> {
        match self {
            Self::Found { stream, .. } => {
                let chunks: Vec<Bytes> = stream.try_collect().await?;
                Ok(Some(chunks.concat().into()))
            }
            Self::NotFound => Ok(None),
        }
    }
}

impl fmt::Debug for ResponseInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found { content_type, .. } => f
                .debug_struct("Found")
                .field("content_type", content_type)
                .finish_non_exhaustive(),
            Self::NotFound => f.write_str("NotFound"),
        }
    }
}

fn buffered_stream(body: Bytes) -> ByteStream {
    stream::once(async move { Ok::<_, io::Error>(body) }).boxed()
}

/// Stream a file in fixed-size chunks without loading it whole
fn file_stream(file: File) -> ByteStream {
    stream::try_unfold(file, read_chunk).boxed()
}

async fn read_chunk(mut file: File) -> io::Result<Option<(Bytes, File)>> {
    let mut buf = vec![0u8; FILE_CHUNK_SIZE];
    let read = file.read(&mut buf).await?;
    if read == 0 {
        return Ok(None);
    }
    buf.truncate(read);
    Ok(Some((Bytes::from(buf), file)))
}

/// Loads content requested by the HTTP layer
pub struct ContentLoader {
    injector: ScriptInjector,
    served: ServedPaths,
    documents: Arc<dyn DocumentProvider>,
    workspaces: Arc<dyn WorkspaceProvider>,
    encoder: Arc<dyn PathEncoder>,
    telemetry: Arc<dyn Telemetry>,
}

impl ContentLoader {
    pub fn new(
        injector: ScriptInjector,
        documents: Arc<dyn DocumentProvider>,
        workspaces: Arc<dyn WorkspaceProvider>,
        encoder: Arc<dyn PathEncoder>,
    ) -> Self {
        Self {
            injector,
            served: ServedPaths::new(),
            documents,
            workspaces,
            encoder,
            telemetry: Arc::new(NoTelemetry),
        }
    }

    #[must_use]
    pub fn with_telemetry(mut self, telemetry: Arc<dyn Telemetry>) -> Self {
        self.telemetry = telemetry;
        self
    }

    pub const fn injector(&self) -> &ScriptInjector {
        &self.injector
    }

    /// The live-reload script itself
    pub fn injected_asset_response(&self) -> ResponseInfo {
        ResponseInfo::buffered(JAVASCRIPT_UTF8, self.injector.script().to_owned())
    }

    /// Clear the served-path record, e.g. after the watched content changed
    pub fn reset_served_paths(&self) {
        let count = self.served.reset();
        logger::log_served_paths_reset(count);
    }

    /// Paths passed to [`ContentLoader::resolve_content`] since the last reset
    pub fn served_paths(&self) -> HashSet<PathBuf> {
        self.served.snapshot()
    }

    /// Live registry, read-only outside the loader
    pub const fn served(&self) -> &ServedPaths {
        &self.served
    }
}
