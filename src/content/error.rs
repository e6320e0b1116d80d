//! Content layer errors

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Unexpected filesystem failures while producing a response
///
/// A path that simply does not exist is not an error, it resolves to
/// [`ResponseInfo::NotFound`](super::ResponseInfo::NotFound).
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read `{}`", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to stat `{}`", path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to list directory `{}`", path.display())]
    ListDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ContentError {
    /// Kind of the underlying I/O error
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            Self::Read { source, .. }
            | Self::Stat { source, .. }
            | Self::ListDirectory { source, .. } => source.kind(),
        }
    }
}
