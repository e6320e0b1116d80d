//! Workspace mount table
//!
//! A single workspace is served at `/`. With several, each one lives under
//! `/{name}` and `/` has no root of its own.

use crate::config::WorkspaceConfig;
use crate::host::{PathEncoder, WorkspaceFolder, WorkspaceProvider};
use crate::util::path_equals;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use std::path::{Path, PathBuf};

/// Where a decoded URL path lands
#[derive(Debug, PartialEq, Eq)]
pub enum MountTarget<'a> {
    /// The index of a server without a single root
    NoRoot,
    /// A path inside one workspace; `relative` always starts with `/`
    Workspace { root: &'a Path, relative: String },
    /// Nothing is mounted there
    Unmounted,
}

#[derive(Debug, Default)]
pub struct Mounts {
    workspaces: Vec<WorkspaceFolder>,
}

impl Mounts {
    pub fn new(workspaces: Vec<WorkspaceFolder>) -> Self {
        Self { workspaces }
    }

    pub fn from_config(workspaces: &[WorkspaceConfig]) -> Self {
        Self::new(
            workspaces
                .iter()
                .map(|ws| WorkspaceFolder {
                    path: PathBuf::from(&ws.path),
                    name: ws.name.clone(),
                })
                .collect(),
        )
    }

    /// Map a percent-decoded URL path to a workspace
    pub fn locate(&self, path: &str) -> MountTarget<'_> {
        match self.workspaces.as_slice() {
            [] => {
                if path.trim_matches('/').is_empty() {
                    MountTarget::NoRoot
                } else {
                    MountTarget::Unmounted
                }
            }
            [only] => MountTarget::Workspace {
                root: &only.path,
                relative: ensure_leading_slash(path),
            },
            many => {
                let trimmed = path.trim_start_matches('/');
                if trimmed.is_empty() {
                    return MountTarget::NoRoot;
                }
                let (segment, rest) = trimmed.split_once('/').unwrap_or((trimmed, ""));
                many.iter()
                    .find(|ws| ws.name == segment)
                    .map_or(MountTarget::Unmounted, |ws| MountTarget::Workspace {
                        root: &ws.path,
                        relative: ensure_leading_slash(rest),
                    })
            }
        }
    }
}

fn ensure_leading_slash(path: &str) -> String {
    format!("/{}", path.trim_start_matches('/'))
}

impl WorkspaceProvider for Mounts {
    fn workspaces(&self) -> Vec<WorkspaceFolder> {
        self.workspaces.clone()
    }

    fn workspace_count(&self) -> usize {
        self.workspaces.len()
    }
}

impl PathEncoder for Mounts {
    /// URL of a workspace root, `/{name}` percent-encoded
    fn encode_path(&self, path: &Path) -> String {
        let name = self
            .workspaces
            .iter()
            .find(|ws| path_equals(&ws.path, path))
            .map(|ws| ws.name.clone())
            .or_else(|| path.file_name().map(|n| n.to_string_lossy().into_owned()))
            .unwrap_or_default();
        format!("/{}", utf8_percent_encode(&name, NON_ALPHANUMERIC))
    }
}
