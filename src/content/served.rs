//! Record of paths handed out since the last reset
//!
//! The file watcher reads this to decide which changes should trigger a
//! reload. Entries are only ever added or cleared all at once.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Paths served since the last reset
///
/// Only the content loader adds or clears entries; everyone else can just
/// look.
///
/// ```compile_fail
/// use live_preview::content::ServedPaths;
/// let served = ServedPaths::default();
/// served.record(std::path::Path::new("/not/served"));
/// ```
#[derive(Debug, Default)]
pub struct ServedPaths {
    paths: Mutex<HashSet<PathBuf>>,
}

impl ServedPaths {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&self, path: &Path) {
        self.lock().insert(path.to_path_buf());
    }

    /// Forget everything served so far, returning how many paths were dropped
    pub(crate) fn reset(&self) -> usize {
        let mut paths = self.lock();
        let count = paths.len();
        paths.clear();
        count
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.lock().contains(path)
    }

    /// Copy of the current set
    pub fn snapshot(&self) -> HashSet<PathBuf> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<PathBuf>> {
        self.paths.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
