//! Resolved CGNS sources and extraction-directory ownership.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

/// One CGNS file ready to be opened, plus ownership of the temporary
/// extraction directory it may live in.
///
/// Dropping the last source that shares an extraction directory removes
/// the directory and its contents, on every exit path including
/// conversion failure. Sources resolved in place (a file already on disk)
/// own nothing and delete nothing.
#[derive(Debug)]
pub struct ResolvedSource {
    path: PathBuf,
    step: Option<usize>,
    tempdir: Option<Arc<TempDir>>,
}

impl ResolvedSource {
    /// A source that lives where the caller pointed; nothing to clean up.
    pub(crate) fn in_place(path: PathBuf) -> Self {
        Self {
            path,
            step: None,
            tempdir: None,
        }
    }

    /// A source extracted into `dir`; the directory is removed when the
    /// last sharing source is dropped.
    pub(crate) fn extracted(path: PathBuf, dir: Arc<TempDir>) -> Self {
        Self {
            path,
            step: None,
            tempdir: Some(dir),
        }
    }

    pub(crate) fn with_step(mut self, step: usize) -> Self {
        self.step = Some(step);
        self
    }

    /// Absolute path of the CGNS file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Step number parsed from the file name, for per-step series members.
    pub fn step(&self) -> Option<usize> {
        self.step
    }

    /// Whether this source lives in a temporary extraction directory.
    pub fn is_temporary(&self) -> bool {
        self.tempdir.is_some()
    }
}

/// Result of input resolution: a single shared-file source, or an ordered
/// per-step series. A conversion run uses exactly one of the two layouts.
#[derive(Debug)]
pub enum Resolved {
    /// One container holding every step.
    Single(ResolvedSource),
    /// One container per step, in ascending numeric step order.
    Series(Vec<ResolvedSource>),
}

impl Resolved {
    /// Number of resolved files.
    pub fn len(&self) -> usize {
        match self {
            Resolved::Single(_) => 1,
            Resolved::Series(sources) => sources.len(),
        }
    }

    /// True when no file resolved (an empty series never leaves the
    /// resolver, so this is effectively always false).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
