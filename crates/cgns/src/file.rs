//! Open CGNS containers and file-level lookups.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::CgnsError;
use crate::node::{DATA_CHILD, Node};
use crate::zone::Zone;

/// An open CGNS result container.
///
/// Read-only. The underlying HDF5 handle tolerates concurrent reads of
/// distinct nodes (the library serializes raw access internally), so steps
/// may be processed from worker threads against one open file.
#[derive(Debug)]
pub struct CgnsFile {
    path: PathBuf,
    file: hdf5::File,
}

impl CgnsFile {
    /// Open a container for reading.
    ///
    /// # Errors
    ///
    /// Returns [`CgnsError::FileNotFound`] when the path does not exist and
    /// [`CgnsError::CorruptArchive`] when the container exists but its
    /// structural metadata is inconsistent (e.g. end-of-file bookkeeping
    /// disagreeing with the actual size). Corruption is terminal for the
    /// source; there is no partial-read fallback.
    pub fn open(path: &Path) -> Result<Self, CgnsError> {
        if !path.exists() {
            return Err(CgnsError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let file = hdf5::File::open(path).map_err(|e| CgnsError::CorruptArchive {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    /// Path this container was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Pin the file at one named zone, e.g. `iRIC/iRICZone`.
    ///
    /// # Errors
    ///
    /// Returns [`CgnsError::MissingNode`] when the zone group is absent.
    pub fn zone(&self, zone_path: &str) -> Result<Zone, CgnsError> {
        let trimmed = zone_path.trim_matches('/');
        let group = self
            .file
            .group(trimmed)
            .map_err(|_| CgnsError::MissingNode {
                node: format!("/{trimmed}"),
            })?;
        Ok(Zone::new(group, trimmed.to_string(), self.path.clone()))
    }

    /// Per-step time values, when the container carries them.
    ///
    /// Looks for `<base>/BaseIterativeData/TimeValues` first (where `base`
    /// is the leading component of `zone_path`), then falls back to
    /// searching the whole tree for a `TimeValues` node under a
    /// `BaseIterativeData` ancestor. Best-effort: absence is `None`, not an
    /// error, and each step then defaults to time 0.0.
    pub fn time_values(&self, zone_path: &str) -> Option<Vec<f64>> {
        let base = zone_path.trim_matches('/').split('/').next()?;
        let candidate = format!("{base}/BaseIterativeData/TimeValues");
        if let Ok(group) = self.file.group(&candidate) {
            if let Some(values) = read_time_payload(&group) {
                return Some(values);
            }
        }

        // Some files put BaseIterativeData elsewhere in the tree.
        let hits = find_groups_named(&self.file, "TimeValues");
        for group in hits {
            if group.name().contains("BaseIterativeData") {
                if let Some(values) = read_time_payload(&group) {
                    return Some(values);
                }
            }
        }
        debug!(path = %self.path.display(), "no TimeValues node; steps default to t=0");
        None
    }
}

/// Read a `TimeValues` group's payload as 1-D `f64`.
fn read_time_payload(group: &hdf5::Group) -> Option<Vec<f64>> {
    let node = Node::Group(group.clone());
    if !group.link_exists(DATA_CHILD) {
        return None;
    }
    node.read_1d().ok()
}

/// Collect every group named `target`, depth-first.
fn find_groups_named(root: &hdf5::Group, target: &str) -> Vec<hdf5::Group> {
    let mut hits = Vec::new();
    let Ok(children) = root.groups() else {
        return hits;
    };
    for child in children {
        let name = child.name();
        if name.rsplit('/').next() == Some(target) {
            hits.push(child.clone());
        }
        hits.extend(find_groups_named(&child, target));
    }
    hits
}
