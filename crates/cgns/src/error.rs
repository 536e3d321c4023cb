//! Error types for riverscope-cgns.

use std::path::PathBuf;

/// Error type for all fallible operations in the riverscope-cgns crate.
///
/// Structural problems (a container whose internal bookkeeping is
/// inconsistent, a zone without a usable coordinate grid) are terminal for
/// that source; there is no partial-read fallback.
#[derive(Debug, thiserror::Error)]
pub enum CgnsError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Returned when the container cannot be opened because its structural
    /// metadata is inconsistent.
    #[error("corrupt archive: {}: {reason}", path.display())]
    CorruptArchive {
        /// Path of the unreadable container.
        path: PathBuf,
        /// Description of the structural inconsistency.
        reason: String,
    },

    /// Returned when the zone's coordinate grid is absent or unusable.
    /// Conversion cannot proceed without a grid.
    #[error("missing coordinates in {}: {reason}", path.display())]
    MissingCoordinates {
        /// Path of the container.
        path: PathBuf,
        /// What was missing or mismatched.
        reason: String,
    },

    /// Returned when an expected node is absent from the tree.
    #[error("node not found: {node}")]
    MissingNode {
        /// Absolute node path inside the container.
        node: String,
    },

    /// Returned when a node's payload has an unexpected shape.
    #[error("node {node}: expected a 2-D array, got shape {got:?}")]
    UnexpectedShape {
        /// Absolute node path inside the container.
        node: String,
        /// Actual dataset shape.
        got: Vec<usize>,
    },

    /// Wraps an error originating from the HDF5 library.
    #[error("hdf5 error: {reason}")]
    Hdf5 {
        /// Description of the underlying HDF5 failure.
        reason: String,
    },
}

impl From<hdf5::Error> for CgnsError {
    fn from(e: hdf5::Error) -> Self {
        CgnsError::Hdf5 {
            reason: e.to_string(),
        }
    }
}
