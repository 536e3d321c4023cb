//! Error types for riverscope-convert.

use std::path::{Path, PathBuf};

use riverscope_cgns::CgnsError;
use riverscope_project::ProjectError;

/// Error type for a whole conversion run.
///
/// Resolution and structural-reading failures abort the conversion for
/// that input and carry the failing path and reason. Per-step write
/// failures are not here: they are collected into the per-step outcome
/// report so callers can present a partial result.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// The input path, or any CGNS source under it, does not exist.
    #[error("source not found: {}", path.display())]
    SourceNotFound {
        /// Path that was searched.
        path: PathBuf,
    },

    /// Multiple equally-ranked candidate files and no explicit case name.
    #[error("ambiguous source in {}: {candidates:?}", path.display())]
    AmbiguousSource {
        /// Path that was searched.
        path: PathBuf,
        /// The equally-ranked candidates.
        candidates: Vec<String>,
    },

    /// The input matches neither recognized layout.
    #[error("unsupported layout: {}: {reason}", path.display())]
    UnsupportedLayout {
        /// The offending input path.
        path: PathBuf,
        /// Why the layout was not recognized.
        reason: String,
    },

    /// A container's structural metadata is inconsistent. Terminal for the
    /// source; no partial-read fallback.
    #[error("corrupt archive: {}: {reason}", path.display())]
    CorruptArchive {
        /// Path of the unreadable container.
        path: PathBuf,
        /// Description of the structural inconsistency.
        reason: String,
    },

    /// The zone has no usable coordinate grid; conversion cannot proceed.
    #[error("missing coordinates in {}: {reason}", path.display())]
    MissingCoordinates {
        /// Path of the container.
        path: PathBuf,
        /// What was missing or mismatched.
        reason: String,
    },

    /// Returned when one or more option checks fail.
    #[error("{details}")]
    Validation {
        /// Human-readable summary of the failure.
        details: String,
    },

    /// The run was cancelled cooperatively between steps. Temporary
    /// extraction state has already been released.
    #[error("conversion cancelled")]
    Cancelled,
}

impl From<ProjectError> for ConvertError {
    fn from(e: ProjectError) -> Self {
        match e {
            ProjectError::SourceNotFound { path } => ConvertError::SourceNotFound { path },
            ProjectError::AmbiguousSource { path, candidates } => {
                ConvertError::AmbiguousSource { path, candidates }
            }
            ProjectError::UnsupportedLayout { path, reason } => {
                ConvertError::UnsupportedLayout { path, reason }
            }
            ProjectError::CorruptArchive { path, reason }
            | ProjectError::Extraction { path, reason } => {
                ConvertError::CorruptArchive { path, reason }
            }
        }
    }
}

impl ConvertError {
    /// Map a structural reading error onto the run-level taxonomy,
    /// attaching the container path the reader was working on.
    pub(crate) fn from_cgns(path: &Path, e: CgnsError) -> Self {
        match e {
            CgnsError::FileNotFound { path } => ConvertError::SourceNotFound { path },
            CgnsError::CorruptArchive { path, reason } => {
                ConvertError::CorruptArchive { path, reason }
            }
            CgnsError::MissingCoordinates { path, reason } => {
                ConvertError::MissingCoordinates { path, reason }
            }
            other => ConvertError::CorruptArchive {
                path: path.to_path_buf(),
                reason: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_errors_map_onto_the_taxonomy() {
        let err: ConvertError = ProjectError::SourceNotFound {
            path: PathBuf::from("/in"),
        }
        .into();
        assert!(matches!(err, ConvertError::SourceNotFound { .. }));

        let err: ConvertError = ProjectError::Extraction {
            path: PathBuf::from("/tmp/x"),
            reason: "disk full".to_string(),
        }
        .into();
        assert!(matches!(err, ConvertError::CorruptArchive { .. }));
    }

    #[test]
    fn structural_errors_keep_the_container_path() {
        let err = ConvertError::from_cgns(
            Path::new("/data/Case1.cgn"),
            CgnsError::MissingNode {
                node: "/iRIC/iRICZone".to_string(),
            },
        );
        match err {
            ConvertError::CorruptArchive { path, reason } => {
                assert_eq!(path, PathBuf::from("/data/Case1.cgn"));
                assert!(reason.contains("/iRIC/iRICZone"));
            }
            other => panic!("expected CorruptArchive, got {other:?}"),
        }
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<ConvertError>();
    }
}
