//! Error types for riverscope-frame.

use std::path::PathBuf;

/// Error type for all fallible operations in the riverscope-frame crate.
///
/// Covers frame construction against a fixed grid shape, legacy result CSV
/// serialization, and parsing of previously written result files.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// Returned when an array's shape disagrees with the coordinate grid.
    #[error("'{name}' shape mismatch: expected {expected_i}x{expected_j}, got {got:?}")]
    ShapeMismatch {
        /// Name of the offending array (variable or coordinate).
        name: String,
        /// Expected first dimension (imax).
        expected_i: usize,
        /// Expected second dimension (jmax).
        expected_j: usize,
        /// Actual shape.
        got: Vec<usize>,
    },

    /// Returned when one or more configuration checks fail.
    #[error("{details}")]
    Validation {
        /// Human-readable summary of the failure.
        details: String,
    },

    /// Returned when a result file cannot be written.
    #[error("write failed: {}: {reason}", path.display())]
    WriteFailed {
        /// Path that was being written.
        path: PathBuf,
        /// Description of the underlying I/O failure.
        reason: String,
    },

    /// Returned when a legacy result file cannot be parsed.
    #[error("parse failed: {}:{line}: {reason}", path.display())]
    ParseFailed {
        /// Path that was being read.
        path: PathBuf,
        /// 1-based line number where parsing stopped.
        line: usize,
        /// Description of the parse failure.
        reason: String,
    },
}
