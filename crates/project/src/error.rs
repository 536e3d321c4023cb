//! Error types for riverscope-project.

use std::path::PathBuf;

/// Error type for all fallible operations in the riverscope-project crate.
///
/// Resolution failures are terminal for the conversion of that input: the
/// caller gets the failing path and a reason, never a partial resolution.
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    /// Returned when the input path does not exist, or no CGNS source can
    /// be found under it.
    #[error("source not found: {}", path.display())]
    SourceNotFound {
        /// Path that was searched.
        path: PathBuf,
    },

    /// Returned when multiple equally-ranked candidate files exist and no
    /// explicit case name singled one out.
    #[error("ambiguous source in {}: {candidates:?}", path.display())]
    AmbiguousSource {
        /// Path that was searched.
        path: PathBuf,
        /// The equally-ranked candidates.
        candidates: Vec<String>,
    },

    /// Returned when the input matches neither recognized layout.
    #[error("unsupported layout: {}: {reason}", path.display())]
    UnsupportedLayout {
        /// The offending input path.
        path: PathBuf,
        /// Why the layout was not recognized.
        reason: String,
    },

    /// Returned when a bundle archive cannot be read.
    #[error("corrupt archive: {}: {reason}", path.display())]
    CorruptArchive {
        /// Path of the unreadable bundle.
        path: PathBuf,
        /// Description of the failure.
        reason: String,
    },

    /// Returned when extracting a bundle member to disk fails.
    #[error("extraction failed: {}: {reason}", path.display())]
    Extraction {
        /// Bundle or member path being extracted.
        path: PathBuf,
        /// Description of the I/O failure.
        reason: String,
    },
}
