//! # riverscope-project
//!
//! Resolve an opaque input — a project directory, a single `.cgn` archive
//! file, or a zipped `.ipro` project bundle — down to one or more CGNS
//! files ready for reading, with temporary-extraction lifetime owned by
//! the resolved sources. Also answers the cheap "does this even need
//! converting?" classification query.

use std::path::Path;

use tracing::info;

mod bundle;
mod classify;
mod discover;
mod error;
mod resolved;

pub use classify::{Classification, classify};
pub use error::ProjectError;
pub use resolved::{Resolved, ResolvedSource};

/// Default case file name inside project folders and bundles.
pub const DEFAULT_CASE_NAME: &str = "Case1.cgn";

/// Resolve `input` into CGNS source(s).
///
/// - A directory resolves to a per-step `Solution<N>.cgn` series when one
///   exists, else to a single file preferred by exact `case_name` match,
///   then sole `.cgn`, then largest candidate.
/// - A `.cgn` file resolves to itself, in place.
/// - An `.ipro` bundle has its member(s) selected by the same preference
///   and extracted into a temporary directory owned by the result.
///
/// # Errors
///
/// Returns [`ProjectError::SourceNotFound`] when the path or any CGNS
/// under it is missing, [`ProjectError::AmbiguousSource`] when several
/// equally-ranked candidates exist, [`ProjectError::UnsupportedLayout`]
/// for unrecognized inputs, and [`ProjectError::CorruptArchive`] /
/// [`ProjectError::Extraction`] for unreadable bundles.
pub fn resolve(input: &Path, case_name: &str) -> Result<Resolved, ProjectError> {
    if !input.exists() {
        return Err(ProjectError::SourceNotFound {
            path: input.to_path_buf(),
        });
    }

    if input.is_dir() {
        return match discover::discover(input, case_name)? {
            discover::Discovered::Series(files) => {
                info!(dir = %input.display(), n = files.len(), "resolved per-step series");
                Ok(Resolved::Series(
                    files
                        .into_iter()
                        .map(|(step, path)| ResolvedSource::in_place(path).with_step(step))
                        .collect(),
                ))
            }
            discover::Discovered::Single(path) => {
                info!(file = %path.display(), "resolved single container");
                Ok(Resolved::Single(ResolvedSource::in_place(path)))
            }
        };
    }

    let ext = input
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("cgn") => Ok(Resolved::Single(ResolvedSource::in_place(
            input.to_path_buf(),
        ))),
        Some("ipro") => bundle::resolve_bundle(input, case_name),
        _ => Err(ProjectError::UnsupportedLayout {
            path: input.to_path_buf(),
            reason: "expected .cgn, .ipro, or a directory".to_string(),
        }),
    }
}
