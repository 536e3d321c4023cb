//! Cheap input classification, used by launchers to decide whether a
//! conversion is needed at all.

use std::path::Path;

use crate::discover;

/// What an input path holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// A directory already containing legacy `Result_<N>.csv` files; no
    /// conversion needed.
    CsvFolder,
    /// A convertible project source: a directory with CGNS file(s), a
    /// `.cgn` file, or an `.ipro` bundle.
    ProjectSource,
    /// Neither recognized layout.
    Unrecognized,
}

/// Classify `path` without opening any container.
///
/// A directory holding both a CGNS source and result CSVs classifies as
/// [`Classification::ProjectSource`]; the original tool attempts project
/// discovery first and only then falls back to the CSV folder reading
/// path.
pub fn classify(path: &Path) -> Classification {
    if path.is_dir() {
        let has_project = !discover::solution_files_in_dir(path).is_empty()
            || !discover::cgn_files_in_dir(path).is_empty();
        if has_project {
            return Classification::ProjectSource;
        }
        if discover::has_result_csv(path) {
            return Classification::CsvFolder;
        }
        return Classification::Unrecognized;
    }

    if path.is_file() {
        let recognized = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("cgn") || e.eq_ignore_ascii_case("ipro"));
        if recognized {
            return Classification::ProjectSource;
        }
    }

    Classification::Unrecognized
}
