//! Directory discovery: per-step series detection, case-file lookup, and
//! the candidate tie-break.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::ProjectError;

/// Per-step solution file: fixed prefix, optional separator, integer
/// suffix. The original tool emits `Solution1.cgn`; bundles in the wild
/// also carry `Solution_1.cgn`.
static SOLUTION_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^Solution_?(\d+)\.cgn$").expect("valid regex"));

/// Legacy result file produced by a previous conversion.
static RESULT_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Result_\d+\.csv$").expect("valid regex"));

/// Parse the step number out of a per-step solution file name.
pub(crate) fn parse_solution_step(file_name: &str) -> Option<usize> {
    let caps = SOLUTION_FILE.captures(file_name)?;
    caps[1].parse().ok()
}

/// Whether `file_name` is a legacy result file.
pub(crate) fn is_result_csv(file_name: &str) -> bool {
    RESULT_FILE.is_match(file_name)
}

/// All regular files under `dir`, recursively.
fn files_under(dir: &Path) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
}

/// Whether the directory tree contains any legacy result file.
pub(crate) fn has_result_csv(dir: &Path) -> bool {
    files_under(dir).any(|p| {
        p.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(is_result_csv)
    })
}

/// Per-step solution files under `dir`, in ascending numeric step order
/// regardless of file-name string order.
pub(crate) fn solution_files_in_dir(dir: &Path) -> Vec<(usize, PathBuf)> {
    let mut hits: Vec<(usize, PathBuf)> = files_under(dir)
        .filter_map(|p| {
            let step = p
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(parse_solution_step)?;
            Some((step, p))
        })
        .collect();
    hits.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
    hits
}

/// First file under `dir` whose name equals `case_name`.
pub(crate) fn find_case_file(dir: &Path, case_name: &str) -> Option<PathBuf> {
    let mut hits: Vec<PathBuf> = files_under(dir)
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.eq_ignore_ascii_case(case_name))
        })
        .collect();
    hits.sort();
    hits.into_iter().next()
}

/// All `.cgn` files under `dir`, sorted by path.
pub(crate) fn cgn_files_in_dir(dir: &Path) -> Vec<PathBuf> {
    let mut hits: Vec<PathBuf> = files_under(dir)
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("cgn"))
        })
        .collect();
    hits.sort();
    hits
}

/// What a project directory holds.
#[derive(Debug)]
pub(crate) enum Discovered {
    /// One shared container.
    Single(PathBuf),
    /// Per-step containers in ascending numeric step order.
    Series(Vec<(usize, PathBuf)>),
}

/// Discover the CGNS source(s) inside a project directory.
///
/// Order of preference: a per-step `Solution<N>.cgn` series; an exact
/// `case_name` match; the sole `.cgn`; the largest of several `.cgn`
/// candidates (load-bearing tie-break preserved from the original tool).
///
/// # Errors
///
/// Returns [`ProjectError::SourceNotFound`] when no `.cgn` exists under
/// `dir`, and [`ProjectError::AmbiguousSource`] when several candidates
/// tie for the largest size and no explicit name matched.
pub(crate) fn discover(dir: &Path, case_name: &str) -> Result<Discovered, ProjectError> {
    let solutions = solution_files_in_dir(dir);
    if !solutions.is_empty() {
        debug!(dir = %dir.display(), n = solutions.len(), "per-step solution series");
        return Ok(Discovered::Series(solutions));
    }

    if let Some(case) = find_case_file(dir, case_name) {
        return Ok(Discovered::Single(case));
    }

    let mut candidates = cgn_files_in_dir(dir);
    match candidates.len() {
        0 => Err(ProjectError::SourceNotFound {
            path: dir.to_path_buf(),
        }),
        1 => Ok(Discovered::Single(candidates.remove(0))),
        _ => pick_largest(dir, candidates),
    }
}

/// Tie-break among several candidates: the largest file wins; an exact
/// size tie with no explicit name is ambiguous.
fn pick_largest(dir: &Path, candidates: Vec<PathBuf>) -> Result<Discovered, ProjectError> {
    let mut sized: Vec<(u64, PathBuf)> = candidates
        .into_iter()
        .map(|p| {
            let size = std::fs::metadata(&p).map(|m| m.len()).unwrap_or(0);
            (size, p)
        })
        .collect();
    sized.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));

    let top = sized[0].0;
    let tied: Vec<&PathBuf> = sized.iter().take_while(|(s, _)| *s == top).map(|(_, p)| p).collect();
    if tied.len() > 1 {
        return Err(ProjectError::AmbiguousSource {
            path: dir.to_path_buf(),
            candidates: tied
                .iter()
                .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
                .map(String::from)
                .collect(),
        });
    }

    debug!(
        dir = %dir.display(),
        chosen = %sized[0].1.display(),
        "multiple candidates; largest file selected"
    );
    Ok(Discovered::Single(sized.remove(0).1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solution_step_parsing() {
        assert_eq!(parse_solution_step("Solution1.cgn"), Some(1));
        assert_eq!(parse_solution_step("Solution_10.cgn"), Some(10));
        assert_eq!(parse_solution_step("solution_2.CGN"), Some(2));
        assert_eq!(parse_solution_step("Solution.cgn"), None);
        assert_eq!(parse_solution_step("Case1.cgn"), None);
        assert_eq!(parse_solution_step("Solution1.csv"), None);
    }

    #[test]
    fn result_csv_matching() {
        assert!(is_result_csv("Result_1.csv"));
        assert!(is_result_csv("Result_120.csv"));
        assert!(!is_result_csv("Result_.csv"));
        assert!(!is_result_csv("Result_1.txt"));
        assert!(!is_result_csv("Summary.csv"));
    }
}
