//! Zipped project bundle (`.ipro`) resolution.
//!
//! Selected members are extracted into a fresh temporary directory whose
//! lifetime is owned by the returned sources; the directory is removed
//! when they drop, including on conversion-failure paths.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;
use tracing::debug;
use zip::ZipArchive;

use crate::discover::parse_solution_step;
use crate::error::ProjectError;
use crate::resolved::{Resolved, ResolvedSource};

/// A member's name inside the archive plus its base file name and
/// uncompressed size.
struct Member {
    archive_name: String,
    file_name: String,
    size: u64,
}

/// Resolve an `.ipro` bundle into extracted CGNS source(s).
pub(crate) fn resolve_bundle(path: &Path, case_name: &str) -> Result<Resolved, ProjectError> {
    let file = File::open(path).map_err(|e| ProjectError::CorruptArchive {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let mut archive = ZipArchive::new(file).map_err(|e| ProjectError::CorruptArchive {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let members = list_members(path, &mut archive)?;

    let mut solutions: Vec<(usize, &Member)> = members
        .iter()
        .filter_map(|m| parse_solution_step(&m.file_name).map(|step| (step, m)))
        .collect();

    if !solutions.is_empty() {
        solutions.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.file_name.cmp(&b.1.file_name)));
        debug!(bundle = %path.display(), n = solutions.len(), "per-step series in bundle");

        let dir = Arc::new(make_tempdir(path, "ipro_solution_")?);
        let mut sources = Vec::with_capacity(solutions.len());
        for (step, member) in solutions {
            let out = extract_member(path, &mut archive, member, dir.path())?;
            sources.push(ResolvedSource::extracted(out, Arc::clone(&dir)).with_step(step));
        }
        return Ok(Resolved::Series(sources));
    }

    let target = pick_member(path, &members, case_name)?;
    let dir = Arc::new(make_tempdir(path, "ipro_extract_")?);
    let out = extract_member(path, &mut archive, target, dir.path())?;
    Ok(Resolved::Single(ResolvedSource::extracted(out, dir)))
}

fn list_members<R: io::Read + io::Seek>(
    path: &Path,
    archive: &mut ZipArchive<R>,
) -> Result<Vec<Member>, ProjectError> {
    let mut members = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let entry = archive.by_index(i).map_err(|e| ProjectError::CorruptArchive {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        if !entry.is_file() {
            continue;
        }
        let archive_name = entry.name().to_string();
        let file_name = archive_name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(&archive_name)
            .to_string();
        members.push(Member {
            size: entry.size(),
            archive_name,
            file_name,
        });
    }
    Ok(members)
}

/// Member selection: exact case name, then the sole `.cgn`, then the
/// largest `.cgn` (size tie with no name match is ambiguous).
fn pick_member<'m>(
    path: &Path,
    members: &'m [Member],
    case_name: &str,
) -> Result<&'m Member, ProjectError> {
    if let Some(m) = members
        .iter()
        .find(|m| m.file_name.eq_ignore_ascii_case(case_name))
    {
        return Ok(m);
    }

    let cgns: Vec<&Member> = members
        .iter()
        .filter(|m| {
            Path::new(&m.file_name)
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("cgn"))
        })
        .collect();

    match cgns.len() {
        0 => Err(ProjectError::SourceNotFound {
            path: path.to_path_buf(),
        }),
        1 => Ok(cgns[0]),
        _ => {
            let top = cgns.iter().map(|m| m.size).max().unwrap_or(0);
            let tied: Vec<&&Member> = cgns.iter().filter(|m| m.size == top).collect();
            if tied.len() > 1 {
                return Err(ProjectError::AmbiguousSource {
                    path: path.to_path_buf(),
                    candidates: tied.iter().map(|m| m.file_name.clone()).collect(),
                });
            }
            debug!(
                bundle = %path.display(),
                chosen = %tied[0].file_name,
                "multiple bundle candidates; largest member selected"
            );
            Ok(tied[0])
        }
    }
}

fn make_tempdir(path: &Path, prefix: &str) -> Result<TempDir, ProjectError> {
    tempfile::Builder::new()
        .prefix(prefix)
        .tempdir()
        .map_err(|e| ProjectError::Extraction {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

fn extract_member<R: io::Read + io::Seek>(
    bundle: &Path,
    archive: &mut ZipArchive<R>,
    member: &Member,
    dir: &Path,
) -> Result<PathBuf, ProjectError> {
    let out = dir.join(&member.file_name);
    let mut entry =
        archive
            .by_name(&member.archive_name)
            .map_err(|e| ProjectError::CorruptArchive {
                path: bundle.to_path_buf(),
                reason: e.to_string(),
            })?;
    let mut dst = File::create(&out).map_err(|e| ProjectError::Extraction {
        path: out.clone(),
        reason: e.to_string(),
    })?;
    io::copy(&mut entry, &mut dst).map_err(|e| ProjectError::Extraction {
        path: out.clone(),
        reason: e.to_string(),
    })?;
    Ok(out)
}
