//! Conversion orchestration.
//!
//! Control flow: resolve the input, open and read structure, reconstruct
//! the step sequence, then build and write each step's frame. Steps are
//! processed in parallel: each frame is built and written independently,
//! with no shared mutable state beyond the read-only grid and the open
//! file handle (raw HDF5 reads are serialized by the library).

use std::path::Path;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use riverscope_cgns::{CgnsFile, Zone};
use riverscope_frame::{CoordinateGrid, StepFrame, VariableEntry, write_result_csv};
use riverscope_project::{Resolved, ResolvedSource, resolve};

use crate::cancel::CancelToken;
use crate::error::ConvertError;
use crate::options::ConvertOptions;
use crate::outcome::{ConvertReport, SkippedVariable, StepOutcome, StepStatus};
use crate::steps::{self, StepDescriptor};

/// Convert `input` into legacy result CSV files under `output_dir`.
///
/// The single entry point: resolves the input (directory, `.cgn` file, or
/// `.ipro` bundle), reads the container structure, reconstructs the step
/// sequence, and writes one file per step. Always produces a fully
/// self-consistent result set; re-running against a populated output
/// directory is the caller's policy decision.
///
/// # Errors
///
/// Resolution and structural-reading failures
/// ([`ConvertError::SourceNotFound`], [`ConvertError::AmbiguousSource`],
/// [`ConvertError::UnsupportedLayout`], [`ConvertError::CorruptArchive`],
/// [`ConvertError::MissingCoordinates`]) abort the run. Per-step write
/// failures do not: they appear as failed outcomes in the returned report.
/// Temporary extraction directories are removed on every path out of this
/// function.
pub fn convert(
    input: &Path,
    output_dir: &Path,
    options: &ConvertOptions,
) -> Result<ConvertReport, ConvertError> {
    convert_with_cancel(input, output_dir, options, &CancelToken::new())
}

/// [`convert`] with cooperative cancellation, checked between steps.
///
/// # Errors
///
/// As [`convert`], plus [`ConvertError::Cancelled`] once the token trips;
/// extraction state is released before returning.
pub fn convert_with_cancel(
    input: &Path,
    output_dir: &Path,
    options: &ConvertOptions,
    cancel: &CancelToken,
) -> Result<ConvertReport, ConvertError> {
    options.validate()?;
    info!(
        input = %input.display(),
        output = %output_dir.display(),
        "starting conversion"
    );

    let resolved = resolve(input, options.case_name())?;
    let report = match &resolved {
        Resolved::Single(source) => convert_single(source, output_dir, options, cancel),
        Resolved::Series(sources) => convert_series(sources, output_dir, options, cancel),
    }?;

    info!(
        written = report.n_written(),
        failed = report.n_failed(),
        "conversion finished"
    );
    Ok(report)
    // `resolved` drops here, releasing any extraction directory.
}

/// Single shared container: every step lives under one zone.
fn convert_single(
    source: &ResolvedSource,
    output_dir: &Path,
    options: &ConvertOptions,
    cancel: &CancelToken,
) -> Result<ConvertReport, ConvertError> {
    let path = source.path();
    let structural = |e| ConvertError::from_cgns(path, e);

    let file = CgnsFile::open(path).map_err(structural)?;
    let zone = file.zone(options.zone_path()).map_err(structural)?;
    let grid = zone.coordinates().map_err(structural)?;
    let times = file.time_values(options.zone_path());
    let solutions = zone.solution_names().map_err(structural)?;

    let selected_vars = match solutions.first() {
        Some(first) => {
            let discovered = zone.solution_variable_names(first).map_err(structural)?;
            apply_keep_filter(discovered, options.vars_keep())
        }
        None => Vec::new(),
    };

    let descriptors = steps::single_file_steps(&solutions, times.as_deref(), options);
    info!(
        imax = grid.imax(),
        jmax = grid.jmax(),
        steps = descriptors.len(),
        vars = selected_vars.len(),
        "container structure read"
    );

    let outcomes = run_steps(&descriptors, cancel, |descriptor| {
        let gathered = match &descriptor.solution {
            Some(solution) => {
                gather_variables(&zone, solution, &grid, &selected_vars, path)?
            }
            None => Gathered::default(),
        };
        Ok(write_step(descriptor, &grid, gathered, options, output_dir))
    })?;

    Ok(ConvertReport {
        output_dir: output_dir.to_path_buf(),
        steps: outcomes,
    })
}

/// Per-step series: one container per step, each opened independently.
/// The grid is computed once, from the first file in step order, and is
/// authoritative for the whole run.
fn convert_series(
    sources: &[ResolvedSource],
    output_dir: &Path,
    options: &ConvertOptions,
    cancel: &CancelToken,
) -> Result<ConvertReport, ConvertError> {
    let selected: Vec<(usize, &ResolvedSource)> = sources
        .iter()
        .filter_map(|s| s.step().map(|step| (step, s)))
        .filter(|(step, _)| options.step_selected(*step))
        .collect();

    let Some((_, first)) = selected.first() else {
        return Ok(ConvertReport {
            output_dir: output_dir.to_path_buf(),
            steps: Vec::new(),
        });
    };

    let grid = {
        let path = first.path();
        let structural = |e| ConvertError::from_cgns(path, e);
        let file = CgnsFile::open(path).map_err(structural)?;
        file.zone(options.zone_path())
            .map_err(structural)?
            .coordinates()
            .map_err(structural)?
    };
    info!(
        imax = grid.imax(),
        jmax = grid.jmax(),
        steps = selected.len(),
        "series structure read"
    );

    let outcomes = run_steps(&selected, cancel, |&(step, source)| {
        series_step(step, source, &grid, options, output_dir)
    })?;

    Ok(ConvertReport {
        output_dir: output_dir.to_path_buf(),
        steps: outcomes,
    })
}

/// Open one series member and export its (sole) step.
fn series_step(
    step: usize,
    source: &ResolvedSource,
    grid: &CoordinateGrid,
    options: &ConvertOptions,
    output_dir: &Path,
) -> Result<StepOutcome, ConvertError> {
    let path = source.path();
    let structural = |e| ConvertError::from_cgns(path, e);

    let file = CgnsFile::open(path).map_err(structural)?;
    let zone = file.zone(options.zone_path()).map_err(structural)?;
    let solutions = zone.solution_names().map_err(structural)?;
    let times = file.time_values(options.zone_path());
    let time = steps::time_at(times.as_deref(), 1);

    let gathered = match solutions.first() {
        Some(solution) => {
            let discovered = zone.solution_variable_names(solution).map_err(structural)?;
            let selected = apply_keep_filter(discovered, options.vars_keep());
            gather_variables(&zone, solution, grid, &selected, path)?
        }
        None => Gathered::default(),
    };

    let descriptor = StepDescriptor {
        step,
        time,
        solution: solutions.into_iter().next(),
    };
    Ok(write_step(&descriptor, grid, gathered, options, output_dir))
}

/// Run the per-step stage in parallel, honouring cancellation between
/// steps and aborting on the first structural error.
fn run_steps<T, F>(
    items: &[T],
    cancel: &CancelToken,
    process: F,
) -> Result<Vec<StepOutcome>, ConvertError>
where
    T: Sync,
    F: Fn(&T) -> Result<StepOutcome, ConvertError> + Sync,
{
    let results: Vec<Option<Result<StepOutcome, ConvertError>>> = items
        .par_iter()
        .map(|item| {
            if cancel.is_cancelled() {
                None
            } else {
                Some(process(item))
            }
        })
        .collect();

    if cancel.is_cancelled() {
        warn!("conversion cancelled between steps");
        return Err(ConvertError::Cancelled);
    }
    results.into_iter().flatten().collect()
}

/// A step's included variables plus its exclusion diagnostics.
#[derive(Default)]
struct Gathered {
    entries: Vec<VariableEntry>,
    skipped: Vec<SkippedVariable>,
    location: Option<String>,
}

/// Apply the per-step inclusion policy: a variable is exported iff its
/// array shape equals the grid's; everything else is recorded as skipped,
/// never raised.
fn gather_variables(
    zone: &Zone,
    solution: &str,
    grid: &CoordinateGrid,
    selected: &[String],
    path: &Path,
) -> Result<Gathered, ConvertError> {
    let mut raw = zone
        .solution_variables(solution)
        .map_err(|e| ConvertError::from_cgns(path, e))?;

    let mut gathered = Gathered {
        location: zone.grid_location(solution),
        ..Gathered::default()
    };
    for name in selected {
        // A variable can be absent from an individual step's group.
        let Some(pos) = raw.iter().position(|v| v.name == *name) else {
            continue;
        };
        let var = raw.swap_remove(pos);
        match var.array {
            Some(array) if grid.matches(&var.shape) => {
                gathered.entries.push(VariableEntry::new(var.name, array));
            }
            _ => {
                debug!(var = %var.name, shape = ?var.shape, "variable excluded by shape policy");
                gathered.skipped.push(SkippedVariable {
                    name: var.name,
                    shape: var.shape,
                });
            }
        }
    }
    Ok(gathered)
}

/// Build one frame and write it; failures become the step's outcome, not
/// the run's.
fn write_step(
    descriptor: &StepDescriptor,
    grid: &CoordinateGrid,
    gathered: Gathered,
    options: &ConvertOptions,
    output_dir: &Path,
) -> StepOutcome {
    let frame = match StepFrame::build(
        descriptor.step,
        descriptor.time,
        grid,
        gathered.entries,
        options.index_order(),
    ) {
        Ok(frame) => frame.with_location(gathered.location),
        Err(e) => {
            warn!(step = descriptor.step, error = %e, "frame build failed");
            return StepOutcome {
                step: descriptor.step,
                status: StepStatus::Failed {
                    reason: e.to_string(),
                },
            };
        }
    };

    match write_result_csv(&frame, output_dir, options.writer()) {
        Ok(path) => {
            debug!(step = descriptor.step, path = %path.display(), "step written");
            StepOutcome {
                step: descriptor.step,
                status: StepStatus::Written {
                    path,
                    time: descriptor.time,
                    skipped: gathered.skipped,
                },
            }
        }
        Err(e) => {
            warn!(step = descriptor.step, error = %e, "step write failed");
            StepOutcome {
                step: descriptor.step,
                status: StepStatus::Failed {
                    reason: e.to_string(),
                },
            }
        }
    }
}

/// Restrict discovered variable names to the caller's keep-list, in the
/// keep-list's order; with no list, discovery order is kept.
fn apply_keep_filter(discovered: Vec<String>, keep: Option<&[String]>) -> Vec<String> {
    match keep {
        Some(keep) => keep
            .iter()
            .filter(|name| discovered.contains(*name))
            .cloned()
            .collect(),
        None => discovered,
    }
}
