//! Per-step outcome reporting.

use std::path::PathBuf;

use serde::Serialize;

/// A variable excluded from a step's export set, with the reason.
///
/// Shape mismatches are diagnostics, never errors: cell-centered and other
/// non-grid-shaped arrays are expected in real archives.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedVariable {
    /// Variable name as discovered.
    pub name: String,
    /// The offending array shape.
    pub shape: Vec<usize>,
}

/// What happened to one step.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepStatus {
    /// The step's file was written.
    Written {
        /// Path of the written result file.
        path: PathBuf,
        /// Time value exported for the step.
        time: f64,
        /// Variables excluded by the shape policy.
        skipped: Vec<SkippedVariable>,
    },
    /// The step's file could not be written, or its frame could not be
    /// assembled. Other steps in the run are unaffected.
    Failed {
        /// Description of the failure.
        reason: String,
    },
}

/// Outcome of one step within a conversion run.
#[derive(Debug, Clone, Serialize)]
pub struct StepOutcome {
    /// Step number.
    pub step: usize,
    /// What happened.
    #[serde(flatten)]
    pub status: StepStatus,
}

impl StepOutcome {
    /// Whether the step's file was written.
    pub fn is_written(&self) -> bool {
        matches!(self.status, StepStatus::Written { .. })
    }
}

/// Result of a whole conversion run.
#[derive(Debug, Clone, Serialize)]
pub struct ConvertReport {
    /// Directory the result files were written into.
    pub output_dir: PathBuf,
    /// Per-step outcomes, in ascending step order.
    pub steps: Vec<StepOutcome>,
}

impl ConvertReport {
    /// Number of steps whose files were written.
    pub fn n_written(&self) -> usize {
        self.steps.iter().filter(|s| s.is_written()).count()
    }

    /// Number of steps that failed.
    pub fn n_failed(&self) -> usize {
        self.steps.len() - self.n_written()
    }

    /// Whether any step failed.
    pub fn has_failures(&self) -> bool {
        self.n_failed() > 0
    }
}
