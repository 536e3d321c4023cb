//! Step enumeration for the single-file layout.

use crate::options::ConvertOptions;

/// One simulation time step scheduled for export.
#[derive(Debug, Clone)]
pub struct StepDescriptor {
    /// Step number: 1-based positional index in the single-file layout,
    /// parsed file-name suffix in the per-step series layout.
    pub step: usize,
    /// Time value; 0.0 when the source carries no time series.
    pub time: f64,
    /// Solution-group name holding the step's field data; `None` for a
    /// coordinates-only container.
    pub(crate) solution: Option<String>,
}

/// Enumerate the steps of a single shared container.
///
/// Step numbers are 1-based positions in the solution-pointer list; time
/// values index the time series positionally and default to 0.0 when the
/// series is absent or too short. A container with no solutions still
/// yields one coordinates-only step. The configured range and stride
/// subset the sequence.
pub(crate) fn single_file_steps(
    solutions: &[String],
    times: Option<&[f64]>,
    options: &ConvertOptions,
) -> Vec<StepDescriptor> {
    if solutions.is_empty() {
        if options.step_selected(1) {
            return vec![StepDescriptor {
                step: 1,
                time: time_at(times, 1),
                solution: None,
            }];
        }
        return Vec::new();
    }

    (1..=solutions.len())
        .filter(|&step| options.step_selected(step))
        .map(|step| StepDescriptor {
            step,
            time: time_at(times, step),
            solution: Some(solutions[step - 1].clone()),
        })
        .collect()
}

/// Time value for a 1-based step, defaulting to 0.0 when unavailable.
pub(crate) fn time_at(times: Option<&[f64]>, step: usize) -> f64 {
    times
        .and_then(|t| t.get(step - 1).copied())
        .unwrap_or(0.0)
}
