//! Conversion options.
//!
//! Zone and case naming are explicit fields with documented defaults,
//! never module-level state.

use riverscope_frame::{CsvWriterConfig, IndexOrder};

use crate::error::ConvertError;

/// Default zone path inside iRIC containers.
pub const DEFAULT_ZONE_PATH: &str = "iRIC/iRICZone";

/// Configuration for one conversion run.
///
/// Use the builder methods (`with_*`) to override the case file name, the
/// target zone, the exported variable set, the step range/stride, the row
/// iteration order, and the output file naming.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Case file name preferred during input resolution.
    case_name: String,
    /// Zone path inside the container.
    zone_path: String,
    /// Variables to keep, in the given order; `None` keeps everything in
    /// discovery order.
    vars_keep: Option<Vec<String>>,
    /// First step to export (1-based).
    step_from: usize,
    /// Last step to export (inclusive); `None` means the final step.
    step_to: Option<usize>,
    /// Step stride.
    step_skip: usize,
    /// Row iteration order for index and value columns.
    index_order: IndexOrder,
    /// Output file naming.
    writer: CsvWriterConfig,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            case_name: riverscope_project::DEFAULT_CASE_NAME.to_string(),
            zone_path: DEFAULT_ZONE_PATH.to_string(),
            vars_keep: None,
            step_from: 1,
            step_to: None,
            step_skip: 1,
            index_order: IndexOrder::default(),
            writer: CsvWriterConfig::default(),
        }
    }
}

impl ConvertOptions {
    /// Set the case file name preferred during input resolution.
    pub fn with_case_name(mut self, name: impl Into<String>) -> Self {
        self.case_name = name.into();
        self
    }

    /// Set the zone path inside the container.
    pub fn with_zone_path(mut self, path: impl Into<String>) -> Self {
        self.zone_path = path.into();
        self
    }

    /// Keep only the named variables, in this order, or `None` for all.
    pub fn with_vars_keep(mut self, vars: Option<Vec<String>>) -> Self {
        self.vars_keep = vars;
        self
    }

    /// Set the first step to export (1-based).
    pub fn with_step_from(mut self, step: usize) -> Self {
        self.step_from = step;
        self
    }

    /// Set the last step to export (inclusive), or `None` for the final
    /// step.
    pub fn with_step_to(mut self, step: Option<usize>) -> Self {
        self.step_to = step;
        self
    }

    /// Set the step stride.
    pub fn with_step_skip(mut self, skip: usize) -> Self {
        self.step_skip = skip;
        self
    }

    /// Set the row iteration order.
    pub fn with_index_order(mut self, order: IndexOrder) -> Self {
        self.index_order = order;
        self
    }

    /// Set the output file naming configuration.
    pub fn with_writer(mut self, writer: CsvWriterConfig) -> Self {
        self.writer = writer;
        self
    }

    pub(crate) fn case_name(&self) -> &str {
        &self.case_name
    }

    pub(crate) fn zone_path(&self) -> &str {
        &self.zone_path
    }

    pub(crate) fn vars_keep(&self) -> Option<&[String]> {
        self.vars_keep.as_deref()
    }

    pub(crate) fn step_from(&self) -> usize {
        self.step_from
    }

    pub(crate) fn step_to(&self) -> Option<usize> {
        self.step_to
    }

    pub(crate) fn step_skip(&self) -> usize {
        self.step_skip
    }

    pub(crate) fn index_order(&self) -> IndexOrder {
        self.index_order
    }

    pub(crate) fn writer(&self) -> &CsvWriterConfig {
        &self.writer
    }

    /// Validate that the options are internally consistent.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::Validation`] when the step range or stride
    /// is degenerate or the writer configuration is invalid.
    pub fn validate(&self) -> Result<(), ConvertError> {
        if self.step_from < 1 {
            return Err(ConvertError::Validation {
                details: format!("step_from must be at least 1, got {}", self.step_from),
            });
        }
        if self.step_skip < 1 {
            return Err(ConvertError::Validation {
                details: format!("step_skip must be at least 1, got {}", self.step_skip),
            });
        }
        if let Some(to) = self.step_to {
            if to < self.step_from {
                return Err(ConvertError::Validation {
                    details: format!(
                        "step_to ({to}) must not precede step_from ({})",
                        self.step_from
                    ),
                });
            }
        }
        self.writer.validate().map_err(|e| ConvertError::Validation {
            details: e.to_string(),
        })
    }

    /// Whether `step` falls inside the configured range and stride.
    pub(crate) fn step_selected(&self, step: usize) -> bool {
        if step < self.step_from {
            return false;
        }
        if let Some(to) = self.step_to {
            if step > to {
                return false;
            }
        }
        (step - self.step_from) % self.step_skip == 0
    }
}
