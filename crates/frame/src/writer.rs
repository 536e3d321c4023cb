//! Legacy result CSV writer.
//!
//! The byte layout is fixed: downstream tooling parses these files by line
//! and column position, so the header lines, column order, row order, and
//! the UTF-8 BOM prefix all have to match the original tool's export.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::FrameError;
use crate::format::{format_time, format_value};
use crate::frame::StepFrame;

/// UTF-8 byte-order marker expected by the consuming legacy tooling.
const BOM: &[u8] = b"\xef\xbb\xbf";

/// Placeholder replaced by the step number in the output file name.
const STEP_PLACEHOLDER: &str = "{step}";

/// Configuration for writing legacy result CSV files.
///
/// The file-name template is a configuration input rather than a constant,
/// so alternative output conventions don't require writer changes.
#[derive(Debug, Clone)]
pub struct CsvWriterConfig {
    /// Output file name per step; `{step}` is replaced by the step number.
    filename_template: String,
}

impl Default for CsvWriterConfig {
    fn default() -> Self {
        Self {
            filename_template: "Result_{step}.csv".to_string(),
        }
    }
}

impl CsvWriterConfig {
    /// Sets the output file-name template.
    pub fn with_filename_template(mut self, template: impl Into<String>) -> Self {
        self.filename_template = template.into();
        self
    }

    /// Output file name for `step`.
    pub fn file_name_for(&self, step: usize) -> String {
        self.filename_template
            .replace(STEP_PLACEHOLDER, &step.to_string())
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::Validation`] if the template is missing the
    /// `{step}` placeholder (successive steps would overwrite each other).
    pub fn validate(&self) -> Result<(), FrameError> {
        if !self.filename_template.contains(STEP_PLACEHOLDER) {
            return Err(FrameError::Validation {
                details: format!(
                    "filename template '{}' must contain '{STEP_PLACEHOLDER}'",
                    self.filename_template
                ),
            });
        }
        Ok(())
    }
}

/// Write one step frame to `out_dir`, returning the written path.
///
/// Layout: BOM, `iRIC output t = <time>`, `<imax>,<jmax>`, the
/// `I,J,X,Y,<vars...>` header, then one row per grid point in the frame's
/// iteration order. `\n` line endings throughout.
///
/// # Errors
///
/// Returns [`FrameError::WriteFailed`] on any I/O fault. A failed step
/// write never aborts the caller's run; each step's outcome is reported
/// independently.
pub fn write_result_csv(
    frame: &StepFrame,
    out_dir: &Path,
    config: &CsvWriterConfig,
) -> Result<PathBuf, FrameError> {
    let path = out_dir.join(config.file_name_for(frame.step()));

    fs::create_dir_all(out_dir).map_err(|e| write_failed(&path, &e))?;
    let file = File::create(&path).map_err(|e| write_failed(&path, &e))?;
    let mut w = BufWriter::new(file);

    write_frame(&mut w, frame).map_err(|e| write_failed(&path, &e))?;
    w.flush().map_err(|e| write_failed(&path, &e))?;

    Ok(path)
}

fn write_frame<W: Write>(w: &mut W, frame: &StepFrame) -> std::io::Result<()> {
    w.write_all(BOM)?;
    writeln!(w, "iRIC output t = {}", format_time(frame.time()))?;
    writeln!(w, "{},{}", frame.imax(), frame.jmax())?;

    write!(w, "I,J,X,Y")?;
    for var in frame.variables() {
        write!(w, ",{}", var.name())?;
    }
    writeln!(w)?;

    for row in 0..frame.n_rows() {
        write!(
            w,
            "{},{},{},{}",
            frame.i()[row],
            frame.j()[row],
            format_value(frame.x()[row]),
            format_value(frame.y()[row]),
        )?;
        for var in frame.variables() {
            write!(w, ",{}", format_value(var.values()[row]))?;
        }
        writeln!(w)?;
    }
    Ok(())
}

fn write_failed(path: &Path, e: &std::io::Error) -> FrameError {
    FrameError::WriteFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_template() {
        let config = CsvWriterConfig::default();
        assert_eq!(config.file_name_for(1), "Result_1.csv");
        assert_eq!(config.file_name_for(120), "Result_120.csv");
    }

    #[test]
    fn custom_template() {
        let config = CsvWriterConfig::default().with_filename_template("Step{step}.txt");
        assert_eq!(config.file_name_for(7), "Step7.txt");
    }

    #[test]
    fn validate_rejects_template_without_placeholder() {
        let config = CsvWriterConfig::default().with_filename_template("Result.csv");
        let err = config.validate().unwrap_err();
        match err {
            FrameError::Validation { details } => assert!(details.contains("{step}")),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn validate_default_ok() {
        assert!(CsvWriterConfig::default().validate().is_ok());
    }
}
