//! Legacy result CSV reader.
//!
//! Parses files produced by [`crate::write_result_csv`] (or by the original
//! tool): skip the time-stamp and dimension lines, then a plain CSV table.
//! Used for round-trip validation and by callers that receive an
//! already-converted result folder.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::FrameError;

/// Parsed contents of one legacy result file.
#[derive(Debug, Clone)]
pub struct ResultCsv {
    time: f64,
    imax: usize,
    jmax: usize,
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl ResultCsv {
    /// Time value from the first header line.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// First grid dimension from the second header line.
    pub fn imax(&self) -> usize {
        self.imax
    }

    /// Second grid dimension from the second header line.
    pub fn jmax(&self) -> usize {
        self.jmax
    }

    /// Column names, in file order (starts with `I,J,X,Y`).
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Data rows, one per grid point.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Values of one named column, if present.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let idx = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|r| r[idx]).collect())
    }
}

/// Read one legacy result file.
///
/// The dimension line is parsed leniently (older exports occasionally carry
/// a malformed one); it falls back to `0,0` as the original tool does. The
/// time line and the data table are strict.
///
/// # Errors
///
/// Returns [`FrameError::ParseFailed`] when the file cannot be read, or
/// when the time line, the column header, or a data cell cannot be parsed.
pub fn read_result_csv(path: &Path) -> Result<ResultCsv, FrameError> {
    let raw = fs::read_to_string(path).map_err(|e| parse_failed(path, 0, &e.to_string()))?;
    let text = raw.strip_prefix('\u{feff}').unwrap_or(&raw);
    let mut lines = text.lines().enumerate();

    let (_, first) = lines
        .next()
        .ok_or_else(|| parse_failed(path, 1, "empty file"))?;
    let time = parse_time_line(first).ok_or_else(|| parse_failed(path, 1, "bad time line"))?;

    let (imax, jmax) = lines
        .next()
        .and_then(|(_, l)| parse_dims_line(l))
        .unwrap_or((0, 0));

    let (_, header) = lines
        .next()
        .ok_or_else(|| parse_failed(path, 3, "missing column header"))?;
    let columns: Vec<String> = header.split(',').map(|c| c.trim().to_string()).collect();

    let mut rows = Vec::new();
    for (idx, line) in lines {
        if line.is_empty() {
            continue;
        }
        let row: Vec<f64> = line
            .split(',')
            .map(|cell| cell.trim().parse::<f64>())
            .collect::<Result<_, _>>()
            .map_err(|e| parse_failed(path, idx + 1, &e.to_string()))?;
        if row.len() != columns.len() {
            return Err(parse_failed(
                path,
                idx + 1,
                &format!("expected {} cells, got {}", columns.len(), row.len()),
            ));
        }
        rows.push(row);
    }

    Ok(ResultCsv {
        time,
        imax,
        jmax,
        columns,
        rows,
    })
}

/// Parse `iRIC output t = <time>`.
fn parse_time_line(line: &str) -> Option<f64> {
    let (_, value) = line.split_once('=')?;
    value.trim().parse::<f64>().ok()
}

/// Parse `<imax>,<jmax>`.
fn parse_dims_line(line: &str) -> Option<(usize, usize)> {
    let (i, j) = line.split_once(',')?;
    Some((i.trim().parse().ok()?, j.trim().parse().ok()?))
}

fn parse_failed(path: &Path, line: usize, reason: &str) -> FrameError {
    FrameError::ParseFailed {
        path: PathBuf::from(path),
        line,
        reason: reason.to_string(),
    }
}
