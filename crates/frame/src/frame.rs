//! One step's tabular snapshot, ready for serialization.

use ndarray::Array2;

use crate::error::FrameError;
use crate::grid::CoordinateGrid;

/// Flattening order for grid-indexed columns.
///
/// The same order is used for generating I/J index columns and for
/// flattening coordinate and variable arrays, so a row always describes one
/// grid point. This ordering is part of the output format contract:
/// downstream consumers rely on row order matching the original tool's own
/// export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IndexOrder {
    /// Fortran ravel: I varies fastest, J is the outer loop. The original
    /// tool's default.
    #[default]
    ColumnMajor,
    /// C ravel: J varies fastest, I is the outer loop.
    RowMajor,
}

impl IndexOrder {
    /// Flatten a 2-D array into a row-per-grid-point column.
    pub(crate) fn ravel(self, a: &Array2<f64>) -> Vec<f64> {
        let (imax, jmax) = a.dim();
        let mut out = Vec::with_capacity(imax * jmax);
        match self {
            Self::ColumnMajor => {
                for j in 0..jmax {
                    for i in 0..imax {
                        out.push(a[[i, j]]);
                    }
                }
            }
            Self::RowMajor => {
                for i in 0..imax {
                    for j in 0..jmax {
                        out.push(a[[i, j]]);
                    }
                }
            }
        }
        out
    }
}

/// A named field variable selected for export.
#[derive(Debug, Clone)]
pub struct VariableEntry {
    name: String,
    values: Array2<f64>,
}

impl VariableEntry {
    /// Create an entry from a name and its node-centered array.
    pub fn new(name: impl Into<String>, values: Array2<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Variable name (becomes the column header).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The array's shape.
    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }
}

/// A flattened, named output column.
#[derive(Debug, Clone)]
pub struct VariableColumn {
    name: String,
    values: Vec<f64>,
}

impl VariableColumn {
    /// Column header name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Per-row values, in the frame's iteration order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// One simulation time step flattened into the legacy tabular layout.
///
/// Built fresh per step from the shared [`CoordinateGrid`] and the step's
/// included variables; never mutated after construction; consumed exactly
/// once by the writer. Variable columns keep first-seen insertion order so
/// the column layout is reproducible across steps.
#[derive(Debug, Clone)]
pub struct StepFrame {
    step: usize,
    time: f64,
    imax: usize,
    jmax: usize,
    i: Vec<u32>,
    j: Vec<u32>,
    x: Vec<f64>,
    y: Vec<f64>,
    variables: Vec<VariableColumn>,
    location: Option<String>,
}

impl StepFrame {
    /// Build a frame for `step` at `time` from the run's grid and the
    /// step's included variables.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::ShapeMismatch`] if a variable's shape differs
    /// from the grid's; inclusion filtering is the caller's job and a
    /// mismatch reaching this constructor is a contract violation surfaced
    /// explicitly.
    pub fn build(
        step: usize,
        time: f64,
        grid: &CoordinateGrid,
        variables: Vec<VariableEntry>,
        order: IndexOrder,
    ) -> Result<Self, FrameError> {
        let (imax, jmax) = grid.shape();
        for v in &variables {
            if v.shape() != (imax, jmax) {
                let (gi, gj) = v.shape();
                return Err(FrameError::ShapeMismatch {
                    name: v.name.clone(),
                    expected_i: imax,
                    expected_j: jmax,
                    got: vec![gi, gj],
                });
            }
        }

        let n = imax * jmax;
        let mut i_col = Vec::with_capacity(n);
        let mut j_col = Vec::with_capacity(n);
        match order {
            IndexOrder::ColumnMajor => {
                for j in 0..jmax {
                    for i in 0..imax {
                        i_col.push(i as u32 + 1);
                        j_col.push(j as u32 + 1);
                    }
                }
            }
            IndexOrder::RowMajor => {
                for i in 0..imax {
                    for j in 0..jmax {
                        i_col.push(i as u32 + 1);
                        j_col.push(j as u32 + 1);
                    }
                }
            }
        }

        let variables = variables
            .into_iter()
            .map(|v| VariableColumn {
                values: order.ravel(&v.values),
                name: v.name,
            })
            .collect();

        Ok(Self {
            step,
            time,
            imax,
            jmax,
            i: i_col,
            j: j_col,
            x: order.ravel(grid.x()),
            y: order.ravel(grid.y()),
            variables,
            location: None,
        })
    }

    /// Attach the solution's grid-location label (informational only).
    pub fn with_location(mut self, location: Option<String>) -> Self {
        self.location = location;
        self
    }

    /// Step number.
    pub fn step(&self) -> usize {
        self.step
    }

    /// Time value for this step.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// First grid dimension.
    pub fn imax(&self) -> usize {
        self.imax
    }

    /// Second grid dimension.
    pub fn jmax(&self) -> usize {
        self.jmax
    }

    /// Number of data rows (`imax * jmax`).
    pub fn n_rows(&self) -> usize {
        self.imax * self.jmax
    }

    /// 1-based I index column.
    pub fn i(&self) -> &[u32] {
        &self.i
    }

    /// 1-based J index column.
    pub fn j(&self) -> &[u32] {
        &self.j
    }

    /// Flattened X coordinates.
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Flattened Y coordinates.
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Included variable columns, in insertion order.
    pub fn variables(&self) -> &[VariableColumn] {
        &self.variables
    }

    /// Grid-location label of the source solution, when known.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn grid_3x2() -> CoordinateGrid {
        let x = array![[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]];
        let y = array![[0.0, 10.0], [0.0, 10.0], [0.0, 10.0]];
        CoordinateGrid::new(x, y).expect("valid grid")
    }

    #[test]
    fn column_major_index_order() {
        let grid = grid_3x2();
        let frame =
            StepFrame::build(1, 0.0, &grid, vec![], IndexOrder::ColumnMajor).expect("builds");
        assert_eq!(frame.i(), &[1, 2, 3, 1, 2, 3]);
        assert_eq!(frame.j(), &[1, 1, 1, 2, 2, 2]);
        assert_eq!(frame.x(), &[0.0, 1.0, 2.0, 0.0, 1.0, 2.0]);
        assert_eq!(frame.y(), &[0.0, 0.0, 0.0, 10.0, 10.0, 10.0]);
    }

    #[test]
    fn row_major_index_order() {
        let grid = grid_3x2();
        let frame = StepFrame::build(1, 0.0, &grid, vec![], IndexOrder::RowMajor).expect("builds");
        assert_eq!(frame.i(), &[1, 1, 2, 2, 3, 3]);
        assert_eq!(frame.j(), &[1, 2, 1, 2, 1, 2]);
        assert_eq!(frame.x(), &[0.0, 0.0, 1.0, 1.0, 2.0, 2.0]);
    }

    #[test]
    fn variable_ravel_follows_frame_order() {
        let grid = grid_3x2();
        let h = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let frame = StepFrame::build(
            1,
            0.0,
            &grid,
            vec![VariableEntry::new("h", h)],
            IndexOrder::ColumnMajor,
        )
        .expect("builds");
        assert_eq!(frame.variables()[0].values(), &[1.0, 3.0, 5.0, 2.0, 4.0, 6.0]);
    }

    #[test]
    fn variables_keep_insertion_order() {
        let grid = grid_3x2();
        let a = Array2::<f64>::zeros((3, 2));
        let frame = StepFrame::build(
            1,
            0.0,
            &grid,
            vec![
                VariableEntry::new("ZS", a.clone()),
                VariableEntry::new("Depth", a.clone()),
                VariableEntry::new("ZB", a),
            ],
            IndexOrder::default(),
        )
        .expect("builds");
        let names: Vec<&str> = frame.variables().iter().map(|v| v.name()).collect();
        assert_eq!(names, vec!["ZS", "Depth", "ZB"]);
    }

    #[test]
    fn shape_mismatch_is_rejected() {
        let grid = grid_3x2();
        let bad = Array2::<f64>::zeros((2, 1));
        let err = StepFrame::build(
            1,
            0.0,
            &grid,
            vec![VariableEntry::new("h", bad)],
            IndexOrder::default(),
        )
        .unwrap_err();
        assert!(matches!(err, FrameError::ShapeMismatch { .. }));
    }
}
