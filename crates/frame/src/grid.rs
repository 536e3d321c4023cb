//! Coordinate grid shared by every exported step.

use ndarray::Array2;

use crate::error::FrameError;

/// X/Y node coordinates over a structured `imax x jmax` grid.
///
/// The grid's shape is the authoritative shape for a whole conversion run:
/// it is computed once from the zone's grid-coordinate node, and a field
/// variable is exported only when its array shape matches it exactly.
/// Immutable once read.
#[derive(Debug, Clone)]
pub struct CoordinateGrid {
    x: Array2<f64>,
    y: Array2<f64>,
}

impl CoordinateGrid {
    /// Build a grid from X and Y coordinate arrays.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::ShapeMismatch`] when the two arrays disagree
    /// in shape.
    pub fn new(x: Array2<f64>, y: Array2<f64>) -> Result<Self, FrameError> {
        if x.dim() != y.dim() {
            let (xi, xj) = x.dim();
            return Err(FrameError::ShapeMismatch {
                name: "CoordinateY".to_string(),
                expected_i: xi,
                expected_j: xj,
                got: y.shape().to_vec(),
            });
        }
        Ok(Self { x, y })
    }

    /// First grid dimension.
    pub fn imax(&self) -> usize {
        self.x.nrows()
    }

    /// Second grid dimension.
    pub fn jmax(&self) -> usize {
        self.x.ncols()
    }

    /// `(imax, jmax)` pair.
    pub fn shape(&self) -> (usize, usize) {
        self.x.dim()
    }

    /// Whether `shape` (as reported by a source array) matches this grid.
    pub fn matches(&self, shape: &[usize]) -> bool {
        shape == [self.imax(), self.jmax()]
    }

    /// X coordinate array.
    pub fn x(&self) -> &Array2<f64> {
        &self.x
    }

    /// Y coordinate array.
    pub fn y(&self) -> &Array2<f64> {
        &self.y
    }
}
