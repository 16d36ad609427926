//! Periodic simulation cell and minimum-image projection.
//!
//! A [`Cell`] is the parallelepiped volume a dislocation network lives in:
//! a 3×3 edge matrix whose columns are the cell vectors, plus per-axis
//! periodicity flags. The one non-trivial operation is
//! [`Cell::closest_image`], which maps a point to the translated copy of
//! itself nearest a reference point under the cell's periodic images.
//!
//! Wrapping works in fractional coordinates: the displacement from the
//! reference is taken through the cached inverse of the edge matrix, each
//! periodic axis is reduced into `[-1/2, 1/2)`, and the result is taken back
//! to Cartesian coordinates. This covers general non-singular cells, though
//! only diagonal (axis-aligned) cells are exercised by the shipped
//! generators and tests.

use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from cell construction.
#[derive(Debug, Error)]
pub enum CellError {
    #[error("cell edge matrix is singular (det = {det:.3e})")]
    SingularEdgeMatrix { det: f64 },
}

/// A periodic simulation cell.
///
/// Immutable after construction: the network's positions change over a
/// simulation, the cell does not. The edge-matrix inverse is cached at
/// construction, so a singular edge matrix is rejected up front instead of
/// surfacing later as NaN geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "CellData", into = "CellData")]
pub struct Cell {
    h: Matrix3<f64>,
    h_inv: Matrix3<f64>,
    is_periodic: [bool; 3],
}

/// Serialised form of a [`Cell`]; re-validated on deserialisation.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CellData {
    h: Matrix3<f64>,
    is_periodic: [bool; 3],
}

impl TryFrom<CellData> for Cell {
    type Error = CellError;

    fn try_from(data: CellData) -> Result<Self, Self::Error> {
        Cell::new(data.h, data.is_periodic)
    }
}

impl From<Cell> for CellData {
    fn from(cell: Cell) -> Self {
        Self {
            h: cell.h,
            is_periodic: cell.is_periodic,
        }
    }
}

impl Cell {
    /// Create a cell from an edge matrix and per-axis periodicity flags.
    ///
    /// Columns of `h` are the cell edge vectors (lengths in units of the
    /// Burgers vector magnitude).
    pub fn new(h: Matrix3<f64>, is_periodic: [bool; 3]) -> Result<Self, CellError> {
        let det = h.determinant();
        if !det.is_finite() || det.abs() <= f64::EPSILON {
            return Err(CellError::SingularEdgeMatrix { det });
        }
        let h_inv = h
            .try_inverse()
            .ok_or(CellError::SingularEdgeMatrix { det })?;
        Ok(Self {
            h,
            h_inv,
            is_periodic,
        })
    }

    /// Axis-aligned cubic cell with the given edge length.
    pub fn cubic(edge: f64, periodic: bool) -> Result<Self, CellError> {
        Self::new(Matrix3::from_diagonal_element(edge), [periodic; 3])
    }

    /// The cell edge matrix.
    pub fn h(&self) -> &Matrix3<f64> {
        &self.h
    }

    /// Per-axis periodicity flags, fixed at construction.
    pub fn is_periodic(&self) -> [bool; 3] {
        self.is_periodic
    }

    /// Geometric centre of the cell: half the sum of the edge vectors.
    pub fn center(&self) -> Vector3<f64> {
        0.5 * (self.h * Vector3::repeat(1.0))
    }

    /// Minimum-image projection of `r` about `r_ref`.
    ///
    /// Returns the representative of `r`'s periodic-image family (integer
    /// combinations of the periodic edge vectors) nearest `r_ref`. Axes
    /// whose periodicity flag is off pass through untranslated. Idempotent:
    /// wrapping an already-closest image returns it unchanged.
    ///
    /// The per-axis fractional reduction is `s − floor(s + 1/2)`, landing in
    /// `[-1/2, 1/2)` — the boundary displacement `+L/2` maps to `−L/2`.
    pub fn closest_image(&self, r_ref: &Vector3<f64>, r: &Vector3<f64>) -> Vector3<f64> {
        let mut s = self.h_inv * (r - r_ref);
        for axis in 0..3 {
            if self.is_periodic[axis] {
                s[axis] -= (s[axis] + 0.5).floor();
            }
        }
        r_ref + self.h * s
    }

    /// Batched [`closest_image`](Self::closest_image): wraps every point
    /// about `r_ref`, preserving input order.
    pub fn closest_images(
        &self,
        r_ref: &Vector3<f64>,
        points: &[Vector3<f64>],
    ) -> Vec<Vector3<f64>> {
        points
            .iter()
            .map(|r| self.closest_image(r_ref, r))
            .collect()
    }
}
