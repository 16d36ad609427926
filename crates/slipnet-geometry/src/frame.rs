//! Crystallographic glide-frame construction.
//!
//! A [`GlideFrame`] is the orthonormal right-handed frame of a glide system:
//! `z` along the plane normal, `y` along the dislocation line, `x`
//! completing the frame within the glide plane. The line direction is the
//! 90° in-plane rotation of the Burgers direction (the screw→edge character
//! angle is fixed at 90° for the configurations built here), which reduces
//! to `normalize(n × b)`.

use nalgebra::{Matrix3, Vector3};

use crate::{GeometryError, NORMALISE_TOL};

fn unit(v: &Vector3<f64>) -> Result<Vector3<f64>, GeometryError> {
    v.try_normalize(NORMALISE_TOL)
        .ok_or(GeometryError::DegenerateVector { norm: v.norm() })
}

/// Orthonormal right-handed frame aligned with a glide system.
///
/// Rows of the rotation matrix are the frame axes `[x, line, n]`; rotating a
/// laboratory vector into the frame is a left multiplication.
#[derive(Debug, Clone)]
pub struct GlideFrame {
    rotation: Matrix3<f64>,
}

impl GlideFrame {
    /// Build the frame from a Burgers vector and glide-plane normal.
    ///
    /// Both inputs are normalised internally; they need not be unit length.
    /// Fails fast on zero-length input or parallel `b` and `n` — the frame
    /// is undefined in either case and must not silently produce NaNs.
    pub fn from_burgers_and_normal(
        burgers: &Vector3<f64>,
        plane_normal: &Vector3<f64>,
    ) -> Result<Self, GeometryError> {
        let n = unit(plane_normal)?;
        let b = unit(burgers)?;
        let line = n
            .cross(&b)
            .try_normalize(NORMALISE_TOL)
            .ok_or(GeometryError::ParallelVectors)?;
        let x = line
            .cross(&n)
            .try_normalize(NORMALISE_TOL)
            .ok_or(GeometryError::ParallelVectors)?;
        let rotation = Matrix3::from_rows(&[x.transpose(), line.transpose(), n.transpose()]);
        Ok(Self { rotation })
    }

    /// The rotation matrix; rows are the frame axes.
    pub fn rotation(&self) -> &Matrix3<f64> {
        &self.rotation
    }

    /// Rotate a laboratory-frame vector into the glide frame.
    pub fn to_frame(&self, v: &Vector3<f64>) -> Vector3<f64> {
        self.rotation * v
    }

    /// Dislocation line direction in laboratory coordinates.
    pub fn line_direction(&self) -> Vector3<f64> {
        self.rotation.row(1).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_frame_is_orthonormal_and_right_handed() {
        let pairs = [
            (Vector3::new(1.0, 1.0, 1.0), Vector3::new(1.0, -1.0, 0.0)),
            (Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 1.0)),
            (Vector3::new(0.5, -0.5, 0.0), Vector3::new(1.0, 1.0, 1.0)),
        ];
        for (b, n) in pairs {
            let frame = GlideFrame::from_burgers_and_normal(&b, &n).unwrap();
            let r = frame.rotation();
            assert_relative_eq!(r * r.transpose(), Matrix3::identity(), epsilon = 1e-12);
            assert_relative_eq!(r.determinant(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_bcc_glide_system_maps_burgers_to_x() {
        // 1/2<111>{110}
        let b = Vector3::new(1.0, 1.0, 1.0) / 3f64.sqrt();
        let n = Vector3::new(1.0, -1.0, 0.0);
        let frame = GlideFrame::from_burgers_and_normal(&b, &n).unwrap();
        assert_relative_eq!(
            frame.to_frame(&b),
            Vector3::new(1.0, 0.0, 0.0),
            epsilon = 1e-12
        );
        // plane normal lands on z
        assert_relative_eq!(
            frame.to_frame(&n.normalize()),
            Vector3::new(0.0, 0.0, 1.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_line_direction_perpendicular_to_inputs() {
        let b = Vector3::new(2.0, 0.5, -1.0);
        let n = Vector3::new(0.0, 1.0, 1.0);
        let frame = GlideFrame::from_burgers_and_normal(&b, &n).unwrap();
        let line = frame.line_direction();
        assert_relative_eq!(line.dot(&n.normalize()), 0.0, epsilon = 1e-12);
        assert_relative_eq!(line.norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_vector_fails_fast() {
        let result = GlideFrame::from_burgers_and_normal(&Vector3::zeros(), &Vector3::z());
        assert!(matches!(result, Err(GeometryError::DegenerateVector { .. })));
    }

    #[test]
    fn test_parallel_inputs_fail_fast() {
        let b = Vector3::new(1.0, 2.0, 3.0);
        let result = GlideFrame::from_burgers_and_normal(&b, &(2.0 * b));
        assert!(matches!(result, Err(GeometryError::ParallelVectors)));
    }
}
