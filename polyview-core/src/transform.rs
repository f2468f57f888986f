/// Rotation matrices applied to vertex buffers
use nalgebra::{Matrix3, Point3};

/// Coordinate axis to rotate about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Transform builder for 3D rotations
pub struct Transform;

impl Transform {
    /// Rotation matrix for `angle` radians about `axis`.
    ///
    /// Matrices are meant to be applied to row vectors (`v * R`), see
    /// [`Transform::rotate_points`].
    #[rustfmt::skip]
    pub fn rotation_matrix(axis: Axis, angle: f64) -> Matrix3<f64> {
        let (s, c) = angle.sin_cos();
        match axis {
            Axis::X => Matrix3::new(
                1.0, 0.0, 0.0,
                0.0, c, -s,
                0.0, s, c,
            ),
            Axis::Y => Matrix3::new(
                c, 0.0, s,
                0.0, 1.0, 0.0,
                -s, 0.0, c,
            ),
            Axis::Z => Matrix3::new(
                c, -s, 0.0,
                s, c, 0.0,
                0.0, 0.0, 1.0,
            ),
        }
    }

    /// Overwrite every point with `point * matrix`, treating points as row vectors
    pub fn rotate_points(points: &mut [Point3<f64>], matrix: &Matrix3<f64>) {
        for point in points.iter_mut() {
            // (v R)^T = R^T v^T
            point.coords = matrix.tr_mul(&point.coords);
        }
    }
}
