//! 3D affine transformation matrices and rotation state
use std::ops::Mul;

use nalgebra::{Matrix4, Point3, Vector3};

/// Tolerance used when checking that the last row of a matrix is `[0, 0, 0, 1]`.
pub const AFFINE_EPSILON: f64 = 1e-9;

/// Rotation around three axes (in radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EulerRotation {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl EulerRotation {
    pub fn from_degrees(x: f64, y: f64, z: f64) -> Self {
        Self {
            x: x.to_radians(),
            y: y.to_radians(),
            z: z.to_radians(),
        }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }
}

impl Default for EulerRotation {
    fn default() -> Self {
        Self::zero()
    }
}

/// A 4x4 affine transform acting on column vectors (`p' = M * p`).
///
/// `Transform` is `Copy`: every value handed out is an independent snapshot,
/// so callers can never reach back into a cache that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    matrix: Matrix4<f64>,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Create a translation transform
    pub fn translation(x: f64, y: f64, z: f64) -> Self {
        Matrix4::new_translation(&Vector3::new(x, y, z)).into()
    }

    /// Create a non-uniform scale transform
    pub fn scale(sx: f64, sy: f64, sz: f64) -> Self {
        Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz)).into()
    }

    /// Create a rotation transform from Euler angles
    pub fn rotation(rotation: &EulerRotation) -> Self {
        let rx = Matrix4::new_rotation(Vector3::new(rotation.x, 0.0, 0.0));
        let ry = Matrix4::new_rotation(Vector3::new(0.0, rotation.y, 0.0));
        let rz = Matrix4::new_rotation(Vector3::new(0.0, 0.0, rotation.z));

        // Apply rotations in order: X, Y, Z
        (rz * ry * rx).into()
    }

    /// Build a transform from a row-major array.
    pub fn from_rows(rows: [[f64; 4]; 4]) -> Self {
        Matrix4::from_fn(|i, j| rows[i][j]).into()
    }

    /// Row-major snapshot of the matrix.
    pub fn to_rows(&self) -> [[f64; 4]; 4] {
        let mut rows = [[0.0; 4]; 4];
        for (i, row) in rows.iter_mut().enumerate() {
            for (j, value) in row.iter_mut().enumerate() {
                *value = self.matrix[(i, j)];
            }
        }
        rows
    }

    pub fn matrix(&self) -> &Matrix4<f64> {
        &self.matrix
    }

    /// Apply `self` first and `next` afterwards.
    pub fn then(&self, next: &Transform) -> Transform {
        *next * *self
    }

    pub fn transform_point(&self, point: &Point3<f64>) -> Point3<f64> {
        self.matrix.transform_point(point)
    }

    pub fn is_finite(&self) -> bool {
        self.matrix.iter().all(|value| value.is_finite())
    }

    /// Whether the matrix is finite and has an affine last row.
    pub fn is_affine(&self) -> bool {
        const LAST_ROW: [f64; 4] = [0.0, 0.0, 0.0, 1.0];

        self.is_finite()
            && LAST_ROW
                .iter()
                .enumerate()
                .all(|(j, expected)| (self.matrix[(3, j)] - expected).abs() <= AFFINE_EPSILON)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<Matrix4<f64>> for Transform {
    fn from(matrix: Matrix4<f64>) -> Self {
        Self { matrix }
    }
}

impl Mul for Transform {
    type Output = Transform;

    fn mul(self, rhs: Transform) -> Transform {
        Transform {
            matrix: self.matrix * rhs.matrix,
        }
    }
}
