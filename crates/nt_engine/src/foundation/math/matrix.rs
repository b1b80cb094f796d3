//! 4x4 transform matrix

use std::ops::Mul;

use approx::{AbsDiffEq, RelativeEq};
use serde::{Deserialize, Serialize};

use super::{Vector3, EPSILON};

/// 4x4 matrix stored row-major (`m[row * 4 + col]`).
///
/// The default value is the zero matrix; use [`Matrix4::identity`] for the
/// neutral transform. Column 3 of rows 0-2 holds the translation.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Matrix4 {
    /// Row-major entries
    pub m: [f32; 16],
}

impl Matrix4 {
    /// All-zero matrix, same as `Matrix4::default()`
    pub const fn zeros() -> Self {
        Self { m: [0.0; 16] }
    }

    /// Build a matrix from row-major entries
    pub const fn from_row_major(m: [f32; 16]) -> Self {
        Self { m }
    }

    /// Entry at `row`, `col`.
    ///
    /// # Panics
    /// Panics if `row` or `col` is 4 or greater.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        assert!(row < 4 && col < 4, "matrix index ({row}, {col}) out of range");
        self.m[row * 4 + col]
    }

    /// Row-major entries as a slice
    pub fn as_slice(&self) -> &[f32] {
        &self.m
    }

    /// Ones on the diagonal, zero elsewhere
    pub fn identity() -> Self {
        let mut mat = Self::zeros();
        mat.m[0] = 1.0;
        mat.m[5] = 1.0;
        mat.m[10] = 1.0;
        mat.m[15] = 1.0;
        mat
    }

    /// Translation by `pos`
    pub fn translate(pos: Vector3) -> Self {
        let mut mat = Self::identity();
        mat.m[3] = pos.x;
        mat.m[7] = pos.y;
        mat.m[11] = pos.z;
        mat
    }

    /// Non-uniform scale along the three axes
    pub fn scale(scale: Vector3) -> Self {
        let mut mat = Self::identity();
        mat.m[0] = scale.x;
        mat.m[5] = scale.y;
        mat.m[10] = scale.z;
        mat
    }

    /// Rotation about the X axis (Y-Z plane), angle in radians
    pub fn rotate_x(angle_rad: f32) -> Self {
        let (s, c) = angle_rad.sin_cos();
        let mut mat = Self::identity();
        mat.m[5] = c;
        mat.m[6] = -s;
        mat.m[9] = s;
        mat.m[10] = c;
        mat
    }

    /// Rotation about the Y axis (Z-X plane), angle in radians
    pub fn rotate_y(angle_rad: f32) -> Self {
        let (s, c) = angle_rad.sin_cos();
        let mut mat = Self::identity();
        mat.m[0] = c;
        mat.m[2] = s;
        mat.m[8] = -s;
        mat.m[10] = c;
        mat
    }

    /// Rotation about the Z axis (X-Y plane), angle in radians
    pub fn rotate_z(angle_rad: f32) -> Self {
        let (s, c) = angle_rad.sin_cos();
        let mut mat = Self::identity();
        mat.m[0] = c;
        mat.m[1] = -s;
        mat.m[4] = s;
        mat.m[5] = c;
        mat
    }
}

/// `self * rhs`; when applied to a point, `rhs` acts first.
impl Mul for Matrix4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let mut result = Self::zeros();
        for row in 0..4 {
            for col in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += self.m[row * 4 + k] * rhs.m[k * 4 + col];
                }
                result.m[row * 4 + col] = sum;
            }
        }
        result
    }
}

/// Transforms `v` as a point (`w = 1`).
///
/// Row 3 is never read: the matrix is always treated as affine, so a
/// projective bottom row has no effect here.
impl Mul<Vector3> for Matrix4 {
    type Output = Vector3;

    fn mul(self, v: Vector3) -> Vector3 {
        let m = &self.m;
        Vector3::new(
            m[0] * v.x + m[1] * v.y + m[2] * v.z + m[3],
            m[4] * v.x + m[5] * v.y + m[6] * v.z + m[7],
            m[8] * v.x + m[9] * v.y + m[10] * v.z + m[11],
        )
    }
}

impl AbsDiffEq for Matrix4 {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.m
            .iter()
            .zip(other.m.iter())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for Matrix4 {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.m
            .iter()
            .zip(other.m.iter())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

impl From<nalgebra::Matrix4<f32>> for Matrix4 {
    fn from(mat: nalgebra::Matrix4<f32>) -> Self {
        let mut m = [0.0; 16];
        for row in 0..4 {
            for col in 0..4 {
                m[row * 4 + col] = mat[(row, col)];
            }
        }
        Self { m }
    }
}

impl From<Matrix4> for nalgebra::Matrix4<f32> {
    fn from(mat: Matrix4) -> Self {
        Self::from_row_slice(&mat.m)
    }
}

// `[f32; 16]` under `#[repr(C)]`, no padding.
unsafe impl bytemuck::Zeroable for Matrix4 {}
unsafe impl bytemuck::Pod for Matrix4 {}
