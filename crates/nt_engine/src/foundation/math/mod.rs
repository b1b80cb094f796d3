//! Math utilities and types
//!
//! Provides the vector and matrix types used to position and orient geometry.
//!
//! # Conventions
//!
//! - All scalars are `f32`.
//! - Equality on vectors is approximate: two components compare equal when
//!   their absolute difference is strictly less than [`EPSILON`].
//! - [`Matrix4`] is stored row-major (`index = row * 4 + col`) and defaults to
//!   all zeros, not identity.
//! - `Matrix4 * Vector3` treats the vector as a point with `w = 1` and reads
//!   only rows 0-2 of the matrix, so every matrix is applied as affine.
//! - In a product `A * B` applied to a point, `B` acts first:
//!   `Matrix4::translate(p) * Matrix4::scale(s)` scales, then translates.

mod matrix;
mod vector;


pub use matrix::Matrix4;
pub use vector::{Vector2, Vector3, Vector4};

pub use constants::{E, EPSILON, PI};

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Euler's number
    pub const E: f32 = std::f32::consts::E;

    /// Tolerance used by vector equality and normalization
    pub const EPSILON: f32 = 1e-6;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }
}
