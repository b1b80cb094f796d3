//! 2D, 3D and 4D vector types
//!
//! The three types share one implementation generated by `impl_vector!`;
//! they differ only in component count, plus [`Vector3::cross`].

use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

use super::EPSILON;

/// 2D vector
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Vector2 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
}

/// 3D vector, used both as a point and as a direction
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Vector3 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
}

/// 4D vector
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Vector4 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
    /// W component
    pub w: f32,
}

macro_rules! impl_vector {
    ($name:ident, $na:ident, $n:literal, $($field:ident),+) => {
        impl $name {
            /// Create a vector from its components
            #[inline]
            pub const fn new($($field: f32),+) -> Self {
                Self { $($field),+ }
            }

            /// Vector with every component set to 0
            #[inline]
            pub const fn zeros() -> Self {
                Self { $($field: 0.0),+ }
            }

            /// Vector with every component set to 1
            #[inline]
            pub const fn ones() -> Self {
                Self { $($field: 1.0),+ }
            }

            /// Euclidean length
            #[inline]
            pub fn magnitude(&self) -> f32 {
                self.sqr_magnitude().sqrt()
            }

            /// Squared length, cheaper than [`Self::magnitude`] for comparisons
            #[inline]
            pub fn sqr_magnitude(&self) -> f32 {
                Self::dot(*self, *self)
            }

            /// Unit-length copy of this vector.
            ///
            /// Vectors whose magnitude is not greater than [`EPSILON`] yield
            /// the zero vector instead of dividing by a near-zero length.
            pub fn normalized(&self) -> Self {
                let magnitude = self.magnitude();
                if magnitude > EPSILON {
                    *self / magnitude
                } else {
                    Self::zeros()
                }
            }

            /// Sum of component-wise products
            #[inline]
            pub fn dot(a: Self, b: Self) -> f32 {
                0.0 $(+ a.$field * b.$field)+
            }

            /// Linear interpolation `a * (1 - t) + b * t`.
            ///
            /// `t` is not clamped; values outside `[0, 1]` extrapolate.
            #[inline]
            pub fn lerp(a: Self, b: Self, t: f32) -> Self {
                a * (1.0 - t) + b * t
            }

            /// Components as an array
            #[inline]
            pub const fn to_array(self) -> [f32; $n] {
                [$(self.$field),+]
            }
        }

        impl Add for $name {
            type Output = Self;

            #[inline]
            fn add(self, rhs: Self) -> Self {
                Self { $($field: self.$field + rhs.$field),+ }
            }
        }

        impl Sub for $name {
            type Output = Self;

            #[inline]
            fn sub(self, rhs: Self) -> Self {
                Self { $($field: self.$field - rhs.$field),+ }
            }
        }

        impl Mul<f32> for $name {
            type Output = Self;

            #[inline]
            fn mul(self, s: f32) -> Self {
                Self { $($field: self.$field * s),+ }
            }
        }

        // Division by zero is left to IEEE-754 (inf / NaN).
        impl Div<f32> for $name {
            type Output = Self;

            #[inline]
            fn div(self, s: f32) -> Self {
                Self { $($field: self.$field / s),+ }
            }
        }

        impl Neg for $name {
            type Output = Self;

            #[inline]
            fn neg(self) -> Self {
                Self { $($field: -self.$field),+ }
            }
        }

        impl AddAssign for $name {
            #[inline]
            fn add_assign(&mut self, rhs: Self) {
                $(self.$field += rhs.$field;)+
            }
        }

        impl SubAssign for $name {
            #[inline]
            fn sub_assign(&mut self, rhs: Self) {
                $(self.$field -= rhs.$field;)+
            }
        }

        impl MulAssign<f32> for $name {
            #[inline]
            fn mul_assign(&mut self, s: f32) {
                $(self.$field *= s;)+
            }
        }

        impl DivAssign<f32> for $name {
            #[inline]
            fn div_assign(&mut self, s: f32) {
                $(self.$field /= s;)+
            }
        }

        /// Component-wise comparison with a strict `< EPSILON` tolerance
        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                $((self.$field - other.$field).abs() < EPSILON)&&+
            }
        }

        impl approx::AbsDiffEq for $name {
            type Epsilon = f32;

            fn default_epsilon() -> f32 {
                EPSILON
            }

            fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
                $(<f32 as approx::AbsDiffEq>::abs_diff_eq(&self.$field, &other.$field, epsilon))&&+
            }
        }

        impl approx::RelativeEq for $name {
            fn default_max_relative() -> f32 {
                <f32 as approx::RelativeEq>::default_max_relative()
            }

            fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
                $(<f32 as approx::RelativeEq>::relative_eq(
                    &self.$field,
                    &other.$field,
                    epsilon,
                    max_relative,
                ))&&+
            }
        }

        impl From<[f32; $n]> for $name {
            #[inline]
            fn from(components: [f32; $n]) -> Self {
                let [$($field),+] = components;
                Self { $($field),+ }
            }
        }

        impl From<$name> for [f32; $n] {
            #[inline]
            fn from(v: $name) -> Self {
                v.to_array()
            }
        }

        impl From<nalgebra::$na<f32>> for $name {
            #[inline]
            fn from(v: nalgebra::$na<f32>) -> Self {
                Self { $($field: v.$field),+ }
            }
        }

        impl From<$name> for nalgebra::$na<f32> {
            #[inline]
            fn from(v: $name) -> Self {
                Self::new($(v.$field),+)
            }
        }

        // Plain `#[repr(C)]` f32 fields, no padding.
        unsafe impl bytemuck::Zeroable for $name {}
        unsafe impl bytemuck::Pod for $name {}
    };
}

impl_vector!(Vector2, Vector2, 2, x, y);
impl_vector!(Vector3, Vector3, 3, x, y, z);
impl_vector!(Vector4, Vector4, 4, x, y, z, w);

impl Vector3 {
    /// Right-handed cross product
    pub fn cross(a: Self, b: Self) -> Self {
        Self::new(
            a.y * b.z - a.z * b.y,
            a.z * b.x - a.x * b.z,
            a.x * b.y - a.y * b.x,
        )
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl fmt::Display for Vector4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x, self.y, self.z, self.w)
    }
}
