// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Provides 2D, 3D, and 4D `f32` vector types and their associated operations.

use serde::{Deserialize, Serialize};

use super::EPSILON;
use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

/// Implements the operations shared by every float vector: component-wise
/// arithmetic against vectors and scalars, reductions, and normalization.
macro_rules! impl_float_vector {
    ($name:ident, $len:literal, { $($field:ident),+ }) => {
        impl $name {
            /// Returns the components as an array, in declaration order.
            #[inline]
            pub const fn to_array(self) -> [f32; $len] {
                [$(self.$field),+]
            }

            /// Returns a new vector with the absolute value of each component.
            #[inline]
            pub fn abs(self) -> Self {
                Self { $($field: self.$field.abs()),+ }
            }

            /// Calculates the dot product of this vector and another.
            #[inline]
            pub fn dot(&self, rhs: Self) -> f32 {
                0.0 $(+ self.$field * rhs.$field)+
            }

            /// Calculates the squared length (magnitude) of the vector.
            /// This avoids the square root of [`length`](Self::length).
            #[inline]
            pub fn length_squared(&self) -> f32 {
                self.dot(*self)
            }

            /// Calculates the length (magnitude) of the vector.
            #[inline]
            pub fn length(&self) -> f32 {
                self.length_squared().sqrt()
            }

            /// Returns the vector divided by its length.
            ///
            /// A zero-length vector yields NaN components; use
            /// [`normalize_or_zero`](Self::normalize_or_zero) when the input
            /// may be degenerate.
            #[inline]
            pub fn normalize(&self) -> Self {
                *self / self.length()
            }

            /// Normalizes the vector in place. Same contract as [`normalize`](Self::normalize).
            #[inline]
            pub fn normalize_mut(&mut self) {
                *self = self.normalize();
            }

            /// Returns a normalized copy, or `ZERO` if the length is near zero.
            #[inline]
            pub fn normalize_or_zero(&self) -> Self {
                let len_sq = self.length_squared();
                if len_sq > EPSILON * EPSILON {
                    *self / len_sq.sqrt()
                } else {
                    Self::ZERO
                }
            }

            /// Returns the component-wise minimum of two vectors.
            #[inline]
            pub fn min(self, rhs: Self) -> Self {
                Self { $($field: self.$field.min(rhs.$field)),+ }
            }

            /// Returns the component-wise maximum of two vectors.
            #[inline]
            pub fn max(self, rhs: Self) -> Self {
                Self { $($field: self.$field.max(rhs.$field)),+ }
            }

            /// Returns the smallest component.
            #[inline]
            pub fn min_element(self) -> f32 {
                [$(self.$field),+].into_iter().fold(f32::INFINITY, f32::min)
            }

            /// Returns the largest component.
            #[inline]
            pub fn max_element(self) -> f32 {
                [$(self.$field),+].into_iter().fold(f32::NEG_INFINITY, f32::max)
            }

            /// Calculates the squared distance between this vector and another.
            #[inline]
            pub fn distance_squared(&self, other: Self) -> f32 {
                (*self - other).length_squared()
            }

            /// Calculates the distance between this vector and another.
            #[inline]
            pub fn distance(&self, other: Self) -> f32 {
                (*self - other).length()
            }

            /// Linearly interpolates between `start` and `end`. `t` is not clamped.
            #[inline]
            pub fn lerp(start: Self, end: Self, t: f32) -> Self {
                start + (end - start) * t
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

        impl Mul for $name {
            type Output = Self;
            /// Multiplies two vectors component-wise.
            #[inline]
            fn mul(self, rhs: Self) -> Self {
                Self { $($field: self.$field * rhs.$field),+ }
            }
        }

        impl Div for $name {
            type Output = Self;
            /// Divides two vectors component-wise.
            #[inline]
            fn div(self, rhs: Self) -> Self {
                Self { $($field: self.$field / rhs.$field),+ }
            }
        }

        impl Add<f32> for $name {
            type Output = Self;
            /// Adds a scalar to every component.
            #[inline]
            fn add(self, rhs: f32) -> Self {
                Self { $($field: self.$field + rhs),+ }
            }
        }

        impl Sub<f32> for $name {
            type Output = Self;
            /// Subtracts a scalar from every component.
            #[inline]
            fn sub(self, rhs: f32) -> Self {
                Self { $($field: self.$field - rhs),+ }
            }
        }

        impl Mul<f32> for $name {
            type Output = Self;
            #[inline]
            fn mul(self, rhs: f32) -> Self {
                Self { $($field: self.$field * rhs),+ }
            }
        }

        impl Mul<$name> for f32 {
            type Output = $name;
            #[inline]
            fn mul(self, rhs: $name) -> $name {
                rhs * self
            }
        }

        impl Div<f32> for $name {
            type Output = Self;
            #[inline]
            fn div(self, rhs: f32) -> Self {
                Self { $($field: self.$field / rhs),+ }
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
                *self = *self + rhs;
            }
        }

        impl SubAssign for $name {
            #[inline]
            fn sub_assign(&mut self, rhs: Self) {
                *self = *self - rhs;
            }
        }

        impl MulAssign<f32> for $name {
            #[inline]
            fn mul_assign(&mut self, rhs: f32) {
                *self = *self * rhs;
            }
        }

        impl DivAssign<f32> for $name {
            #[inline]
            fn div_assign(&mut self, rhs: f32) {
                *self = *self / rhs;
            }
        }

        impl Index<usize> for $name {
            type Output = f32;
            /// # Panics
            /// Panics if `index` is out of bounds for this vector.
            #[inline]
            fn index(&self, index: usize) -> &f32 {
                let fields = [$(&self.$field),+];
                match fields.get(index) {
                    Some(component) => *component,
                    None => panic!("Index out of bounds for {}", stringify!($name)),
                }
            }
        }

        impl IndexMut<usize> for $name {
            /// # Panics
            /// Panics if `index` is out of bounds for this vector.
            #[inline]
            fn index_mut(&mut self, index: usize) -> &mut f32 {
                let fields = [$(&mut self.$field),+];
                match fields.into_iter().nth(index) {
                    Some(component) => component,
                    None => panic!("Index out of bounds for {}", stringify!($name)),
                }
            }
        }

        impl From<[f32; $len]> for $name {
            #[inline]
            fn from([$($field),+]: [f32; $len]) -> Self {
                Self { $($field),+ }
            }
        }

        impl From<$name> for [f32; $len] {
            #[inline]
            fn from(v: $name) -> Self {
                v.to_array()
            }
        }
    };
}

// --- Vec2 ---

/// A 2-dimensional vector with `f32` components.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    bytemuck::Pod,
    bytemuck::Zeroable,
    Serialize,
    Deserialize,
)]
#[repr(C)]
pub struct Vec2 {
    /// The x component of the vector.
    pub x: f32,
    /// The y component of the vector.
    pub y: f32,
}

impl Vec2 {
    /// A vector with all components set to `0.0`.
    pub const ZERO: Self = Self::new(0.0, 0.0);
    /// A vector with all components set to `1.0`.
    pub const ONE: Self = Self::new(1.0, 1.0);
    /// The unit vector pointing along the positive X-axis.
    pub const X: Self = Self::new(1.0, 0.0);
    /// The unit vector pointing along the positive Y-axis.
    pub const Y: Self = Self::new(0.0, 1.0);

    /// Creates a new `Vec2` with the specified components.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Creates a vector with both components set to `v`.
    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v }
    }

    /// Returns this vector rotated counter-clockwise by `angle` radians.
    #[inline]
    pub fn rotate(self, angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self {
            x: self.x * c - self.y * s,
            y: self.x * s + self.y * c,
        }
    }

    /// Rotates this vector in place. Produces exactly what [`rotate`](Self::rotate) returns.
    #[inline]
    pub fn rotate_mut(&mut self, angle: f32) {
        *self = self.rotate(angle);
    }

    /// Extends the vector with a `z` component.
    #[inline]
    pub const fn extend(self, z: f32) -> Vec3 {
        Vec3::new(self.x, self.y, z)
    }
}

impl_float_vector!(Vec2, 2, { x, y });

// --- Vec3 ---

/// A 3-dimensional vector with `f32` components.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    bytemuck::Pod,
    bytemuck::Zeroable,
    Serialize,
    Deserialize,
)]
#[repr(C)]
pub struct Vec3 {
    /// The x component of the vector.
    pub x: f32,
    /// The y component of the vector.
    pub y: f32,
    /// The z component of the vector.
    pub z: f32,
}

impl Vec3 {
    /// A vector with all components set to `0.0`.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    /// A vector with all components set to `1.0`.
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);
    /// The unit vector pointing along the positive X-axis.
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    /// The unit vector pointing along the positive Y-axis.
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    /// The unit vector pointing along the positive Z-axis.
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    /// Creates a new `Vec3` with the specified components.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Creates a vector with all components set to `v`.
    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v, z: v }
    }

    /// Computes the right-handed cross product of this vector and another.
    ///
    /// The result is perpendicular to both inputs and is not normalized.
    #[inline]
    pub fn cross(&self, other: Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Extends the vector with a `w` component.
    #[inline]
    pub const fn extend(self, w: f32) -> Vec4 {
        Vec4::new(self.x, self.y, self.z, w)
    }

    /// Drops the `z` component.
    #[inline]
    pub const fn truncate(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

impl_float_vector!(Vec3, 3, { x, y, z });

// --- Vec4 ---

/// A 4-dimensional vector with `f32` components, often used for homogeneous coordinates.
///
/// Points carry `w = 1.0` and directions `w = 0.0` when transformed by a [`Mat4`](super::Mat4).
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    bytemuck::Pod,
    bytemuck::Zeroable,
    Serialize,
    Deserialize,
)]
#[repr(C)]
pub struct Vec4 {
    /// The x component of the vector.
    pub x: f32,
    /// The y component of the vector.
    pub y: f32,
    /// The z component of the vector.
    pub z: f32,
    /// The w component, used for homogeneous coordinates.
    pub w: f32,
}

impl Vec4 {
    /// A vector with all components set to `0.0`.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    /// A vector with all components set to `1.0`.
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// The unit vector pointing along the positive X-axis.
    pub const X: Self = Self::new(1.0, 0.0, 0.0, 0.0);
    /// The unit vector pointing along the positive Y-axis.
    pub const Y: Self = Self::new(0.0, 1.0, 0.0, 0.0);
    /// The unit vector pointing along the positive Z-axis.
    pub const Z: Self = Self::new(0.0, 0.0, 1.0, 0.0);
    /// The unit vector pointing along the positive W-axis.
    pub const W: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Creates a new `Vec4` with the specified components.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Creates a vector with all components set to `v`.
    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self {
            x: v,
            y: v,
            z: v,
            w: v,
        }
    }

    /// Creates a `Vec4` from a `Vec3` and a `w` component.
    #[inline]
    pub const fn from_vec3(v: Vec3, w: f32) -> Self {
        Self::new(v.x, v.y, v.z, w)
    }

    /// Returns the `[x, y, z]` components as a `Vec3`, discarding `w`.
    #[inline]
    pub const fn truncate(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

impl_float_vector!(Vec4, 4, { x, y, z, w });
