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

//! Integer vectors, used for pixel coordinates, grid cells and sizes.

use super::{Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

macro_rules! impl_int_vector {
    ($name:ident, $float:ident, { $($field:ident),+ }) => {
        impl $name {
            /// Component-wise minimum.
            #[inline]
            pub fn min(self, rhs: Self) -> Self {
                Self { $($field: self.$field.min(rhs.$field)),+ }
            }

            /// Component-wise maximum.
            #[inline]
            pub fn max(self, rhs: Self) -> Self {
                Self { $($field: self.$field.max(rhs.$field)),+ }
            }

            /// Converts to the float vector of the same dimension.
            #[inline]
            pub fn as_float(self) -> $float {
                $float { $($field: self.$field as f32),+ }
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
            #[inline]
            fn mul(self, rhs: Self) -> Self {
                Self { $($field: self.$field * rhs.$field),+ }
            }
        }

        impl Mul<i32> for $name {
            type Output = Self;
            #[inline]
            fn mul(self, rhs: i32) -> Self {
                Self { $($field: self.$field * rhs),+ }
            }
        }

        impl Neg for $name {
            type Output = Self;
            #[inline]
            fn neg(self) -> Self {
                Self { $($field: -self.$field),+ }
            }
        }
    };
}

/// A 2D integer vector.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    bytemuck::Pod,
    bytemuck::Zeroable,
    Serialize,
    Deserialize,
)]
#[repr(C)]
pub struct IVec2 {
    /// The x component.
    pub x: i32,
    /// The y component.
    pub y: i32,
}

impl IVec2 {
    /// `(0, 0)`.
    pub const ZERO: Self = Self::new(0, 0);

    /// Creates a new `IVec2`.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Alias for [`as_float`](Self::as_float).
    #[inline]
    pub fn as_vec2(self) -> Vec2 {
        self.as_float()
    }
}

impl_int_vector!(IVec2, Vec2, { x, y });

/// A 3D integer vector.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    bytemuck::Pod,
    bytemuck::Zeroable,
    Serialize,
    Deserialize,
)]
#[repr(C)]
pub struct IVec3 {
    /// The x component.
    pub x: i32,
    /// The y component.
    pub y: i32,
    /// The z component.
    pub z: i32,
}

impl IVec3 {
    /// `(0, 0, 0)`.
    pub const ZERO: Self = Self::new(0, 0, 0);

    /// Creates a new `IVec3`.
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Alias for [`as_float`](Self::as_float).
    #[inline]
    pub fn as_vec3(self) -> Vec3 {
        self.as_float()
    }
}

impl_int_vector!(IVec3, Vec3, { x, y, z });

/// A 4D integer vector.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    bytemuck::Pod,
    bytemuck::Zeroable,
    Serialize,
    Deserialize,
)]
#[repr(C)]
pub struct IVec4 {
    /// The x component.
    pub x: i32,
    /// The y component.
    pub y: i32,
    /// The z component.
    pub z: i32,
    /// The w component.
    pub w: i32,
}

impl IVec4 {
    /// `(0, 0, 0, 0)`.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Creates a new `IVec4`.
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32, w: i32) -> Self {
        Self { x, y, z, w }
    }

    /// Alias for [`as_float`](Self::as_float).
    #[inline]
    pub fn as_vec4(self) -> Vec4 {
        self.as_float()
    }
}

impl_int_vector!(IVec4, Vec4, { x, y, z, w });
