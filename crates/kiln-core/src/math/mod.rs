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

//! Vector, matrix, color and geometry primitives for 2D and 3D.
//!
//! Every type in this module is a `Copy` value. Operations return new values;
//! the only exceptions are the explicitly named `*_mut` variants, which write
//! back through `&mut self`.
//!
//! Matrices are column-major and use the column-vector convention (`M * v`).
//! All angles are in **radians**, with a single exception: the vertical field
//! of view passed to [`Mat4::perspective`] is in **degrees**.
//!
//! No function here validates its input. Degenerate arguments (normalizing a
//! zero vector, `near == far`, a zero aspect ratio, ...) produce NaN or
//! infinity instead of an error. [`camera::Camera::validate`] is the opt-in
//! place to catch them.

// --- Fundamental Constants ---

/// A small constant for floating-point comparisons.
pub const EPSILON: f32 = 1e-5;

pub use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

/// The factor to convert degrees to radians (PI / 180.0).
pub const DEG_TO_RAD: f32 = PI / 180.0;
/// The factor to convert radians to degrees (180.0 / PI).
pub const RAD_TO_DEG: f32 = 180.0 / PI;

// --- Declare Sub-Modules ---

pub mod camera;
pub mod color;
pub mod geometry;
pub mod ivector;
pub mod matrix;
pub mod vector;

// --- Re-export Principal Types ---

pub use self::camera::{Camera, CameraError, Projection};
pub use self::color::{Color, ColorF};
pub use self::geometry::{Aabb, Circle, Frustum, FrustumFace, Line, Plane, Rect, Sphere};
pub use self::ivector::{IVec2, IVec3, IVec4};
pub use self::matrix::{Mat3, Mat4};
pub use self::vector::{Vec2, Vec3, Vec4};

// --- Utility Functions ---

/// Converts an angle from degrees to radians.
///
/// # Examples
///
/// ```
/// use kiln_core::math::{degrees_to_radians, PI};
/// assert_eq!(degrees_to_radians(180.0), PI);
/// ```
#[inline]
pub fn degrees_to_radians(degrees: f32) -> f32 {
    degrees * DEG_TO_RAD
}

/// Converts an angle from radians to degrees.
///
/// # Examples
///
/// ```
/// use kiln_core::math::{radians_to_degrees, PI};
/// assert_eq!(radians_to_degrees(PI), 180.0);
/// ```
#[inline]
pub fn radians_to_degrees(radians: f32) -> f32 {
    radians * RAD_TO_DEG
}

/// Clamps a value to the `[lo, hi]` range.
///
/// Works for any partially ordered scalar, integer or float.
///
/// ```
/// use kiln_core::math::clamp;
/// assert_eq!(clamp(1.5, 0.0, 1.0), 1.0);
/// assert_eq!(clamp(-3, 0, 10), 0);
/// ```
#[inline]
pub fn clamp<T: PartialOrd>(value: T, lo: T, hi: T) -> T {
    if value < lo {
        lo
    } else if value > hi {
        hi
    } else {
        value
    }
}

/// Approximate float equality with a caller-supplied tolerance.
#[inline]
pub fn approx_eq_eps(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() < epsilon
}

/// Approximate float equality using [`EPSILON`].
///
/// ```
/// use kiln_core::math::{approx_eq, EPSILON};
/// assert!(approx_eq(1.0, 1.0 + EPSILON / 2.0));
/// assert!(!approx_eq(1.0, 1.0 + EPSILON * 2.0));
/// ```
#[inline]
pub fn approx_eq(a: f32, b: f32) -> bool {
    approx_eq_eps(a, b, EPSILON)
}
