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

//! Flat geometric primitives in 2D and 3D.
//!
//! These are plain data records: construction and derived accessors only.
//! Intersection and containment queries belong to whatever system consumes them.

use super::{Mat4, Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};
use std::ops::Index;

// --- 2D ---

/// A 2D line segment.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Line {
    /// First endpoint.
    pub start: Vec2,
    /// Second endpoint.
    pub end: Vec2,
}

impl Line {
    /// Creates a segment between two points.
    #[inline]
    pub const fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    /// Creates a segment from raw coordinates.
    #[inline]
    pub const fn from_coords(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self::new(Vec2::new(x0, y0), Vec2::new(x1, y1))
    }

    /// Length of the segment.
    #[inline]
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }
}

/// A 2D rectangle given by its top-left corner and size.
///
/// `w` and `h` are expected to be non-negative but this is not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub w: f32,
    /// Height.
    pub h: f32,
}

impl Rect {
    /// Creates a rectangle from position and size.
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Builds the rectangle spanning two corners, in any order.
    #[inline]
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        let min = a.min(b);
        let size = a.max(b) - min;
        Self::new(min.x, min.y, size.x, size.y)
    }

    /// The `(x, y)` corner.
    #[inline]
    pub const fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// The `(x + w, y + h)` corner.
    #[inline]
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x + self.w, self.y + self.h)
    }

    /// The `(w, h)` extent.
    #[inline]
    pub const fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    /// The midpoint of the rectangle.
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min() + self.size() * 0.5
    }
}

/// A 2D circle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Circle {
    /// Center point.
    pub center: Vec2,
    /// Radius.
    pub radius: f32,
}

impl Circle {
    /// Creates a circle.
    #[inline]
    pub const fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

// --- 3D ---

/// An infinite plane: every point `p` with `normal.dot(p) == distance`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Plane {
    /// Plane normal. Expected to be unit length for `distance` to be metric.
    pub normal: Vec3,
    /// Signed distance from the origin along `normal`.
    pub distance: f32,
}

impl Plane {
    /// Creates a plane from a normal and its distance to the origin.
    #[inline]
    pub const fn new(normal: Vec3, distance: f32) -> Self {
        Self { normal, distance }
    }

    /// Creates the plane through `point` with the given `normal`.
    ///
    /// The normal is normalized; a zero normal yields NaN.
    #[inline]
    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Self {
        let normal = normal.normalize();
        Self::new(normal, normal.dot(point))
    }

    /// Builds a plane from homogeneous coefficients `(a, b, c, d)` of
    /// `a*x + b*y + c*z + d = 0`, rescaled to a unit normal.
    #[inline]
    pub fn from_coefficients(v: Vec4) -> Self {
        let inv_len = v.truncate().length().recip();
        Self::new(v.truncate() * inv_len, -v.w * inv_len)
    }
}

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Aabb {
    /// The corner with the smallest coordinates on all axes.
    pub min: Vec3,
    /// The corner with the largest coordinates on all axes.
    pub max: Vec3,
}

impl Aabb {
    /// Creates a box from two corners, sorting each axis.
    #[inline]
    pub fn from_min_max(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Creates a box from its minimum corner and its `(w, h, d)` size.
    #[inline]
    pub fn from_origin_size(origin: Vec3, size: Vec3) -> Self {
        Self::from_min_max(origin, origin + size)
    }

    /// Creates a box around `center` extending `half_extents` on each side.
    #[inline]
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        let half = half_extents.abs();
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// The midpoint of the box.
    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// The `(w, h, d)` extent.
    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Half of [`size`](Self::size).
    #[inline]
    pub fn half_extents(&self) -> Vec3 {
        self.size() * 0.5
    }
}

/// A sphere.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Sphere {
    /// Center point.
    pub center: Vec3,
    /// Radius.
    pub radius: f32,
}

impl Sphere {
    /// Creates a sphere.
    #[inline]
    pub const fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// Names the six planes of a [`Frustum`] in their storage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrustumFace {
    /// `planes[0]`
    Top = 0,
    /// `planes[1]`
    Bottom = 1,
    /// `planes[2]`
    Left = 2,
    /// `planes[3]`
    Right = 3,
    /// `planes[4]`
    Near = 4,
    /// `planes[5]`
    Far = 5,
}

impl FrustumFace {
    /// Every face, in storage order.
    pub const ALL: [Self; 6] = [
        Self::Top,
        Self::Bottom,
        Self::Left,
        Self::Right,
        Self::Near,
        Self::Far,
    ];
}

/// A view volume bounded by six planes, stored Top, Bottom, Left, Right, Near, Far.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Frustum {
    /// The bounding planes, indexed by [`FrustumFace`].
    pub planes: [Plane; 6],
}

impl Frustum {
    /// Creates a frustum from planes already in face order.
    #[inline]
    pub const fn new(planes: [Plane; 6]) -> Self {
        Self { planes }
    }

    /// Extracts the planes of an OpenGL-style clip matrix (usually
    /// `projection * view`). Normals point into the volume.
    pub fn from_view_projection(m: &Mat4) -> Self {
        let [r0, r1, r2, r3] = [m.row(0), m.row(1), m.row(2), m.row(3)];
        let planes = [
            r3 - r1, // Top
            r3 + r1, // Bottom
            r3 + r0, // Left
            r3 - r0, // Right
            r3 + r2, // Near
            r3 - r2, // Far
        ]
        .map(Plane::from_coefficients);
        Self { planes }
    }

    /// Returns the plane for `face`.
    #[inline]
    pub fn plane(&self, face: FrustumFace) -> &Plane {
        &self.planes[face as usize]
    }
}

impl Index<FrustumFace> for Frustum {
    type Output = Plane;
    #[inline]
    fn index(&self, face: FrustumFace) -> &Plane {
        self.plane(face)
    }
}
