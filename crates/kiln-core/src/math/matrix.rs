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

//! Defines the `Mat3` and `Mat4` types and associated operations.
//!
//! Both types are column-major and transform column vectors (`M * v`). The
//! `translate`, `rotate` and `scale` builders post-multiply, so
//! `m.translate(t)` is `m * Mat4::from_translation(t)`: the new transform is
//! applied to vectors *before* the existing one.

use super::{Vec2, Vec3, Vec4, DEG_TO_RAD, EPSILON};
use serde::{Deserialize, Serialize};
use std::array;
use std::ops::{Add, Div, Index, IndexMut, Mul, Sub};

/// Operations shared by both matrix types. Each type must provide `row`,
/// `IDENTITY` and a `Mul` impl for its column vector.
macro_rules! impl_matrix_common {
    ($mat:ident, $col:ident) => {
        impl $mat {
            /// Multiplies two matrices element by element (Hadamard product).
            #[inline]
            pub fn mul_elementwise(&self, rhs: &Self) -> Self {
                Self {
                    cols: array::from_fn(|i| self.cols[i] * rhs.cols[i]),
                }
            }

            /// Divides two matrices element by element.
            #[inline]
            pub fn div_elementwise(&self, rhs: &Self) -> Self {
                Self {
                    cols: array::from_fn(|i| self.cols[i] / rhs.cols[i]),
                }
            }

            /// Returns the transpose: rows become columns.
            #[inline]
            pub fn transpose(&self) -> Self {
                Self {
                    cols: array::from_fn(|i| self.row(i)),
                }
            }

            /// Returns the matrix as a borrowed, column-major `f32` slice.
            #[inline]
            pub fn as_slice(&self) -> &[f32] {
                bytemuck::cast_slice(&self.cols)
            }
        }

        impl Default for $mat {
            /// Returns the identity matrix.
            #[inline]
            fn default() -> Self {
                Self::IDENTITY
            }
        }

        impl Add for $mat {
            type Output = Self;
            #[inline]
            fn add(self, rhs: Self) -> Self {
                Self {
                    cols: array::from_fn(|i| self.cols[i] + rhs.cols[i]),
                }
            }
        }

        impl Sub for $mat {
            type Output = Self;
            #[inline]
            fn sub(self, rhs: Self) -> Self {
                Self {
                    cols: array::from_fn(|i| self.cols[i] - rhs.cols[i]),
                }
            }
        }

        impl Div for $mat {
            type Output = Self;
            /// Element-wise division. Same as [`div_elementwise`](Self::div_elementwise).
            #[inline]
            fn div(self, rhs: Self) -> Self {
                self.div_elementwise(&rhs)
            }
        }

        impl Add<f32> for $mat {
            type Output = Self;
            #[inline]
            fn add(self, rhs: f32) -> Self {
                Self {
                    cols: self.cols.map(|c| c + rhs),
                }
            }
        }

        impl Sub<f32> for $mat {
            type Output = Self;
            #[inline]
            fn sub(self, rhs: f32) -> Self {
                Self {
                    cols: self.cols.map(|c| c - rhs),
                }
            }
        }

        impl Mul<f32> for $mat {
            type Output = Self;
            #[inline]
            fn mul(self, rhs: f32) -> Self {
                Self {
                    cols: self.cols.map(|c| c * rhs),
                }
            }
        }

        impl Div<f32> for $mat {
            type Output = Self;
            #[inline]
            fn div(self, rhs: f32) -> Self {
                Self {
                    cols: self.cols.map(|c| c / rhs),
                }
            }
        }

        impl Mul for $mat {
            type Output = Self;
            /// True matrix product. `(a * b) * v == a * (b * v)`.
            #[inline]
            fn mul(self, rhs: Self) -> Self {
                Self {
                    cols: rhs.cols.map(|c| self * c),
                }
            }
        }

        impl Index<usize> for $mat {
            type Output = $col;
            /// Returns the column at `index`.
            #[inline]
            fn index(&self, index: usize) -> &$col {
                &self.cols[index]
            }
        }

        impl IndexMut<usize> for $mat {
            #[inline]
            fn index_mut(&mut self, index: usize) -> &mut $col {
                &mut self.cols[index]
            }
        }
    };
}

// --- Mat3 ---

/// A 3x3 column-major matrix, used for 2D affine transformations.
///
/// The translation lives in the third column (`cols[2].x`, `cols[2].y`).
#[derive(
    Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable, Serialize, Deserialize,
)]
#[repr(C)]
pub struct Mat3 {
    /// The columns of the matrix. `cols[0]` is the first column, and so on.
    pub cols: [Vec3; 3],
}

impl Mat3 {
    /// The 3x3 identity matrix.
    pub const IDENTITY: Self = Self {
        cols: [Vec3::X, Vec3::Y, Vec3::Z],
    };

    /// A 3x3 matrix with all elements set to 0.
    pub const ZERO: Self = Self {
        cols: [Vec3::ZERO; 3],
    };

    /// Creates a new matrix from three column vectors.
    #[inline]
    pub const fn from_cols(c0: Vec3, c1: Vec3, c2: Vec3) -> Self {
        Self { cols: [c0, c1, c2] }
    }

    /// Returns row `index` as a `Vec3`.
    ///
    /// # Panics
    /// Panics if `index > 2`.
    #[inline]
    pub fn row(&self, index: usize) -> Vec3 {
        Vec3::new(
            self.cols[0][index],
            self.cols[1][index],
            self.cols[2][index],
        )
    }

    /// Creates a 2D translation matrix.
    #[inline]
    pub const fn from_translation(t: Vec2) -> Self {
        Self::from_cols(Vec3::X, Vec3::Y, Vec3::new(t.x, t.y, 1.0))
    }

    /// Creates a counter-clockwise rotation about the Z-axis, in radians.
    #[inline]
    pub fn from_rotation_z(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_cols(Vec3::new(c, s, 0.0), Vec3::new(-s, c, 0.0), Vec3::Z)
    }

    /// Creates a 2D scaling matrix. The homogeneous row is left untouched.
    #[inline]
    pub const fn from_scale(s: Vec2) -> Self {
        Self::from_cols(Vec3::new(s.x, 0.0, 0.0), Vec3::new(0.0, s.y, 0.0), Vec3::Z)
    }

    /// Takes the upper-left 3x3 block of a `Mat4`.
    #[inline]
    pub fn from_mat4(m: &Mat4) -> Self {
        Self {
            cols: array::from_fn(|i| m.cols[i].truncate()),
        }
    }

    /// Embeds this matrix in the upper-left block of an identity `Mat4`.
    #[inline]
    pub fn to_mat4(&self) -> Mat4 {
        let [c0, c1, c2] = self.cols;
        Mat4::from_cols(c0.extend(0.0), c1.extend(0.0), c2.extend(0.0), Vec4::W)
    }

    /// Post-multiplies a translation.
    #[inline]
    pub fn translate(&self, t: Vec2) -> Self {
        *self * Self::from_translation(t)
    }

    /// Post-multiplies a translation along X.
    #[inline]
    pub fn translate_x(&self, x: f32) -> Self {
        self.translate(Vec2::new(x, 0.0))
    }

    /// Post-multiplies a translation along Y.
    #[inline]
    pub fn translate_y(&self, y: f32) -> Self {
        self.translate(Vec2::new(0.0, y))
    }

    /// Post-multiplies a rotation about Z. 2D transforms can only rotate about Z.
    #[inline]
    pub fn rotate(&self, angle: f32) -> Self {
        *self * Self::from_rotation_z(angle)
    }

    /// Post-multiplies a scale.
    #[inline]
    pub fn scale(&self, s: Vec2) -> Self {
        *self * Self::from_scale(s)
    }

    /// Post-multiplies a scale along X.
    #[inline]
    pub fn scale_x(&self, x: f32) -> Self {
        self.scale(Vec2::new(x, 1.0))
    }

    /// Post-multiplies a scale along Y.
    #[inline]
    pub fn scale_y(&self, y: f32) -> Self {
        self.scale(Vec2::new(1.0, y))
    }

    /// Composes a full 2D transform onto this matrix.
    ///
    /// Vectors are scaled first, then rotated, then translated:
    /// the result is `self * T * R * S`.
    #[inline]
    pub fn transform(&self, translation: Vec2, angle: f32, scale: Vec2) -> Self {
        self.translate(translation).rotate(angle).scale(scale)
    }

    /// Transforms a 2D point (implicit `w = 1`), so translation applies.
    #[inline]
    pub fn transform_point2(&self, p: Vec2) -> Vec2 {
        (*self * p.extend(1.0)).truncate()
    }

    /// Transforms a 2D direction (implicit `w = 0`), so translation is ignored.
    #[inline]
    pub fn transform_vector2(&self, v: Vec2) -> Vec2 {
        (*self * v.extend(0.0)).truncate()
    }

    /// Computes the determinant as the scalar triple product of the columns.
    #[inline]
    pub fn determinant(&self) -> f32 {
        let [c0, c1, c2] = self.cols;
        c0.dot(c1.cross(c2))
    }

    /// Computes the inverse, or `None` if the matrix is singular.
    pub fn inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if det.abs() < EPSILON {
            return None;
        }
        let [c0, c1, c2] = self.cols;
        // The rows of the inverse are the pairwise cross products of the columns.
        let rows = Self::from_cols(c1.cross(c2), c2.cross(c0), c0.cross(c1));
        Some(rows.transpose() * det.recip())
    }

    /// Returns all nine elements in column-major order.
    #[inline]
    pub fn to_cols_array(&self) -> [f32; 9] {
        bytemuck::cast(self.cols)
    }
}

impl_matrix_common!(Mat3, Vec3);

impl Mul<Vec3> for Mat3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, v: Vec3) -> Vec3 {
        self.cols[0] * v.x + self.cols[1] * v.y + self.cols[2] * v.z
    }
}

// --- Mat4 ---

/// A 4x4 column-major matrix for 3D affine and projective transformations.
///
/// The translation lives in the fourth column (`cols[3].x`, `cols[3].y`, `cols[3].z`).
#[derive(
    Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable, Serialize, Deserialize,
)]
#[repr(C)]
pub struct Mat4 {
    /// The columns of the matrix. `cols[0]` is the first column, and so on.
    pub cols: [Vec4; 4],
}

impl Mat4 {
    /// The 4x4 identity matrix.
    pub const IDENTITY: Self = Self {
        cols: [Vec4::X, Vec4::Y, Vec4::Z, Vec4::W],
    };

    /// A 4x4 matrix with all elements set to 0.
    pub const ZERO: Self = Self {
        cols: [Vec4::ZERO; 4],
    };

    /// Creates a new matrix from four column vectors.
    #[inline]
    pub const fn from_cols(c0: Vec4, c1: Vec4, c2: Vec4, c3: Vec4) -> Self {
        Self {
            cols: [c0, c1, c2, c3],
        }
    }

    /// Returns row `index` as a `Vec4`.
    ///
    /// # Panics
    /// Panics if `index > 3`.
    #[inline]
    pub fn row(&self, index: usize) -> Vec4 {
        Vec4::new(
            self.cols[0][index],
            self.cols[1][index],
            self.cols[2][index],
            self.cols[3][index],
        )
    }

    // --- Affine constructors ---

    /// Creates a translation matrix.
    #[inline]
    pub const fn from_translation(t: Vec3) -> Self {
        Self::from_cols(Vec4::X, Vec4::Y, Vec4::Z, Vec4::from_vec3(t, 1.0))
    }

    /// Creates a non-uniform scaling matrix.
    #[inline]
    pub const fn from_scale(s: Vec3) -> Self {
        Self::from_cols(
            Vec4::new(s.x, 0.0, 0.0, 0.0),
            Vec4::new(0.0, s.y, 0.0, 0.0),
            Vec4::new(0.0, 0.0, s.z, 0.0),
            Vec4::W,
        )
    }

    /// Creates a right-handed rotation about the X-axis.
    #[inline]
    pub fn from_rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_cols(
            Vec4::X,
            Vec4::new(0.0, c, s, 0.0),
            Vec4::new(0.0, -s, c, 0.0),
            Vec4::W,
        )
    }

    /// Creates a right-handed rotation about the Y-axis.
    #[inline]
    pub fn from_rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_cols(
            Vec4::new(c, 0.0, -s, 0.0),
            Vec4::Y,
            Vec4::new(s, 0.0, c, 0.0),
            Vec4::W,
        )
    }

    /// Creates a right-handed rotation about the Z-axis.
    #[inline]
    pub fn from_rotation_z(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_cols(
            Vec4::new(c, s, 0.0, 0.0),
            Vec4::new(-s, c, 0.0, 0.0),
            Vec4::Z,
            Vec4::W,
        )
    }

    /// Creates a rotation of `angle` radians about an arbitrary axis.
    ///
    /// The axis is normalized here, so callers may pass any non-zero vector.
    /// A zero axis yields NaN.
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let Vec3 { x, y, z } = axis.normalize();
        let (s, c) = angle.sin_cos();
        let t = 1.0 - c;
        Self::from_cols(
            Vec4::new(t * x * x + c, t * x * y + s * z, t * x * z - s * y, 0.0),
            Vec4::new(t * x * y - s * z, t * y * y + c, t * y * z + s * x, 0.0),
            Vec4::new(t * x * z + s * y, t * y * z - s * x, t * z * z + c, 0.0),
            Vec4::W,
        )
    }

    // --- Post-multiplying builders ---

    /// Post-multiplies a translation.
    #[inline]
    pub fn translate(&self, t: Vec3) -> Self {
        *self * Self::from_translation(t)
    }

    /// Post-multiplies a translation along X.
    #[inline]
    pub fn translate_x(&self, x: f32) -> Self {
        self.translate(Vec3::new(x, 0.0, 0.0))
    }

    /// Post-multiplies a translation along Y.
    #[inline]
    pub fn translate_y(&self, y: f32) -> Self {
        self.translate(Vec3::new(0.0, y, 0.0))
    }

    /// Post-multiplies a translation along Z.
    #[inline]
    pub fn translate_z(&self, z: f32) -> Self {
        self.translate(Vec3::new(0.0, 0.0, z))
    }

    /// Post-multiplies a rotation about `axis` (normalized internally).
    #[inline]
    pub fn rotate(&self, axis: Vec3, angle: f32) -> Self {
        *self * Self::from_axis_angle(axis, angle)
    }

    /// Post-multiplies a rotation about X.
    #[inline]
    pub fn rotate_x(&self, angle: f32) -> Self {
        *self * Self::from_rotation_x(angle)
    }

    /// Post-multiplies a rotation about Y.
    #[inline]
    pub fn rotate_y(&self, angle: f32) -> Self {
        *self * Self::from_rotation_y(angle)
    }

    /// Post-multiplies a rotation about Z.
    #[inline]
    pub fn rotate_z(&self, angle: f32) -> Self {
        *self * Self::from_rotation_z(angle)
    }

    /// Post-multiplies a scale.
    #[inline]
    pub fn scale(&self, s: Vec3) -> Self {
        *self * Self::from_scale(s)
    }

    /// Post-multiplies a scale along X.
    #[inline]
    pub fn scale_x(&self, x: f32) -> Self {
        self.scale(Vec3::new(x, 1.0, 1.0))
    }

    /// Post-multiplies a scale along Y.
    #[inline]
    pub fn scale_y(&self, y: f32) -> Self {
        self.scale(Vec3::new(1.0, y, 1.0))
    }

    /// Post-multiplies a scale along Z.
    #[inline]
    pub fn scale_z(&self, z: f32) -> Self {
        self.scale(Vec3::new(1.0, 1.0, z))
    }

    /// Composes a full model transform onto this matrix.
    ///
    /// Vectors are scaled first, then rotated about `axis`, then translated:
    /// the result is `self * T * R * S`.
    #[inline]
    pub fn transform(&self, translation: Vec3, axis: Vec3, angle: f32, scale: Vec3) -> Self {
        self.translate(translation).rotate(axis, angle).scale(scale)
    }

    // --- Camera and projection ---

    /// Creates a right-handed view matrix looking from `eye` towards `target`.
    ///
    /// The camera looks down its local -Z axis. Coincident `eye`/`target` or an
    /// `up` parallel to the view direction produce NaN; see
    /// [`checked_look_at_rh`](Self::checked_look_at_rh) for a validating variant.
    pub fn look_at_rh(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let f = (target - eye).normalize();
        let r = f.cross(up).normalize();
        let u = r.cross(f);
        Self::view_from_basis(eye, f, r, u)
    }

    /// Like [`look_at_rh`](Self::look_at_rh), but returns `None` instead of NaN
    /// when the basis cannot be built.
    pub fn checked_look_at_rh(eye: Vec3, target: Vec3, up: Vec3) -> Option<Self> {
        let f = (target - eye).normalize_or_zero();
        if f == Vec3::ZERO {
            return None;
        }
        let r = f.cross(up).normalize_or_zero();
        if r == Vec3::ZERO {
            return None;
        }
        let u = r.cross(f);
        Some(Self::view_from_basis(eye, f, r, u))
    }

    /// Rows `r`, `u`, `-f`, with the eye moved to the origin.
    fn view_from_basis(eye: Vec3, f: Vec3, r: Vec3, u: Vec3) -> Self {
        Self::from_cols(
            Vec4::new(r.x, u.x, -f.x, 0.0),
            Vec4::new(r.y, u.y, -f.y, 0.0),
            Vec4::new(r.z, u.z, -f.z, 0.0),
            Vec4::new(-r.dot(eye), -u.dot(eye), f.dot(eye), 1.0),
        )
    }

    /// Creates an OpenGL-style perspective projection (clip depth in `[-1, 1]`).
    ///
    /// `fov_y_degrees` is the vertical field of view in **degrees**; it is the
    /// only angle in this module not expressed in radians.
    pub fn perspective(fov_y_degrees: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        let f = 1.0 / (fov_y_degrees * DEG_TO_RAD * 0.5).tan();
        let nf = 1.0 / (z_near - z_far);
        Self::from_cols(
            Vec4::new(f / aspect_ratio, 0.0, 0.0, 0.0),
            Vec4::new(0.0, f, 0.0, 0.0),
            Vec4::new(0.0, 0.0, (z_near + z_far) * nf, -1.0),
            Vec4::new(0.0, 0.0, 2.0 * z_near * z_far * nf, 0.0),
        )
    }

    /// Creates an OpenGL-style orthographic projection (`glOrtho`).
    pub fn orthographic(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        z_near: f32,
        z_far: f32,
    ) -> Self {
        let rl = 1.0 / (right - left);
        let tb = 1.0 / (top - bottom);
        let fn_ = -1.0 / (z_far - z_near);
        Self::from_cols(
            Vec4::new(2.0 * rl, 0.0, 0.0, 0.0),
            Vec4::new(0.0, 2.0 * tb, 0.0, 0.0),
            Vec4::new(0.0, 0.0, 2.0 * fn_, 0.0),
            Vec4::new(
                -(right + left) * rl,
                -(top + bottom) * tb,
                (z_far + z_near) * fn_,
                1.0,
            ),
        )
    }

    /// Creates an OpenGL-style off-axis perspective projection (`glFrustum`).
    pub fn frustum(left: f32, right: f32, bottom: f32, top: f32, z_near: f32, z_far: f32) -> Self {
        let rl = 1.0 / (right - left);
        let tb = 1.0 / (top - bottom);
        let fn_ = -1.0 / (z_far - z_near);
        let n2 = 2.0 * z_near;
        Self::from_cols(
            Vec4::new(n2 * rl, 0.0, 0.0, 0.0),
            Vec4::new(0.0, n2 * tb, 0.0, 0.0),
            Vec4::new(
                (right + left) * rl,
                (top + bottom) * tb,
                (z_far + z_near) * fn_,
                -1.0,
            ),
            Vec4::new(0.0, 0.0, z_far * n2 * fn_, 0.0),
        )
    }

    // --- Vector transforms ---

    /// Transforms `v` extended with the given `w`, then drops the result's `w`.
    ///
    /// No perspective divide is performed.
    #[inline]
    pub fn transform_vec3(&self, v: Vec3, w: f32) -> Vec3 {
        (*self * v.extend(w)).truncate()
    }

    /// Transforms a point (`w = 1`), so translation applies.
    #[inline]
    pub fn transform_point3(&self, p: Vec3) -> Vec3 {
        self.transform_vec3(p, 1.0)
    }

    /// Transforms a direction (`w = 0`), so translation is ignored.
    #[inline]
    pub fn transform_vector3(&self, v: Vec3) -> Vec3 {
        self.transform_vec3(v, 0.0)
    }

    // --- Inversion ---

    /// The twelve 2x2 minors of the top and bottom halves of the matrix,
    /// indexed with the column first.
    fn half_minors(a: &[[f32; 4]; 4]) -> ([f32; 6], [f32; 6]) {
        let s = [
            a[0][0] * a[1][1] - a[1][0] * a[0][1],
            a[0][0] * a[1][2] - a[1][0] * a[0][2],
            a[0][0] * a[1][3] - a[1][0] * a[0][3],
            a[0][1] * a[1][2] - a[1][1] * a[0][2],
            a[0][1] * a[1][3] - a[1][1] * a[0][3],
            a[0][2] * a[1][3] - a[1][2] * a[0][3],
        ];
        let c = [
            a[2][0] * a[3][1] - a[3][0] * a[2][1],
            a[2][0] * a[3][2] - a[3][0] * a[2][2],
            a[2][0] * a[3][3] - a[3][0] * a[2][3],
            a[2][1] * a[3][2] - a[3][1] * a[2][2],
            a[2][1] * a[3][3] - a[3][1] * a[2][3],
            a[2][2] * a[3][3] - a[3][2] * a[2][3],
        ];
        (s, c)
    }

    fn det_from_minors(s: &[f32; 6], c: &[f32; 6]) -> f32 {
        s[0] * c[5] - s[1] * c[4] + s[2] * c[3] + s[3] * c[2] - s[4] * c[1] + s[5] * c[0]
    }

    /// Computes the determinant.
    pub fn determinant(&self) -> f32 {
        let (s, c) = Self::half_minors(&self.cols.map(Vec4::to_array));
        Self::det_from_minors(&s, &c)
    }

    /// Computes the inverse, or `None` if the matrix is singular.
    pub fn inverse(&self) -> Option<Self> {
        let a = self.cols.map(Vec4::to_array);
        let (s, c) = Self::half_minors(&a);
        let det = Self::det_from_minors(&s, &c);
        if det.abs() < EPSILON {
            return None;
        }

        let adjugate = Self::from_cols(
            Vec4::new(
                a[1][1] * c[5] - a[1][2] * c[4] + a[1][3] * c[3],
                -a[0][1] * c[5] + a[0][2] * c[4] - a[0][3] * c[3],
                a[3][1] * s[5] - a[3][2] * s[4] + a[3][3] * s[3],
                -a[2][1] * s[5] + a[2][2] * s[4] - a[2][3] * s[3],
            ),
            Vec4::new(
                -a[1][0] * c[5] + a[1][2] * c[2] - a[1][3] * c[1],
                a[0][0] * c[5] - a[0][2] * c[2] + a[0][3] * c[1],
                -a[3][0] * s[5] + a[3][2] * s[2] - a[3][3] * s[1],
                a[2][0] * s[5] - a[2][2] * s[2] + a[2][3] * s[1],
            ),
            Vec4::new(
                a[1][0] * c[4] - a[1][1] * c[2] + a[1][3] * c[0],
                -a[0][0] * c[4] + a[0][1] * c[2] - a[0][3] * c[0],
                a[3][0] * s[4] - a[3][1] * s[2] + a[3][3] * s[0],
                -a[2][0] * s[4] + a[2][1] * s[2] - a[2][3] * s[0],
            ),
            Vec4::new(
                -a[1][0] * c[3] + a[1][1] * c[1] - a[1][2] * c[0],
                a[0][0] * c[3] - a[0][1] * c[1] + a[0][2] * c[0],
                -a[3][0] * s[3] + a[3][1] * s[1] - a[3][2] * s[0],
                a[2][0] * s[3] - a[2][1] * s[1] + a[2][2] * s[0],
            ),
        );
        Some(adjugate * det.recip())
    }

    /// Returns all sixteen elements in column-major order, ready for upload
    /// as a shader uniform.
    #[inline]
    pub fn to_cols_array(&self) -> [f32; 16] {
        bytemuck::cast(self.cols)
    }
}

impl_matrix_common!(Mat4, Vec4);

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;
    #[inline]
    fn mul(self, v: Vec4) -> Vec4 {
        self.cols[0] * v.x + self.cols[1] * v.y + self.cols[2] * v.z + self.cols[3] * v.w
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{approx_eq, approx_eq_eps, FRAC_PI_2, PI};
    use approx::assert_relative_eq;

    fn vec3_approx_eq(a: Vec3, b: Vec3) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
    }

    fn mat3_approx_eq(a: Mat3, b: Mat3) -> bool {
        a.to_cols_array()
            .iter()
            .zip(b.to_cols_array().iter())
            .all(|(x, y)| approx_eq_eps(*x, *y, 1e-4))
    }

    fn mat4_approx_eq(a: Mat4, b: Mat4) -> bool {
        a.to_cols_array()
            .iter()
            .zip(b.to_cols_array().iter())
            .all(|(x, y)| approx_eq_eps(*x, *y, 1e-4))
    }

    fn sample_mat4() -> Mat4 {
        Mat4::IDENTITY.transform(
            Vec3::new(1.0, -2.0, 3.0),
            Vec3::new(1.0, 1.0, 0.0),
            0.7,
            Vec3::new(2.0, 0.5, 1.5),
        )
    }

    #[test]
    fn test_identity_is_neutral() {
        let m = sample_mat4();
        assert_eq!(Mat4::IDENTITY * m, m);
        assert_eq!(m * Mat4::IDENTITY, m);

        let m3 = Mat3::from_mat4(&m);
        assert_eq!(Mat3::IDENTITY * m3, m3);
        assert_eq!(m3 * Mat3::IDENTITY, m3);
    }

    // Mat3

    #[test]
    fn test_mat3_default_is_identity() {
        assert_eq!(Mat3::default(), Mat3::IDENTITY);
        assert_eq!(Mat3::IDENTITY * Vec3::new(1.0, 2.0, 3.0), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_mat3_elementwise() {
        let a = Mat3::from_cols(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(4.0, 5.0, 6.0),
            Vec3::new(7.0, 8.0, 9.0),
        );
        let twos = Mat3::ZERO + 2.0;
        assert_eq!((a + twos).cols[0], Vec3::new(3.0, 4.0, 5.0));
        assert_eq!((a - twos).cols[2], Vec3::new(5.0, 6.0, 7.0));
        assert_eq!(a.mul_elementwise(&twos).cols[1], Vec3::new(8.0, 10.0, 12.0));
        assert_eq!(a.div_elementwise(&twos), a * 0.5);
        assert_eq!(a / twos, a.div_elementwise(&twos));
        assert_eq!(a / 2.0, a * 0.5);
        assert_eq!((a - 1.0).cols[0], Vec3::new(0.0, 1.0, 2.0));
        assert_eq!(a + a, a * 2.0);
    }

    #[test]
    fn test_mat3_translate_point() {
        let m = Mat3::IDENTITY.translate(Vec2::new(10.0, -5.0));
        assert_eq!(m.cols[2], Vec3::new(10.0, -5.0, 1.0));
        assert_eq!(m.transform_point2(Vec2::new(1.0, 1.0)), Vec2::new(11.0, -4.0));
        assert_eq!(m.transform_vector2(Vec2::new(1.0, 1.0)), Vec2::new(1.0, 1.0));
        assert_eq!(
            Mat3::IDENTITY.translate_x(3.0).translate_y(4.0),
            Mat3::from_translation(Vec2::new(3.0, 4.0))
        );
    }

    #[test]
    fn test_mat3_rotate_and_scale() {
        let r = Mat3::IDENTITY.rotate(FRAC_PI_2);
        let p = r.transform_point2(Vec2::X);
        assert!(approx_eq(p.x, 0.0) && approx_eq(p.y, 1.0));

        let s = Mat3::IDENTITY.scale_x(2.0).scale_y(3.0);
        assert_eq!(s, Mat3::from_scale(Vec2::new(2.0, 3.0)));
        assert_eq!(s.transform_point2(Vec2::ONE), Vec2::new(2.0, 3.0));
    }

    #[test]
    fn test_mat3_transform_order() {
        // Scale by 2, rotate a quarter turn, then move by (10, 0).
        let m = Mat3::IDENTITY.transform(Vec2::new(10.0, 0.0), FRAC_PI_2, Vec2::splat(2.0));
        let p = m.transform_point2(Vec2::X);
        assert!(approx_eq(p.x, 10.0), "x was {}", p.x);
        assert!(approx_eq(p.y, 2.0), "y was {}", p.y);
    }

    #[test]
    fn test_mat3_determinant_and_inverse() {
        let m = Mat3::IDENTITY.transform(Vec2::new(3.0, 1.0), 0.4, Vec2::new(2.0, 4.0));
        assert_relative_eq!(m.determinant(), 8.0, epsilon = 1e-4);
        let inv = m.inverse().unwrap();
        assert!(mat3_approx_eq(m * inv, Mat3::IDENTITY));
        assert!(mat3_approx_eq(inv * m, Mat3::IDENTITY));
        assert!(Mat3::ZERO.inverse().is_none());
    }

    #[test]
    fn test_mat3_transpose_and_row() {
        let m = Mat3::from_cols(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(4.0, 5.0, 6.0),
            Vec3::new(7.0, 8.0, 9.0),
        );
        assert_eq!(m.row(0), Vec3::new(1.0, 4.0, 7.0));
        assert_eq!(m.transpose().cols[0], Vec3::new(1.0, 4.0, 7.0));
        assert_eq!(m.transpose().transpose(), m);
        assert_eq!(
            m.to_cols_array(),
            [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]
        );
    }

    #[test]
    fn test_mat3_mat4_conversion() {
        let m4 = Mat4::from_rotation_z(0.3).scale(Vec3::new(2.0, 3.0, 4.0));
        let m3 = Mat3::from_mat4(&m4);
        assert_eq!(m3.cols[2], Vec3::new(0.0, 0.0, 4.0));
        let back = m3.to_mat4();
        assert_eq!(back.cols[3], Vec4::W);
        assert_eq!(Mat3::from_mat4(&back), m3);
    }

    // Mat4

    #[test]
    fn test_mat4_product_is_not_elementwise() {
        let a = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let b = Mat4::from_scale(Vec3::splat(2.0));
        let ab = a * b;
        assert_eq!(ab.cols[0], Vec4::new(2.0, 0.0, 0.0, 0.0));
        assert_eq!(ab.cols[3], Vec4::new(1.0, 2.0, 3.0, 1.0));
        assert_ne!(ab, a.mul_elementwise(&b));
        // Scale first, then translate.
        assert_eq!(ab.transform_point3(Vec3::ONE), Vec3::new(3.0, 4.0, 5.0));
        // Translate first, then scale.
        assert_eq!((b * a).transform_point3(Vec3::ONE), Vec3::new(4.0, 6.0, 8.0));
    }

    #[test]
    fn test_mat4_product_associates_with_vector() {
        let a = sample_mat4();
        let b = Mat4::from_rotation_y(1.1).translate_z(-4.0);
        let v = Vec4::new(0.5, -1.0, 2.0, 1.0);
        let lhs = (a * b) * v;
        let rhs = a * (b * v);
        assert!(vec3_approx_eq(lhs.truncate(), rhs.truncate()));
        assert!(approx_eq(lhs.w, rhs.w));
    }

    #[test]
    fn test_mat4_translate_round_trip() {
        let m = sample_mat4();
        let t = Vec3::new(4.0, -7.5, 0.25);
        assert!(mat4_approx_eq(m.translate(t).translate(-t), m));
        assert_eq!(
            Mat4::IDENTITY.translate_x(1.0).translate_y(2.0).translate_z(3.0),
            Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0))
        );
    }

    #[test]
    fn test_mat4_transform_vec3_w() {
        let m = Mat4::from_translation(Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(m.transform_vec3(Vec3::ONE, 1.0), Vec3::new(6.0, 1.0, 1.0));
        assert_eq!(m.transform_vec3(Vec3::ONE, 0.0), Vec3::ONE);
        assert_eq!(m.transform_point3(Vec3::ZERO), Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(m.transform_vector3(Vec3::X), Vec3::X);
    }

    #[test]
    fn test_mat4_axis_rotations() {
        let rx = Mat4::IDENTITY.rotate_x(FRAC_PI_2);
        assert!(vec3_approx_eq(rx.transform_vector3(Vec3::Y), Vec3::Z));
        let ry = Mat4::IDENTITY.rotate_y(FRAC_PI_2);
        assert!(vec3_approx_eq(ry.transform_vector3(Vec3::Z), Vec3::X));
        let rz = Mat4::IDENTITY.rotate_z(FRAC_PI_2);
        assert!(vec3_approx_eq(rz.transform_vector3(Vec3::X), Vec3::Y));
    }

    #[test]
    fn test_mat4_axis_angle_matches_principal_axes() {
        for angle in [0.3, -1.2, PI] {
            assert!(mat4_approx_eq(
                Mat4::from_axis_angle(Vec3::X, angle),
                Mat4::from_rotation_x(angle)
            ));
            assert!(mat4_approx_eq(
                Mat4::from_axis_angle(Vec3::Y, angle),
                Mat4::from_rotation_y(angle)
            ));
            assert!(mat4_approx_eq(
                Mat4::from_axis_angle(Vec3::Z, angle),
                Mat4::from_rotation_z(angle)
            ));
        }
    }

    #[test]
    fn test_mat4_rotate_normalizes_axis() {
        let a = Mat4::IDENTITY.rotate(Vec3::new(0.0, 0.0, 5.0), 0.8);
        let b = Mat4::IDENTITY.rotate(Vec3::Z, 0.8);
        assert!(mat4_approx_eq(a, b));
    }

    #[test]
    fn test_mat4_scale_builders() {
        let s = Mat4::IDENTITY.scale_x(2.0).scale_y(3.0).scale_z(4.0);
        assert_eq!(s, Mat4::from_scale(Vec3::new(2.0, 3.0, 4.0)));
        assert_relative_eq!(s.determinant(), 24.0);
    }

    #[test]
    fn test_mat4_transform_order() {
        // Scale X by 3, quarter turn about Z, then translate by (0, 0, 1).
        let m = Mat4::IDENTITY.transform(
            Vec3::Z,
            Vec3::Z,
            FRAC_PI_2,
            Vec3::new(3.0, 1.0, 1.0),
        );
        let p = m.transform_point3(Vec3::X);
        assert!(vec3_approx_eq(p, Vec3::new(0.0, 3.0, 1.0)), "got {:?}", p);
    }

    #[test]
    fn test_mat4_inverse() {
        let m = sample_mat4();
        let inv = m.inverse().unwrap();
        assert!(mat4_approx_eq(m * inv, Mat4::IDENTITY));
        assert!(mat4_approx_eq(inv * m, Mat4::IDENTITY));
        assert_relative_eq!(m.determinant() * inv.determinant(), 1.0, epsilon = 1e-4);

        let t = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(
            t.inverse().unwrap(),
            Mat4::from_translation(Vec3::new(-1.0, -2.0, -3.0))
        );
        assert!(Mat4::from_scale(Vec3::new(1.0, 0.0, 1.0)).inverse().is_none());
    }

    #[test]
    fn test_mat4_perspective_is_invertible() {
        let p = Mat4::perspective(60.0, 1.5, 0.1, 100.0);
        assert!(p.inverse().is_some());
        assert!(mat4_approx_eq(p * p.inverse().unwrap(), Mat4::IDENTITY));
    }

    #[test]
    fn test_mat4_look_at_basic() {
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
        // right = +X, up = +Y, forward = -Z.
        assert_eq!(view.row(0).truncate(), Vec3::X);
        assert_eq!(view.row(1).truncate(), Vec3::Y);
        assert_eq!(view.row(2).truncate(), Vec3::Z);
        assert_eq!(view.cols[0].x, 1.0);
        assert_eq!(view.cols[2].z, 1.0);
        assert_eq!(view.cols[3].z, -5.0);
        // The target sits straight ahead, five units down -Z.
        assert!(vec3_approx_eq(
            view.transform_point3(Vec3::ZERO),
            Vec3::new(0.0, 0.0, -5.0)
        ));
    }

    #[test]
    fn test_mat4_look_at_moves_eye_to_origin() {
        let eye = Vec3::new(3.0, 4.0, -2.0);
        let view = Mat4::look_at_rh(eye, Vec3::new(-1.0, 0.5, 6.0), Vec3::Y);
        assert!(vec3_approx_eq(view.transform_point3(eye), Vec3::ZERO));
    }

    #[test]
    fn test_mat4_look_at_degenerate() {
        let nan = Mat4::look_at_rh(Vec3::ONE, Vec3::ONE, Vec3::Y);
        assert!(nan.cols[0].x.is_nan());
        assert!(Mat4::checked_look_at_rh(Vec3::ONE, Vec3::ONE, Vec3::Y).is_none());
        assert!(Mat4::checked_look_at_rh(Vec3::ZERO, Vec3::Y, Vec3::Y).is_none());
        assert_eq!(
            Mat4::checked_look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y),
            Some(Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y))
        );
    }

    #[test]
    fn test_mat4_perspective() {
        let p = Mat4::perspective(60.0, 1.0, 0.1, 100.0);
        let f = 1.0 / (30.0_f32.to_radians()).tan();
        assert_relative_eq!(p.cols[1].y, f, epsilon = 1e-5);
        assert_relative_eq!(p.cols[0].x, f, epsilon = 1e-5);
        assert_eq!(p.cols[2].w, -1.0);
        assert_eq!(p.cols[3].w, 0.0);

        // Near plane maps to -1, far plane to +1.
        let near = p * Vec4::new(0.0, 0.0, -0.1, 1.0);
        let far = p * Vec4::new(0.0, 0.0, -100.0, 1.0);
        assert_relative_eq!(near.z / near.w, -1.0, epsilon = 1e-4);
        assert_relative_eq!(far.z / far.w, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_mat4_perspective_aspect() {
        let p = Mat4::perspective(90.0, 2.0, 1.0, 10.0);
        assert_relative_eq!(p.cols[1].y, 1.0, epsilon = 1e-6);
        assert_relative_eq!(p.cols[0].x, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_mat4_orthographic() {
        let o = Mat4::orthographic(-2.0, 2.0, -1.0, 1.0, 0.0, 10.0);
        assert_eq!(o.cols[0].x, 0.5);
        assert_eq!(o.cols[1].y, 1.0);
        assert_relative_eq!(o.cols[2].z, -0.2);
        assert_eq!(o.cols[3].w, 1.0);

        let corner = o * Vec4::new(2.0, 1.0, -10.0, 1.0);
        assert!(vec3_approx_eq(corner.truncate(), Vec3::ONE));
        let origin = o * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!(approx_eq(origin.z, -1.0));
    }

    #[test]
    fn test_mat4_frustum_matches_symmetric_perspective() {
        let near = 0.5;
        let far = 50.0;
        let top = near * (45.0_f32.to_radians()).tan();
        let right = top * 1.5;
        let f = Mat4::frustum(-right, right, -top, top, near, far);
        let p = Mat4::perspective(90.0, 1.5, near, far);
        assert!(mat4_approx_eq(f, p));
    }

    #[test]
    fn test_mat4_frustum_off_axis() {
        let f = Mat4::frustum(0.0, 2.0, 0.0, 1.0, 1.0, 3.0);
        assert_eq!(f.cols[2].x, 1.0);
        assert_eq!(f.cols[2].y, 1.0);
        assert_eq!(f.cols[2].w, -1.0);
        assert_relative_eq!(f.cols[2].z, -2.0);
        assert_relative_eq!(f.cols[3].z, -3.0);
    }

    #[test]
    fn test_mat4_as_slice_is_column_major() {
        let m = Mat4::from_translation(Vec3::new(7.0, 8.0, 9.0));
        let slice = m.as_slice();
        assert_eq!(slice.len(), 16);
        assert_eq!(&slice[12..15], &[7.0, 8.0, 9.0]);
        assert_eq!(slice, &m.to_cols_array()[..]);
    }

    #[test]
    fn test_mat4_index() {
        let mut m = Mat4::IDENTITY;
        m[3] = Vec4::new(1.0, 2.0, 3.0, 1.0);
        assert_eq!(m[3].y, 2.0);
        assert_eq!(m, Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)));
    }
}
