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

//! A serializable camera description that produces view and projection matrices.
//!
//! The matrix constructors on [`Mat4`] accept anything and return NaN or
//! infinity for degenerate input. [`Camera::validate`] is where a caller opts
//! into rejecting such configurations before building matrices from them.

use super::{Mat4, Vec3, EPSILON};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Defines how a [`Camera`] projects view space onto clip space.
///
/// All variants follow OpenGL clip conventions (depth in `[-1, 1]`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Projection {
    /// Symmetric perspective projection.
    Perspective {
        /// The vertical field of view in **degrees**.
        fov_y_degrees: f32,
        /// Viewport width divided by height.
        aspect_ratio: f32,
        /// Distance to the near clipping plane. Must be positive.
        z_near: f32,
        /// Distance to the far clipping plane.
        z_far: f32,
    },
    /// Orthographic projection of an axis-aligned view volume.
    Orthographic {
        /// Left edge of the view volume.
        left: f32,
        /// Right edge of the view volume.
        right: f32,
        /// Bottom edge of the view volume.
        bottom: f32,
        /// Top edge of the view volume.
        top: f32,
        /// Distance to the near clipping plane.
        z_near: f32,
        /// Distance to the far clipping plane.
        z_far: f32,
    },
    /// Off-axis perspective projection, with edges given on the near plane.
    Frustum {
        /// Left edge on the near plane.
        left: f32,
        /// Right edge on the near plane.
        right: f32,
        /// Bottom edge on the near plane.
        bottom: f32,
        /// Top edge on the near plane.
        top: f32,
        /// Distance to the near clipping plane. Must be positive.
        z_near: f32,
        /// Distance to the far clipping plane.
        z_far: f32,
    },
}

impl Projection {
    /// Builds the projection matrix for this description.
    pub fn matrix(&self) -> Mat4 {
        match *self {
            Projection::Perspective {
                fov_y_degrees,
                aspect_ratio,
                z_near,
                z_far,
            } => Mat4::perspective(fov_y_degrees, aspect_ratio, z_near, z_far),
            Projection::Orthographic {
                left,
                right,
                bottom,
                top,
                z_near,
                z_far,
            } => Mat4::orthographic(left, right, bottom, top, z_near, z_far),
            Projection::Frustum {
                left,
                right,
                bottom,
                top,
                z_near,
                z_far,
            } => Mat4::frustum(left, right, bottom, top, z_near, z_far),
        }
    }

    fn validate(&self) -> Result<(), CameraError> {
        match *self {
            Projection::Perspective {
                fov_y_degrees,
                aspect_ratio,
                z_near,
                z_far,
            } => {
                check_finite("fov_y_degrees", fov_y_degrees)?;
                check_finite("aspect_ratio", aspect_ratio)?;
                if aspect_ratio <= 0.0 {
                    return Err(CameraError::InvalidAspectRatio { aspect_ratio });
                }
                if fov_y_degrees <= 0.0 || fov_y_degrees >= 180.0 {
                    return Err(CameraError::InvalidFieldOfView { fov_y_degrees });
                }
                check_depth_range(z_near, z_far, true)
            }
            Projection::Orthographic {
                left,
                right,
                bottom,
                top,
                z_near,
                z_far,
            } => {
                check_extent("horizontal", left, right)?;
                check_extent("vertical", bottom, top)?;
                check_depth_range(z_near, z_far, false)
            }
            Projection::Frustum {
                left,
                right,
                bottom,
                top,
                z_near,
                z_far,
            } => {
                check_extent("horizontal", left, right)?;
                check_extent("vertical", bottom, top)?;
                check_depth_range(z_near, z_far, true)
            }
        }
    }
}

fn check_finite(field: &'static str, value: f32) -> Result<(), CameraError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CameraError::NonFinite { field })
    }
}

fn check_extent(axis: &'static str, min: f32, max: f32) -> Result<(), CameraError> {
    check_finite(axis, min)?;
    check_finite(axis, max)?;
    if (max - min).abs() < EPSILON {
        return Err(CameraError::DegenerateExtent { axis, min, max });
    }
    Ok(())
}

fn check_depth_range(
    z_near: f32,
    z_far: f32,
    near_must_be_positive: bool,
) -> Result<(), CameraError> {
    check_finite("z_near", z_near)?;
    check_finite("z_far", z_far)?;
    if (z_far - z_near).abs() < EPSILON || (near_must_be_positive && z_near <= 0.0) {
        return Err(CameraError::DegenerateDepthRange { z_near, z_far });
    }
    Ok(())
}

fn default_up() -> Vec3 {
    Vec3::Y
}

/// A camera placed with a look-at basis and a projection.
///
/// Deserializes from JSON such as:
///
/// ```json
/// {
///   "eye": { "x": 0.0, "y": 2.0, "z": 5.0 },
///   "target": { "x": 0.0, "y": 0.0, "z": 0.0 },
///   "projection": {
///     "Perspective": { "fov_y_degrees": 60.0, "aspect_ratio": 1.7777, "z_near": 0.1, "z_far": 100.0 }
///   }
/// }
/// ```
///
/// `up` may be omitted and defaults to `+Y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// World-space position of the camera.
    pub eye: Vec3,
    /// World-space point the camera looks at.
    pub target: Vec3,
    /// Approximate up direction. It does not need to be orthogonal to the view direction.
    #[serde(default = "default_up")]
    pub up: Vec3,
    /// How view space is projected to clip space.
    pub projection: Projection,
}

impl Camera {
    /// Creates a camera from its parts.
    pub fn new(eye: Vec3, target: Vec3, up: Vec3, projection: Projection) -> Self {
        Self {
            eye,
            target,
            up,
            projection,
        }
    }

    /// A perspective camera five units back on +Z, looking at the origin.
    ///
    /// - FOV: 60 degrees
    /// - Aspect ratio: 16:9
    /// - Near plane: 0.1
    /// - Far plane: 1000.0
    pub fn default_perspective() -> Self {
        Self::new(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::ZERO,
            Vec3::Y,
            Projection::Perspective {
                fov_y_degrees: 60.0,
                aspect_ratio: 16.0 / 9.0,
                z_near: 0.1,
                z_far: 1000.0,
            },
        )
    }

    /// Reads and parses a JSON camera description from disk.
    ///
    /// The result is not validated; call [`validate`](Self::validate) for that.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read camera file '{}'", path.display()))?;
        let camera: Camera = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse camera file '{}'", path.display()))?;
        log::debug!("Loaded camera from '{}': {:?}", path.display(), camera);
        Ok(camera)
    }

    /// The world-to-view matrix. See [`Mat4::look_at_rh`].
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// The view-to-clip matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection.matrix()
    }

    /// `projection * view`, ready to be combined with a model matrix.
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Updates the aspect ratio of a perspective projection from a viewport size.
    ///
    /// Ignored for a zero height and for non-perspective projections.
    pub fn set_aspect_ratio(&mut self, width: u32, height: u32) {
        if height == 0 {
            return;
        }
        if let Projection::Perspective { aspect_ratio, .. } = &mut self.projection {
            *aspect_ratio = width as f32 / height as f32;
        }
    }

    /// Checks that the matrices built from this camera will be finite.
    pub fn validate(&self) -> Result<(), CameraError> {
        let result = self.check();
        match &result {
            Ok(()) => log::debug!("Camera configuration is valid"),
            Err(e) => log::warn!("Rejected camera configuration: {e}"),
        }
        result
    }

    fn check(&self) -> Result<(), CameraError> {
        for (field, v) in [("eye", self.eye), ("target", self.target), ("up", self.up)] {
            if !v.to_array().iter().all(|c| c.is_finite()) {
                return Err(CameraError::NonFinite { field });
            }
        }

        let forward = self.target - self.eye;
        if forward.length_squared() < EPSILON * EPSILON {
            return Err(CameraError::CoincidentEyeTarget);
        }
        let side = forward.normalize().cross(self.up.normalize_or_zero());
        if side.length_squared() < EPSILON * EPSILON {
            return Err(CameraError::UpParallelToForward);
        }

        self.projection.validate()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::default_perspective()
    }
}

/// A camera configuration that would produce NaN or infinite matrices.
#[derive(Debug, Clone, PartialEq)]
pub enum CameraError {
    /// A field holds NaN or infinity.
    NonFinite {
        /// The offending field.
        field: &'static str,
    },
    /// `eye` and `target` are the same point, so there is no view direction.
    CoincidentEyeTarget,
    /// `up` is zero or parallel to the view direction.
    UpParallelToForward,
    /// The perspective aspect ratio is not strictly positive.
    InvalidAspectRatio {
        /// The rejected aspect ratio.
        aspect_ratio: f32,
    },
    /// The field of view is outside `(0, 180)` degrees.
    InvalidFieldOfView {
        /// The rejected field of view, in degrees.
        fov_y_degrees: f32,
    },
    /// The near and far planes coincide, or a perspective near plane is not in front of the eye.
    DegenerateDepthRange {
        /// Near plane distance.
        z_near: f32,
        /// Far plane distance.
        z_far: f32,
    },
    /// The view volume has zero width or height.
    DegenerateExtent {
        /// `"horizontal"` or `"vertical"`.
        axis: &'static str,
        /// Lower bound.
        min: f32,
        /// Upper bound.
        max: f32,
    },
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::NonFinite { field } => {
                write!(f, "Camera field '{field}' is not finite")
            }
            CameraError::CoincidentEyeTarget => {
                write!(f, "Camera eye and target are the same point")
            }
            CameraError::UpParallelToForward => {
                write!(f, "Camera up vector is zero or parallel to the view direction")
            }
            CameraError::InvalidAspectRatio { aspect_ratio } => {
                write!(f, "Aspect ratio must be positive, got {aspect_ratio}")
            }
            CameraError::InvalidFieldOfView { fov_y_degrees } => {
                write!(
                    f,
                    "Field of view must be between 0 and 180 degrees, got {fov_y_degrees}"
                )
            }
            CameraError::DegenerateDepthRange { z_near, z_far } => {
                write!(f, "Degenerate depth range: near = {z_near}, far = {z_far}")
            }
            CameraError::DegenerateExtent { axis, min, max } => {
                write!(f, "Degenerate {axis} extent: [{min}, {max}]")
            }
        }
    }
}

impl std::error::Error for CameraError {}
