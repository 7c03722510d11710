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

//! Integration tests for the model → view → projection pipeline.
//!
//! These go through the public API only, the way a renderer would: build a
//! model matrix, load a camera, and push points all the way to NDC.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use kiln_core::math::{
    Camera, Color, Frustum, FrustumFace, Mat3, Mat4, Projection, Vec2, Vec3, Vec4, FRAC_PI_2,
};
use kiln_core::renderer::TextureUnitAllocator;

/// Helper: projects a world-space point and performs the perspective divide.
fn to_ndc(mvp: &Mat4, p: Vec3) -> Vec3 {
    let clip = *mvp * p.extend(1.0);
    clip.truncate() / clip.w
}

// ─────────────────────────────────────────────────────────────────────────────
// Camera matrices
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_look_at_from_positive_z() {
    let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);

    assert_eq!(view.cols[0].x, 1.0);
    assert_eq!(view.cols[2].z, 1.0);
    assert_eq!(view.cols[3].z, -5.0);
    // Right, up and forward of the camera, as seen by the rows.
    assert_eq!(view.row(0).truncate(), Vec3::X);
    assert_eq!(view.row(1).truncate(), Vec3::Y);
    assert_eq!(view.row(2).truncate(), Vec3::Z);
}

#[test]
fn test_perspective_focal_length() {
    let p = Mat4::perspective(60.0, 1.0, 0.1, 100.0);
    assert_relative_eq!(p.cols[1].y, 1.0 / 30.0_f32.to_radians().tan(), epsilon = 1e-5);
}

#[test]
fn test_point_on_screen_edge() {
    // A point on the top edge of a 90 degree frustum lands on NDC y = 1.
    let camera = Camera::new(
        Vec3::ZERO,
        -Vec3::Z,
        Vec3::Y,
        Projection::Perspective {
            fov_y_degrees: 90.0,
            aspect_ratio: 2.0,
            z_near: 0.5,
            z_far: 20.0,
        },
    );
    camera.validate().unwrap();
    let mvp = camera.view_projection();

    let top = to_ndc(&mvp, Vec3::new(0.0, 4.0, -4.0));
    assert_abs_diff_eq!(top.y, 1.0, epsilon = 1e-5);
    let right = to_ndc(&mvp, Vec3::new(8.0, 0.0, -4.0));
    assert_abs_diff_eq!(right.x, 1.0, epsilon = 1e-5);
}

#[test]
fn test_frustum_planes_from_camera() {
    let camera = Camera::default();
    let frustum = Frustum::from_view_projection(&camera.view_projection());

    // The camera sits at z = 5 looking at the origin: near plane normal faces -Z.
    let near = frustum[FrustumFace::Near];
    assert_abs_diff_eq!(near.normal.z, -1.0, epsilon = 1e-4);
    let on_near = near.normal.dot(Vec3::new(0.0, 0.0, 4.9));
    assert_abs_diff_eq!(on_near, near.distance, epsilon = 1e-3);
}

// ─────────────────────────────────────────────────────────────────────────────
// Model transforms
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_model_transform_order() {
    // Scale, then rotate a quarter turn about Y, then translate.
    let model = Mat4::IDENTITY.transform(
        Vec3::new(0.0, 0.0, -10.0),
        Vec3::Y,
        FRAC_PI_2,
        Vec3::splat(2.0),
    );
    let p = model.transform_point3(Vec3::X);
    assert_abs_diff_eq!(p.x, 0.0, epsilon = 1e-5);
    assert_abs_diff_eq!(p.y, 0.0, epsilon = 1e-5);
    assert_abs_diff_eq!(p.z, -12.0, epsilon = 1e-5);
}

#[test]
fn test_translate_round_trip_and_inverse() {
    let m = Mat4::IDENTITY
        .rotate(Vec3::new(1.0, 2.0, 3.0), 0.9)
        .scale(Vec3::new(1.0, 2.0, 0.5));
    let t = Vec3::new(3.0, -1.0, 8.0);
    let back = m.translate(t).translate(-t);
    for (a, b) in back.to_cols_array().iter().zip(m.to_cols_array().iter()) {
        assert_abs_diff_eq!(*a, *b, epsilon = 1e-5);
    }

    let product = m * m.inverse().expect("rotation and scale are invertible");
    for (a, b) in product
        .to_cols_array()
        .iter()
        .zip(Mat4::IDENTITY.to_cols_array().iter())
    {
        assert_abs_diff_eq!(*a, *b, epsilon = 1e-5);
    }
}

#[test]
fn test_2d_transform_matches_3d_about_z() {
    let m3 = Mat3::IDENTITY.transform(Vec2::new(4.0, 2.0), 0.6, Vec2::new(2.0, 3.0));
    let m4 = Mat4::IDENTITY.transform(
        Vec3::new(4.0, 2.0, 0.0),
        Vec3::Z,
        0.6,
        Vec3::new(2.0, 3.0, 1.0),
    );
    let p2 = m3.transform_point2(Vec2::new(1.0, -1.0));
    let p3 = m4.transform_point3(Vec3::new(1.0, -1.0, 0.0));
    assert_abs_diff_eq!(p2.x, p3.x, epsilon = 1e-5);
    assert_abs_diff_eq!(p2.y, p3.y, epsilon = 1e-5);
}

#[test]
fn test_uniform_upload_layout() {
    let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
    let bytes: &[u8] = bytemuck::cast_slice(m.as_slice());
    assert_eq!(bytes.len(), 64);
    let floats: &[f32] = bytemuck::cast_slice(bytes);
    assert_eq!(floats[12..16], [1.0, 2.0, 3.0, 1.0]);

    let c = Vec4::new(0.0, 0.5, 1.0, 1.0);
    assert_eq!(bytemuck::bytes_of(&c).len(), 16);
    assert_eq!(bytemuck::bytes_of(&Color::RED), &[230, 41, 55, 255]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration and resources
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_camera_load_from_file() {
    let path = std::env::temp_dir().join(format!("kiln_camera_{}.json", std::process::id()));
    std::fs::write(
        &path,
        r#"{
            "eye": { "x": 0.0, "y": 2.0, "z": 5.0 },
            "target": { "x": 0.0, "y": 0.0, "z": 0.0 },
            "up": { "x": 0.0, "y": 1.0, "z": 0.0 },
            "projection": {
                "Perspective": { "fov_y_degrees": 60.0, "aspect_ratio": 1.7777, "z_near": 0.1, "z_far": 100.0 }
            }
        }"#,
    )
    .unwrap();

    let camera = Camera::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(camera.eye, Vec3::new(0.0, 2.0, 5.0));
    assert!(camera.validate().is_ok());
    let expected = Mat4::perspective(60.0, 1.7777, 0.1, 100.0);
    let actual = camera.projection_matrix();
    for (a, b) in actual.to_cols_array().iter().zip(expected.to_cols_array().iter()) {
        assert_relative_eq!(*a, *b, epsilon = 1e-6);
    }
}

#[test]
fn test_camera_load_rejects_bad_json() {
    let path = std::env::temp_dir().join(format!("kiln_bad_camera_{}.json", std::process::id()));
    std::fs::write(&path, r#"{ "eye": [0, 0, 5] }"#).unwrap();
    let err = Camera::load(&path).unwrap_err();
    std::fs::remove_file(&path).ok();
    assert!(format!("{err:#}").contains("Failed to parse camera file"));
}

#[test]
fn test_texture_units_per_renderer() {
    // Two renderers do not share a counter.
    let mut first = TextureUnitAllocator::new(2);
    let mut second = TextureUnitAllocator::new(2);
    assert_eq!(first.allocate().unwrap().index(), 0);
    assert_eq!(first.allocate().unwrap().index(), 1);
    assert!(first.allocate().is_err());
    assert_eq!(second.allocate().unwrap().index(), 0);
}
