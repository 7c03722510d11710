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

// Kiln Sandbox
// Usage: sandbox [CAMERA_JSON]

use anyhow::{Context, Result};
use kiln_core::math::{Camera, Color, Mat4, Vec3, Vec4, FRAC_PI_4};
use kiln_core::renderer::TextureUnitAllocator;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct Vertex {
    position: Vec3,
    color: Color,
}

const VERTICES: &[Vertex] = &[
    Vertex {
        position: Vec3::new(0.0, 0.5, 0.0),
        color: Color::RED,
    },
    Vertex {
        position: Vec3::new(-0.5, -0.5, 0.0),
        color: Color::GREEN,
    },
    Vertex {
        position: Vec3::new(0.5, -0.5, 0.0),
        color: Color::BLUE,
    },
];

fn print_matrix(label: &str, m: &Mat4) {
    println!("{label} (column-major):");
    for col in m.to_cols_array().chunks(4) {
        println!("  [{:>10.4} {:>10.4} {:>10.4} {:>10.4}]", col[0], col[1], col[2], col[3]);
    }
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let camera = match std::env::args().nth(1) {
        Some(path) => Camera::load(&path)?,
        None => {
            log::info!("No camera file given, using the default perspective camera");
            Camera::default()
        }
    };
    camera
        .validate()
        .context("Camera configuration would produce a degenerate matrix")?;

    let model = Mat4::IDENTITY.transform(
        Vec3::new(0.0, 0.5, 0.0),
        Vec3::Y,
        FRAC_PI_4,
        Vec3::splat(2.0),
    );
    let view = camera.view_matrix();
    let projection = camera.projection_matrix();
    let mvp = projection * view * model;

    print_matrix("model", &model);
    print_matrix("view", &view);
    print_matrix("projection", &projection);
    print_matrix("mvp", &mvp);

    log::info!(
        "Vertex buffer: {} vertices, {} bytes",
        VERTICES.len(),
        bytemuck::cast_slice::<Vertex, u8>(VERTICES).len()
    );
    for v in VERTICES {
        let clip = mvp * Vec4::from_vec3(v.position, 1.0);
        let ndc = clip.truncate() / clip.w;
        println!(
            "vertex {:?} {} -> ndc ({:.4}, {:.4}, {:.4})",
            v.position.to_array(),
            v.color.to_hex(),
            ndc.x,
            ndc.y,
            ndc.z
        );
    }

    let mut texture_units = TextureUnitAllocator::default();
    let albedo = texture_units.allocate()?;
    let normal = texture_units.allocate()?;
    log::info!(
        "Texture units: albedo = {}, normal = {} ({} of {} free)",
        albedo.index(),
        normal.index(),
        texture_units.available(),
        texture_units.capacity()
    );

    Ok(())
}
