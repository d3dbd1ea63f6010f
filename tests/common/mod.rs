// The main crate is wasm-only, so the pure-Rust scene modules are included
// directly. Module names mirror src/core so their `super::` paths resolve.

#![allow(dead_code)]

pub mod animation {
    include!("../../src/core/animation.rs");
}
pub mod assets {
    include!("../../src/core/assets.rs");
}
pub mod camera {
    include!("../../src/core/camera.rs");
}
pub mod color {
    include!("../../src/core/color.rs");
}
pub mod constants {
    include!("../../src/core/constants.rs");
}
pub mod context {
    include!("../../src/core/context.rs");
}
pub mod geometry {
    include!("../../src/core/geometry.rs");
}
pub mod highlight {
    include!("../../src/core/highlight.rs");
}
pub mod navigation {
    include!("../../src/core/navigation.rs");
}
pub mod panels {
    include!("../../src/core/panels.rs");
}
pub mod pick {
    include!("../../src/core/pick.rs");
}
pub mod pointer {
    include!("../../src/core/pointer.rs");
}
pub mod scene {
    include!("../../src/core/scene.rs");
}
pub mod text {
    include!("../../src/core/text.rs");
}

use camera::Camera;
use glam::Vec3;
use navigation::Navigator;
use pointer::{PointerSample, Viewport};
use scene::Material;

/// Normalized device coordinates of a world point.
pub fn ndc(camera: &Camera, world: Vec3) -> Vec3 {
    camera.view_proj().project_point3(world)
}

/// Pixel position at which `world` appears through `camera`.
pub fn sample_at(camera: &Camera, world: Vec3, viewport: Viewport) -> PointerSample {
    let ndc = ndc(camera, world);
    PointerSample::new(
        (ndc.x + 1.0) * 0.5 * viewport.width,
        (1.0 - ndc.y) * 0.5 * viewport.height,
    )
}

pub fn material_color(material: &Material) -> Option<[f32; 3]> {
    match *material {
        Material::Phong { color, .. }
        | Material::Basic { color, .. }
        | Material::Standard { color, .. }
        | Material::Line { color } => Some(color),
        Material::Points => None,
    }
}

pub fn is_textured(material: &Material) -> bool {
    matches!(material, Material::Phong { textured: true, .. })
}

/// Records every navigation instead of leaving the page.
#[derive(Default)]
pub struct RecordingNavigator {
    pub visited: Vec<String>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, target: &str) {
        self.visited.push(target.to_string());
    }
}
