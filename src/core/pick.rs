use glam::Vec3;
use smallvec::SmallVec;

use super::camera::{Camera, Ray};
use super::geometry::{Aabb, MeshData, Topology};
use super::pointer::NormalizedPointer;
use super::scene::{MeshHandle, Scene};

// Hit Tester: casts the camera ray through the pointer and reports which of the
// given meshes it crosses, nearest first.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub mesh: MeshHandle,
    pub distance: f32,
}

pub type HitResult = SmallVec<[Hit; 4]>;

/// Slab test. Returns the ray parameter of the entry point, or of the exit
/// point when the origin is inside the box.
#[inline]
pub fn ray_aabb(ray_origin: Vec3, ray_dir: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;
    for axis in 0..3 {
        let o = ray_origin[axis];
        let d = ray_dir[axis];
        if d.abs() < 1e-12 {
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }
        let inv = 1.0 / d;
        let t1 = (min[axis] - o) * inv;
        let t2 = (max[axis] - o) * inv;
        t_min = t_min.max(t1.min(t2));
        t_max = t_max.min(t1.max(t2));
    }
    if t_max < t_min.max(0.0) {
        return None;
    }
    Some(if t_min >= 0.0 { t_min } else { t_max })
}

// Barycentric slack so rays through shared edges and fan centres still land.
const EDGE_EPS: f32 = 1e-6;

/// Möller–Trumbore, both faces. Returns the ray parameter of the hit.
pub fn ray_triangle(ray: &Ray, a: Vec3, b: Vec3, c: Vec3) -> Option<f32> {
    let e1 = b - a;
    let e2 = c - a;
    let p = ray.dir.cross(e2);
    let det = e1.dot(p);
    if det.abs() < 1e-12 {
        return None;
    }
    let inv_det = 1.0 / det;
    let s = ray.origin - a;
    let u = s.dot(p) * inv_det;
    if !(-EDGE_EPS..=1.0 + EDGE_EPS).contains(&u) {
        return None;
    }
    let q = s.cross(e1);
    let v = ray.dir.dot(q) * inv_det;
    if v < -EDGE_EPS || u + v > 1.0 + EDGE_EPS {
        return None;
    }
    let t = e2.dot(q) * inv_det;
    (t >= 0.0).then_some(t)
}

impl Aabb {
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        ray_aabb(ray.origin, ray.dir, self.min, self.max)
    }
}

impl MeshData {
    /// Nearest triangle hit in the mesh's own frame. Line and point meshes
    /// have no surface and never hit.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        if self.topology != Topology::Triangles {
            return None;
        }
        let corner = |i: u32| self.positions.get(i as usize).map(|p| Vec3::from_array(*p));
        let mut nearest: Option<f32> = None;
        let mut test = |tri: [u32; 3]| {
            let (Some(a), Some(b), Some(c)) = (corner(tri[0]), corner(tri[1]), corner(tri[2]))
            else {
                return;
            };
            if let Some(t) = ray_triangle(ray, a, b, c) {
                nearest = Some(nearest.map_or(t, |n| n.min(t)));
            }
        };
        if self.indices.is_empty() {
            for k in 0..self.positions.len() as u32 / 3 {
                test([3 * k, 3 * k + 1, 3 * k + 2]);
            }
        } else {
            for c in self.indices.chunks_exact(3) {
                test([c[0], c[1], c[2]]);
            }
        }
        nearest
    }
}

/// Test `targets` only; anything else in the scene is ignored even when it is
/// in front of a target. Hidden or unknown handles never hit. The bounding
/// box rejects misses early; hits are confirmed against the triangles.
pub fn hit_test(
    pointer: NormalizedPointer,
    camera: &Camera,
    scene: &Scene,
    targets: &[MeshHandle],
) -> HitResult {
    let mut hits = HitResult::new();
    if targets.is_empty() {
        return hits;
    }
    let ray = camera.ray_through(pointer.as_vec2());
    if !ray.dir.is_finite() || ray.dir == Vec3::ZERO {
        return hits;
    }

    for &mesh in targets {
        let Some(node) = scene.node(mesh) else {
            continue;
        };
        if !node.visible {
            continue;
        }
        let (Some(world), Some(bounds), Some(geometry)) = (
            scene.world_matrix(mesh),
            scene.local_bounds(mesh),
            scene.geometry(node.geometry),
        ) else {
            continue;
        };
        let inv = world.inverse();
        let local = Ray {
            origin: inv.transform_point3(ray.origin),
            dir: inv.transform_vector3(ray.dir),
        };
        if bounds.intersect_ray(&local).is_none() {
            continue;
        }
        if let Some(t) = geometry.intersect_ray(&local) {
            let world_hit = world.transform_point3(local.at(t));
            hits.push(Hit {
                mesh,
                distance: world_hit.distance(ray.origin),
            });
        }
    }
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}
