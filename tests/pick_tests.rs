// Host-side tests for ray casting against scene meshes.

mod common;

use common::camera::{Camera, Ray};
use common::ndc;
use common::geometry::{rounded_box, Aabb, MeshData, Topology};
use common::pick::*;
use common::pointer::NormalizedPointer;
use common::scene::*;
use glam::Vec3;

fn camera() -> Camera {
    Camera::perspective(75.0, 1.25, 0.1, 1000.0, Vec3::new(0.0, 0.0, 11.0))
}

fn card(scene: &mut Scene, at: Vec3) -> MeshHandle {
    let geo = scene.add_geometry(rounded_box(4.0, 0.5, 0.1, 6, 0.2));
    scene.add_mesh(NodeKind::Panel, geo, Transform::at(at), Material::basic([1.0; 3]))
}

fn center() -> NormalizedPointer {
    NormalizedPointer { x: 0.0, y: 0.0 }
}

#[test]
fn ray_aabb_hits_box_in_front() {
    let t = ray_aabb(Vec3::ZERO, Vec3::Z, Vec3::new(-1.0, -1.0, 4.0), Vec3::new(1.0, 1.0, 6.0));
    assert_eq!(t, Some(4.0));
}

#[test]
fn aabb_intersect_ray_uses_ray_origin() {
    let bounds = Aabb {
        min: Vec3::new(-1.0, -1.0, -1.0),
        max: Vec3::new(1.0, 1.0, 1.0),
    };
    let ray = Ray {
        origin: Vec3::new(0.0, 0.0, 5.0),
        dir: Vec3::NEG_Z,
    };
    assert_eq!(bounds.intersect_ray(&ray), Some(4.0));
    let offset = Ray {
        origin: Vec3::new(3.0, 0.0, 5.0),
        dir: Vec3::NEG_Z,
    };
    assert!(bounds.intersect_ray(&offset).is_none());
}

#[test]
fn ray_aabb_misses_box_behind() {
    let t = ray_aabb(Vec3::ZERO, Vec3::Z, Vec3::new(-1.0, -1.0, -6.0), Vec3::new(1.0, 1.0, -4.0));
    assert!(t.is_none());
}

#[test]
fn ray_aabb_from_inside_reports_exit() {
    let t = ray_aabb(Vec3::ZERO, Vec3::X, Vec3::splat(-1.0), Vec3::splat(1.0));
    assert_eq!(t, Some(1.0));
}

#[test]
fn hits_are_sorted_nearest_first() {
    let mut scene = Scene::new();
    let far = card(&mut scene, Vec3::ZERO);
    let near = card(&mut scene, Vec3::new(0.0, 0.0, 5.0));
    let hits = hit_test(center(), &camera(), &scene, &[far, near]);
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].mesh, near);
    assert_eq!(hits[1].mesh, far);
    assert!((hits[0].distance - 5.95).abs() < 1e-3);
    assert!(hits[0].distance <= hits[1].distance);
}

#[test]
fn non_target_occluder_is_ignored() {
    let mut scene = Scene::new();
    let target = card(&mut scene, Vec3::ZERO);
    let _occluder = card(&mut scene, Vec3::new(0.0, 0.0, 8.0));
    let hits = hit_test(center(), &camera(), &scene, &[target]);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].mesh, target);
}

#[test]
fn empty_targets_give_empty_result() {
    let mut scene = Scene::new();
    card(&mut scene, Vec3::ZERO);
    assert!(hit_test(center(), &camera(), &scene, &[]).is_empty());
}

#[test]
fn pointer_off_the_card_misses() {
    let mut scene = Scene::new();
    let target = card(&mut scene, Vec3::ZERO);
    let corner = NormalizedPointer { x: -0.95, y: 0.95 };
    assert!(hit_test(corner, &camera(), &scene, &[target]).is_empty());
}

#[test]
fn hidden_meshes_never_hit() {
    let mut scene = Scene::new();
    let target = card(&mut scene, Vec3::ZERO);
    if let Some(node) = scene.node_mut(target) {
        node.visible = false;
    }
    assert!(hit_test(center(), &camera(), &scene, &[target]).is_empty());
}

#[test]
fn projected_card_edge_is_hit_just_inside() {
    let mut scene = Scene::new();
    let target = card(&mut scene, Vec3::new(0.0, -1.2, 5.0));
    let cam = camera();
    let inside = ndc(&cam, Vec3::new(1.9, -1.2, 5.05));
    let outside = ndc(&cam, Vec3::new(2.1, -1.2, 5.05));
    let inside = NormalizedPointer { x: inside.x, y: inside.y };
    let outside = NormalizedPointer { x: outside.x, y: outside.y };
    assert_eq!(hit_test(inside, &cam, &scene, &[target]).len(), 1);
    assert!(hit_test(outside, &cam, &scene, &[target]).is_empty());
}

#[test]
fn rotated_mesh_is_tested_in_its_own_frame() {
    let mut scene = Scene::new();
    let target = card(&mut scene, Vec3::ZERO);
    if let Some(node) = scene.node_mut(target) {
        node.transform.rotation.z = std::f32::consts::FRAC_PI_2;
    }
    let cam = camera();
    // The card now stands upright: 0.5 wide and 4 tall.
    let above = ndc(&cam, Vec3::new(0.0, 1.5, 0.0));
    let beside = ndc(&cam, Vec3::new(1.5, 0.0, 0.0));
    let hit = |p: Vec3| hit_test(NormalizedPointer { x: p.x, y: p.y }, &cam, &scene, &[target]);
    assert_eq!(hit(above).len(), 1);
    assert!(hit(beside).is_empty());
}

#[test]
fn ray_triangle_hits_inside_and_misses_outside() {
    let (a, b, c) = (Vec3::ZERO, Vec3::X, Vec3::Y);
    let down = |x: f32, y: f32| Ray {
        origin: Vec3::new(x, y, 2.0),
        dir: Vec3::NEG_Z,
    };
    assert_eq!(ray_triangle(&down(0.2, 0.2), a, b, c), Some(2.0));
    // winding does not matter
    assert_eq!(ray_triangle(&down(0.2, 0.2), a, c, b), Some(2.0));
    assert!(ray_triangle(&down(0.8, 0.8), a, b, c).is_none());
    let behind = Ray {
        origin: Vec3::new(0.2, 0.2, -1.0),
        dir: Vec3::NEG_Z,
    };
    assert!(ray_triangle(&behind, a, b, c).is_none());
}

#[test]
fn line_meshes_have_no_surface() {
    let mesh = MeshData {
        positions: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        indices: vec![0, 1, 2],
        topology: Topology::Lines,
        ..Default::default()
    };
    let ray = Ray {
        origin: Vec3::new(0.2, 0.2, 1.0),
        dir: Vec3::NEG_Z,
    };
    assert!(mesh.intersect_ray(&ray).is_none());
}

#[test]
fn rounded_corner_cutout_is_not_part_of_the_card() {
    let mut scene = Scene::new();
    let at = Vec3::new(0.0, -1.2, 5.0);
    let target = card(&mut scene, at);
    let cam = camera();
    let pick = |local: Vec3| {
        let p = ndc(&cam, at + local);
        hit_test(NormalizedPointer { x: p.x, y: p.y }, &cam, &scene, &[target])
    };
    // Inside the bounding box but past the r = 0.2 arc centred at (1.8, 0.05).
    assert!(pick(Vec3::new(1.97, 0.22, 0.05)).is_empty());
    assert!(pick(Vec3::new(-1.97, -0.22, 0.05)).is_empty());
    // Inside the arc.
    assert_eq!(pick(Vec3::new(1.75, 0.2, 0.05)).len(), 1);
}
