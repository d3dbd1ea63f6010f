// Host-side tests for the two-phase animation driver.

mod common;

use common::animation::*;
use common::color::rgb_from_hex;
use common::constants::*;
use common::geometry::MeshData;
use common::scene::*;
use std::time::Duration;

fn scene_with_three() -> (Scene, MeshHandle, MeshHandle, MeshHandle) {
    let mut scene = Scene::new();
    let geo = scene.add_geometry(MeshData::default());
    let textured = Material::Phong {
        color: [1.0; 3],
        textured: true,
        emissive: [1.0; 3],
        emissive_intensity: 0.0,
        shininess: GLOBE_SHININESS,
    };
    let globe = scene.add_mesh(NodeKind::Globe, geo, Transform::default(), textured);
    let ring = scene.add_mesh(
        NodeKind::Ring,
        geo,
        Transform::default(),
        Material::basic([1.0; 3]),
    );
    let stars = scene.add_mesh(
        NodeKind::Stars,
        geo,
        Transform::default(),
        Material::Points,
    );
    (scene, globe, ring, stars)
}

fn rotation(scene: &Scene, h: MeshHandle) -> glam::Vec3 {
    scene.node(h).unwrap().transform.rotation
}

#[test]
fn phase_one_spins_everything() {
    let (mut scene, globe, ring, stars) = scene_with_three();
    let mut driver = AnimationDriver::new(globe, ring, stars);
    for _ in 0..3 {
        driver.step(&mut scene);
    }
    assert_eq!(driver.frames(), 3);
    assert!((rotation(&scene, globe).y - 3.0 * GLOBE_SPIN_PER_FRAME).abs() < 1e-6);
    assert!((rotation(&scene, ring).z - 3.0 * RING_SPIN_PER_FRAME).abs() < 1e-6);
    assert!((rotation(&scene, stars).y - 3.0 * STARS_SPIN_PER_FRAME).abs() < 1e-6);
}

#[test]
fn phase_two_swaps_material_once() {
    let (mut scene, globe, ring, stars) = scene_with_three();
    let mut driver = AnimationDriver::new(globe, ring, stars);
    assert_eq!(driver.phase(), AnimationPhase::One);
    assert!(driver.enter_phase_two(&mut scene));
    assert_eq!(driver.phase(), AnimationPhase::Two);
    assert_eq!(
        scene.node(globe).unwrap().material,
        Material::basic(rgb_from_hex(PHASE_TWO_GLOBE_COLOR))
    );
    assert!(!driver.enter_phase_two(&mut scene));
}

#[test]
fn stars_stop_in_phase_two() {
    let (mut scene, globe, ring, stars) = scene_with_three();
    let mut driver = AnimationDriver::new(globe, ring, stars);
    driver.step(&mut scene);
    driver.enter_phase_two(&mut scene);
    let stars_before = rotation(&scene, stars);
    let globe_before = rotation(&scene, globe);
    let ring_before = rotation(&scene, ring);
    driver.step(&mut scene);
    driver.step(&mut scene);
    assert_eq!(rotation(&scene, stars), stars_before);
    let globe_turn = rotation(&scene, globe).y - globe_before.y;
    let ring_turn = rotation(&scene, ring).z - ring_before.z;
    assert!((globe_turn - 2.0 * GLOBE_SPIN_PER_FRAME).abs() < 1e-6);
    assert!((ring_turn - 2.0 * RING_SPIN_PER_FRAME).abs() < 1e-6);
}

#[test]
fn due_exactly_at_the_delay() {
    let (mut scene, globe, ring, stars) = scene_with_three();
    let mut driver = AnimationDriver::new(globe, ring, stars);
    assert!(!driver.is_due(Duration::from_millis(9_999)));
    assert!(driver.is_due(Duration::from_millis(10_000)));
    driver.enter_phase_two(&mut scene);
    assert!(!driver.is_due(Duration::from_secs(60)));
}

#[test]
fn remaining_delay_counts_from_the_same_start() {
    let (mut scene, globe, ring, stars) = scene_with_three();
    let mut driver = AnimationDriver::new(globe, ring, stars);
    assert_eq!(driver.remaining(Duration::ZERO), Some(Duration::from_millis(10_000)));
    // Loading took 2.5 s: only the rest of the delay is left.
    assert_eq!(
        driver.remaining(Duration::from_millis(2_500)),
        Some(Duration::from_millis(7_500))
    );
    assert_eq!(driver.remaining(Duration::from_millis(12_000)), Some(Duration::ZERO));
    driver.enter_phase_two(&mut scene);
    assert_eq!(driver.remaining(Duration::from_millis(2_500)), None);
}

#[test]
fn custom_delay_is_respected() {
    let (_, globe, ring, stars) = scene_with_three();
    let driver = AnimationDriver::with_delay(globe, ring, stars, Duration::from_millis(5));
    assert!(driver.is_due(Duration::from_millis(5)));
}

#[test]
fn missing_nodes_are_skipped() {
    let mut scene = Scene::new();
    let (_, globe, ring, stars) = scene_with_three();
    let mut driver = AnimationDriver::new(globe, ring, stars);
    driver.step(&mut scene);
    assert!(driver.enter_phase_two(&mut scene));
    assert_eq!(driver.frames(), 1);
}
