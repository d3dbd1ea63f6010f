// Host-side tests for click navigation.

mod common;

use common::assets::Assets;
use common::constants::PANELS;
use common::context::SceneContext;
use common::navigation::dispatch_navigation;
use common::panels::panel_position;
use common::pick::{Hit, HitResult};
use common::pointer::{PointerSample, Viewport};
use common::{sample_at, RecordingNavigator};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn viewport() -> Viewport {
    Viewport::new(1280.0, 720.0)
}

fn context() -> SceneContext {
    let mut rng = StdRng::seed_from_u64(2);
    SceneContext::build(&Assets::default(), viewport(), &mut rng).unwrap()
}

fn over_panel(ctx: &SceneContext, index: usize) -> PointerSample {
    let front = panel_position(index) + Vec3::new(0.0, 0.0, 0.05);
    sample_at(&ctx.camera, front, viewport())
}

fn hits(list: &[(common::scene::MeshHandle, f32)]) -> HitResult {
    list.iter()
        .map(|&(mesh, distance)| Hit { mesh, distance })
        .collect()
}

#[test]
fn click_on_second_panel_navigates_once() {
    let mut ctx = context();
    let mut nav = RecordingNavigator::default();
    let sample = over_panel(&ctx, 1);
    let target = ctx.on_click(sample, viewport(), &mut nav);
    assert_eq!(target.as_deref(), Some(PANELS[1].url));
    assert_eq!(nav.visited, vec![PANELS[1].url.to_string()]);
}

#[test]
fn click_on_empty_space_does_nothing() {
    let mut ctx = context();
    let mut nav = RecordingNavigator::default();
    assert!(ctx
        .on_click(PointerSample::new(3.0, 3.0), viewport(), &mut nav)
        .is_none());
    assert!(nav.visited.is_empty());
}

#[test]
fn empty_hits_do_not_navigate() {
    let ctx = context();
    let mut nav = RecordingNavigator::default();
    assert!(dispatch_navigation(&hits(&[]), &ctx.panels, &mut nav).is_none());
    assert!(nav.visited.is_empty());
}

#[test]
fn only_the_nearest_hit_counts() {
    let ctx = context();
    let meshes = ctx.panels.meshes();
    let mut nav = RecordingNavigator::default();
    let panel = dispatch_navigation(
        &hits(&[(meshes[2], 3.0), (meshes[0], 4.0)]),
        &ctx.panels,
        &mut nav,
    );
    assert_eq!(panel.map(|p| p.label.as_str()), Some(PANELS[2].label));
    assert_eq!(nav.visited, vec![PANELS[2].url.to_string()]);
}

#[test]
fn nearest_non_panel_hit_is_ignored() {
    let ctx = context();
    let meshes = ctx.panels.meshes();
    let mut nav = RecordingNavigator::default();
    let panel = dispatch_navigation(
        &hits(&[(ctx.ring, 1.0), (meshes[0], 2.0)]),
        &ctx.panels,
        &mut nav,
    );
    assert!(panel.is_none());
    assert!(nav.visited.is_empty());
}
