// Host-side tests for panel highlighting.

mod common;

use common::assets::Assets;
use common::color::rgb_from_hex;
use common::constants::{CARD_HIGHLIGHT_COLOR, CARD_IDLE_COLOR};
use common::context::SceneContext;
use common::highlight::*;
use common::panels::panel_position;
use common::pick::{Hit, HitResult};
use common::pointer::{PointerSample, Viewport};
use common::{is_textured, material_color, sample_at};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn viewport() -> Viewport {
    Viewport::new(1000.0, 800.0)
}

fn context() -> SceneContext {
    let mut rng = StdRng::seed_from_u64(1);
    SceneContext::build(&Assets::default(), viewport(), &mut rng).unwrap()
}

fn over_panel(ctx: &SceneContext, index: usize) -> PointerSample {
    let front = panel_position(index) + Vec3::new(0.0, 0.0, 0.05);
    sample_at(&ctx.camera, front, viewport())
}

fn panel_colors(ctx: &SceneContext) -> Vec<[f32; 3]> {
    ctx.panels
        .iter()
        .map(|p| material_color(&ctx.scene.node(p.mesh).unwrap().material).unwrap())
        .collect()
}

#[test]
fn hovering_first_panel_highlights_only_it() {
    let mut ctx = context();
    let sample = over_panel(&ctx, 0);
    let states = ctx.on_pointer_move(sample, viewport());
    assert_eq!(
        states,
        vec![HighlightState::Highlighted, HighlightState::Idle, HighlightState::Idle]
    );
    let colors = panel_colors(&ctx);
    assert_eq!(colors[0], rgb_from_hex(CARD_HIGHLIGHT_COLOR));
    assert_eq!(colors[1], rgb_from_hex(CARD_IDLE_COLOR));
    assert_eq!(colors[2], rgb_from_hex(CARD_IDLE_COLOR));
}

#[test]
fn moving_to_empty_space_resets_everything() {
    let mut ctx = context();
    let sample = over_panel(&ctx, 1);
    ctx.on_pointer_move(sample, viewport());
    let states = ctx.on_pointer_move(PointerSample::new(5.0, 5.0), viewport());
    assert!(states.iter().all(|s| *s == HighlightState::Idle));
    assert!(panel_colors(&ctx)
        .iter()
        .all(|c| *c == rgb_from_hex(CARD_IDLE_COLOR)));
}

#[test]
fn repeated_moves_are_idempotent() {
    let mut ctx = context();
    let sample = over_panel(&ctx, 2);
    let first = ctx.on_pointer_move(sample, viewport());
    let colors = panel_colors(&ctx);
    let second = ctx.on_pointer_move(sample, viewport());
    assert_eq!(first, second);
    assert_eq!(colors, panel_colors(&ctx));
}

#[test]
fn every_hit_panel_is_highlighted_not_just_the_nearest() {
    let mut ctx = context();
    let panels: Vec<_> = ctx.panels.meshes();
    let hits: HitResult = [
        Hit {
            mesh: panels[2],
            distance: 1.0,
        },
        Hit {
            mesh: panels[0],
            distance: 2.0,
        },
    ]
    .into_iter()
    .collect();
    let states = apply_highlight(&hits, &ctx.panels, &mut ctx.scene);
    assert_eq!(
        states,
        vec![HighlightState::Highlighted, HighlightState::Idle, HighlightState::Highlighted]
    );
}

#[test]
fn non_panel_hits_leave_panels_idle() {
    let mut ctx = context();
    let hits: HitResult = [Hit {
        mesh: ctx.globe,
        distance: 1.0,
    }]
    .into_iter()
    .collect();
    let states = apply_highlight(&hits, &ctx.panels, &mut ctx.scene);
    assert!(states.iter().all(|s| *s == HighlightState::Idle));
    assert!(is_textured(&ctx.scene.node(ctx.globe).unwrap().material));
}
