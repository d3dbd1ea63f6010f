use super::color::rgb_from_hex;
use super::constants::{CARD_HIGHLIGHT_COLOR, CARD_IDLE_COLOR};
use super::panels::PanelRegistry;
use super::pick::Hit;
use super::scene::Scene;

// Highlight State Machine. State is recomputed from scratch on every pointer
// move: a panel is highlighted iff its mesh appears anywhere in the hits.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HighlightState {
    Highlighted,
    Idle,
}

impl HighlightState {
    pub fn color(self) -> [f32; 3] {
        match self {
            HighlightState::Highlighted => rgb_from_hex(CARD_HIGHLIGHT_COLOR),
            HighlightState::Idle => rgb_from_hex(CARD_IDLE_COLOR),
        }
    }
}

/// Recolor every panel mesh and return the per-panel state in registry order.
pub fn apply_highlight(
    hits: &[Hit],
    registry: &PanelRegistry,
    scene: &mut Scene,
) -> Vec<HighlightState> {
    registry
        .iter()
        .map(|panel| {
            let state = if hits.iter().any(|h| h.mesh == panel.mesh) {
                HighlightState::Highlighted
            } else {
                HighlightState::Idle
            };
            if let Some(node) = scene.node_mut(panel.mesh) {
                node.material.set_color(state.color());
            }
            state
        })
        .collect()
}
