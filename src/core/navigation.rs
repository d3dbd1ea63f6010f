use super::panels::{Panel, PanelRegistry};
use super::pick::Hit;

// Navigation Dispatcher.

/// Leaves the current page for `target`. The browser build assigns
/// `window.location.href`; tests record the calls.
pub trait Navigator {
    fn navigate(&mut self, target: &str);
}

/// Navigate to the nearest hit's panel. Empty hits, or a nearest hit whose
/// mesh is not a registered panel, do nothing.
pub fn dispatch_navigation<'r, N: Navigator + ?Sized>(
    hits: &[Hit],
    registry: &'r PanelRegistry,
    navigator: &mut N,
) -> Option<&'r Panel> {
    let nearest = hits.first()?;
    let Some(panel) = registry.find_by_mesh(nearest.mesh) else {
        log::warn!("[click] nearest hit {:?} is not a registered panel", nearest.mesh);
        return None;
    };
    log::info!("[click] panel {:?} -> {}", panel.label, panel.target);
    navigator.navigate(&panel.target);
    Some(panel)
}
