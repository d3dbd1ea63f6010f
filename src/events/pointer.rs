use super::Listener;
use crate::core::navigation::Navigator;
use crate::core::{PointerSample, SceneContext};
use crate::dom;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Navigates by assigning `window.location.href`.
pub struct LocationNavigator;

impl Navigator for LocationNavigator {
    fn navigate(&mut self, target: &str) {
        let Some(window) = web::window() else {
            log::error!("[click] no window to navigate with");
            return;
        };
        if let Err(e) = window.location().set_href(target) {
            log::error!("[click] navigation to {} failed: {:?}", target, e);
        }
    }
}

#[inline]
fn sample_of(ev: &web::MouseEvent) -> PointerSample {
    PointerSample::new(ev.client_x() as f32, ev.client_y() as f32)
}

/// Window-level hover highlighting and click navigation over the panels.
pub fn wire_pointer_handlers(
    window: &web::Window,
    ctx: &Rc<RefCell<SceneContext>>,
) -> Vec<Listener> {
    let mut listeners = Vec::with_capacity(2);
    listeners.extend(wire_pointermove(window, ctx));
    listeners.extend(wire_click(window, ctx));
    listeners
}

fn wire_pointermove(window: &web::Window, ctx: &Rc<RefCell<SceneContext>>) -> Option<Listener> {
    let ctx = ctx.clone();
    let wnd = window.clone();
    Listener::attach(window, "pointermove", move |ev: web::PointerEvent| {
        let viewport = dom::viewport(&wnd);
        if viewport.width <= 0.0 || viewport.height <= 0.0 {
            return;
        }
        ctx.borrow_mut().on_pointer_move(sample_of(&ev), viewport);
    })
}

fn wire_click(window: &web::Window, ctx: &Rc<RefCell<SceneContext>>) -> Option<Listener> {
    let ctx = ctx.clone();
    let wnd = window.clone();
    Listener::attach(window, "click", move |ev: web::MouseEvent| {
        ev.prevent_default();
        let viewport = dom::viewport(&wnd);
        if viewport.width <= 0.0 || viewport.height <= 0.0 {
            return;
        }
        ctx.borrow_mut()
            .on_click(sample_of(&ev), viewport, &mut LocationNavigator);
    })
}
