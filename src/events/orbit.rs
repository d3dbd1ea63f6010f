use super::Listener;
use crate::core::SceneContext;
use crate::dom;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

#[derive(Default, Clone, Copy)]
struct DragState {
    active: bool,
    pointer_id: i32,
    last: Vec2,
}

/// Drag on the canvas to orbit, wheel to dolly. The camera itself moves in
/// the frame loop through the damped controls.
pub fn wire_orbit_handlers(
    window: &web::Window,
    canvas: &web::HtmlCanvasElement,
    ctx: &Rc<RefCell<SceneContext>>,
) -> Vec<Listener> {
    let drag = Rc::new(RefCell::new(DragState::default()));
    let mut listeners = Vec::with_capacity(4);
    listeners.extend(wire_pointerdown(canvas, &drag));
    listeners.extend(wire_drag_move(window, ctx, &drag));
    listeners.extend(wire_pointerup(window, canvas, &drag));
    listeners.extend(wire_wheel(canvas, ctx));
    listeners
}

fn wire_pointerdown(
    canvas: &web::HtmlCanvasElement,
    drag: &Rc<RefCell<DragState>>,
) -> Option<Listener> {
    let drag = drag.clone();
    let target = canvas.clone();
    Listener::attach(canvas, "pointerdown", move |ev: web::PointerEvent| {
        let mut ds = drag.borrow_mut();
        ds.active = true;
        ds.pointer_id = ev.pointer_id();
        ds.last = Vec2::new(ev.client_x() as f32, ev.client_y() as f32);
        _ = target.set_pointer_capture(ev.pointer_id());
    })
}

fn wire_drag_move(
    window: &web::Window,
    ctx: &Rc<RefCell<SceneContext>>,
    drag: &Rc<RefCell<DragState>>,
) -> Option<Listener> {
    let ctx = ctx.clone();
    let drag = drag.clone();
    let wnd = window.clone();
    Listener::attach(window, "pointermove", move |ev: web::PointerEvent| {
        let mut ds = drag.borrow_mut();
        if !ds.active || ds.pointer_id != ev.pointer_id() {
            return;
        }
        let pos = Vec2::new(ev.client_x() as f32, ev.client_y() as f32);
        let delta = pos - ds.last;
        ds.last = pos;
        let viewport = dom::viewport(&wnd);
        ctx.borrow_mut()
            .controls
            .rotate(delta.x, delta.y, viewport.height);
    })
}

fn wire_pointerup(
    window: &web::Window,
    canvas: &web::HtmlCanvasElement,
    drag: &Rc<RefCell<DragState>>,
) -> Option<Listener> {
    let drag = drag.clone();
    let target = canvas.clone();
    Listener::attach(window, "pointerup", move |ev: web::PointerEvent| {
        let mut ds = drag.borrow_mut();
        if ds.active && ds.pointer_id == ev.pointer_id() {
            ds.active = false;
            _ = target.release_pointer_capture(ev.pointer_id());
        }
    })
}

fn wire_wheel(
    canvas: &web::HtmlCanvasElement,
    ctx: &Rc<RefCell<SceneContext>>,
) -> Option<Listener> {
    let ctx = ctx.clone();
    Listener::attach(canvas, "wheel", move |ev: web::WheelEvent| {
        ctx.borrow_mut().controls.dolly(ev.delta_y() as f32);
    })
}
