pub mod orbit;
pub mod pointer;

pub use orbit::wire_orbit_handlers;
pub use pointer::wire_pointer_handlers;

use crate::core::SceneContext;
use crate::dom;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// A registered DOM listener. Keeps its closure alive until `detach`, which
/// unregisters it from the target it was added to.
pub struct Listener {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl Listener {
    /// Register `handler` for `event` on `target`. Events that are not an `E`
    /// are ignored. Returns `None` (and logs) if the browser rejects it.
    pub fn attach<E>(
        target: &web::EventTarget,
        event: &'static str,
        mut handler: impl FnMut(E) + 'static,
    ) -> Option<Self>
    where
        E: JsCast + 'static,
    {
        let closure = Closure::wrap(Box::new(move |ev: web::Event| {
            if let Ok(ev) = ev.dyn_into::<E>() {
                handler(ev);
            }
        }) as Box<dyn FnMut(web::Event)>);
        let callback: &js_sys::Function = closure.as_ref().unchecked_ref();
        match target.add_event_listener_with_callback(event, callback) {
            Ok(()) => Some(Self {
                target: target.clone(),
                event,
                closure,
            }),
            Err(e) => {
                log::error!("[events] failed to add {} listener: {:?}", event, e);
                None
            }
        }
    }

    pub fn event(&self) -> &'static str {
        self.event
    }

    pub fn detach(self) {
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref())
        {
            log::warn!("[events] failed to remove {} listener: {:?}", self.event, e);
        }
    }
}

/// Keep the canvas backing store and camera aspect in step with the window.
pub fn wire_resize(
    window: &web::Window,
    canvas: &web::HtmlCanvasElement,
    ctx: &Rc<RefCell<SceneContext>>,
) -> Option<Listener> {
    let canvas = canvas.clone();
    let ctx = ctx.clone();
    let wnd = window.clone();
    Listener::attach(window, "resize", move |_: web::Event| {
        dom::sync_canvas_backing_size(&canvas);
        let viewport = dom::viewport(&wnd);
        if viewport.width > 0.0 && viewport.height > 0.0 {
            ctx.borrow_mut().resize(viewport);
        }
    })
}
