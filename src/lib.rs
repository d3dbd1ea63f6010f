#![cfg(target_arch = "wasm32")]
use crate::core::{Assets, SceneContext, TextureImage};
use instant::Instant;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

pub mod core;
mod dom;
mod events;
mod frame;
mod loader;
mod render;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("globe-portal starting");
    Ok(())
}

/// Build the scene into a fresh full-window canvas and start animating.
/// The returned handle tears everything down again.
#[wasm_bindgen]
pub async fn mount() -> Result<Mounted, JsValue> {
    match init().await {
        Ok(parts) => Ok(Mounted { parts: Some(parts) }),
        Err(e) => {
            log::error!("init error: {:?}", e);
            Err(JsValue::from_str(&format!("{:#}", e)))
        }
    }
}

#[wasm_bindgen]
pub struct Mounted {
    parts: Option<MountedParts>,
}

#[wasm_bindgen]
impl Mounted {
    /// Stop the frame loop, cancel the pending phase switch, remove every
    /// listener and the canvas. Calling it again does nothing.
    pub fn unmount(&mut self) {
        if let Some(parts) = self.parts.take() {
            parts.teardown();
        }
    }

    #[wasm_bindgen(getter)]
    pub fn mounted(&self) -> bool {
        self.parts.is_some()
    }
}

struct MountedParts {
    window: web::Window,
    canvas: web::HtmlCanvasElement,
    frame_ctx: Rc<RefCell<frame::FrameContext>>,
    frame_loop: frame::LoopHandle,
    phase_timer: Option<frame::PhaseTimer>,
    listeners: Vec<events::Listener>,
}

impl MountedParts {
    fn teardown(self) {
        self.frame_loop.stop();
        if let Some(timer) = self.phase_timer {
            timer.cancel(&self.window);
        }
        let count = self.listeners.len();
        for listener in self.listeners {
            listener.detach();
        }
        self.frame_ctx.borrow_mut().dispose();
        dom::remove_canvas(&self.canvas);
        log::info!("[mount] torn down, removed {} listeners", count);
    }
}

async fn init() -> anyhow::Result<MountedParts> {
    let started = Instant::now();
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas = dom::create_canvas(&document)?;
    dom::sync_canvas_backing_size(&canvas);

    let mut gpu = frame::init_gpu(&canvas).await;
    let assets = loader::load_assets().await;

    let mut rng = StdRng::from_entropy();
    let ctx = match SceneContext::build(&assets, dom::viewport(&window), &mut rng) {
        Ok(ctx) => ctx,
        Err(e) => {
            dom::remove_canvas(&canvas);
            return Err(e.into());
        }
    };
    let Assets { texture, .. } = assets;
    if let Some(g) = gpu.as_mut() {
        g.set_globe_texture(&texture.unwrap_or_else(TextureImage::white));
        g.sync_geometries(&ctx.scene);
    }
    let ctx = Rc::new(RefCell::new(ctx));

    let mut listeners = Vec::new();
    listeners.extend(events::wire_pointer_handlers(&window, &ctx));
    listeners.extend(events::wire_orbit_handlers(&window, &canvas, &ctx));
    listeners.extend(events::wire_resize(&window, &canvas, &ctx));
    log::info!(
        "[mount] listening for {:?}",
        listeners.iter().map(|l| l.event()).collect::<Vec<_>>()
    );

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(
        ctx.clone(),
        canvas.clone(),
        gpu,
    )));
    let frame_loop = frame::start_loop(frame_ctx.clone());
    let phase_due_in = ctx.borrow().phase_two_due_in(started.elapsed());
    let phase_timer =
        phase_due_in.and_then(|delay| frame::PhaseTimer::schedule(&window, &ctx, delay));

    Ok(MountedParts {
        window,
        canvas,
        frame_ctx,
        frame_loop,
        phase_timer,
        listeners,
    })
}
