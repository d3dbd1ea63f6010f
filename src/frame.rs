use crate::core::SceneContext;
use crate::render;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

const FRAME_STATS_EVERY: u64 = 600;

pub struct FrameContext {
    pub scene: Rc<RefCell<SceneContext>>,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState>,
    last_instant: Instant,
    frame_time_acc: f32,
}

impl FrameContext {
    pub fn new(
        scene: Rc<RefCell<SceneContext>>,
        canvas: web::HtmlCanvasElement,
        gpu: Option<render::GpuState>,
    ) -> Self {
        Self {
            scene,
            canvas,
            gpu,
            last_instant: Instant::now(),
            frame_time_acc: 0.0,
        }
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;

        let mut ctx = self.scene.borrow_mut();
        ctx.frame();

        self.frame_time_acc += dt_sec;
        let frames = ctx.driver.frames();
        if frames % FRAME_STATS_EVERY == 0 {
            log::debug!(
                "[frame] {} frames in phase {:?}, avg {:.2} ms",
                frames,
                ctx.driver.phase(),
                1000.0 * self.frame_time_acc / FRAME_STATS_EVERY as f32
            );
            self.frame_time_acc = 0.0;
        }

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            g.sync_geometries(&ctx.scene);
            match g.render(&ctx.scene, &ctx.camera) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => g.reconfigure(),
                Err(e) => log::error!("render error: {:?}", e),
            }
        }
    }

    pub fn dispose(&mut self) {
        if let Some(g) = self.gpu.take() {
            g.dispose();
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState> {
    match render::GpuState::new(canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

/// Owns the requestAnimationFrame chain. `stop` cancels the pending frame and
/// drops the tick closure, which breaks its self-reference.
pub struct LoopHandle {
    running: Rc<Cell<bool>>,
    raf_id: Rc<Cell<Option<i32>>>,
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl LoopHandle {
    pub fn stop(&self) {
        self.running.set(false);
        if let Some(id) = self.raf_id.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
        self.tick.borrow_mut().take();
    }
}

fn request_frame(tick: &RefCell<Option<Closure<dyn FnMut()>>>, raf_id: &Cell<Option<i32>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        match w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => raf_id.set(Some(id)),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) -> LoopHandle {
    let running = Rc::new(Cell::new(true));
    let raf_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

    let tick_clone = tick.clone();
    let running_tick = running.clone();
    let raf_tick = raf_id.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        raf_tick.set(None);
        if !running_tick.get() {
            return;
        }
        frame_ctx.borrow_mut().frame();
        if running_tick.get() {
            request_frame(&tick_clone, &raf_tick);
        }
    }) as Box<dyn FnMut()>));
    request_frame(&tick, &raf_id);

    LoopHandle {
        running,
        raf_id,
        tick,
    }
}

/// One-shot timer that moves the scene into the second animation phase.
pub struct PhaseTimer {
    handle: i32,
    _closure: Closure<dyn FnMut()>,
}

impl PhaseTimer {
    /// `delay` is what is left of the phase delay when the timer is armed.
    pub fn schedule(
        window: &web::Window,
        ctx: &Rc<RefCell<SceneContext>>,
        delay: Duration,
    ) -> Option<Self> {
        let ctx = ctx.clone();
        let closure = Closure::wrap(Box::new(move || {
            ctx.borrow_mut().enter_phase_two();
        }) as Box<dyn FnMut()>);
        let callback: &js_sys::Function = closure.as_ref().unchecked_ref();
        let delay_ms = delay.as_millis().min(i32::MAX as u128) as i32;
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(callback, delay_ms) {
            Ok(handle) => {
                log::info!("[phase] phase two in {} ms", delay_ms);
                Some(Self {
                    handle,
                    _closure: closure,
                })
            }
            Err(e) => {
                log::error!("[phase] failed to schedule phase two: {:?}", e);
                None
            }
        }
    }

    /// Harmless after the timer has fired.
    pub fn cancel(self, window: &web::Window) {
        window.clear_timeout_with_handle(self.handle);
    }
}
