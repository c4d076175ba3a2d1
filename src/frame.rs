use crate::canvas::CanvasSurface;
use crate::constants::FPS_LOG_INTERVAL_FRAMES;
use crate::input;
use field_core::{FrameScheduler, RenderLoop, RenderSession};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// `FrameScheduler` backed by `requestAnimationFrame`.
pub struct RafScheduler {
    window: web::Window,
}

impl RafScheduler {
    pub fn new(window: web::Window) -> Self {
        Self { window }
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&self, frame: Box<dyn FnOnce()>) {
        // the closure frees itself after its single call
        let callback = Closure::once_into_js(move || frame());
        if let Err(e) = self.window.request_animation_frame(callback.unchecked_ref()) {
            log::error!("[frame] requestAnimationFrame failed: {:?}", e);
        }
    }
}

pub type CanvasLoop = RenderLoop<CanvasSurface, RafScheduler>;

pub fn start_loop(
    window: web::Window,
    session: Rc<RefCell<RenderSession>>,
    surface: Rc<RefCell<CanvasSurface>>,
) -> CanvasLoop {
    let lp = RenderLoop::new(session, surface, Rc::new(RafScheduler::new(window)));
    let mut window_start = Instant::now();
    let mut frames: u64 = 0;
    lp.on_tick(move |session, stats| {
        frames += 1;
        if frames < FPS_LOG_INTERVAL_FRAMES {
            return;
        }
        let now = Instant::now();
        let fps = input::frames_per_second(frames, (now - window_start).as_secs_f64());
        log::debug!(
            "[frame] {} fps={:.1} points={} links={} frame={}",
            session.mode(),
            fps,
            stats.points,
            stats.links,
            session.frame_count()
        );
        frames = 0;
        window_start = now;
    });
    lp.start();
    lp
}
