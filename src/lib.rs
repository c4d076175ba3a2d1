#![cfg(target_arch = "wasm32")]
use field_core::{FieldConfig, RenderSession};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

mod canvas;
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod reveal;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("ambient-field starting");
    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let window = web_sys::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    // the page content should still reveal even if the canvas is missing
    match reveal::wire_scroll_reveal(&document) {
        Ok(n) => log::info!("[reveal] watching {} elements", n),
        Err(e) => log::warn!("[reveal] disabled: {:?}", e),
    }

    let canvas = dom::find_canvas(&document)?;
    let ctx = dom::context_2d(&canvas)?;
    let viewport = dom::sync_canvas_to_window(&canvas, &window);
    let mode = dom::read_mode(&window, &canvas);

    let session = RenderSession::new(FieldConfig::with_mode(mode), viewport)?;
    log::info!(
        "[field] mode={} viewport={}x{} points={}",
        mode,
        viewport.width,
        viewport.height,
        session.point_count()
    );
    let session = Rc::new(RefCell::new(session));
    let surface = Rc::new(RefCell::new(canvas::CanvasSurface::new(ctx)));

    events::wire_pointer_handlers(&window, canvas.clone(), session.clone());
    events::wire_resize(&window, canvas, session.clone(), surface.clone());

    // the loop keeps itself alive through the pending frame callback
    let _loop = frame::start_loop(window, session, surface);
    Ok(())
}
