use crate::constants::{CANVAS_ID, MODE_ATTRIBUTE, MODE_QUERY_PARAM};
use crate::input;
use field_core::{Mode, Viewport};
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn find_canvas(document: &web::Document) -> anyhow::Result<web::HtmlCanvasElement> {
    let el = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?;
    el.dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("#{} is not a canvas: {:?}", CANVAS_ID, e))
}

pub fn context_2d(canvas: &web::HtmlCanvasElement) -> anyhow::Result<web::CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .map_err(|e| anyhow::anyhow!("getContext failed: {:?}", e))?
        .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|e| anyhow::anyhow!("unexpected context type: {:?}", e))
}

/// Window inner size in CSS pixels; zero when the browser will not say.
pub fn window_inner_size(window: &web::Window) -> (f64, f64) {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    (w, h)
}

/// Size the canvas backing store to the window and report the new viewport.
pub fn sync_canvas_to_window(canvas: &web::HtmlCanvasElement, window: &web::Window) -> Viewport {
    let (w, h) = window_inner_size(window);
    canvas.set_width(w as u32);
    canvas.set_height(h as u32);
    Viewport::new(canvas.width() as f64, canvas.height() as f64)
}

/// Mode requested by the page: `?mode=` first, then `data-mode` on the
/// canvas. Unknown names fall back to planar with a warning.
pub fn read_mode(window: &web::Window, canvas: &web::HtmlCanvasElement) -> Mode {
    let query = window
        .location()
        .search()
        .ok()
        .and_then(|s| web::UrlSearchParams::new_with_str(&s).ok())
        .and_then(|p| p.get(MODE_QUERY_PARAM));
    let attribute = canvas.get_attribute(MODE_ATTRIBUTE);
    match input::select_mode_source(query.as_deref(), attribute.as_deref()) {
        Some(name) => name.parse().unwrap_or_else(|e| {
            log::warn!("[config] {}; using planar", e);
            Mode::Planar
        }),
        None => Mode::default(),
    }
}
