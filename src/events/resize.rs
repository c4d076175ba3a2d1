use crate::canvas::CanvasSurface;
use crate::dom;
use field_core::RenderSession;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Keep the canvas at window size and rebuild the field on every resize.
pub fn wire_resize(
    window: &web::Window,
    canvas: web::HtmlCanvasElement,
    session: Rc<RefCell<RenderSession>>,
    surface: Rc<RefCell<CanvasSurface>>,
) {
    let window_resize = window.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
        let vp = dom::sync_canvas_to_window(&canvas, &window_resize);
        if let Ok(mut s) = surface.try_borrow_mut() {
            s.invalidate_styles();
        }
        match session.try_borrow_mut() {
            Ok(mut s) => {
                s.resize(vp.width, vp.height);
                log::debug!("[resize] {}x{} points={}", vp.width, vp.height, s.point_count());
            }
            Err(_) => log::warn!("[resize] session busy, resize dropped"),
        }
    }) as Box<dyn FnMut()>);
    _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    closure.forget();
}
