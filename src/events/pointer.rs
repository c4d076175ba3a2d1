use crate::input::{self, CanvasRect};
use field_core::RenderSession;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
fn surface_position(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> glam::DVec2 {
    let r = canvas.get_bounding_client_rect();
    let rect = CanvasRect {
        left: r.left(),
        top: r.top(),
        width: r.width(),
        height: r.height(),
    };
    input::client_to_surface(
        ev.client_x() as f64,
        ev.client_y() as f64,
        rect,
        canvas.width() as f64,
        canvas.height() as f64,
    )
}

pub fn wire_pointer_handlers(
    window: &web::Window,
    canvas: web::HtmlCanvasElement,
    session: Rc<RefCell<RenderSession>>,
) {
    wire_pointermove(window, canvas, session.clone());
    wire_mouseout(window, session);
}

fn wire_pointermove(
    window: &web::Window,
    canvas: web::HtmlCanvasElement,
    session: Rc<RefCell<RenderSession>>,
) {
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let pos = surface_position(&ev, &canvas);
        if let Ok(mut s) = session.try_borrow_mut() {
            s.pointer_move(pos.x, pos.y);
        }
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    closure.forget();
}

// `mouseout` bubbles from every element; only a null related target means
// the pointer actually left the page.
fn wire_mouseout(window: &web::Window, session: Rc<RefCell<RenderSession>>) {
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        if ev.related_target().is_some() {
            return;
        }
        if let Ok(mut s) = session.try_borrow_mut() {
            s.pointer_leave();
        }
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("mouseout", closure.as_ref().unchecked_ref());
    closure.forget();
}
