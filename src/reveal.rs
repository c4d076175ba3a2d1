//! Scroll reveal: content blocks fade in the first time they enter the
//! viewport, then stop being watched.

use crate::constants::{
    REVEAL_BASE_CLASS, REVEAL_ROOT_MARGIN, REVEAL_SELECTORS, REVEAL_THRESHOLD, REVEAL_VISIBLE_CLASS,
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Tag every matching element and observe it. Returns how many elements are
/// being watched.
pub fn wire_scroll_reveal(document: &web::Document) -> anyhow::Result<u32> {
    let nodes = document
        .query_selector_all(REVEAL_SELECTORS)
        .map_err(|e| anyhow::anyhow!("bad reveal selector: {:?}", e))?;

    let callback = Closure::wrap(Box::new(
        move |entries: js_sys::Array, observer: web::IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<web::IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                _ = target.class_list().add_1(REVEAL_VISIBLE_CLASS);
                observer.unobserve(&target);
            }
        },
    ) as Box<dyn FnMut(js_sys::Array, web::IntersectionObserver)>);

    let options = web::IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
    options.set_root_margin(REVEAL_ROOT_MARGIN);
    let observer =
        web::IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
            .map_err(|e| anyhow::anyhow!("IntersectionObserver unavailable: {:?}", e))?;
    callback.forget();

    let mut watched = 0;
    for i in 0..nodes.length() {
        let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<web::Element>().ok()) else {
            continue;
        };
        _ = el.class_list().add_1(REVEAL_BASE_CLASS);
        observer.observe(&el);
        watched += 1;
    }
    Ok(watched)
}
