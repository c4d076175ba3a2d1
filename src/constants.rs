// Front-end wiring constants: element ids, selectors and reveal tuning.
// Simulation tuning lives in `field_core::constants`.

// Canvas the field is drawn on
pub const CANVAS_ID: &str = "particles-canvas";

// Mode selection: `data-mode` on the canvas, overridden by `?mode=` in the URL
pub const MODE_ATTRIBUTE: &str = "data-mode";
pub const MODE_QUERY_PARAM: &str = "mode";

// Scroll reveal
pub const REVEAL_SELECTORS: &str = "section > h1, section > h2, section > h3, section > h4, \
     section > p, .cards-habilidades, .proyecto-flex, .certificaciones-card, #iconos-redes, \
     .sobreMi-flex, .btn-proyecto";
pub const REVEAL_BASE_CLASS: &str = "animate-on-scroll";
pub const REVEAL_VISIBLE_CLASS: &str = "is-visible";
pub const REVEAL_THRESHOLD: f64 = 0.1; // fraction of the element that must be visible
pub const REVEAL_ROOT_MARGIN: &str = "0px";

// Diagnostics
pub const FPS_LOG_INTERVAL_FRAMES: u64 = 300;
