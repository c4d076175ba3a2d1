use glam::DVec2;

/// Client-space bounding box of the canvas, as reported by
/// `getBoundingClientRect`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Map client coordinates into the canvas backing store.
///
/// When CSS size and backing size match this is a plain offset; otherwise it
/// scales. A collapsed rect falls back to the offset alone.
#[inline]
pub fn client_to_surface(
    client_x: f64,
    client_y: f64,
    rect: CanvasRect,
    backing_width: f64,
    backing_height: f64,
) -> DVec2 {
    let x_css = client_x - rect.left;
    let y_css = client_y - rect.top;
    if rect.width > 0.0 && rect.height > 0.0 {
        DVec2::new(
            x_css / rect.width * backing_width,
            y_css / rect.height * backing_height,
        )
    } else {
        DVec2::new(x_css, y_css)
    }
}

/// Pick the mode string to parse: the URL override wins over the canvas
/// attribute; blank values are ignored.
#[inline]
pub fn select_mode_source<'a>(query: Option<&'a str>, attribute: Option<&'a str>) -> Option<&'a str> {
    query
        .filter(|s| !s.trim().is_empty())
        .or(attribute.filter(|s| !s.trim().is_empty()))
}

/// Frames per second over `frames` frames taking `elapsed_sec`.
#[inline]
pub fn frames_per_second(frames: u64, elapsed_sec: f64) -> f64 {
    if elapsed_sec > 0.0 {
        frames as f64 / elapsed_sec
    } else {
        0.0
    }
}
