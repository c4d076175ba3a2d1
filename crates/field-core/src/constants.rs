// Shared tuning constants for the planar field and the point sphere.
// `FieldConfig::default()` is built from these.

// Planar field population
pub const AREA_PER_PARTICLE: f64 = 9000.0; // one particle per this many square pixels
pub const PARTICLE_SIZE_MIN: f64 = 1.0;
pub const PARTICLE_SIZE_SPAN: f64 = 3.0; // size in [MIN, MIN + SPAN)
pub const PARTICLE_SPEED_MAX: f64 = 1.0; // each velocity component in [-MAX, MAX]

// Pointer repulsion
pub const POINTER_RADIUS_INITIAL: f64 = 150.0;
pub const POINTER_RADIUS_DIVISOR: f64 = 80.0; // radius = (h / d) * (w / d) after a resize
pub const REPULSION_STEP: f64 = 10.0; // pixels per axis per tick
pub const REPULSION_MARGIN_FACTOR: f64 = 10.0; // margin = factor * particle size

// Proximity links
pub const LINK_DIVISOR: f64 = 7.0; // threshold = (w / d) * (h / d), squared pixels
pub const LINK_FALLOFF: f64 = 20000.0; // opacity = 1 - dist_sq / falloff
pub const LINK_ALPHA: f64 = 0.05;
pub const LINK_WIDTH: f64 = 1.0;
pub const GRID_LINKER_MIN_POINTS: usize = 400; // switch to the cell grid at this count

// Point sphere
pub const SPHERE_POINT_COUNT: usize = 900;
pub const SPHERE_RADIUS_FACTOR: f64 = 0.75; // radius = min(w, h) * factor
pub const ROTATION_EASING: f64 = 0.05;
pub const AUTO_ROTATION_STEP: f64 = 0.00005; // added to the Y angle each frame, not stored
pub const POINTER_ROTATION_GAIN: f64 = 0.00005; // radians per pixel from the centre
pub const PERSPECTIVE_OFFSET: f64 = 350.0;
pub const DOT_ALPHA_FLOOR: f64 = 0.1;
pub const DOT_SIZE_FLOOR: f64 = 0.5;

// Palette: a subtle near-black grey
pub const INK_RGB: [u8; 3] = [29, 29, 31];
pub const PARTICLE_ALPHA: f64 = 0.15;
