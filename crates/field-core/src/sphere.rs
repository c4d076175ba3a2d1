//! Rotating sphere of points: Fibonacci-sphere placement, pointer-eased
//! rotation and perspective projection onto the surface.

use crate::config::FieldConfig;
use crate::pointer::Pointer;
use crate::simulation::{FrameInputs, Simulation, TickStats};
use crate::store::PointStore;
use crate::surface::Surface;
use crate::viewport::Viewport;
use glam::{DMat3, DVec2, DVec3};
use rand::rngs::SmallRng;

/// One dot on the sphere, in sphere-centred coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphereDot {
    pub position: DVec3,
}

#[inline]
pub fn sphere_radius(viewport: Viewport, factor: f64) -> f64 {
    if viewport.is_degenerate() {
        0.0
    } else {
        viewport.min_extent() * factor
    }
}

/// Place `count` dots near-uniformly on a sphere of `radius` using the
/// golden angle. Fully deterministic. Needs `count >= 2`; fewer yields the
/// north pole only.
pub fn fibonacci_sphere(count: usize, radius: f64) -> Vec<SphereDot> {
    let golden_angle = std::f64::consts::PI * (3.0 - 5.0_f64.sqrt());
    let last = count.saturating_sub(1).max(1) as f64;
    (0..count)
        .map(|i| {
            let t = i as f64;
            let y = 1.0 - (t / last) * 2.0;
            // clamp guards tiny negative values at the poles
            let r = (1.0 - y * y).max(0.0).sqrt();
            let theta = golden_angle * t;
            SphereDot {
                position: DVec3::new(theta.cos() * r, y, theta.sin() * r) * radius,
            }
        })
        .collect()
}

/// Current and target per-frame rotation angles (radians per frame).
///
/// Lives for the whole session; resizes do not reset it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RotationState {
    pub rotation_x: f64,
    pub rotation_y: f64,
    pub target_x: f64,
    pub target_y: f64,
}

impl RotationState {
    /// Aim at the pointer's offset from the surface centre. An absent pointer
    /// leaves the target where it was.
    pub fn retarget(&mut self, pointer: &Pointer, viewport: Viewport, gain: f64) {
        if let Some(at) = pointer.position {
            let offset = at - viewport.center();
            self.target_y = offset.x * gain;
            self.target_x = offset.y * gain;
        }
    }

    /// Exponential smoothing toward the target.
    pub fn ease(&mut self, factor: f64) {
        self.rotation_x += (self.target_x - self.rotation_x) * factor;
        self.rotation_y += (self.target_y - self.rotation_y) * factor;
    }

    /// Angles to apply this frame as `(x, y)`. The auto-spin is added to the
    /// Y angle here only and never folded back into `rotation_y`.
    #[inline]
    pub fn frame_angles(&self, auto_step: f64) -> (f64, f64) {
        (self.rotation_x, self.rotation_y + auto_step)
    }

    /// Largest remaining distance to the target over both axes.
    #[inline]
    pub fn error(&self) -> f64 {
        (self.target_x - self.rotation_x)
            .abs()
            .max((self.target_y - self.rotation_y).abs())
    }
}

/// Rotation about Y by `angle_y`, then about X by `angle_x`.
#[inline]
pub fn rotation_matrix(angle_x: f64, angle_y: f64) -> DMat3 {
    DMat3::from_rotation_x(angle_x) * DMat3::from_rotation_y(angle_y)
}

/// Screen placement and paint parameters of one projected dot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
    pub screen: DVec2,
    pub scale: f64,
    pub alpha: f64,
    pub size: f64,
}

/// Perspective-project a sphere-space point onto the surface.
///
/// The denominator is `width + z + radius + offset`; with `z >= -radius` it
/// stays at least `width + offset`, positive for any valid config.
#[inline]
pub fn project(p: DVec3, viewport: Viewport, radius: f64, offset: f64) -> Projected {
    let scale = viewport.width / (viewport.width + p.z + radius + offset);
    let screen = viewport.center() + DVec2::new(p.x, p.y) * scale;
    Projected {
        screen,
        scale,
        alpha: dot_alpha(scale),
        size: dot_size(scale),
    }
}

#[inline]
pub fn dot_alpha(scale: f64) -> f64 {
    ((scale - 0.5) * 1.5).max(crate::constants::DOT_ALPHA_FLOOR)
}

#[inline]
pub fn dot_size(scale: f64) -> f64 {
    (scale * 2.0).max(crate::constants::DOT_SIZE_FLOOR)
}

/// Sphere mode strategy.
pub struct SphereField {
    config: FieldConfig,
    store: PointStore<SphereDot>,
    rotation: RotationState,
}

impl SphereField {
    pub fn new(config: FieldConfig) -> Self {
        Self {
            config,
            store: PointStore::new(),
            rotation: RotationState::default(),
        }
    }

    pub fn store(&self) -> &PointStore<SphereDot> {
        &self.store
    }

    pub fn rotation(&self) -> &RotationState {
        &self.rotation
    }

    pub fn rotation_mut(&mut self) -> &mut RotationState {
        &mut self.rotation
    }
}

impl Simulation for SphereField {
    fn regenerate(&mut self, viewport: Viewport, _rng: &mut SmallRng) {
        let fresh = if viewport.is_degenerate() {
            Vec::new()
        } else {
            let radius = sphere_radius(viewport, self.config.sphere_radius_factor);
            fibonacci_sphere(self.config.sphere_point_count, radius)
        };
        self.store.replace(fresh);
    }

    fn advance_and_paint(&mut self, inputs: &FrameInputs, surface: &mut dyn Surface) -> TickStats {
        let cfg = &self.config;
        let viewport = inputs.viewport;
        self.rotation
            .retarget(&inputs.pointer, viewport, cfg.pointer_rotation_gain);
        self.rotation.ease(cfg.rotation_easing);
        let (ax, ay) = self.rotation.frame_angles(cfg.auto_rotation_step);
        let rot = rotation_matrix(ax, ay);
        let radius = sphere_radius(viewport, cfg.sphere_radius_factor);

        // Rotated coordinates are written back, so rotation accumulates
        // frame over frame (and so does rounding error).
        self.store.advance(|dot| {
            dot.position = rot * dot.position;
            let pr = project(dot.position, viewport, radius, cfg.perspective_offset);
            surface.fill_circle(pr.screen, pr.size, cfg.dot_color.with_alpha(pr.alpha));
        });
        TickStats {
            points: self.store.len(),
            links: 0,
        }
    }

    fn len(&self) -> usize {
        self.store.len()
    }
}
