//! Planar particle field: drifting particles that bounce off the viewport
//! edges, get pushed aside by the pointer and are linked to near neighbours.

use crate::config::FieldConfig;
use crate::linker::{self, Link};
use crate::pointer::Pointer;
use crate::simulation::{FrameInputs, Simulation, TickStats};
use crate::store::PointStore;
use crate::surface::{Rgba, Surface};
use crate::viewport::Viewport;
use glam::DVec2;
use rand::rngs::SmallRng;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: DVec2,
    pub velocity: DVec2,
    pub size: f64,
    pub color: Rgba,
}

/// Number of particles for a viewport: one per `area_per_particle` square
/// pixels, rounded up. Zero for a degenerate viewport.
pub fn particle_count(viewport: Viewport, config: &FieldConfig) -> usize {
    (viewport.area() / config.area_per_particle).ceil() as usize
}

/// Scatter a fresh population uniformly over the viewport.
///
/// Each particle keeps a `2 * size` gap from every edge. On an axis too
/// small for that gap the particle starts on the centre line instead.
pub fn spawn_particles(
    viewport: Viewport,
    config: &FieldConfig,
    rng: &mut SmallRng,
) -> Vec<Particle> {
    let count = particle_count(viewport, config);
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        let size = config.particle_size_min + rng.gen::<f64>() * config.particle_size_span;
        let gap = size * 2.0;
        let x = spawn_axis(viewport.width, gap, rng.gen::<f64>());
        let y = spawn_axis(viewport.height, gap, rng.gen::<f64>());
        let speed = config.particle_speed_max;
        let vx = (rng.gen::<f64>() * 2.0 - 1.0) * speed;
        let vy = (rng.gen::<f64>() * 2.0 - 1.0) * speed;
        out.push(Particle {
            position: DVec2::new(x, y),
            velocity: DVec2::new(vx, vy),
            size,
            color: config.particle_color,
        });
    }
    out
}

/// Position along one axis for a unit sample `u`: uniform in
/// `[gap, extent - gap)`, or the middle when that range is empty.
#[inline]
fn spawn_axis(extent: f64, gap: f64, u: f64) -> f64 {
    let span = extent - gap - gap;
    if span > 0.0 {
        u * span + gap
    } else {
        extent * 0.5
    }
}

/// Flip a velocity component when the current position lies outside
/// `[0, extent]`. Uses the pre-step position, so a particle sitting just past
/// the edge may flip on consecutive frames until it drifts back in.
#[inline]
fn reflect_axis(pos: f64, vel: &mut f64, extent: f64) {
    if pos > extent || pos < 0.0 {
        *vel = -*vel;
    }
}

/// Signed nudge along one axis, or 0 when the move would cross the margin.
///
/// A pointer exactly on the particle's coordinate pushes it toward the middle
/// of the surface.
#[inline]
fn repel_axis(pos: f64, pointer: f64, extent: f64, margin: f64, step: f64) -> f64 {
    let dir = if pointer < pos {
        1.0
    } else if pointer > pos {
        -1.0
    } else if pos < extent * 0.5 {
        1.0
    } else {
        -1.0
    };
    if dir > 0.0 && pos < extent - margin {
        step
    } else if dir < 0.0 && pos > margin {
        -step
    } else {
        0.0
    }
}

/// Advance one particle by one frame: reflect, repel, integrate.
pub fn step_particle(p: &mut Particle, viewport: Viewport, pointer: &Pointer, config: &FieldConfig) {
    reflect_axis(p.position.x, &mut p.velocity.x, viewport.width);
    reflect_axis(p.position.y, &mut p.velocity.y, viewport.height);

    if let Some(at) = pointer.position {
        if p.position.distance(at) < pointer.radius + p.size {
            let margin = p.size * config.repulsion_margin_factor;
            let step = config.repulsion_step;
            p.position.x += repel_axis(p.position.x, at.x, viewport.width, margin, step);
            p.position.y += repel_axis(p.position.y, at.y, viewport.height, margin, step);
        }
    }

    p.position += p.velocity;
}

/// Planar mode strategy: owns the particle store and paints particles and
/// their proximity links.
pub struct PlanarField {
    config: FieldConfig,
    store: PointStore<Particle>,
    links: Vec<Link>,
}

impl PlanarField {
    pub fn new(config: FieldConfig) -> Self {
        Self {
            config,
            store: PointStore::new(),
            links: Vec::new(),
        }
    }

    pub fn store(&self) -> &PointStore<Particle> {
        &self.store
    }

    /// Replace the population wholesale, e.g. with a hand-placed layout.
    pub fn set_particles(&mut self, particles: Vec<Particle>) {
        self.store.replace(particles);
    }

    fn paint_links(&mut self, viewport: Viewport, surface: &mut dyn Surface) -> usize {
        let threshold = linker::link_threshold(viewport, self.config.link_divisor);
        self.links.clear();
        linker::collect_links(
            self.store.points(),
            threshold,
            self.config.grid_linker_min_points,
            &mut self.links,
        );
        let cfg = &self.config;
        for link in &self.links {
            let pts = self.store.points();
            let opacity = linker::link_opacity(link.dist_sq, cfg.link_falloff);
            surface.stroke_line(
                pts[link.a].position,
                pts[link.b].position,
                cfg.link_width,
                cfg.link_color.with_alpha(opacity * cfg.link_alpha),
            );
        }
        self.links.len()
    }
}

impl Simulation for PlanarField {
    fn regenerate(&mut self, viewport: Viewport, rng: &mut SmallRng) {
        let fresh = spawn_particles(viewport, &self.config, rng);
        self.store.replace(fresh);
    }

    fn advance_and_paint(&mut self, inputs: &FrameInputs, surface: &mut dyn Surface) -> TickStats {
        let viewport = inputs.viewport;
        let pointer = inputs.pointer;
        let config = &self.config;
        self.store.advance(|p| {
            step_particle(p, viewport, &pointer, config);
            surface.fill_circle(p.position, p.size, p.color);
        });
        let links = self.paint_links(viewport, surface);
        TickStats {
            points: self.store.len(),
            links,
        }
    }

    fn len(&self) -> usize {
        self.store.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn still(x: f64, y: f64, size: f64) -> Particle {
        Particle {
            position: DVec2::new(x, y),
            velocity: DVec2::ZERO,
            size,
            color: Rgba::new([0, 0, 0], 1.0),
        }
    }

    #[test]
    fn count_follows_area() {
        let cfg = FieldConfig::default();
        assert_eq!(particle_count(Viewport::new(900.0, 100.0), &cfg), 10);
        // 1200 * 800 / 9000 = 106.67
        assert_eq!(particle_count(Viewport::new(1200.0, 800.0), &cfg), 107);
        assert_eq!(particle_count(Viewport::new(0.0, 800.0), &cfg), 0);
    }

    #[test]
    fn spawned_particles_respect_ranges() {
        let cfg = FieldConfig::default();
        let vp = Viewport::new(1200.0, 800.0);
        let mut rng = SmallRng::seed_from_u64(7);
        let ps = spawn_particles(vp, &cfg, &mut rng);
        assert_eq!(ps.len(), 107);
        for p in &ps {
            assert!(p.size >= 1.0 && p.size < 4.0);
            assert!(p.position.x >= 2.0 * p.size && p.position.x <= vp.width - 2.0 * p.size);
            assert!(p.position.y >= 2.0 * p.size && p.position.y <= vp.height - 2.0 * p.size);
            assert!(p.velocity.x.abs() <= 1.0 && p.velocity.y.abs() <= 1.0);
            assert_eq!(p.color, cfg.particle_color);
        }
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let cfg = FieldConfig::default();
        let mut rng = SmallRng::seed_from_u64(1);
        let ps = spawn_particles(Viewport::new(3.0, 2.0), &cfg, &mut rng);
        assert_eq!(ps.len(), 1);
        assert!(ps[0].position.is_finite());
    }

    #[test]
    fn narrow_axis_spawns_on_the_centre_line() {
        assert_eq!(spawn_axis(3.0, 6.28, 0.9), 1.5);
        assert_eq!(spawn_axis(12.56, 6.28, 0.3), 6.28);
        assert_eq!(spawn_axis(100.0, 2.0, 0.0), 2.0);
        assert!(spawn_axis(100.0, 2.0, 0.999) < 98.0);
    }

    #[test]
    fn tiny_viewport_particles_stay_inside() {
        let cfg = FieldConfig::default();
        let eps = cfg.particle_speed_max + 1e-9;
        let pointer = Pointer::new(cfg.pointer_radius_initial);
        for seed in 0..20 {
            let mut rng = SmallRng::seed_from_u64(seed);
            for vp in [Viewport::new(3.0, 2.0), Viewport::new(1.0, 40.0), Viewport::new(9.0, 9.0)] {
                let mut ps = spawn_particles(vp, &cfg, &mut rng);
                assert!(!ps.is_empty());
                for _ in 0..500 {
                    for p in ps.iter_mut() {
                        step_particle(p, vp, &pointer, &cfg);
                        assert!(
                            p.position.x >= -eps
                                && p.position.x <= vp.width + eps
                                && p.position.y >= -eps
                                && p.position.y <= vp.height + eps,
                            "escaped {:?} from {:?}",
                            p.position,
                            vp
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn reflection_flips_outside_only() {
        let mut v = 1.0;
        reflect_axis(50.0, &mut v, 100.0);
        assert_eq!(v, 1.0);
        reflect_axis(100.5, &mut v, 100.0);
        assert_eq!(v, -1.0);
        reflect_axis(-0.1, &mut v, 100.0);
        assert_eq!(v, 1.0);
        // exactly on the edge is still inside
        reflect_axis(100.0, &mut v, 100.0);
        assert_eq!(v, 1.0);
    }

    #[test]
    fn pointer_pushes_particle_away() {
        let cfg = FieldConfig::default();
        let vp = Viewport::new(1000.0, 1000.0);
        let mut pointer = Pointer::new(150.0);
        pointer.move_to(480.0, 520.0);
        let mut p = still(500.0, 500.0, 2.0);
        step_particle(&mut p, vp, &pointer, &cfg);
        assert_eq!(p.position, DVec2::new(510.0, 490.0));
    }

    #[test]
    fn pointer_outside_radius_is_ignored() {
        let cfg = FieldConfig::default();
        let vp = Viewport::new(1000.0, 1000.0);
        let mut pointer = Pointer::new(50.0);
        pointer.move_to(100.0, 100.0);
        let mut p = still(500.0, 500.0, 2.0);
        step_particle(&mut p, vp, &pointer, &cfg);
        assert_eq!(p.position, DVec2::new(500.0, 500.0));
    }

    #[test]
    fn repulsion_respects_margin() {
        let cfg = FieldConfig::default();
        let vp = Viewport::new(1000.0, 1000.0);
        let mut pointer = Pointer::new(150.0);
        // pointer left of a particle hugging the right edge: no push past margin
        pointer.move_to(975.0, 500.0);
        let mut p = still(985.0, 500.0, 2.0);
        step_particle(&mut p, vp, &pointer, &cfg);
        assert_eq!(p.position.x, 985.0);
        // tied on y at the centre line, so it moves toward smaller y
        assert_eq!(p.position.y, 490.0);
    }

    #[test]
    fn absent_pointer_only_integrates() {
        let cfg = FieldConfig::default();
        let vp = Viewport::new(1000.0, 1000.0);
        let pointer = Pointer::new(150.0);
        let mut p = still(500.0, 500.0, 2.0);
        p.velocity = DVec2::new(0.5, -0.25);
        step_particle(&mut p, vp, &pointer, &cfg);
        assert_eq!(p.position, DVec2::new(500.5, 499.75));
    }

    #[test]
    fn regenerate_replaces_population() {
        let mut field = PlanarField::new(FieldConfig::default());
        let mut rng = SmallRng::seed_from_u64(3);
        field.regenerate(Viewport::new(300.0, 300.0), &mut rng);
        assert_eq!(field.len(), 10);
        field.regenerate(Viewport::new(0.0, 0.0), &mut rng);
        assert!(field.is_empty());
        assert_eq!(field.store().generation(), 2);
    }
}
