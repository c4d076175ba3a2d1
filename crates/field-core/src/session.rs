//! One render session: the state shared between event handlers and ticks.
//!
//! Event handlers mutate the viewport and pointer between ticks; each tick
//! reads them fresh, clears the surface and lets the mode's simulation
//! advance and paint.

use crate::config::{ConfigError, FieldConfig, Mode};
use crate::planar::PlanarField;
use crate::pointer::Pointer;
use crate::simulation::{FrameInputs, Simulation, TickStats};
use crate::sphere::SphereField;
use crate::surface::Surface;
use crate::viewport::Viewport;
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// The simulation chosen at session start.
pub enum Field {
    Planar(PlanarField),
    Sphere(SphereField),
}

impl Field {
    pub fn new(config: &FieldConfig) -> Self {
        match config.mode {
            Mode::Planar => Field::Planar(PlanarField::new(config.clone())),
            Mode::Sphere => Field::Sphere(SphereField::new(config.clone())),
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            Field::Planar(_) => Mode::Planar,
            Field::Sphere(_) => Mode::Sphere,
        }
    }

    pub fn simulation(&self) -> &dyn Simulation {
        match self {
            Field::Planar(f) => f,
            Field::Sphere(f) => f,
        }
    }

    pub fn simulation_mut(&mut self) -> &mut dyn Simulation {
        match self {
            Field::Planar(f) => f,
            Field::Sphere(f) => f,
        }
    }
}

pub struct RenderSession {
    config: FieldConfig,
    viewport: Viewport,
    pointer: Pointer,
    field: Field,
    rng: SmallRng,
    frames: u64,
}

impl RenderSession {
    /// Start a session seeded from OS entropy.
    pub fn new(config: FieldConfig, viewport: Viewport) -> Result<Self, ConfigError> {
        Self::with_rng(config, viewport, SmallRng::from_entropy())
    }

    /// Start a session with a fixed seed, for reproducible runs.
    pub fn with_seed(config: FieldConfig, viewport: Viewport, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, viewport, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(config: FieldConfig, viewport: Viewport, mut rng: SmallRng) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut field = Field::new(&config);
        field.simulation_mut().regenerate(viewport, &mut rng);
        log::debug!(
            "[session] mode={} points={} viewport={}x{}",
            config.mode,
            field.simulation().len(),
            viewport.width,
            viewport.height
        );
        Ok(Self {
            pointer: Pointer::new(config.pointer_radius_initial),
            config,
            viewport,
            field,
            rng,
            frames: 0,
        })
    }

    /// New surface size: update the viewport and pointer radius and rebuild
    /// the whole population. No simulation state survives except the sphere's
    /// rotation.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport = Viewport::new(width, height);
        let d = self.config.pointer_radius_divisor;
        self.pointer.radius = (height / d) * (width / d);
        self.field
            .simulation_mut()
            .regenerate(self.viewport, &mut self.rng);
        log::debug!(
            "[resize] {}x{} -> {} points",
            width,
            height,
            self.field.simulation().len()
        );
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.pointer.move_to(x, y);
    }

    pub fn pointer_leave(&mut self) {
        self.pointer.leave();
    }

    /// Clear the surface, then advance and paint every point once.
    pub fn tick(&mut self, surface: &mut dyn Surface) -> TickStats {
        surface.clear(self.viewport.width, self.viewport.height);
        let inputs = FrameInputs {
            viewport: self.viewport,
            pointer: self.pointer,
        };
        let stats = self
            .field
            .simulation_mut()
            .advance_and_paint(&inputs, surface);
        self.frames += 1;
        stats
    }

    pub fn mode(&self) -> Mode {
        self.field.mode()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn pointer(&self) -> &Pointer {
        &self.pointer
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut Field {
        &mut self.field
    }

    pub fn point_count(&self) -> usize {
        self.field.simulation().len()
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, RecordingSurface};

    #[test]
    fn invalid_config_is_rejected() {
        let mut cfg = FieldConfig::default();
        cfg.sphere_point_count = 0;
        assert!(RenderSession::with_seed(cfg, Viewport::new(10.0, 10.0), 1).is_err());
    }

    #[test]
    fn resize_updates_pointer_radius() {
        let mut s =
            RenderSession::with_seed(FieldConfig::default(), Viewport::new(1200.0, 800.0), 1)
                .unwrap();
        assert_eq!(s.pointer().radius, 150.0);
        s.resize(1600.0, 800.0);
        assert_eq!(s.pointer().radius, 200.0);
        assert_eq!(s.viewport(), Viewport::new(1600.0, 800.0));
    }

    #[test]
    fn tick_clears_first() {
        let mut s =
            RenderSession::with_seed(FieldConfig::default(), Viewport::new(300.0, 300.0), 1)
                .unwrap();
        let mut surface = RecordingSurface::new();
        let stats = s.tick(&mut surface);
        assert_eq!(
            surface.commands[0],
            DrawCommand::Clear {
                width: 300.0,
                height: 300.0
            }
        );
        assert_eq!(stats.points, 10);
        assert_eq!(surface.circles().count(), 10);
        assert_eq!(s.frame_count(), 1);
    }

    #[test]
    fn mode_follows_config() {
        let s = RenderSession::with_seed(
            FieldConfig::with_mode(Mode::Sphere),
            Viewport::new(300.0, 300.0),
            1,
        )
        .unwrap();
        assert_eq!(s.mode(), Mode::Sphere);
        assert_eq!(s.point_count(), 900);
    }
}
