use crate::constants::*;
use crate::surface::Rgba;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("unknown mode `{0}` (expected `planar` or `sphere`)")]
    UnknownMode(String),
    #[error("area per particle must be positive, got {0}")]
    NonPositiveDensity(f64),
    #[error("sphere needs at least 2 points, got {0}")]
    TooFewSpherePoints(usize),
    #[error("perspective offset must be positive, got {0}")]
    NonPositivePerspective(f64),
    #[error("link divisor must be positive, got {0}")]
    NonPositiveLinkDivisor(f64),
    #[error("sphere radius factor must be positive, got {0}")]
    NonPositiveRadiusFactor(f64),
    #[error("link falloff must be positive, got {0}")]
    NonPositiveLinkFalloff(f64),
    #[error("rotation easing must be in (0, 1], got {0}")]
    EasingOutOfRange(f64),
}

/// Which simulation runs for the lifetime of a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Planar,
    Sphere,
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "planar" | "particles" => Ok(Mode::Planar),
            "sphere" | "globe" => Ok(Mode::Sphere),
            _ => Err(ConfigError::UnknownMode(s.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Planar => "planar",
            Mode::Sphere => "sphere",
        })
    }
}

/// Every tunable of both simulations. Defaults reproduce the page effect.
#[derive(Clone, Debug)]
pub struct FieldConfig {
    pub mode: Mode,

    pub area_per_particle: f64,
    pub particle_size_min: f64,
    pub particle_size_span: f64,
    pub particle_speed_max: f64,
    pub particle_color: Rgba,

    pub pointer_radius_initial: f64,
    pub pointer_radius_divisor: f64,
    pub repulsion_step: f64,
    pub repulsion_margin_factor: f64,

    pub link_divisor: f64,
    pub link_falloff: f64,
    pub link_alpha: f64,
    pub link_width: f64,
    pub link_color: Rgba,
    pub grid_linker_min_points: usize,

    pub sphere_point_count: usize,
    pub sphere_radius_factor: f64,
    pub rotation_easing: f64,
    pub auto_rotation_step: f64,
    pub pointer_rotation_gain: f64,
    pub perspective_offset: f64,
    pub dot_color: Rgba,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Planar,
            area_per_particle: AREA_PER_PARTICLE,
            particle_size_min: PARTICLE_SIZE_MIN,
            particle_size_span: PARTICLE_SIZE_SPAN,
            particle_speed_max: PARTICLE_SPEED_MAX,
            particle_color: Rgba::new(INK_RGB, PARTICLE_ALPHA),
            pointer_radius_initial: POINTER_RADIUS_INITIAL,
            pointer_radius_divisor: POINTER_RADIUS_DIVISOR,
            repulsion_step: REPULSION_STEP,
            repulsion_margin_factor: REPULSION_MARGIN_FACTOR,
            link_divisor: LINK_DIVISOR,
            link_falloff: LINK_FALLOFF,
            link_alpha: LINK_ALPHA,
            link_width: LINK_WIDTH,
            link_color: Rgba::new(INK_RGB, 1.0),
            grid_linker_min_points: GRID_LINKER_MIN_POINTS,
            sphere_point_count: SPHERE_POINT_COUNT,
            sphere_radius_factor: SPHERE_RADIUS_FACTOR,
            rotation_easing: ROTATION_EASING,
            auto_rotation_step: AUTO_ROTATION_STEP,
            pointer_rotation_gain: POINTER_ROTATION_GAIN,
            perspective_offset: PERSPECTIVE_OFFSET,
            dot_color: Rgba::new(INK_RGB, 1.0),
        }
    }
}

impl FieldConfig {
    pub fn with_mode(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Reject values that would break the division and projection invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !positive(self.area_per_particle) {
            return Err(ConfigError::NonPositiveDensity(self.area_per_particle));
        }
        if self.sphere_point_count < 2 {
            return Err(ConfigError::TooFewSpherePoints(self.sphere_point_count));
        }
        // z >= -radius, so width + z + radius + offset stays >= width + offset > 0
        // as long as the radius itself is positive
        if !positive(self.sphere_radius_factor) {
            return Err(ConfigError::NonPositiveRadiusFactor(self.sphere_radius_factor));
        }
        if !positive(self.perspective_offset) {
            return Err(ConfigError::NonPositivePerspective(self.perspective_offset));
        }
        if !positive(self.link_divisor) {
            return Err(ConfigError::NonPositiveLinkDivisor(self.link_divisor));
        }
        if !positive(self.link_falloff) {
            return Err(ConfigError::NonPositiveLinkFalloff(self.link_falloff));
        }
        if !(positive(self.rotation_easing) && self.rotation_easing <= 1.0) {
            return Err(ConfigError::EasingOutOfRange(self.rotation_easing));
        }
        Ok(())
    }
}

// NaN fails this too
#[inline]
fn positive(v: f64) -> bool {
    v > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parses_aliases_case_insensitively() {
        assert_eq!("planar".parse::<Mode>(), Ok(Mode::Planar));
        assert_eq!(" Particles ".parse::<Mode>(), Ok(Mode::Planar));
        assert_eq!("SPHERE".parse::<Mode>(), Ok(Mode::Sphere));
        assert_eq!("globe".parse::<Mode>(), Ok(Mode::Sphere));
        assert_eq!(
            "cube".parse::<Mode>(),
            Err(ConfigError::UnknownMode("cube".into()))
        );
    }

    #[test]
    fn mode_display_round_trips() {
        for m in [Mode::Planar, Mode::Sphere] {
            assert_eq!(m.to_string().parse::<Mode>(), Ok(m));
        }
    }

    #[test]
    fn default_config_is_valid() {
        assert!(FieldConfig::default().validate().is_ok());
        assert_eq!(FieldConfig::with_mode(Mode::Sphere).mode, Mode::Sphere);
    }

    #[test]
    fn validate_rejects_broken_values() {
        let mut c = FieldConfig::default();
        c.sphere_point_count = 1;
        assert_eq!(c.validate(), Err(ConfigError::TooFewSpherePoints(1)));

        let mut c = FieldConfig::default();
        c.perspective_offset = 0.0;
        assert!(matches!(
            c.validate(),
            Err(ConfigError::NonPositivePerspective(_))
        ));

        let mut c = FieldConfig::default();
        c.area_per_particle = f64::NAN;
        assert!(matches!(c.validate(), Err(ConfigError::NonPositiveDensity(_))));
    }

    #[test]
    fn validate_rejects_values_that_break_projection_or_opacity() {
        let mut c = FieldConfig::default();
        c.sphere_radius_factor = -2.0;
        assert_eq!(c.validate(), Err(ConfigError::NonPositiveRadiusFactor(-2.0)));

        let mut c = FieldConfig::default();
        c.link_falloff = 0.0;
        assert_eq!(c.validate(), Err(ConfigError::NonPositiveLinkFalloff(0.0)));

        for easing in [0.0, -0.1, 1.5] {
            let mut c = FieldConfig::default();
            c.rotation_easing = easing;
            assert_eq!(c.validate(), Err(ConfigError::EasingOutOfRange(easing)));
        }
        let mut c = FieldConfig::default();
        c.rotation_easing = f64::NAN;
        assert!(matches!(c.validate(), Err(ConfigError::EasingOutOfRange(_))));

        // full step is still a valid easing
        let mut c = FieldConfig::default();
        c.rotation_easing = 1.0;
        assert!(c.validate().is_ok());
    }

    #[test]
    fn rejected_sphere_config_never_builds_a_session() {
        use crate::session::RenderSession;
        use crate::viewport::Viewport;
        let mut c = FieldConfig::with_mode(Mode::Sphere);
        c.sphere_radius_factor = -2.0;
        c.link_falloff = 0.0;
        assert!(RenderSession::with_seed(c, Viewport::new(1200.0, 800.0), 1).is_err());
    }
}
