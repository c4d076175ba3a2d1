//! Platform-free core of the ambient point field.
//!
//! Holds the point simulations (planar particle field and rotating point
//! sphere), the proximity linker, the render session that owns viewport and
//! pointer state, and the ports the front-end implements: [`Surface`] for
//! drawing and [`FrameScheduler`] for frame pacing.

pub mod config;
pub mod constants;
pub mod linker;
pub mod planar;
pub mod pointer;
pub mod scheduler;
pub mod session;
pub mod simulation;
pub mod sphere;
pub mod store;
pub mod surface;
pub mod viewport;

pub use config::{ConfigError, FieldConfig, Mode};
pub use constants::*;
pub use planar::{Particle, PlanarField};
pub use pointer::Pointer;
pub use scheduler::{FrameScheduler, LoopState, ManualScheduler, RenderLoop};
pub use session::{Field, RenderSession};
pub use simulation::{FrameInputs, Simulation, TickStats};
pub use sphere::{RotationState, SphereDot, SphereField};
pub use store::PointStore;
pub use surface::{DrawCommand, RecordingSurface, Rgba, Surface};
pub use viewport::Viewport;
