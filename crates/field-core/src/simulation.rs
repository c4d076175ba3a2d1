use crate::pointer::Pointer;
use crate::surface::Surface;
use crate::viewport::Viewport;
use rand::rngs::SmallRng;

/// Per-tick inputs, read fresh from the session every frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameInputs {
    pub viewport: Viewport,
    pub pointer: Pointer,
}

/// Counts produced by one advance-and-paint pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickStats {
    pub points: usize,
    pub links: usize,
}

/// A mode-specific point simulation.
///
/// The render session owns exactly one of these for its lifetime and calls
/// `regenerate` on every resize and `advance_and_paint` on every tick.
pub trait Simulation {
    /// Rebuild the population for `viewport`, dropping all previous state
    /// tied to the old points.
    fn regenerate(&mut self, viewport: Viewport, rng: &mut SmallRng);

    /// Step every point once and paint the frame (the surface is already
    /// cleared).
    fn advance_and_paint(&mut self, inputs: &FrameInputs, surface: &mut dyn Surface) -> TickStats;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
