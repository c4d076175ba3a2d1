//! Live collection of simulated points.

/// Ordered sequence of points for one session.
///
/// Regeneration builds a fresh `Vec` and swaps it in whole, so a tick sees
/// either the full previous population or the full new one. Order is stable
/// between regenerations; the linker relies on indices within a frame.
#[derive(Clone, Debug)]
pub struct PointStore<P> {
    points: Vec<P>,
    generation: u64,
}

impl<P> Default for PointStore<P> {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            generation: 0,
        }
    }
}

impl<P> PointStore<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard the current population and install `fresh`.
    pub fn replace(&mut self, fresh: Vec<P>) {
        self.points = fresh;
        self.generation += 1;
    }

    /// Apply one in-place simulation step to every point, in order.
    ///
    /// This is the only mutable access to the points; cumulative effects
    /// such as sphere rotation drift flow through here.
    pub fn advance<F: FnMut(&mut P)>(&mut self, mut step: F) {
        for p in self.points.iter_mut() {
            step(p);
        }
    }

    #[inline]
    pub fn points(&self) -> &[P] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of regenerations so far.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
