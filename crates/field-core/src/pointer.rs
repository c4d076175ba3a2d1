use glam::DVec2;

/// Last known pointer position in surface pixels, plus the repulsion radius.
///
/// `position` is `None` before the first move and after the pointer leaves
/// the surface; every consumer must treat that as "no pointer".
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pointer {
    pub position: Option<DVec2>,
    pub radius: f64,
}

impl Pointer {
    pub fn new(radius: f64) -> Self {
        Self {
            position: None,
            radius,
        }
    }

    #[inline]
    pub fn move_to(&mut self, x: f64, y: f64) {
        self.position = if x.is_finite() && y.is_finite() {
            Some(DVec2::new(x, y))
        } else {
            None
        };
    }

    #[inline]
    pub fn leave(&mut self) {
        self.position = None;
    }

    #[inline]
    pub fn is_present(&self) -> bool {
        self.position.is_some()
    }
}
