/// Flat ring system attached to a body (e.g., Saturn's rings).
///
/// Nominal radii are in world units. The effective radii shrink so the ring
/// stays inside the periapsis of the body's innermost visible satellite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring {
    nominal_inner: f64,
    nominal_outer: f64,
    inner: f64,
    outer: f64,
}

/// Ring outer edge as a fraction of the innermost satellite's periapsis.
pub const RING_PERIAPSIS_FRACTION: f64 = 0.70;
/// Ring inner edge as a fraction of the (possibly shrunk) outer edge.
pub const RING_INNER_FRACTION: f64 = 0.75;

impl Ring {
    pub fn new(nominal_inner: f64, nominal_outer: f64) -> Self {
        Self {
            nominal_inner,
            nominal_outer,
            inner: nominal_inner,
            outer: nominal_outer,
        }
    }

    /// Resize against the innermost visible satellite periapsis, or restore
    /// nominal radii when there is none.
    pub fn fit_inside(&mut self, innermost_periapsis: Option<f64>) {
        match innermost_periapsis {
            Some(periapsis) => {
                self.outer = self.nominal_outer.min(periapsis * RING_PERIAPSIS_FRACTION);
                self.inner = self.nominal_inner.min(self.outer * RING_INNER_FRACTION);
            }
            None => {
                self.inner = self.nominal_inner;
                self.outer = self.nominal_outer;
            }
        }
    }

    pub fn inner(&self) -> f64 {
        self.inner
    }

    pub fn outer(&self) -> f64 {
        self.outer
    }

    pub fn nominal_inner(&self) -> f64 {
        self.nominal_inner
    }

    pub fn nominal_outer(&self) -> f64 {
        self.nominal_outer
    }
}
