//! Kepler's equation, pure math with no state.
//!
//! Uses f64 throughout. Only the render snapshot narrows to f32.

use std::f64::consts::PI;

/// Newton-Raphson iteration cap.
pub const MAX_ITERATIONS: usize = 8;
/// Stop once a Newton step is smaller than this (radians).
pub const TOLERANCE: f64 = 1e-6;

/// Reduce an angle into `(-π, π]`.
pub fn wrap_angle(angle: f64) -> f64 {
    angle.sin().atan2(angle.cos())
}

/// Solve Kepler's equation: E - e·sin(E) = M
///
/// `mean_anomaly` in radians, already wrapped with [`wrap_angle`];
/// `eccentricity` in `[0, 1)`. Returns the eccentric anomaly in radians.
/// Always returns a value; accuracy degrades gracefully as e → 1.
pub fn solve_kepler(mean_anomaly: f64, eccentricity: f64) -> f64 {
    let m = mean_anomaly;
    let e = eccentricity;
    // Third-order starter
    let mut ea = m + e * m.sin() * (1.0 + e * m.cos());
    for _ in 0..MAX_ITERATIONS {
        let delta = ea - e * ea.sin() - m;
        let derivative = 1.0 - e * ea.cos();
        let step = delta / derivative;
        ea -= step;
        if step.abs() < TOLERANCE {
            break;
        }
    }
    ea
}

/// Mean anomaly at `days` for a body with the given period, wrapped.
/// A negative period runs the orbit backwards.
pub fn mean_anomaly(days: f64, period_days: f64) -> f64 {
    let n = 2.0 * PI / period_days;
    wrap_angle(n * days)
}
