//! Orbital elements and the elliptical orbit geometry derived from them.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::core::policy::DistancePolicy;
use crate::error::ConfigError;

/// Number of polyline segments per orbit (the loop holds one extra closing point).
pub const ORBIT_SEGMENTS: usize = 256;

/// Smallest `1 - e` used when dividing by it.
pub const MIN_ONE_MINUS_E: f64 = 1e-4;

/// Keplerian elements for one body. Fixed for the body's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitalElements {
    /// Semi-major axis (AU).
    pub semi_major_axis_au: f64,
    /// Eccentricity in `[0, 1)`.
    pub eccentricity: f64,
    /// Sidereal period (days). Negative runs the orbit backwards.
    pub period_days: f64,
    /// Tilt of the orbital plane about the ascending-node axis (degrees).
    pub inclination_deg: f64,
    /// Obliquity of the spin axis (degrees).
    pub axial_tilt_deg: f64,
    /// Sidereal rotation period (days). Negative is retrograde, zero is no spin.
    pub rotation_period_days: f64,
}

impl OrbitalElements {
    /// Elements with no inclination, tilt or spin.
    pub fn new(semi_major_axis_au: f64, eccentricity: f64, period_days: f64) -> Self {
        Self {
            semi_major_axis_au,
            eccentricity,
            period_days,
            inclination_deg: 0.0,
            axial_tilt_deg: 0.0,
            rotation_period_days: 0.0,
        }
    }

    pub fn with_inclination(mut self, inclination_deg: f64) -> Self {
        self.inclination_deg = inclination_deg;
        self
    }

    pub fn with_spin(mut self, axial_tilt_deg: f64, rotation_period_days: f64) -> Self {
        self.axial_tilt_deg = axial_tilt_deg;
        self.rotation_period_days = rotation_period_days;
        self
    }

    /// Check the invariants a body needs before it can be constructed.
    pub fn validate(&self, name: &str) -> Result<(), ConfigError> {
        let fields = [
            ("semi-major axis", self.semi_major_axis_au),
            ("eccentricity", self.eccentricity),
            ("period", self.period_days),
            ("inclination", self.inclination_deg),
            ("axial tilt", self.axial_tilt_deg),
            ("rotation period", self.rotation_period_days),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteElement { name: name.to_owned(), field });
            }
        }
        if !(0.0..1.0).contains(&self.eccentricity) {
            return Err(ConfigError::InvalidEccentricity {
                name: name.to_owned(),
                value: self.eccentricity,
            });
        }
        if self.period_days == 0.0 {
            return Err(ConfigError::ZeroPeriod { name: name.to_owned() });
        }
        if self.semi_major_axis_au <= 0.0 {
            return Err(ConfigError::InvalidAxis {
                name: name.to_owned(),
                value: self.semi_major_axis_au,
            });
        }
        Ok(())
    }
}

/// Point on an ellipse at eccentric anomaly `ea`, relative to the focus.
///
/// The flat ellipse lies in the x/z plane with periapsis on +x; it is then
/// rotated about the x axis (the node line) by `inclination_rad`.
pub fn ellipse_point(a: f64, b: f64, e: f64, inclination_rad: f64, ea: f64) -> DVec3 {
    let x = a * (ea.cos() - e);
    let z0 = b * ea.sin();
    DVec3::new(x, z0 * inclination_rad.sin(), z0 * inclination_rad.cos())
}

/// Shape of one orbit in world units, plus its sampled polyline.
///
/// `raw_semi_major` comes straight from the elements and the distance policy;
/// the effective axes may be enlarged by the layout engine.
#[derive(Debug, Clone)]
pub struct OrbitGeometry {
    eccentricity: f64,
    inclination_rad: f64,
    raw_semi_major: f64,
    semi_major: f64,
    semi_minor: f64,
    polyline: Vec<DVec3>,
}

impl OrbitGeometry {
    pub fn new(elements: &OrbitalElements, distance: DistancePolicy) -> Self {
        let mut geometry = Self {
            eccentricity: elements.eccentricity,
            inclination_rad: elements.inclination_deg.to_radians(),
            raw_semi_major: 0.0,
            semi_major: 0.0,
            semi_minor: 0.0,
            polyline: Vec::with_capacity(ORBIT_SEGMENTS + 1),
        };
        geometry.rebuild(elements, distance);
        geometry
    }

    /// Recompute the raw axis for a new distance policy. Effective axes
    /// return to the raw value; layout must run again afterwards.
    pub fn rebuild(&mut self, elements: &OrbitalElements, distance: DistancePolicy) {
        self.eccentricity = elements.eccentricity;
        self.inclination_rad = elements.inclination_deg.to_radians();
        self.raw_semi_major = distance.to_world(elements.semi_major_axis_au);
        self.set_semi_major(self.raw_semi_major);
    }

    /// Drop any layout adjustment.
    pub fn reset(&mut self) {
        if self.semi_major != self.raw_semi_major {
            self.set_semi_major(self.raw_semi_major);
        }
    }

    /// Set the effective semi-major axis and rebuild the curve.
    pub fn set_semi_major(&mut self, semi_major: f64) {
        self.semi_major = semi_major;
        self.semi_minor = semi_major * (1.0 - self.eccentricity * self.eccentricity).sqrt();
        self.rebuild_polyline();
    }

    fn rebuild_polyline(&mut self) {
        self.polyline.clear();
        for i in 0..=ORBIT_SEGMENTS {
            let t = i as f64 / ORBIT_SEGMENTS as f64;
            let ea = t * std::f64::consts::TAU;
            self.polyline.push(self.point_at(ea));
        }
    }

    /// Parent-relative position at eccentric anomaly `ea`.
    pub fn point_at(&self, ea: f64) -> DVec3 {
        ellipse_point(self.semi_major, self.semi_minor, self.eccentricity, self.inclination_rad, ea)
    }

    /// Closest approach to the parent, in world units.
    pub fn periapsis(&self) -> f64 {
        self.semi_major * (1.0 - self.eccentricity)
    }

    /// `1 - e`, clamped away from zero for divisions.
    pub fn periapsis_factor(&self) -> f64 {
        (1.0 - self.eccentricity).max(MIN_ONE_MINUS_E)
    }

    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    pub fn raw_semi_major(&self) -> f64 {
        self.raw_semi_major
    }

    pub fn semi_major(&self) -> f64 {
        self.semi_major
    }

    pub fn semi_minor(&self) -> f64 {
        self.semi_minor
    }

    /// Closed loop of `ORBIT_SEGMENTS + 1` parent-local points.
    pub fn polyline(&self) -> &[DVec3] {
        &self.polyline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn earth() -> OrbitalElements {
        OrbitalElements::new(1.0, 0.0167, 365.256)
    }

    #[test]
    fn axes_follow_distance_policy() {
        let g = OrbitGeometry::new(&earth(), DistancePolicy::default());
        assert!((g.semi_major() - 8.0).abs() < 1e-12);
        let expected_b = 8.0 * (1.0 - 0.0167_f64 * 0.0167).sqrt();
        assert!((g.semi_minor() - expected_b).abs() < 1e-12);
    }

    #[test]
    fn polyline_is_closed() {
        let elements = OrbitalElements::new(1.523679, 0.0934, 686.971).with_inclination(1.85);
        let g = OrbitGeometry::new(&elements, DistancePolicy::compressed());
        let pts = g.polyline();
        assert_eq!(pts.len(), ORBIT_SEGMENTS + 1);
        let first = pts[0];
        let last = pts[pts.len() - 1];
        assert!(first.distance(last) < 1e-9, "first={first} last={last}");
    }

    #[test]
    fn first_sample_is_periapsis() {
        let g = OrbitGeometry::new(&earth(), DistancePolicy::default());
        let p = g.polyline()[0];
        assert!((p.x - g.periapsis()).abs() < 1e-12);
        assert!(p.y.abs() < 1e-12 && p.z.abs() < 1e-12);
    }

    #[test]
    fn inclination_rotates_about_node_line() {
        let elements = OrbitalElements::new(1.0, 0.0, 1.0).with_inclination(90.0);
        let g = OrbitGeometry::new(&elements, DistancePolicy::default());
        // Quarter turn: flat z0 = b becomes pure +y
        let p = g.point_at(std::f64::consts::FRAC_PI_2);
        assert!(p.x.abs() < 1e-9);
        assert!((p.y - 8.0).abs() < 1e-9);
        assert!(p.z.abs() < 1e-9);
    }

    #[test]
    fn enlarging_axis_rebuilds_curve() {
        let mut g = OrbitGeometry::new(&earth(), DistancePolicy::default());
        g.set_semi_major(20.0);
        assert!((g.polyline()[0].x - 20.0 * (1.0 - 0.0167)).abs() < 1e-9);
        g.reset();
        assert!((g.semi_major() - g.raw_semi_major()).abs() < 1e-12);
    }

    #[test]
    fn validation_rejects_open_and_static_orbits() {
        assert!(earth().validate("Earth").is_ok());
        let open = OrbitalElements::new(1.0, 1.0, 10.0);
        assert!(matches!(open.validate("x"), Err(ConfigError::InvalidEccentricity { .. })));
        let negative = OrbitalElements::new(1.0, -0.1, 10.0);
        assert!(matches!(negative.validate("x"), Err(ConfigError::InvalidEccentricity { .. })));
        let frozen = OrbitalElements::new(1.0, 0.1, 0.0);
        assert!(matches!(frozen.validate("x"), Err(ConfigError::ZeroPeriod { .. })));
        let collapsed = OrbitalElements::new(0.0, 0.1, 3.0);
        assert!(matches!(collapsed.validate("x"), Err(ConfigError::InvalidAxis { .. })));
        let nan = OrbitalElements::new(1.0, 0.1, 3.0).with_inclination(f64::NAN);
        assert!(matches!(nan.validate("x"), Err(ConfigError::NonFiniteElement { .. })));
    }

    #[test]
    fn negative_period_is_allowed() {
        let triton = OrbitalElements::new(0.002371, 0.000016, -5.877);
        assert!(triton.validate("Triton").is_ok());
    }
}
