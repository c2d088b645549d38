//! System description: the body hierarchy a model is (re)configured from.
//! Loaded from JSON at runtime, or taken from the built-in solar system.

use serde::{Deserialize, Serialize};

use crate::components::orbit::OrbitalElements;
use crate::error::ConfigError;

/// Complete star → planets → moons description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemDescription {
    pub star: StarDescriptor,
    /// Top-level bodies orbiting the star.
    #[serde(default)]
    pub planets: Vec<PlanetDescriptor>,
    /// Satellites; each names its parent planet.
    #[serde(default)]
    pub moons: Vec<MoonDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarDescriptor {
    pub name: String,
    /// Physical radius (km), for the visual-radius mapping.
    #[serde(default)]
    pub radius_km: f64,
    #[serde(default)]
    pub spin_tilt_deg: f64,
    /// Rotation period (days). Zero means no spin.
    #[serde(default)]
    pub rotation_days: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetDescriptor {
    pub name: String,
    /// 1-based rank from the star.
    pub index: u32,
    /// Semi-major axis (AU).
    pub a_au: f64,
    /// Eccentricity.
    pub e: f64,
    pub period_days: f64,
    #[serde(default)]
    pub radius_km: f64,
    #[serde(default)]
    pub inclination_deg: f64,
    #[serde(default)]
    pub spin_tilt_deg: f64,
    /// Rotation period (days). Negative is retrograde.
    #[serde(default)]
    pub rotation_days: f64,
    #[serde(default)]
    pub ring: Option<RingDescriptor>,
}

/// Ring radii as multiples of the owning body's visual radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RingDescriptor {
    pub inner: f64,
    pub outer: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoonDescriptor {
    pub name: String,
    /// Name of the parent planet.
    pub parent: String,
    pub a_au: f64,
    pub e: f64,
    pub period_days: f64,
    #[serde(default)]
    pub radius_km: f64,
    #[serde(default)]
    pub inclination_deg: f64,
}

impl PlanetDescriptor {
    pub fn elements(&self) -> OrbitalElements {
        OrbitalElements::new(self.a_au, self.e, self.period_days)
            .with_inclination(self.inclination_deg)
            .with_spin(self.spin_tilt_deg, self.rotation_days)
    }
}

impl MoonDescriptor {
    pub fn elements(&self) -> OrbitalElements {
        OrbitalElements::new(self.a_au, self.e, self.period_days).with_inclination(self.inclination_deg)
    }
}

impl SystemDescription {
    /// Parse a description from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(ConfigError::Parse)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(ConfigError::Parse)
    }

    /// The eight planets and a selection of their moons.
    pub fn solar_system() -> Self {
        Self {
            star: StarDescriptor {
                name: "Sun".into(),
                radius_km: 695_700.0,
                spin_tilt_deg: 7.25,
                rotation_days: 25.38,
            },
            planets: vec![
                planet("Mercury", 1, 0.387098, 0.2056, 87.969, 2_439.7, 7.00, 0.03, 58.646),
                planet("Venus", 2, 0.723332, 0.0067, 224.701, 6_051.8, 3.39, 177.4, -243.025),
                planet("Earth", 3, 1.000000, 0.0167, 365.256, 6_371.0, 0.00, 23.44, 0.99727),
                planet("Mars", 4, 1.523679, 0.0934, 686.971, 3_389.5, 1.85, 25.19, 1.02596),
                planet("Jupiter", 5, 5.2044, 0.0489, 4_332.59, 69_911.0, 1.30, 3.13, 0.41354),
                PlanetDescriptor {
                    ring: Some(RingDescriptor { inner: 1.3, outer: 2.3 }),
                    ..planet("Saturn", 6, 9.5826, 0.0565, 10_759.22, 58_232.0, 2.49, 26.73, 0.44401)
                },
                planet("Uranus", 7, 19.2184, 0.046, 30_688.5, 25_362.0, 0.77, 97.77, -0.71833),
                planet("Neptune", 8, 30.1104, 0.0097, 60_182.0, 24_622.0, 1.77, 28.32, 0.67125),
            ],
            moons: vec![
                moon("Moon", "Earth", 0.00257, 0.0549, 27.3217, 1_737.4, 5.145),
                moon("Phobos", "Mars", 0.0000627, 0.0151, 0.31891, 11.27, 1.093),
                moon("Deimos", "Mars", 0.0001568, 0.00033, 1.263, 6.2, 0.93),
                moon("Io", "Jupiter", 0.002819, 0.0041, 1.769, 1_821.6, 0.05),
                moon("Europa", "Jupiter", 0.004486, 0.009, 3.551, 1_560.8, 0.47),
                moon("Ganymede", "Jupiter", 0.007155, 0.0013, 7.155, 2_634.1, 0.20),
                moon("Callisto", "Jupiter", 0.012585, 0.0074, 16.689, 2_410.3, 0.19),
                moon("Titan", "Saturn", 0.008168, 0.0288, 15.945, 2_574.7, 0.34),
                moon("Triton", "Neptune", 0.002371, 0.000016, 5.877, 1_353.4, 156.9),
            ],
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn planet(
    name: &str,
    index: u32,
    a_au: f64,
    e: f64,
    period_days: f64,
    radius_km: f64,
    inclination_deg: f64,
    spin_tilt_deg: f64,
    rotation_days: f64,
) -> PlanetDescriptor {
    PlanetDescriptor {
        name: name.into(),
        index,
        a_au,
        e,
        period_days,
        radius_km,
        inclination_deg,
        spin_tilt_deg,
        rotation_days,
        ring: None,
    }
}

fn moon(
    name: &str,
    parent: &str,
    a_au: f64,
    e: f64,
    period_days: f64,
    radius_km: f64,
    inclination_deg: f64,
) -> MoonDescriptor {
    MoonDescriptor {
        name: name.into(),
        parent: parent.into(),
        a_au,
        e,
        period_days,
        radius_km,
        inclination_deg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solar_system_is_valid() {
        let desc = SystemDescription::solar_system();
        assert_eq!(desc.planets.len(), 8);
        for p in &desc.planets {
            assert!(p.elements().validate(&p.name).is_ok(), "{}", p.name);
        }
        for m in &desc.moons {
            assert!(m.elements().validate(&m.name).is_ok(), "{}", m.name);
            assert!(desc.planets.iter().any(|p| p.name == m.parent), "moon {} has invalid parent", m.name);
        }
    }

    #[test]
    fn ranks_are_one_based_and_ordered() {
        let desc = SystemDescription::solar_system();
        for (i, p) in desc.planets.iter().enumerate() {
            assert_eq!(p.index as usize, i + 1);
        }
    }

    #[test]
    fn parse_minimal_description() {
        let json = r#"{
            "star": { "name": "Sol" },
            "planets": [
                { "name": "Earth", "index": 3, "a_au": 1.0, "e": 0.0167, "period_days": 365.256 }
            ],
            "moons": [
                { "name": "Moon", "parent": "Earth", "a_au": 0.00257, "e": 0.0549, "period_days": 27.3217 }
            ]
        }"#;
        let desc = SystemDescription::from_json(json).unwrap();
        assert_eq!(desc.star.name, "Sol");
        assert_eq!(desc.star.rotation_days, 0.0);
        assert_eq!(desc.planets[0].inclination_deg, 0.0);
        assert!(desc.planets[0].ring.is_none());
        assert_eq!(desc.moons[0].parent, "Earth");
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = SystemDescription::from_json(r#"{ "planets": [] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.body_name().is_none());
    }

    #[test]
    fn json_round_trip_keeps_rings() {
        let desc = SystemDescription::solar_system();
        let back = SystemDescription::from_json(&desc.to_json().unwrap()).unwrap();
        let saturn = back.planets.iter().find(|p| p.name == "Saturn").unwrap();
        let ring = saturn.ring.unwrap();
        assert!((ring.inner - 1.3).abs() < 1e-12 && (ring.outer - 2.3).abs() < 1e-12);
        assert_eq!(back.moons.len(), desc.moons.len());
    }
}
