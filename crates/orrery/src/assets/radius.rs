//! Physical-to-visual radius mapping.
//!
//! True-to-scale bodies would be sub-pixel next to their orbits, so render
//! radii come from a legibility-driven mapping. The mapping is a seam: hosts
//! can plug in their own through
//! [`SystemModel::with_radius_mapping`](crate::core::system::SystemModel::with_radius_mapping).

/// What kind of body a radius is being mapped for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Star,
    Planet,
    Moon,
}

/// Maps a physical radius (km) to a render-space radius.
pub trait RadiusMapping {
    fn visual_radius(&self, kind: BodyKind, radius_km: f64) -> f64;
}

/// Earth's mean radius (km).
pub const EARTH_RADIUS_KM: f64 = 6371.0;
/// The Moon's mean radius (km).
pub const LUNAR_RADIUS_KM: f64 = 1737.4;

/// Power-law mapping: `base * (r / reference)^exponent`, clamped per kind.
///
/// Defaults put Earth at 0.6, the Moon at 0.25 and the star at 2.0 world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegibleRadius {
    pub star_radius: f64,
    pub planet_base: f64,
    pub moon_base: f64,
    pub exponent: f64,
    pub planet_range: (f64, f64),
    pub moon_range: (f64, f64),
}

impl Default for LegibleRadius {
    fn default() -> Self {
        Self {
            star_radius: 2.0,
            planet_base: 0.6,
            moon_base: 0.25,
            exponent: 0.35,
            planet_range: (0.25, 1.6),
            moon_range: (0.08, 0.4),
        }
    }
}

impl LegibleRadius {
    fn scaled(&self, base: f64, reference_km: f64, radius_km: f64, range: (f64, f64)) -> f64 {
        if radius_km <= 0.0 {
            return base;
        }
        (base * (radius_km / reference_km).powf(self.exponent)).clamp(range.0, range.1)
    }
}

impl RadiusMapping for LegibleRadius {
    fn visual_radius(&self, kind: BodyKind, radius_km: f64) -> f64 {
        match kind {
            BodyKind::Star => self.star_radius,
            BodyKind::Planet => self.scaled(self.planet_base, EARTH_RADIUS_KM, radius_km, self.planet_range),
            BodyKind::Moon => self.scaled(self.moon_base, LUNAR_RADIUS_KM, radius_km, self.moon_range),
        }
    }
}
