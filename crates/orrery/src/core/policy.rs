//! Display policy: the global toggles that shape geometry and layout.
//!
//! Passed explicitly into geometry and layout recomputation. Changing a field
//! through [`SystemModel`](crate::core::system::SystemModel) triggers the
//! rebuild; nothing reads this mid-update.

use serde::{Deserialize, Serialize};

/// World units per astronomical unit.
pub const DEFAULT_DISTANCE_UNIT: f64 = 8.0;
/// Power-law exponent used when distance compression is enabled.
pub const DEFAULT_COMPRESSION_EXPONENT: f64 = 0.6;

/// How body spin angles advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpinMode {
    /// Spin tracks simulated time, so it follows the time-scale control.
    #[default]
    Realistic,
    /// Spin advances at a fixed real-time rate regardless of time scale.
    Smooth,
}

/// How satellites are sized and whether they take part in layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoonVisibility {
    /// Legibility-driven size from the radius mapping.
    #[default]
    Exaggerated,
    /// True size ratio relative to the parent's visual radius.
    Realistic,
    /// Not drawn; excluded from clearance and separation.
    Hidden,
}

impl MoonVisibility {
    /// Next mode in the exaggerated → realistic → hidden cycle.
    pub fn next(self) -> Self {
        match self {
            Self::Exaggerated => Self::Realistic,
            Self::Realistic => Self::Hidden,
            Self::Hidden => Self::Exaggerated,
        }
    }

    pub fn is_visible(self) -> bool {
        self != Self::Hidden
    }
}

/// Distance mapping from AU to world units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistancePolicy {
    /// Apply the power-law compression.
    pub compress: bool,
    /// Compression exponent γ ∈ (0, 1]. γ = 1 is linear.
    pub exponent: f64,
    /// World units per AU.
    pub unit: f64,
}

impl Default for DistancePolicy {
    fn default() -> Self {
        Self {
            compress: false,
            exponent: DEFAULT_COMPRESSION_EXPONENT,
            unit: DEFAULT_DISTANCE_UNIT,
        }
    }
}

impl DistancePolicy {
    /// Compressed layout with the default exponent.
    pub fn compressed() -> Self {
        Self { compress: true, ..Self::default() }
    }

    /// Map a semi-major axis in AU to world units.
    pub fn to_world(self, a_au: f64) -> f64 {
        let a = if self.compress {
            a_au.powf(self.exponent.clamp(f64::EPSILON, 1.0))
        } else {
            a_au
        };
        a * self.unit
    }
}

/// All display toggles in one value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayPolicy {
    pub distance: DistancePolicy,
    pub moons: MoonVisibility,
    pub spin: SpinMode,
    /// Whether renderers should draw orbit polylines.
    pub show_orbits: bool,
}

impl Default for DisplayPolicy {
    fn default() -> Self {
        Self {
            distance: DistancePolicy::default(),
            moons: MoonVisibility::default(),
            spin: SpinMode::default(),
            show_orbits: true,
        }
    }
}

impl DisplayPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_distance(mut self, distance: DistancePolicy) -> Self {
        self.distance = distance;
        self
    }

    pub fn with_moons(mut self, moons: MoonVisibility) -> Self {
        self.moons = moons;
        self
    }

    pub fn with_spin(mut self, spin: SpinMode) -> Self {
        self.spin = spin;
        self
    }
}
