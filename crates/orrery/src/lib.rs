pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod input;
pub mod assets;
pub mod error;

// Re-export key types at crate root for convenience
pub use api::types::{BodyId, BodyInstance, FeedEntry, TimeInfo};
pub use core::system::{SystemModel, LoadReport};
pub use core::policy::{DisplayPolicy, DistancePolicy, MoonVisibility, SpinMode};
pub use core::hierarchy::BodyGraph;
pub use core::kepler::solve_kepler;
pub use components::orbit::{OrbitalElements, OrbitGeometry};
pub use components::body::{CelestialBody, Star, Spin};
pub use components::ring::Ring;
pub use systems::layout::OrbitLayoutEngine;
pub use input::queue::{ControlEvent, ControlQueue};
pub use assets::description::{SystemDescription, StarDescriptor, PlanetDescriptor, MoonDescriptor, RingDescriptor};
pub use assets::radius::{RadiusMapping, LegibleRadius, BodyKind};
pub use error::ConfigError;
