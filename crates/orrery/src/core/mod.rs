pub mod kepler;
pub mod policy;
pub mod hierarchy;
pub mod system;

pub use hierarchy::BodyGraph;
pub use policy::{DisplayPolicy, DistancePolicy, MoonVisibility, SpinMode};
pub use system::{LoadReport, SystemModel};
