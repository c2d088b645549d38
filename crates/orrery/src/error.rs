//! Configuration error types.

/// Reasons a body description is rejected while (re)configuring a system.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Eccentricity outside `[0, 1)`; open orbits are not supported.
    #[error("{name}: eccentricity {value} is outside [0, 1)")]
    InvalidEccentricity { name: String, value: f64 },

    /// An orbital period of zero days has no mean motion.
    #[error("{name}: orbital period must be non-zero")]
    ZeroPeriod { name: String },

    /// Semi-major axis is not a positive finite distance.
    #[error("{name}: semi-major axis {value} AU must be positive")]
    InvalidAxis { name: String, value: f64 },

    /// NaN or infinite value in an orbital element.
    #[error("{name}: {field} is not finite")]
    NonFiniteElement { name: String, field: &'static str },

    /// Satellite references a parent that is not a registered top-level body.
    #[error("{name}: unknown parent '{parent}'")]
    UnknownParent { name: String, parent: String },

    /// Two bodies share a name, which would make parent lookup ambiguous.
    #[error("{name}: duplicate body name")]
    DuplicateName { name: String },

    /// Failed to parse the JSON description.
    #[error("failed to parse system description: {0}")]
    Parse(#[source] serde_json::Error),
}

impl ConfigError {
    /// Name of the offending body, if the error concerns a single entry.
    pub fn body_name(&self) -> Option<&str> {
        match self {
            Self::InvalidEccentricity { name, .. }
            | Self::ZeroPeriod { name }
            | Self::InvalidAxis { name, .. }
            | Self::NonFiniteElement { name, .. }
            | Self::UnknownParent { name, .. }
            | Self::DuplicateName { name } => Some(name),
            Self::Parse(_) => None,
        }
    }
}
