//! Error Types
//!
//! Configuration failures are rejected before any state is built; invariant
//! violations surface from a tick that computed a coordinate outside the torus.

use thiserror::Error;

/// Grid axis, used when reporting out-of-range coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

/// Invalid simulation or species configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("width must be greater than zero")]
    ZeroWidth,
    #[error("height must be greater than zero")]
    ZeroHeight,
    #[error("agent count must be greater than zero")]
    NoAgents,
    #[error("species catalog is empty")]
    EmptyCatalog,
    #[error("decay factor {0} is outside (0, 1]")]
    DecayOutOfRange(f32),
    #[error("species {index}: {field} must be finite, got {value}")]
    NonFinite {
        index: usize,
        field: &'static str,
        value: f32,
    },
    #[error("species {index}: {field} must not be negative, got {value}")]
    Negative {
        index: usize,
        field: &'static str,
        value: f32,
    },
    #[error("species {index}: random_turn_strength {value} exceeds {limit}")]
    RandomTurnTooLarge { index: usize, value: f32, limit: f32 },
    #[error("species {index}: sensor reach {reach} exceeds the shortest domain side {limit}")]
    SensorReachTooLarge { index: usize, reach: f32, limit: u32 },
    #[error("agent {agent}: species index {species} is not in a catalog of {catalog_size}")]
    UnknownSpecies {
        agent: usize,
        species: usize,
        catalog_size: usize,
    },
    #[error("agent {agent}: position ({x}, {y}) is outside the {width}x{height} domain")]
    AgentOutOfDomain {
        agent: usize,
        x: f32,
        y: f32,
        width: u32,
        height: u32,
    },
    #[error("agent {agent}: heading {angle} is not finite")]
    NonFiniteHeading { agent: usize, angle: f32 },
}

/// A computed grid coordinate or position left the domain after the single
/// toroidal wrap. Means a displacement or sensor offset exceeded one domain side.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvariantViolation {
    #[error("cell coordinate {coordinate} on the {axis} axis is outside [0, {dimension}) after wrapping")]
    CellOutOfRange {
        axis: Axis,
        coordinate: i64,
        dimension: u32,
    },
    #[error("agent {agent} position {coordinate} on the {axis} axis is outside [0, {dimension}) after wrapping")]
    PositionOutOfRange {
        agent: usize,
        axis: Axis,
        coordinate: f32,
        dimension: u32,
    },
}

impl InvariantViolation {
    /// Attaches the offending agent index to a position fault.
    pub fn for_agent(self, index: usize) -> Self {
        match self {
            InvariantViolation::PositionOutOfRange {
                axis,
                coordinate,
                dimension,
                ..
            } => InvariantViolation::PositionOutOfRange {
                agent: index,
                axis,
                coordinate,
                dimension,
            },
            other => other,
        }
    }
}

/// Errors returned by simulation construction and stepping.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("invariant violation: {0}")]
    InvariantViolation(#[from] InvariantViolation),
    #[error("time step {0} must be finite and non-negative")]
    InvalidTimeStep(f32),
}

/// Errors that can occur while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    #[error(transparent)]
    Invalid(#[from] ConfigurationError),
}
