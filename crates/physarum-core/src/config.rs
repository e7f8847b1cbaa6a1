//! Configuration System
//!
//! Simulation and species settings loaded from a TOML file:
//!
//! ```toml
//! [simulation]
//! width = 1280
//! height = 720
//!
//! [[species]]
//! name = "blue"
//! signal = [0.1, 0.45, 1.0]
//! ```
//!
//! Omitted fields fall back to their defaults; an omitted `[[species]]` list
//! falls back to the trio preset.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::components::{SpeciesCatalog, SpeciesParams, Torus};
use crate::error::{ConfigFileError, ConfigurationError};
use crate::setup::Preset;

/// How initial agent positions are sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SpawnMode {
    /// Uniform inside a disk of radius `min(width, height) / 4` at the center
    #[default]
    Disk,
    /// Uniform over the whole domain
    Uniform,
}

/// Global simulation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Trail map width in cells
    pub width: u32,
    /// Trail map height in cells
    pub height: u32,
    /// Number of agents, fixed for the session
    pub num_agents: usize,
    /// Per-tick multiplier applied to every cell, in (0, 1]
    pub decay_factor: f32,
    /// Seed for the session RNG
    pub seed: u64,
    /// Initial placement of agents
    pub spawn_mode: SpawnMode,
    /// Run the sense pass across threads
    pub parallel: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            num_agents: 2000,
            decay_factor: 0.985,
            seed: 42,
            spawn_mode: SpawnMode::Disk,
            parallel: true,
        }
    }
}

impl SimulationConfig {
    pub fn torus(&self) -> Torus {
        Torus::new(self.width, self.height)
    }

    /// Reject zero dimensions, zero agents and decay factors outside (0, 1].
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.width == 0 {
            return Err(ConfigurationError::ZeroWidth);
        }
        if self.height == 0 {
            return Err(ConfigurationError::ZeroHeight);
        }
        if self.num_agents == 0 {
            return Err(ConfigurationError::NoAgents);
        }
        if !(self.decay_factor > 0.0 && self.decay_factor <= 1.0) {
            return Err(ConfigurationError::DecayOutOfRange(self.decay_factor));
        }
        Ok(())
    }
}

/// Complete configuration file: one `[simulation]` table and a `[[species]]` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationFile {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default = "default_species")]
    pub species: Vec<SpeciesParams>,
}

impl Default for SimulationFile {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            species: default_species(),
        }
    }
}

fn default_species() -> Vec<SpeciesParams> {
    Preset::Trio.species()
}

impl SimulationFile {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigFileError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigFileError> {
        Ok(toml::from_str(content)?)
    }

    /// Serializes this configuration as a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigFileError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate and split into the global settings and the species catalog.
    pub fn into_parts(self) -> Result<(SimulationConfig, SpeciesCatalog), ConfigurationError> {
        self.simulation.validate()?;
        let catalog = SpeciesCatalog::new(self.species)?;
        catalog.validate(self.simulation.torus())?;
        Ok((self.simulation, catalog))
    }
}

/// Generates a default configuration file content.
pub fn default_config_toml() -> String {
    r#"# Physarum Simulation Configuration

[simulation]
width = 1280
height = 720
num_agents = 2000
decay_factor = 0.985
seed = 42
spawn_mode = "disk"
parallel = true

[[species]]
name = "blue"
signal = [0.1, 0.45, 1.0]
speed = 40.0
sensor_angle_offset = 0.6
sensor_distance = 10.0
sensor_radius = 1
turn_strength = 18.0
random_turn_strength = 0.05
repel = false

[[species]]
name = "red"
signal = [1.0, 0.2, 0.15]
speed = 35.0
sensor_angle_offset = 0.45
sensor_distance = 14.0
sensor_radius = 2
turn_strength = 14.0
random_turn_strength = 0.08
repel = true

[[species]]
name = "green"
signal = [0.2, 1.0, 0.35]
speed = 50.0
sensor_angle_offset = 0.8
sensor_distance = 7.0
sensor_radius = 1
turn_strength = 24.0
random_turn_strength = 0.12
repel = false
"#
    .to_string()
}
