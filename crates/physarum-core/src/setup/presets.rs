//! Species Presets
//!
//! Built-in catalogs for running without a configuration file.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::components::{Rgb, SpeciesCatalog, SpeciesParams};
use crate::config::{SimulationConfig, SpawnMode};
use crate::error::ConfigurationError;

/// A named, ready-to-run species catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// One white species that only random-walks; no sensing
    Basic,
    /// Blue, red and green species; red repels everything but its own trail
    #[default]
    Trio,
}

impl Preset {
    pub const ALL: [Preset; 2] = [Preset::Basic, Preset::Trio];

    pub fn name(&self) -> &'static str {
        match self {
            Preset::Basic => "basic",
            Preset::Trio => "trio",
        }
    }

    /// Species table for this preset.
    pub fn species(&self) -> Vec<SpeciesParams> {
        match self {
            Preset::Basic => vec![SpeciesParams {
                name: "white".to_string(),
                signal: Rgb::WHITE,
                speed: 20.0,
                sensor_angle_offset: 0.0,
                sensor_distance: 0.0,
                sensor_radius: 0,
                turn_strength: 0.0,
                random_turn_strength: 0.25,
                repel: false,
            }],
            Preset::Trio => vec![
                SpeciesParams {
                    name: "blue".to_string(),
                    signal: Rgb::new(0.1, 0.45, 1.0),
                    speed: 40.0,
                    sensor_angle_offset: 0.6,
                    sensor_distance: 10.0,
                    sensor_radius: 1,
                    turn_strength: 18.0,
                    random_turn_strength: 0.05,
                    repel: false,
                },
                SpeciesParams {
                    name: "red".to_string(),
                    signal: Rgb::new(1.0, 0.2, 0.15),
                    speed: 35.0,
                    sensor_angle_offset: 0.45,
                    sensor_distance: 14.0,
                    sensor_radius: 2,
                    turn_strength: 14.0,
                    random_turn_strength: 0.08,
                    repel: true,
                },
                SpeciesParams {
                    name: "green".to_string(),
                    signal: Rgb::new(0.2, 1.0, 0.35),
                    speed: 50.0,
                    sensor_angle_offset: 0.8,
                    sensor_distance: 7.0,
                    sensor_radius: 1,
                    turn_strength: 24.0,
                    random_turn_strength: 0.12,
                    repel: false,
                },
            ],
        }
    }

    /// Catalog for this preset.
    pub fn catalog(&self) -> Result<SpeciesCatalog, ConfigurationError> {
        SpeciesCatalog::new(self.species())
    }

    /// Global settings the preset is tuned for.
    pub fn config(&self) -> SimulationConfig {
        match self {
            Preset::Basic => SimulationConfig {
                width: 256,
                height: 256,
                spawn_mode: SpawnMode::Uniform,
                ..SimulationConfig::default()
            },
            Preset::Trio => SimulationConfig::default(),
        }
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown preset '{s}', expected one of: basic, trio"))
    }
}
