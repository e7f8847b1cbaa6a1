//! Species Components
//!
//! Immutable per-species behavior shared by every agent of that species.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

use super::color::Rgb;
use super::torus::Torus;
use crate::error::ConfigurationError;

/// Largest accepted per-tick random turn: one full revolution either way.
pub const MAX_RANDOM_TURN: f32 = std::f32::consts::TAU;

/// Behavioral parameters for one species. Never mutated after the catalog is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeciesParams {
    /// Display name, used in logs and statistics
    pub name: String,
    /// Color deposited into the trail map
    pub signal: Rgb,
    /// Distance travelled per second
    pub speed: f32,
    /// Angle between the forward sensor and each side sensor (radians)
    pub sensor_angle_offset: f32,
    /// Distance from the agent to each sensor center
    pub sensor_distance: f32,
    /// Radius of the sampled neighborhood around a sensor center
    pub sensor_radius: u32,
    /// Steering rate toward the strongest side sensor (radians per second)
    pub turn_strength: f32,
    /// Half-width of the uniform random turn added every tick (radians)
    pub random_turn_strength: f32,
    /// Score cells by exact match with the own signal instead of brightness
    pub repel: bool,
}

impl Default for SpeciesParams {
    fn default() -> Self {
        Self {
            name: "species".to_string(),
            signal: Rgb::WHITE,
            speed: 30.0,
            sensor_angle_offset: 0.5,
            sensor_distance: 9.0,
            sensor_radius: 1,
            turn_strength: 10.0,
            random_turn_strength: 0.1,
            repel: false,
        }
    }
}

impl SpeciesParams {
    /// How far from an agent a sensor can read, in cells.
    pub fn sensor_reach(&self) -> f32 {
        self.sensor_distance.abs() + self.sensor_radius as f32 + 1.0
    }

    /// Check the parameters for the catalog slot `index` on `torus`.
    pub fn validate(&self, index: usize, torus: Torus) -> Result<(), ConfigurationError> {
        let scalars = [
            ("signal.r", self.signal.r),
            ("signal.g", self.signal.g),
            ("signal.b", self.signal.b),
            ("speed", self.speed),
            ("sensor_angle_offset", self.sensor_angle_offset),
            ("sensor_distance", self.sensor_distance),
            ("turn_strength", self.turn_strength),
            ("random_turn_strength", self.random_turn_strength),
        ];
        for (field, value) in scalars {
            if !value.is_finite() {
                return Err(ConfigurationError::NonFinite { index, field, value });
            }
        }

        let non_negative = [
            ("signal.r", self.signal.r),
            ("signal.g", self.signal.g),
            ("signal.b", self.signal.b),
            ("random_turn_strength", self.random_turn_strength),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(ConfigurationError::Negative { index, field, value });
            }
        }

        if self.random_turn_strength > MAX_RANDOM_TURN {
            return Err(ConfigurationError::RandomTurnTooLarge {
                index,
                value: self.random_turn_strength,
                limit: MAX_RANDOM_TURN,
            });
        }

        // Samples up to `side` cells outside the domain still wrap back in once.
        let reach = self.sensor_reach();
        if reach > torus.shortest_side() as f32 {
            return Err(ConfigurationError::SensorReachTooLarge {
                index,
                reach,
                limit: torus.shortest_side(),
            });
        }
        Ok(())
    }
}

/// Resource: ordered, non-empty table of species parameters.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct SpeciesCatalog {
    species: Vec<SpeciesParams>,
}

impl SpeciesCatalog {
    /// Build a catalog. Fails when `species` is empty.
    pub fn new(species: Vec<SpeciesParams>) -> Result<Self, ConfigurationError> {
        if species.is_empty() {
            return Err(ConfigurationError::EmptyCatalog);
        }
        Ok(Self { species })
    }

    /// Validate every entry against the domain it will run on.
    pub fn validate(&self, torus: Torus) -> Result<(), ConfigurationError> {
        self.species
            .iter()
            .enumerate()
            .try_for_each(|(index, params)| params.validate(index, torus))
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SpeciesParams> {
        self.species.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpeciesParams> {
        self.species.iter()
    }

    /// Round-robin species assignment for agent `agent_index`.
    pub fn species_for_agent(&self, agent_index: usize) -> usize {
        agent_index % self.species.len()
    }
}

impl std::ops::Index<usize> for SpeciesCatalog {
    type Output = SpeciesParams;

    fn index(&self, index: usize) -> &SpeciesParams {
        &self.species[index]
    }
}
