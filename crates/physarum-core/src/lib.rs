//! Physarum Trail Simulation Library
//!
//! Multi-species slime-mold pattern generator. Agents sense a shared, decaying
//! trail map through three probes, steer toward (or, for repel species, along
//! their own) signal, move, and overwrite their cell with their species color.
//!
//! # Tick order
//!
//! ```text
//! decay ──▶ sense + steer + move (all agents, read-only) ──▶ deposit (index order)
//! ```
//!
//! # Modules
//!
//! - [`components`]: torus geometry, trail map, species catalog, agents
//! - [`systems`]: sensor model, steering policy, motion, tick systems
//! - [`setup`]: agent spawning and species presets
//! - [`output`]: frame buffer view and frame statistics
//! - [`config`]: TOML configuration
//! - [`simulation`]: the session type driving everything

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;

pub mod components;
pub mod config;
pub mod error;
pub mod output;
pub mod setup;
pub mod simulation;
pub mod systems;

pub use components::{
    Agent, AgentPopulation, Rgb, SpeciesCatalog, SpeciesParams, Torus, TrailMap, Vec2,
};
pub use config::{default_config_toml, SimulationConfig, SimulationFile, SpawnMode};
pub use error::{Axis, ConfigFileError, ConfigurationError, InvariantViolation, SimError};
pub use output::{FrameBuffer, FrameStats, SpeciesCoverage};
pub use setup::{spawn_agents, Preset};
pub use simulation::SimulationState;

/// Seeded random number generator resource
#[derive(Resource)]
pub struct SimRng(pub SmallRng);
