//! Agent Spawning
//!
//! Places the initial population and assigns species round-robin.

use rand::Rng;
use std::f32::consts::TAU;

use crate::components::{Agent, SpeciesCatalog, Torus, Vec2};
use crate::config::{SimulationConfig, SpawnMode};

/// Fraction of the shortest domain side used as the disk spawn radius.
pub const SPAWN_RADIUS_FRACTION: f32 = 0.25;

/// Spawn `config.num_agents` agents. Agent `i` gets species `i mod catalog.len()`.
///
/// Disk-spawned agents face away from the center along their spawn bearing;
/// uniformly spawned agents get an independent heading.
pub fn spawn_agents<R: Rng>(
    config: &SimulationConfig,
    catalog: &SpeciesCatalog,
    rng: &mut R,
) -> Vec<Agent> {
    let torus = config.torus();
    (0..config.num_agents)
        .map(|index| {
            let (position, angle) = spawn_pose(config.spawn_mode, torus, rng);
            Agent::new(position, angle, catalog.species_for_agent(index))
        })
        .collect()
}

fn spawn_pose<R: Rng>(mode: SpawnMode, torus: Torus, rng: &mut R) -> (Vec2, f32) {
    match mode {
        SpawnMode::Disk => {
            let radius = torus.shortest_side() as f32 * SPAWN_RADIUS_FRACTION;
            // sqrt keeps the density uniform over the disk area
            let distance = radius * rng.gen::<f32>().sqrt();
            let bearing = rng.gen::<f32>() * TAU;
            let position = torus.center() + Vec2::from_angle(bearing).scaled(distance);
            (position, bearing)
        }
        SpawnMode::Uniform => {
            let position = Vec2::new(
                rng.gen_range(0.0..torus.width() as f32),
                rng.gen_range(0.0..torus.height() as f32),
            );
            (position, rng.gen::<f32>() * TAU)
        }
    }
}
