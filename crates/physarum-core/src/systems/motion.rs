//! Motion Integration
//!
//! Single explicit-Euler step along the heading, wrapped onto the torus.

use rand::Rng;

use super::sensor::read_sensors;
use super::steering::steer_reading;
use crate::components::{Agent, SpeciesParams, Torus, TrailMap, Vec2};
use crate::error::InvariantViolation;

/// Position after moving `speed * dt` along `angle`.
pub fn move_position(
    torus: Torus,
    position: Vec2,
    angle: f32,
    speed: f32,
    dt: f32,
) -> Result<Vec2, InvariantViolation> {
    let displaced = position + Vec2::from_angle(angle).scaled(speed * dt);
    torus.wrap_position(displaced)
}

/// Sense, steer and move one agent against a read-only trail map.
pub fn advance_agent<R: Rng>(
    agent: &mut Agent,
    species: &SpeciesParams,
    trail: &TrailMap,
    dt: f32,
    rng: &mut R,
) -> Result<(), InvariantViolation> {
    let reading = read_sensors(trail, agent, species)?;
    agent.angle += steer_reading(
        reading,
        species.turn_strength,
        species.random_turn_strength,
        dt,
        rng,
    );
    agent.position = move_position(trail.torus(), agent.position, agent.angle, species.speed, dt)?;
    Ok(())
}
