//! Sensor Model
//!
//! Samples a disk-shaped neighborhood of the trail map around a probe point.
//!
//! Offsets run over the half-open range `[-radius, radius - 1]` on both axes,
//! so the disk is shifted half a cell toward negative coordinates. It is not a
//! centered circle.

use crate::components::{Agent, Rgb, SpeciesParams, TrailMap, Vec2};
use crate::error::InvariantViolation;

/// Readings from the three probes of one agent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SensorReading {
    pub left: f32,
    pub forward: f32,
    pub right: f32,
}

/// Integer offsets sampled around a sensor center, x-major.
pub fn sensor_offsets(radius: u32) -> impl Iterator<Item = (i32, i32)> {
    let r = radius as i32;
    let r_sq = r as i64 * r as i64;
    (-r..r)
        .flat_map(move |dx| (-r..r).map(move |dy| (dx, dy)))
        .filter(move |&(dx, dy)| (dx as i64 * dx as i64 + dy as i64 * dy as i64) <= r_sq)
}

/// Probe point `distance` away from `position` along `angle`.
pub fn sensor_center(position: Vec2, angle: f32, distance: f32) -> Vec2 {
    position + Vec2::from_angle(angle).scaled(distance)
}

/// Unnormalized score of the neighborhood around `center`.
///
/// Plain species sum the brightness of every sampled cell. Repel species score
/// `+1` for each cell that exactly equals their own signal and `-1` otherwise.
pub fn sense(
    trail: &TrailMap,
    center: Vec2,
    radius: u32,
    signal: Rgb,
    repel: bool,
) -> Result<f32, InvariantViolation> {
    let (cx, cy) = center.floor();
    let mut total = 0.0f32;

    for (dx, dy) in sensor_offsets(radius) {
        let cell = trail.sample(cx + dx, cy + dy)?;
        total += if repel {
            if cell == signal {
                1.0
            } else {
                -1.0
            }
        } else {
            cell.brightness()
        };
    }

    Ok(total)
}

/// Read the left, forward and right probes of `agent`.
pub fn read_sensors(
    trail: &TrailMap,
    agent: &Agent,
    species: &SpeciesParams,
) -> Result<SensorReading, InvariantViolation> {
    let probe = |offset: f32| {
        let center = sensor_center(
            agent.position,
            agent.angle + offset,
            species.sensor_distance,
        );
        sense(
            trail,
            center,
            species.sensor_radius,
            species.signal,
            species.repel,
        )
    };

    Ok(SensorReading {
        left: probe(-species.sensor_angle_offset)?,
        forward: probe(0.0)?,
        right: probe(species.sensor_angle_offset)?,
    })
}
