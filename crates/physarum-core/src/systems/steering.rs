//! Steering Policy
//!
//! Turns three sensor readings into a heading change.

use rand::Rng;

use super::sensor::SensorReading;

/// Angle change for one tick.
///
/// Turns left when the left reading is strictly greatest, right when the right
/// reading is strictly greatest, and keeps the heading on every other outcome,
/// ties between left and right included. A uniform draw from
/// `[-random_turn_strength, random_turn_strength]` is always added.
pub fn steer<R: Rng>(
    left: f32,
    forward: f32,
    right: f32,
    turn_strength: f32,
    random_turn_strength: f32,
    dt: f32,
    rng: &mut R,
) -> f32 {
    let directed = if left > right && left > forward {
        -turn_strength * dt
    } else if right > left && right > forward {
        turn_strength * dt
    } else {
        0.0
    };

    directed + random_turn(random_turn_strength, rng)
}

/// Convenience wrapper over [`steer`] for a full reading.
pub fn steer_reading<R: Rng>(
    reading: SensorReading,
    turn_strength: f32,
    random_turn_strength: f32,
    dt: f32,
    rng: &mut R,
) -> f32 {
    steer(
        reading.left,
        reading.forward,
        reading.right,
        turn_strength,
        random_turn_strength,
        dt,
        rng,
    )
}

fn random_turn<R: Rng>(strength: f32, rng: &mut R) -> f32 {
    if strength > 0.0 {
        rng.gen_range(-strength..=strength)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(7)
    }

    #[test]
    fn test_left_strictly_greatest_turns_left() {
        assert_eq!(steer(3.0, 1.0, 2.0, 4.0, 0.0, 0.5, &mut rng()), -2.0);
    }

    #[test]
    fn test_right_strictly_greatest_turns_right() {
        assert_eq!(steer(2.0, 1.0, 3.0, 4.0, 0.0, 0.5, &mut rng()), 2.0);
    }

    #[test]
    fn test_forward_greatest_keeps_heading() {
        assert_eq!(steer(1.0, 5.0, 2.0, 4.0, 0.0, 0.5, &mut rng()), 0.0);
    }

    #[test]
    fn test_left_right_tie_above_forward_keeps_heading() {
        assert_eq!(steer(3.0, 1.0, 3.0, 4.0, 0.0, 1.0, &mut rng()), 0.0);
    }

    #[test]
    fn test_side_tied_with_forward_keeps_heading() {
        assert_eq!(steer(3.0, 3.0, 1.0, 4.0, 0.0, 1.0, &mut rng()), 0.0);
        assert_eq!(steer(1.0, 3.0, 3.0, 4.0, 0.0, 1.0, &mut rng()), 0.0);
        assert_eq!(steer(0.0, 0.0, 0.0, 4.0, 0.0, 1.0, &mut rng()), 0.0);
    }

    #[test]
    fn test_random_turn_stays_within_bounds() {
        let mut rng = rng();
        for _ in 0..1000 {
            let delta = steer(1.0, 1.0, 1.0, 4.0, 0.3, 1.0, &mut rng);
            assert!((-0.3..=0.3).contains(&delta), "delta {delta}");
        }
    }

    #[test]
    fn test_random_turn_added_to_directed_turn() {
        let mut rng = rng();
        for _ in 0..100 {
            let delta = steer(5.0, 0.0, 0.0, 2.0, 0.25, 1.0, &mut rng);
            assert!((-2.25..=-1.75).contains(&delta), "delta {delta}");
        }
    }

    #[test]
    fn test_steer_reading_matches_steer() {
        let reading = SensorReading {
            left: 0.0,
            forward: 1.0,
            right: 4.0,
        };
        assert_eq!(
            steer_reading(reading, 3.0, 0.0, 0.1, &mut rng()),
            steer(0.0, 1.0, 4.0, 3.0, 0.0, 0.1, &mut rng())
        );
    }
}
