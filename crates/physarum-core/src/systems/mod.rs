//! Simulation Systems
//!
//! Sensing, steering and motion as pure functions, plus the ECS systems that
//! chain them into a tick.

pub mod motion;
pub mod sensor;
pub mod steering;
pub mod tick;

pub use motion::{advance_agent, move_position};
pub use sensor::{read_sensors, sense, sensor_center, sensor_offsets, SensorReading};
pub use steering::{steer, steer_reading};
pub use tick::{
    build_tick_schedule, decay_trail_map, deposit_signals, sense_and_steer, TickDelta,
    TickFaults, TickSettings,
};
