//! Simulation Components
//!
//! Domain geometry, the trail map, species parameters and agent state.

pub mod agent;
pub mod color;
pub mod species;
pub mod torus;
pub mod trail;

pub use agent::*;
pub use color::*;
pub use species::*;
pub use torus::*;
pub use trail::*;
