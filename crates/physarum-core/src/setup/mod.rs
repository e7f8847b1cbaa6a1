//! Simulation Setup
//!
//! Initial agent placement and built-in species presets.

pub mod agents;
pub mod presets;

pub use agents::*;
pub use presets::*;
