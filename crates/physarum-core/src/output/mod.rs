//! Output
//!
//! Read-only frame access for renderers and per-frame statistics.

pub mod frame;
pub mod stats;

pub use frame::*;
pub use stats::*;
