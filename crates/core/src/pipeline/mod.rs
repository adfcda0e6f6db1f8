//! Pipeline occupancy.
//!
//! Maps a cycle index onto the instruction held by each stage.

/// Cycle index to stage occupancy projection.
pub mod projector;

pub use projector::{Projection, project};
