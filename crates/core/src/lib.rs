//! Pipeline trace replay library.
//!
//! This crate replays a precomputed trace of a 4-stage pipelined core with the following:
//! 1. **Trace:** Parsers for the assembly listing and the per-cycle stage occupancy trace.
//! 2. **Pipeline:** Projection of a cycle index onto stage occupants and the stage 3 MUX value.
//! 3. **Playback:** A stopped/running clock with rate control and manual stepping.
//! 4. **Stats:** Cumulative per-instruction hit counts and histogram scaling.
//! 5. **Simulation:** Program loading, the playback session, and read-only snapshots.
//!
//! Nothing here performs I/O on its own or owns a timer. The session hands back
//! [`sim::Effect`]s and the embedding adapter (terminal, browser) carries them out.

/// Common types (error enums, program counters).
pub mod common;
/// Replay configuration (defaults, playback and catalog settings).
pub mod config;
/// Cycle index to stage occupancy projection.
pub mod pipeline;
/// Playback clock and rate handling.
pub mod playback;
/// Program loading, the playback session and snapshots.
pub mod sim;
/// Per-instruction hit accumulation.
pub mod stats;
/// Listing and cycle trace parsers.
pub mod trace;

/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
/// Top-level session; feed it events and execute the effects it returns.
pub use crate::sim::PlaybackSession;
