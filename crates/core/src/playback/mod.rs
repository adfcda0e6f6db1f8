//! Playback control.
//!
//! This module provides the clock that drives the displayed cycle:
//! 1. **Clock:** Stopped/running state machine with manual stepping and seeking.
//! 2. **Rate:** Cycles-per-second parsing with a floor of one.
//!
//! The clock never owns a real timer. Starting or cancelling one is returned
//! to the caller as a [`TimerCommand`] tagged with a [`TimerId`].

/// Stopped/running playback state machine.
pub mod clock;
/// Playback rate parsing and interval computation.
pub mod rate;

pub use clock::{ClockState, PlaybackClock, TimerCommand, TimerId};
pub use rate::PlaybackRate;
