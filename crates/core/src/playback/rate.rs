//! Playback rate.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::config::{MAX_RATE_HZ, MIN_RATE_HZ};
use crate::trace::reading::parse_int;

const NANOS_PER_SEC: u64 = 1_000_000_000;

/// Automatic playback speed in cycles per second, between 1 and
/// [`MAX_RATE_HZ`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PlaybackRate(u32);

impl PlaybackRate {
    /// Builds a rate from a cycles-per-second count, clamped to
    /// `MIN_RATE_HZ..=MAX_RATE_HZ`.
    pub const fn from_hz(hz: u32) -> Self {
        if hz < MIN_RATE_HZ {
            Self(MIN_RATE_HZ)
        } else if hz > MAX_RATE_HZ {
            Self(MAX_RATE_HZ)
        } else {
            Self(hz)
        }
    }

    /// Reads a rate typed by the user.
    ///
    /// Non-numeric or non-positive input falls back to the floor; values past
    /// the ceiling are capped.
    pub fn parse(input: &str) -> Self {
        match parse_int(input) {
            Some(hz) if hz > 0 => Self::from_hz(u32::try_from(hz).unwrap_or(u32::MAX)),
            _ => Self(MIN_RATE_HZ),
        }
    }

    /// Cycles per second.
    #[inline]
    pub const fn hz(self) -> u32 {
        self.0
    }

    /// Time between two automatic ticks (`1000 / hz` milliseconds).
    pub const fn interval(self) -> Duration {
        Duration::from_nanos(NANOS_PER_SEC / self.0 as u64)
    }
}

impl Default for PlaybackRate {
    fn default() -> Self {
        Self::from_hz(crate::config::PlaybackConfig::default().rate_hz)
    }
}

impl fmt::Display for PlaybackRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} cycles/s", self.0)
    }
}
