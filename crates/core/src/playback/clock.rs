//! Playback clock.
//!
//! Two states, `Stopped` and `Running`. While running, one timer is live and
//! every tick it delivers moves the cycle forward by one; reaching the last
//! cycle stops playback instead of wrapping. Manual steps work in both
//! states and never start or stop the timer.
//!
//! Each started timer gets a fresh [`TimerId`]. A tick carrying any other id
//! (a timer that was already cancelled, or one from a previous program) is
//! ignored, so at most one timer can ever move the cycle.

use serde::Serialize;
use std::time::Duration;

use super::rate::PlaybackRate;

/// Identifier of a timer started by the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TimerId(pub u64);

/// Timer request for the adapter that owns the real timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    /// Start a repeating timer that reports ticks with `id`.
    Start {
        /// Id to pass back with each tick.
        id: TimerId,
        /// Period of the timer.
        interval: Duration,
    },
    /// Stop the timer with this id.
    Cancel {
        /// Timer to stop.
        id: TimerId,
    },
}

/// Clock state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    /// No timer is live.
    Stopped,
    /// The timer with this id drives the cycle.
    Running(TimerId),
}

/// Cycle index plus playback state.
#[derive(Debug, Clone)]
pub struct PlaybackClock {
    current: usize,
    total: usize,
    state: ClockState,
    rate: PlaybackRate,
    next_timer: u64,
}

impl PlaybackClock {
    /// Creates a stopped clock over `total` cycles at `rate`.
    pub const fn new(total: usize, rate: PlaybackRate) -> Self {
        Self {
            current: 0,
            total,
            state: ClockState::Stopped,
            rate,
            next_timer: 0,
        }
    }

    /// Displayed cycle.
    #[inline]
    pub const fn current(&self) -> usize {
        self.current
    }

    /// Number of cycles in the loaded trace.
    #[inline]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Index of the last cycle (0 for an empty trace).
    #[inline]
    pub const fn last(&self) -> usize {
        self.total.saturating_sub(1)
    }

    /// Current state.
    #[inline]
    pub const fn state(&self) -> ClockState {
        self.state
    }

    /// Returns `true` while a timer drives the cycle.
    #[inline]
    pub const fn is_running(&self) -> bool {
        matches!(self.state, ClockState::Running(_))
    }

    /// Current playback rate.
    #[inline]
    pub const fn rate(&self) -> PlaybackRate {
        self.rate
    }

    /// Stops, then rewinds to cycle 0 over a trace of `total` cycles.
    pub fn reset(&mut self, total: usize) -> Vec<TimerCommand> {
        let commands = self.pause();
        self.total = total;
        self.current = 0;
        commands
    }

    /// Starts playback. No-op while already running.
    pub fn play(&mut self) -> Vec<TimerCommand> {
        if self.is_running() {
            return Vec::new();
        }
        vec![self.start_timer()]
    }

    /// Stops playback, keeping the displayed cycle.
    pub fn pause(&mut self) -> Vec<TimerCommand> {
        match std::mem::replace(&mut self.state, ClockState::Stopped) {
            ClockState::Running(id) => vec![TimerCommand::Cancel { id }],
            ClockState::Stopped => Vec::new(),
        }
    }

    /// Plays when stopped, pauses when running.
    pub fn toggle(&mut self) -> Vec<TimerCommand> {
        if self.is_running() {
            self.pause()
        } else {
            self.play()
        }
    }

    /// Handles a tick from timer `id`.
    ///
    /// Advances one cycle unless already at the last one; stops once the last
    /// cycle is displayed. Ticks from any timer other than the live one are
    /// dropped.
    pub fn tick(&mut self, id: TimerId) -> Vec<TimerCommand> {
        if self.state != ClockState::Running(id) {
            return Vec::new();
        }
        if self.current < self.last() {
            self.current += 1;
        }
        if self.current >= self.last() {
            return self.pause();
        }
        Vec::new()
    }

    /// Steps forward one cycle; no-op at the last cycle.
    pub const fn next(&mut self) {
        if self.current < self.last() {
            self.current += 1;
        }
    }

    /// Steps back one cycle; no-op at cycle 0.
    pub const fn prev(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    /// Jumps to `cycle`, clamped to the trace.
    pub fn seek(&mut self, cycle: usize) {
        self.current = cycle.min(self.last());
    }

    /// Changes the rate. A running timer is replaced right away so the new
    /// interval applies from the next tick.
    pub fn set_rate(&mut self, rate: PlaybackRate) -> Vec<TimerCommand> {
        self.rate = rate;
        match self.state {
            ClockState::Running(id) => vec![TimerCommand::Cancel { id }, self.start_timer()],
            ClockState::Stopped => Vec::new(),
        }
    }

    fn start_timer(&mut self) -> TimerCommand {
        self.next_timer += 1;
        let id = TimerId(self.next_timer);
        self.state = ClockState::Running(id);
        TimerCommand::Start {
            id,
            interval: self.rate.interval(),
        }
    }
}
