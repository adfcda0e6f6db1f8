//! Playback session: the single mutation point of the replay engine.
//!
//! The adapter turns user input, timer ticks and finished fetches into
//! [`Event`]s and passes them to [`PlaybackSession::dispatch`]. The session
//! updates its state and returns the [`Effect`]s the adapter must carry out.
//! It performs no I/O and owns no timer, so every transition is testable
//! without a runtime.
//!
//! Two kinds of staleness are filtered here:
//! - ticks from a timer that was cancelled (see [`TimerId`]);
//! - load results for a request that was superseded (see [`LoadTicket`]).

use serde::Serialize;
use tracing::{debug, error, info};

use super::loader::{Catalog, ProgramRequest, ProgramText};
use super::program::Program;
use super::snapshot::Snapshot;
use crate::common::LoadError;
use crate::config::Config;
use crate::pipeline::{Projection, project};
use crate::playback::{PlaybackClock, PlaybackRate, TimerCommand, TimerId};
use crate::stats::HitAccumulator;

/// Identifier matching a load result to its request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LoadTicket(pub u64);

/// Input to the session.
#[derive(Debug)]
pub enum Event {
    /// The user picked a program.
    SelectProgram(String),
    /// Both files of a program arrived, or the fetch failed.
    Loaded {
        /// Ticket from the matching [`Effect::Fetch`].
        ticket: LoadTicket,
        /// File contents, or the reason the fetch failed.
        result: Result<ProgramText, LoadError>,
    },
    /// A playback timer fired.
    Tick(TimerId),
    /// Play/pause button.
    TogglePlay,
    /// Start playback.
    Play,
    /// Stop playback.
    Pause,
    /// Step forward one cycle.
    Next,
    /// Step back one cycle.
    Prev,
    /// Jump to a cycle.
    Seek(usize),
    /// New rate typed by the user (cycles per second).
    SetRate(String),
}

/// Work for the adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Start or cancel a playback timer.
    Timer(TimerCommand),
    /// Read both files of a program and report back with [`Event::Loaded`].
    Fetch {
        /// Ticket to return with the result.
        ticket: LoadTicket,
        /// Files to read.
        request: ProgramRequest,
    },
    /// Visible state changed; take a new [`Snapshot`].
    Render,
}

/// Loaded program plus playback and hit state.
#[derive(Debug)]
pub struct PlaybackSession {
    config: Config,
    catalog: Catalog,
    program: Option<Program>,
    clock: PlaybackClock,
    hits: HitAccumulator,
    projection: Projection,
    pending: Option<(LoadTicket, ProgramRequest)>,
    next_ticket: u64,
}

impl PlaybackSession {
    /// Creates an empty session. Nothing is loaded until a
    /// [`Event::SelectProgram`] is dispatched.
    pub fn new(config: Config, catalog: Catalog) -> Self {
        let rate = PlaybackRate::from_hz(config.playback.rate_hz);
        Self {
            config,
            catalog,
            program: None,
            clock: PlaybackClock::new(0, rate),
            hits: HitAccumulator::default(),
            projection: Projection::default(),
            pending: None,
            next_ticket: 0,
        }
    }

    /// Session configuration.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Program catalog.
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Loaded program, if any.
    pub const fn program(&self) -> Option<&Program> {
        self.program.as_ref()
    }

    /// Playback clock.
    pub const fn clock(&self) -> &PlaybackClock {
        &self.clock
    }

    /// Hit statistics of the loaded program.
    pub const fn hits(&self) -> &HitAccumulator {
        &self.hits
    }

    /// Occupancy of the displayed cycle.
    pub const fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Returns `true` while a fetch is outstanding.
    pub const fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Applies `event` and returns the effects to carry out, in order.
    pub fn dispatch(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::SelectProgram(name) => self.select_program(&name),
            Event::Loaded { ticket, result } => self.finish_load(ticket, result),
            Event::Tick(id) => self.step(|clock| clock.tick(id)),
            Event::TogglePlay => self.step(PlaybackClock::toggle),
            Event::Play => self.step(PlaybackClock::play),
            Event::Pause => self.step(PlaybackClock::pause),
            Event::Next => self.step(|clock| {
                clock.next();
                Vec::new()
            }),
            Event::Prev => self.step(|clock| {
                clock.prev();
                Vec::new()
            }),
            Event::Seek(cycle) => self.step(|clock| {
                clock.seek(cycle);
                Vec::new()
            }),
            Event::SetRate(input) => {
                let rate = PlaybackRate::parse(&input);
                debug!(%rate, "playback rate changed");
                let mut effects = timers(self.clock.set_rate(rate));
                effects.push(Effect::Render);
                effects
            }
        }
    }

    /// Read-only view of the current state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }

    fn select_program(&mut self, name: &str) -> Vec<Effect> {
        let request = match self.catalog.request(&self.config.catalog, name) {
            Ok(request) => request,
            Err(e) => {
                error!(program = name, error = %e, "cannot load program");
                return Vec::new();
            }
        };

        // The old timer goes before the fetch starts so no tick can land on
        // the new trace.
        let mut effects = timers(self.clock.pause());

        self.next_ticket += 1;
        let ticket = LoadTicket(self.next_ticket);
        self.pending = Some((ticket, request.clone()));
        debug!(program = name, ticket = ticket.0, "fetching program");

        effects.push(Effect::Fetch { ticket, request });
        effects.push(Effect::Render);
        effects
    }

    fn finish_load(&mut self, ticket: LoadTicket, result: Result<ProgramText, LoadError>) -> Vec<Effect> {
        let request = match self.pending.take() {
            Some((pending, request)) if pending == ticket => request,
            other => {
                debug!(ticket = ticket.0, "dropping superseded load result");
                self.pending = other;
                return Vec::new();
            }
        };

        let text = match result {
            Ok(text) => text,
            Err(e) => {
                error!(program = %request.name, error = %e, "error loading program data");
                return vec![Effect::Render];
            }
        };

        let program = Program::parse(
            &request.name,
            &request.listing_file,
            &text.listing,
            &text.trace,
        );
        info!(
            program = %program.name,
            instructions = program.instructions.len(),
            cycles = program.total_cycles(),
            "loaded program"
        );

        let mut effects = timers(self.clock.reset(program.total_cycles()));
        self.hits = HitAccumulator::new(program.pcs());
        self.program = Some(program);
        self.refresh();

        if self.config.playback.autoplay {
            effects.extend(timers(self.clock.play()));
        }
        effects.push(Effect::Render);
        effects
    }

    /// Runs a clock transition and re-projects if the displayed cycle moved.
    fn step(&mut self, f: impl FnOnce(&mut PlaybackClock) -> Vec<TimerCommand>) -> Vec<Effect> {
        if self.program.is_none() {
            return Vec::new();
        }

        let before = self.clock.current();
        let was_running = self.clock.is_running();
        let mut effects = timers(f(&mut self.clock));

        let moved = self.clock.current() != before;
        if moved {
            self.refresh();
        }
        if moved || was_running != self.clock.is_running() {
            effects.push(Effect::Render);
        }
        effects
    }

    /// Projects the displayed cycle and counts its occupants.
    fn refresh(&mut self) {
        let Some(program) = &self.program else {
            return;
        };
        self.projection = project(&program.cycles, self.clock.current());
        self.hits.observe(&self.projection);
    }
}

fn timers(commands: Vec<TimerCommand>) -> Vec<Effect> {
    commands.into_iter().map(Effect::Timer).collect()
}
