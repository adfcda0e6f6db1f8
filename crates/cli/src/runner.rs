//! Single-threaded event loop executing session effects.
//!
//! Fetches are synchronous reads through a [`TraceSource`]; the load result is
//! dispatched as soon as the fetch effect runs, ahead of any queued user event
//! and of the render that requested it. The one live timer is modelled by
//! sleeping for its interval and dispatching a tick with its id.

use std::collections::VecDeque;
use std::thread;
use std::time::Duration;

use pipeviz_core::playback::{TimerCommand, TimerId};
use pipeviz_core::sim::{Effect, Event, PlaybackSession, ProgramText, Snapshot, TraceSource};

/// Drives a [`PlaybackSession`] until no event is queued and no timer is live.
#[derive(Debug)]
pub struct Runner<S> {
    session: PlaybackSession,
    source: S,
    queue: VecDeque<Event>,
    timer: Option<(TimerId, Duration)>,
}

impl<S: TraceSource> Runner<S> {
    pub const fn new(session: PlaybackSession, source: S) -> Self {
        Self {
            session,
            source,
            queue: VecDeque::new(),
            timer: None,
        }
    }

    pub const fn session(&self) -> &PlaybackSession {
        &self.session
    }

    /// Queues a user event.
    pub fn push(&mut self, event: Event) {
        self.queue.push_back(event);
    }

    /// Runs until idle, calling `render` for every render effect.
    pub fn run(&mut self, mut render: impl FnMut(&Snapshot)) {
        loop {
            while let Some(event) = self.queue.pop_front() {
                for effect in self.session.dispatch(event) {
                    self.apply(effect, &mut render);
                }
            }

            let Some((id, interval)) = self.timer else {
                break;
            };
            thread::sleep(interval);
            self.queue.push_back(Event::Tick(id));
        }
    }

    fn apply(&mut self, effect: Effect, render: &mut impl FnMut(&Snapshot)) {
        match effect {
            Effect::Timer(TimerCommand::Start { id, interval }) => {
                self.timer = Some((id, interval));
            }
            Effect::Timer(TimerCommand::Cancel { id }) => {
                if self.timer.is_some_and(|(live, _)| live == id) {
                    self.timer = None;
                }
            }
            Effect::Fetch { ticket, request } => {
                let result = ProgramText::fetch(&self.source, &request);
                for effect in self.session.dispatch(Event::Loaded { ticket, result }) {
                    self.apply(effect, render);
                }
            }
            Effect::Render => render(&self.session.snapshot()),
        }
    }
}
