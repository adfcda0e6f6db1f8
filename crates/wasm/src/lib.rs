//! WebAssembly bindings for the pipeviz replay engine.
//!
//! The page owns `fetch` and `setInterval`; this crate owns the state. Every
//! mutating method returns a JSON array of effects for the page to carry out:
//!
//! - `{"kind":"start_timer","id":3,"interval_ms":200}`: call `tick(3)` every 200 ms.
//! - `{"kind":"cancel_timer","id":3}`: clear that interval.
//! - `{"kind":"fetch","ticket":1,...}`: fetch both URLs, then call `loaded`
//!   or `load_failed` with the ticket.
//! - `{"kind":"render"}`: call `snapshot()` and redraw.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use pipeviz_core::common::LoadError;
use pipeviz_core::config::Config;
use pipeviz_core::playback::{TimerCommand, TimerId};
use pipeviz_core::sim::{Catalog, Effect, Event, LoadTicket, PlaybackSession, ProgramText};

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum JsEffect {
    StartTimer {
        id: u64,
        interval_ms: f64,
    },
    CancelTimer {
        id: u64,
    },
    Fetch {
        ticket: u64,
        program: String,
        listing_url: String,
        trace_url: String,
    },
    Render,
}

impl From<Effect> for JsEffect {
    fn from(effect: Effect) -> Self {
        match effect {
            Effect::Timer(TimerCommand::Start { id, interval }) => Self::StartTimer {
                id: id.0,
                interval_ms: interval.as_secs_f64() * 1000.0,
            },
            Effect::Timer(TimerCommand::Cancel { id }) => Self::CancelTimer { id: id.0 },
            Effect::Fetch { ticket, request } => Self::Fetch {
                ticket: ticket.0,
                program: request.name,
                listing_url: url(&request.listing_path),
                trace_url: url(&request.trace_path),
            },
            Effect::Render => Self::Render,
        }
    }
}

fn url(path: &std::path::Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn to_json<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_json::to_string(value)
        .map(|json| JsValue::from_str(&json))
        .map_err(|e| js_sys::Error::new(&e.to_string()).into())
}

/// Browser-side replay session.
#[wasm_bindgen]
#[derive(Debug)]
pub struct Visualizer {
    session: PlaybackSession,
}

#[wasm_bindgen]
impl Visualizer {
    /// Creates a session from a JSON config and the contents of `programs.json`.
    ///
    /// Either argument may be an empty string to use defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str, catalog_json: &str) -> Result<Self, JsValue> {
        let config = if config_json.trim().is_empty() {
            Config::default()
        } else {
            Config::from_json(config_json).map_err(|e| js_sys::Error::new(&e.to_string()))?
        };
        let catalog = if catalog_json.trim().is_empty() {
            Catalog::default()
        } else {
            Catalog::from_json(catalog_json).map_err(|e| js_sys::Error::new(&e.to_string()))?
        };
        Ok(Self {
            session: PlaybackSession::new(config, catalog),
        })
    }

    /// Program names from the catalog, as a JSON array.
    pub fn programs(&self) -> Result<JsValue, JsValue> {
        to_json(&self.session.catalog().programs)
    }

    /// Program selected when the page opens.
    pub fn default_program(&self) -> String {
        self.session.config().catalog.default_program.clone()
    }

    /// Switches to `name`. Cancels the running timer before requesting the fetch.
    pub fn select_program(&mut self, name: &str) -> Result<JsValue, JsValue> {
        self.dispatch(Event::SelectProgram(name.to_owned()))
    }

    /// Hands over both fetched texts for `ticket`.
    pub fn loaded(&mut self, ticket: u32, listing: String, trace: String) -> Result<JsValue, JsValue> {
        self.dispatch(Event::Loaded {
            ticket: LoadTicket(u64::from(ticket)),
            result: Ok(ProgramText { listing, trace }),
        })
    }

    /// Reports that at least one fetch for `ticket` failed.
    pub fn load_failed(&mut self, ticket: u32, message: &str) -> Result<JsValue, JsValue> {
        web_sys::console::error_1(&JsValue::from_str(&format!(
            "Error loading program data: {message}"
        )));
        self.dispatch(Event::Loaded {
            ticket: LoadTicket(u64::from(ticket)),
            result: Err(LoadError::Fetch(message.to_owned())),
        })
    }

    /// Timer callback.
    pub fn tick(&mut self, timer: u32) -> Result<JsValue, JsValue> {
        self.dispatch(Event::Tick(TimerId(u64::from(timer))))
    }

    /// Play/pause button.
    pub fn toggle_play(&mut self) -> Result<JsValue, JsValue> {
        self.dispatch(Event::TogglePlay)
    }

    /// Next-cycle button.
    pub fn next(&mut self) -> Result<JsValue, JsValue> {
        self.dispatch(Event::Next)
    }

    /// Previous-cycle button.
    pub fn prev(&mut self) -> Result<JsValue, JsValue> {
        self.dispatch(Event::Prev)
    }

    /// Scrubber.
    pub fn seek(&mut self, cycle: u32) -> Result<JsValue, JsValue> {
        self.dispatch(Event::Seek(cycle as usize))
    }

    /// Rate input; the raw field text is accepted and floored at 1.
    pub fn set_rate(&mut self, text: &str) -> Result<JsValue, JsValue> {
        self.dispatch(Event::SetRate(text.to_owned()))
    }

    /// Current state as JSON.
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        to_json(&self.session.snapshot())
    }
}

impl Visualizer {
    fn dispatch(&mut self, event: Event) -> Result<JsValue, JsValue> {
        let effects: Vec<JsEffect> = self
            .session
            .dispatch(event)
            .into_iter()
            .map(JsEffect::from)
            .collect();
        to_json(&effects)
    }
}
