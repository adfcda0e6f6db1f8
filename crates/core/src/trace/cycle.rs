//! Cycle trace parser.
//!
//! The trace is a flat sequence of lines. A line starting with `Cycle:` opens
//! a new record; the `key: value` lines that follow fill it in:
//!
//! ```text
//! Cycle: 17
//! pc_from_stage_0_in_stage_0: 24
//! pc_from_stage_0_in_stage_1: 20
//! pc_from_stage_0_in_stage_2: 16
//! pc_from_stage_0_in_stage_3: 12
//! mux_data_from_stage_3_in_stage_3: 144
//! ```
//!
//! Any of the five keys may be missing from a record. Keys are matched by
//! substring, so testbench prefixes such as `top.core.pc_from_stage_0_in_stage_2`
//! are recognised. Unknown keys are ignored.

use std::fmt;

use serde::Serialize;

use super::reading::Reading;

/// Number of pipeline stages in the traced core.
pub const STAGE_COUNT: usize = 4;

/// Marker that opens a new cycle record.
const CYCLE_MARKER: &str = "Cycle:";

/// Key carrying the stage 3 MUX output.
const MUX_KEY: &str = "mux_data_from_stage_3_in_stage_3";

/// Keys carrying the PC held by each stage, indexed by stage.
const STAGE_KEYS: [&str; STAGE_COUNT] = [
    "pc_from_stage_0_in_stage_0",
    "pc_from_stage_0_in_stage_1",
    "pc_from_stage_0_in_stage_2",
    "pc_from_stage_0_in_stage_3",
];

/// One of the four pipeline stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum StageId {
    /// Stage 0 (fetch).
    Stage0,
    /// Stage 1.
    Stage1,
    /// Stage 2.
    Stage2,
    /// Stage 3 (the stage whose MUX output is traced).
    Stage3,
}

impl StageId {
    /// All stages in pipeline order.
    pub const ALL: [Self; STAGE_COUNT] = [Self::Stage0, Self::Stage1, Self::Stage2, Self::Stage3];

    /// Zero-based stage number.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Stage {}", self.index())
    }
}

/// Stage readings for a single cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CycleRecord {
    /// PC reading per stage; `None` when the key was absent.
    pub stages: [Option<Reading>; STAGE_COUNT],
    /// Stage 3 MUX reading; `None` when the key was absent.
    pub mux: Option<Reading>,
}

impl CycleRecord {
    /// Returns `true` when no recognised key was seen.
    pub fn is_empty(&self) -> bool {
        self.mux.is_none() && self.stages.iter().all(Option::is_none)
    }

    /// Reading for `stage`, if the key was present.
    #[inline]
    pub const fn stage(&self, stage: StageId) -> Option<Reading> {
        self.stages[stage.index()]
    }

    /// Applies one `key: value` line; unrecognised keys are ignored.
    fn apply(&mut self, key: &str, value: &str) {
        if let Some(i) = STAGE_KEYS.iter().position(|k| key.contains(k)) {
            self.stages[i] = Some(Reading::parse(value));
        } else if key.contains(MUX_KEY) {
            self.mux = Some(Reading::parse(value));
        }
    }
}

/// Parses a cycle trace into one record per `Cycle:` block.
///
/// Empty blocks are dropped. The last block is kept even without a trailing
/// marker.
pub fn parse_cycles(text: &str) -> Vec<CycleRecord> {
    let mut out = Vec::new();
    let mut current = CycleRecord::default();

    for line in text.lines() {
        if line.starts_with(CYCLE_MARKER) {
            flush(&mut out, &mut current);
            continue;
        }

        let mut fields = line.split(':');
        let (Some(key), Some(value)) = (fields.next(), fields.next()) else {
            continue;
        };
        current.apply(key.trim(), value);
    }

    flush(&mut out, &mut current);
    out
}

fn flush(out: &mut Vec<CycleRecord>, current: &mut CycleRecord) {
    let record = std::mem::take(current);
    if !record.is_empty() {
        out.push(record);
    }
}
