//! Read-only view of a session for presentation adapters.
//!
//! A snapshot is recomputed from scratch on demand and owns all its data, so
//! the adapter can keep the previous one around and diff.

use std::collections::BTreeMap;

use serde::Serialize;

use super::session::PlaybackSession;
use crate::common::Pc;
use crate::trace::{STAGE_COUNT, StageId};

/// One listing row, ready to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowView {
    /// 1-based line number shown in the gutter.
    pub line: u32,
    /// Program counter.
    pub pc: Pc,
    /// Instruction text.
    pub text: String,
    /// Stage holding this instruction in the displayed cycle.
    pub stage: Option<StageId>,
    /// Stage 3 MUX output, on the stage 3 row only.
    pub mux: Option<i64>,
    /// Cumulative hits.
    pub hits: u64,
    /// Histogram bar width relative to the widest bar, in `[0, 1]`.
    pub bar_fraction: f64,
    /// The instruction has been in the pipeline at least once.
    pub touched: bool,
}

/// Everything an adapter needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// Loaded program name.
    pub program: Option<String>,
    /// Heading for the listing.
    pub title: Option<String>,
    /// A fetch is outstanding.
    pub loading: bool,
    /// Displayed cycle.
    pub current_cycle: usize,
    /// Number of cycles in the trace.
    pub total_cycles: usize,
    /// Automatic playback is active.
    pub running: bool,
    /// Cycles per second.
    pub rate_hz: u32,
    /// PC per stage for the displayed cycle.
    pub per_stage: [Option<Pc>; STAGE_COUNT],
    /// Stage 3 MUX output for the displayed cycle.
    pub aux_mux: Option<i64>,
    /// Cumulative hits per listed PC.
    pub hit_counts: BTreeMap<Pc, u64>,
    /// Histogram scale, at least 1.
    pub max_hit_count: u64,
    /// Listing rows in order.
    pub rows: Vec<RowView>,
    /// Row holding the stage 3 instruction; the view keeps it centred.
    pub focus_row: Option<usize>,
}

impl Snapshot {
    /// Captures the current state of `session`.
    pub fn capture(session: &PlaybackSession) -> Self {
        let clock = session.clock();
        let hits = session.hits();
        let projection = session.projection();
        let program = session.program();

        let rows = program.map_or_else(Vec::new, |program| {
            program
                .instructions
                .iter()
                .enumerate()
                .map(|(row, inst)| {
                    // Only the first row of a repeated PC is a display target.
                    let target = program.index.row(inst.pc) == Some(row);
                    let stage = target.then(|| projection.stage_of(inst.pc)).flatten();
                    let hits_here = if target { hits.hits(inst.pc) } else { 0 };
                    RowView {
                        line: inst.sequence_index,
                        pc: inst.pc,
                        text: inst.text.clone(),
                        stage,
                        mux: (stage == Some(StageId::Stage3))
                            .then_some(projection.aux_mux)
                            .flatten(),
                        hits: hits_here,
                        bar_fraction: hits_here as f64 / hits.max_hit_count() as f64,
                        touched: stage.is_some() || hits_here > 0,
                    }
                })
                .collect()
        });

        let focus_row = program.and_then(|program| {
            projection
                .occupant(StageId::Stage3)
                .and_then(|pc| program.index.row(pc))
        });

        Self {
            program: program.map(|p| p.name.clone()),
            title: program.map(|p| p.title.clone()),
            loading: session.is_loading(),
            current_cycle: clock.current(),
            total_cycles: clock.total(),
            running: clock.is_running(),
            rate_hz: clock.rate().hz(),
            per_stage: projection.per_stage,
            aux_mux: projection.aux_mux,
            hit_counts: hits.counts().clone(),
            max_hit_count: hits.max_hit_count(),
            rows,
            focus_row,
        }
    }
}
