//! Stage occupancy projection.
//!
//! [`project`] is a pure function of the cycle index: stepping away from a
//! cycle and back yields an identical [`Projection`].

use serde::Serialize;
use tracing::warn;

use crate::common::Pc;
use crate::trace::{CycleRecord, STAGE_COUNT, StageId};

/// Occupancy of the pipeline during one cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Projection {
    /// PC held by each stage, indexed by stage number.
    pub per_stage: [Option<Pc>; STAGE_COUNT],
    /// Stage 3 MUX output; only set while stage 3 holds an instruction.
    pub aux_mux: Option<i64>,
}

impl Projection {
    /// Returns `true` if no stage is occupied.
    pub fn is_empty(&self) -> bool {
        self.per_stage.iter().all(Option::is_none)
    }

    /// PC held by `stage`.
    #[inline]
    pub const fn occupant(&self, stage: StageId) -> Option<Pc> {
        self.per_stage[stage.index()]
    }

    /// Occupied stages in pipeline order.
    pub fn occupants(&self) -> impl Iterator<Item = (StageId, Pc)> + '_ {
        StageId::ALL
            .into_iter()
            .filter_map(|stage| self.occupant(stage).map(|pc| (stage, pc)))
    }

    /// Stage holding `pc`. If the same PC sits in two stages, the later one wins.
    pub fn stage_of(&self, pc: Pc) -> Option<StageId> {
        self.occupants()
            .filter(|&(_, occupant)| occupant == pc)
            .map(|(stage, _)| stage)
            .last()
    }
}

/// Projects the pipeline state at `cycle`.
///
/// An index with no record yields an empty projection and a warning; a stale
/// index from the adapter is recoverable, not fatal.
pub fn project(cycles: &[CycleRecord], cycle: usize) -> Projection {
    let Some(record) = cycles.get(cycle) else {
        warn!(cycle, total = cycles.len(), "no data for cycle");
        return Projection::default();
    };

    let mut projection = Projection::default();
    for stage in StageId::ALL {
        projection.per_stage[stage.index()] = record.stage(stage).and_then(|r| r.value());
    }
    if projection.occupant(StageId::Stage3).is_some() {
        projection.aux_mux = record.mux.and_then(|r| r.value());
    }
    projection
}
