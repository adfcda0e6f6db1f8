//! Per-instruction hit statistics.
//!
//! This module tracks how often each listed instruction was seen in the
//! pipeline. It provides:
//! 1. **Hit counts:** One increment per observation in which a PC occupies any stage.
//! 2. **Histogram scaling:** `max_hit_count` (floor 1) and per-PC bar fractions.
//!
//! Counts follow visits, not forward progress: stepping back over a cycle and
//! forward again counts its occupants again.

use std::collections::{BTreeMap, HashSet};

use crate::common::Pc;
use crate::pipeline::Projection;

/// Cumulative hit counts for the PCs of one listing.
#[derive(Debug, Clone)]
pub struct HitAccumulator {
    counts: BTreeMap<Pc, u64>,
    max_hit_count: u64,
}

impl Default for HitAccumulator {
    fn default() -> Self {
        Self::new(std::iter::empty())
    }
}

impl HitAccumulator {
    /// Creates an accumulator tracking `pcs`, all starting at zero.
    ///
    /// PCs outside this set have no row to draw and are never counted.
    pub fn new(pcs: impl IntoIterator<Item = Pc>) -> Self {
        Self {
            counts: pcs.into_iter().map(|pc| (pc, 0)).collect(),
            max_hit_count: 1,
        }
    }

    /// Counts every tracked occupant of `projection` once.
    pub fn observe(&mut self, projection: &Projection) {
        let mut seen = HashSet::new();
        for (_, pc) in projection.occupants() {
            if !seen.insert(pc) {
                continue;
            }
            if let Some(count) = self.counts.get_mut(&pc) {
                *count += 1;
                self.max_hit_count = self.max_hit_count.max(*count);
            }
        }
    }

    /// Hits recorded for `pc` (zero for untracked PCs).
    pub fn hits(&self, pc: Pc) -> u64 {
        self.counts.get(&pc).copied().unwrap_or(0)
    }

    /// Largest count, never below 1.
    #[inline]
    pub const fn max_hit_count(&self) -> u64 {
        self.max_hit_count
    }

    /// Histogram bar width for `pc` as a fraction of the widest bar.
    pub fn bar_fraction(&self, pc: Pc) -> f64 {
        self.hits(pc) as f64 / self.max_hit_count as f64
    }

    /// All tracked counts, ordered by PC.
    pub const fn counts(&self) -> &BTreeMap<Pc, u64> {
        &self.counts
    }
}
