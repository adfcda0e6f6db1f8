//! A parsed program.

use std::collections::HashMap;

use crate::common::Pc;
use crate::trace::{CycleRecord, Instruction, parse_cycles, parse_instructions};

/// Lookup from PC to listing row, built once per load.
///
/// A PC from the trace with no entry has no row to highlight; that is a
/// normal condition, not an error. When a listing repeats a PC, the first row
/// is the target.
#[derive(Debug, Clone, Default)]
pub struct ListingIndex {
    rows: HashMap<Pc, usize>,
}

impl ListingIndex {
    /// Builds the index over `instructions`.
    pub fn new(instructions: &[Instruction]) -> Self {
        let mut rows = HashMap::with_capacity(instructions.len());
        for (row, inst) in instructions.iter().enumerate() {
            let _ = rows.entry(inst.pc).or_insert(row);
        }
        Self { rows }
    }

    /// Row displaying `pc`.
    #[inline]
    pub fn row(&self, pc: Pc) -> Option<usize> {
        self.rows.get(&pc).copied()
    }
}

/// Listing and trace of one program, immutable after load.
#[derive(Debug, Clone)]
pub struct Program {
    /// Catalog name.
    pub name: String,
    /// Heading shown above the listing.
    pub title: String,
    /// Parsed listing.
    pub instructions: Vec<Instruction>,
    /// Parsed trace, one record per cycle.
    pub cycles: Vec<CycleRecord>,
    /// PC to listing row.
    pub index: ListingIndex,
}

impl Program {
    /// Parses both texts of a program.
    ///
    /// `listing_file` only feeds the title.
    pub fn parse(name: &str, listing_file: &str, listing: &str, trace: &str) -> Self {
        let instructions = parse_instructions(listing);
        let cycles = parse_cycles(trace);
        let index = ListingIndex::new(&instructions);
        Self {
            name: name.to_owned(),
            title: format!("{name}/{listing_file} --> RV32I 4 STAGE CORE"),
            instructions,
            cycles,
            index,
        }
    }

    /// Number of cycles in the trace.
    #[inline]
    pub fn total_cycles(&self) -> usize {
        self.cycles.len()
    }

    /// PCs of the listing, in listing order.
    pub fn pcs(&self) -> impl Iterator<Item = Pc> + '_ {
        self.instructions.iter().map(|inst| inst.pc)
    }
}
