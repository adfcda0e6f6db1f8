//! Trace file parsers.
//!
//! This module converts the two text inputs of a program into records:
//! 1. **Listing:** `<pc>: <instruction text>` lines become [`Instruction`]s.
//! 2. **Cycle trace:** `Cycle:`-delimited blocks become [`CycleRecord`]s.
//! 3. **Readings:** Integer fields that fail to parse are kept as
//!    [`Reading::Malformed`] instead of aborting the parse.

/// Cycle trace records and parser.
pub mod cycle;
/// Instruction listing records and parser.
pub mod instruction;
/// Lenient integer parsing.
pub mod reading;

pub use cycle::{CycleRecord, STAGE_COUNT, StageId, parse_cycles};
pub use instruction::{Instruction, parse_instructions};
pub use reading::Reading;
