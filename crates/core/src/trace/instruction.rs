//! Assembly listing parser.
//!
//! Each non-blank line of a listing is `<pc>: <instruction text>`. Only the
//! first colon separates the two, so instruction text such as
//! `lw a0, 0(sp)  # fmt: x` survives intact.

use serde::Serialize;
use tracing::debug;

use super::reading::parse_int;
use crate::common::Pc;

/// One line of the assembly listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Instruction {
    /// Position among the kept lines, starting at 1.
    pub sequence_index: u32,
    /// Program counter; the join key into the cycle trace.
    pub pc: Pc,
    /// Instruction text with surrounding whitespace removed.
    pub text: String,
}

/// Parses an assembly listing.
///
/// Blank lines are skipped and do not consume a sequence index. A line whose
/// PC field holds no number is skipped as well.
pub fn parse_instructions(text: &str) -> Vec<Instruction> {
    let mut out = Vec::new();

    for (line_no, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let (pc_field, body) = line.split_once(':').unwrap_or((line, ""));
        let Some(pc) = parse_int(pc_field) else {
            debug!(line = line_no + 1, "skipping listing line without a numeric pc");
            continue;
        };

        out.push(Instruction {
            sequence_index: out.len() as u32 + 1,
            pc,
            text: body.trim().to_owned(),
        });
    }

    out
}
