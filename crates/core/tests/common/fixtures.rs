//! Listing and trace fixtures.
//!
//! The reference program is four straight-line instructions at PCs 0, 4, 8
//! and 12 flowing through the four stages with no stalls, which takes seven
//! cycles. During cycle `c`, stage `s` holds instruction `c - s`, and the
//! stage 3 MUX value is `100 + c`.

use std::fmt::Write as _;

/// Four-instruction listing.
pub const LISTING: &str = "\
0: addi x1, x0, 1
4: addi x2, x0, 2

8: add x3, x1, x2
12: sw x3, 0(x0)
";

/// PCs of [`LISTING`] in order.
pub const PCS: [i64; 4] = [0, 4, 8, 12];

/// Number of cycles in [`straight_line_trace`].
pub const CYCLES: usize = 7;

/// PC held by `stage` during `cycle` in the reference program.
pub fn occupant(cycle: usize, stage: usize) -> Option<i64> {
    let slot = cycle.checked_sub(stage)?;
    PCS.get(slot).copied()
}

/// Renders one `Cycle:` block.
pub fn cycle_block(label: usize, stages: [Option<i64>; 4], mux: Option<i64>) -> String {
    let mut out = format!("Cycle: {label}\n");
    for (stage, pc) in stages.iter().enumerate() {
        if let Some(pc) = pc {
            let _ = writeln!(out, "pc_from_stage_0_in_stage_{stage}: {pc}");
        }
    }
    if let Some(mux) = mux {
        let _ = writeln!(out, "mux_data_from_stage_3_in_stage_3: {mux}");
    }
    out
}

/// Full trace of the reference program.
pub fn straight_line_trace() -> String {
    (0..CYCLES)
        .map(|c| {
            let stages = [0, 1, 2, 3].map(|s| occupant(c, s));
            let mux = stages[3].map(|_| 100 + c as i64);
            cycle_block(c, stages, mux)
        })
        .collect()
}
