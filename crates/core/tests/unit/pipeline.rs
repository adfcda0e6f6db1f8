//! # Projection Tests
//!
//! Stage occupancy, MUX gating and out-of-range cycles.

use pretty_assertions::assert_eq;
use rstest::rstest;

use pipeviz_core::pipeline::{Projection, project};
use pipeviz_core::trace::{StageId, parse_cycles};

use crate::common::fixtures;

#[rstest]
#[case(0)]
#[case(3)]
#[case(6)]
fn occupants_follow_the_trace(#[case] cycle: usize) {
    let cycles = parse_cycles(&fixtures::straight_line_trace());
    let projection = project(&cycles, cycle);
    for stage in StageId::ALL {
        assert_eq!(
            projection.occupant(stage),
            fixtures::occupant(cycle, stage.index()),
            "cycle {cycle}, {stage}"
        );
    }
}

#[test]
fn mux_only_with_stage3_occupied() {
    let cycles = parse_cycles(&fixtures::straight_line_trace());
    assert_eq!(project(&cycles, 2).aux_mux, None);
    assert_eq!(project(&cycles, 3).aux_mux, Some(103));
}

#[test]
fn mux_is_hidden_when_stage3_is_idle() {
    let cycles = parse_cycles(&fixtures::cycle_block(0, [Some(0), None, None, None], Some(55)));
    assert_eq!(project(&cycles, 0).aux_mux, None);
}

#[test]
fn malformed_stage_reads_as_idle() {
    let cycles = parse_cycles("Cycle: 0\npc_from_stage_0_in_stage_3: NaN\nmux_data_from_stage_3_in_stage_3: 9\n");
    let projection = project(&cycles, 0);
    assert!(projection.is_empty());
    assert_eq!(projection.aux_mux, None);
}

#[test]
fn out_of_range_is_empty() {
    let cycles = parse_cycles(&fixtures::straight_line_trace());
    assert_eq!(project(&cycles, fixtures::CYCLES), Projection::default());
    assert_eq!(project(&[], 0), Projection::default());
}

#[test]
fn spec_example_projection() {
    let cycles = parse_cycles("Cycle: 0\npc_from_stage_0_in_stage_0: 0\npc_from_stage_0_in_stage_1: 4\n");
    let projection = project(&cycles, 0);
    assert_eq!(
        projection.occupants().collect::<Vec<_>>(),
        vec![(StageId::Stage0, 0), (StageId::Stage1, 4)]
    );
}

#[test]
fn repeated_pc_reports_the_later_stage() {
    let cycles = parse_cycles(&fixtures::cycle_block(0, [Some(8), None, Some(8), None], None));
    assert_eq!(project(&cycles, 0).stage_of(8), Some(StageId::Stage2));
    assert_eq!(project(&cycles, 0).stage_of(4), None);
}
