//! # Snapshot Tests
//!
//! Row labels, MUX placement, focus row and histogram values.

use pretty_assertions::assert_eq;

use pipeviz_core::config::Config;
use pipeviz_core::sim::*;
use pipeviz_core::trace::StageId;

use crate::common::fixtures;
use crate::common::harness::*;

#[test]
fn empty_session_has_no_rows() {
    let session = PlaybackSession::new(Config::default(), Catalog::default());
    let snapshot = session.snapshot();

    assert_eq!(snapshot.program, None);
    assert!(snapshot.rows.is_empty());
    assert_eq!(snapshot.focus_row, None);
    assert_eq!(snapshot.max_hit_count, 1);
    assert_eq!(snapshot.rate_hz, 5);
}

#[test]
fn loading_flag_follows_the_fetch() {
    let mut session = PlaybackSession::new(Config::default(), Catalog::default());
    let ticket = select(&mut session, "fib");
    assert!(session.snapshot().loading);

    let _ = deliver(&mut session, ticket, fixtures::LISTING, &fixtures::straight_line_trace());
    let snapshot = session.snapshot();
    assert!(!snapshot.loading);
    assert_eq!(snapshot.program.as_deref(), Some("fib"));
    assert_eq!(
        snapshot.title.as_deref(),
        Some("fib/assembly_code.txt --> RV32I 4 STAGE CORE")
    );
}

#[test]
fn rows_carry_line_numbers_and_stage_labels() {
    let mut session = loaded_paused(fixtures::LISTING, &fixtures::straight_line_trace());
    let _ = session.dispatch(Event::Seek(4));
    let snapshot = session.snapshot();

    let lines: Vec<u32> = snapshot.rows.iter().map(|r| r.line).collect();
    assert_eq!(lines, vec![1, 2, 3, 4]);

    let stages: Vec<Option<StageId>> = snapshot.rows.iter().map(|r| r.stage).collect();
    assert_eq!(
        stages,
        vec![None, Some(StageId::Stage3), Some(StageId::Stage2), Some(StageId::Stage1)]
    );
    assert_eq!(snapshot.per_stage, [None, Some(12), Some(8), Some(4)]);
}

#[test]
fn mux_value_sits_on_the_stage_three_row() {
    let mut session = loaded_paused(fixtures::LISTING, &fixtures::straight_line_trace());
    let _ = session.dispatch(Event::Seek(4));
    let snapshot = session.snapshot();

    assert_eq!(snapshot.aux_mux, Some(104));
    let muxes: Vec<Option<i64>> = snapshot.rows.iter().map(|r| r.mux).collect();
    assert_eq!(muxes, vec![None, Some(104), None, None]);
    assert_eq!(snapshot.focus_row, Some(1));
}

#[test]
fn no_focus_until_stage_three_fills() {
    let mut session = loaded_paused(fixtures::LISTING, &fixtures::straight_line_trace());
    let _ = session.dispatch(Event::Seek(2));
    let snapshot = session.snapshot();

    assert_eq!(snapshot.focus_row, None);
    assert!(snapshot.rows.iter().all(|r| r.mux.is_none()));
}

#[test]
fn histogram_and_touched_flags() {
    let mut session = loaded_paused(fixtures::LISTING, &fixtures::straight_line_trace());
    let _ = session.dispatch(Event::Next);
    let snapshot = session.snapshot();

    // Cycle 0 then cycle 1: PC 0 twice, PC 4 once.
    let hits: Vec<u64> = snapshot.rows.iter().map(|r| r.hits).collect();
    assert_eq!(hits, vec![2, 1, 0, 0]);
    assert_eq!(snapshot.max_hit_count, 2);

    let fractions: Vec<f64> = snapshot.rows.iter().map(|r| r.bar_fraction).collect();
    assert_eq!(fractions, vec![1.0, 0.5, 0.0, 0.0]);

    let touched: Vec<bool> = snapshot.rows.iter().map(|r| r.touched).collect();
    assert_eq!(touched, vec![true, true, false, false]);
}

#[test]
fn repeated_pc_only_marks_its_first_row() {
    let session = loaded_paused(
        "0: lui x1, 1\n0: lui x1, 1\n",
        "Cycle: 0\npc_from_stage_0_in_stage_0: 0\n",
    );
    let snapshot = session.snapshot();

    assert_eq!(snapshot.rows.len(), 2);
    assert_eq!(snapshot.rows[0].stage, Some(StageId::Stage0));
    assert_eq!(snapshot.rows[0].hits, 1);
    assert_eq!(snapshot.rows[1].stage, None);
    assert_eq!(snapshot.rows[1].hits, 0);
    assert!(!snapshot.rows[1].touched);
}

#[test]
fn trace_pcs_missing_from_the_listing_are_skipped() {
    let session = loaded_paused(
        "0: nop\n",
        "Cycle: 0\npc_from_stage_0_in_stage_0: 0\npc_from_stage_0_in_stage_3: 400\n",
    );
    let snapshot = session.snapshot();

    assert_eq!(snapshot.per_stage[3], Some(400));
    assert_eq!(snapshot.focus_row, None);
    assert_eq!(snapshot.rows.len(), 1);
    assert!(!snapshot.hit_counts.contains_key(&400));
}

#[test]
fn snapshot_serializes_for_adapters() {
    let session = loaded_paused(fixtures::LISTING, &fixtures::straight_line_trace());
    let json = serde_json::to_value(session.snapshot()).unwrap();

    assert_eq!(json["current_cycle"], 0);
    assert_eq!(json["total_cycles"], 7);
    assert_eq!(json["rows"][0]["stage"], "Stage0");
    assert_eq!(json["rows"][0]["pc"], 0);
}
