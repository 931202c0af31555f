//! Timing integration tests
//!
//! Tempo and meter changes, timecodes and transport looping.

use approx::assert_abs_diff_eq;
use crate::helpers::tolerances::TIME_EPSILON;
use crate::helpers::*;
use choreo::prelude::*;
use choreo::Timecode;

#[test]
fn test_default_step_length() {
    let engine = test_engine(1);
    // 16 steps over four quarter notes at 120 BPM
    assert_abs_diff_eq!(engine.seconds_per_step().unwrap(), 0.125, epsilon = TIME_EPSILON);
}

#[test]
fn test_three_four_step_length() {
    let engine = test_engine(1);
    engine
        .set_time_signature(TimeSignature::new(3, 4))
        .unwrap();
    // 16 steps spread over three beats
    let expected = 60.0 / 120.0 / (16.0 / 3.0);
    assert_abs_diff_eq!(engine.seconds_per_step().unwrap(), expected, epsilon = TIME_EPSILON);
    assert_abs_diff_eq!(engine.transport().seconds_per_step(), expected, epsilon = TIME_EPSILON);
}

#[test]
fn test_invalid_time_signature_rejected() {
    let engine = test_engine(1);
    assert!(engine
        .set_time_signature(TimeSignature::new(4, 3))
        .is_err());
    assert_eq!(engine.grid().time_signature(), TimeSignature::new(4, 4));
}

#[test]
fn test_timecodes_across_bars() {
    let engine = test_engine(3);
    assert_eq!(engine.timecode(1, 0).unwrap(), Timecode::default());
    assert_eq!(engine.timecode(2, 0).unwrap().to_string(), "00:02.00");
    assert_eq!(engine.timecode(3, 15).unwrap().to_string(), "00:05.87");

    engine.set_bpm(60.0).unwrap();
    assert_eq!(engine.timecode(2, 0).unwrap().to_string(), "00:04.00");
}

#[test]
fn test_transport_loops_over_sequence() {
    let engine = test_engine(2);
    engine.transport().start();

    let positions: Vec<GridPosition> = (0..33)
        .filter_map(|_| engine.tick())
        .map(|report| report.tick.position)
        .collect();

    assert_eq!(positions.len(), 33);
    assert_eq!(positions[0], GridPosition::new(1, 0));
    assert_eq!(positions[16], GridPosition::new(2, 0));
    assert_eq!(positions[31], GridPosition::new(2, 15));
    assert_eq!(positions[32], GridPosition::new(1, 0));
}

#[test]
fn test_seek_then_play() {
    let engine = test_engine(2);
    engine.transport().seek(GridPosition::new(2, 4)).unwrap();
    engine.transport().start();

    let report = engine.tick().unwrap();
    assert_eq!(report.tick.position, GridPosition::new(2, 4));
    assert_eq!(report.tick.global_step, 20);
    assert_abs_diff_eq!(report.tick.elapsed, 2.5, epsilon = TIME_EPSILON);

    assert!(engine.transport().seek(GridPosition::new(3, 0)).is_err());
}

#[test]
fn test_tempo_change_while_playing() {
    let engine = test_engine(1);
    engine.transport().start();
    engine.tick();
    engine.set_bpm(240.0).unwrap();

    let report = engine.tick().unwrap();
    assert_eq!(report.tick.position, GridPosition::new(1, 1));
    assert_abs_diff_eq!(report.tick.elapsed, 0.0625, epsilon = TIME_EPSILON);
}
