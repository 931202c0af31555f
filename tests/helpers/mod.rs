//! Test helpers and fixtures for choreo integration tests
//!
//! ## Tolerance Levels
//!
//! Use the appropriate tolerance from [`tolerances`] module:
//! - `POSITION_EPSILON` (1e-5): joint coordinates, center of mass
//! - `MOMENTUM_EPSILON` (1e-3): scaled momentum values
//! - `TIME_EPSILON` (1e-9): seconds per step, elapsed time

#![allow(dead_code)]

pub mod tolerances;

use choreo::prelude::*;

/// Route engine logs to the test harness. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// 120 BPM, 4/4, `bars` empty bars.
pub fn test_engine(bars: u32) -> ChoreoEngine {
    init_tracing();
    ChoreoEngine::builder()
        .bars(bars)
        .build()
        .expect("Failed to create test engine")
}

/// Feet shoulder-width apart on the floor.
pub fn stance() -> JointInfo {
    JointInfo::new()
        .with_vector(Joint::LeftAnkle, Vector3::new(-0.3, -1.0, 0.0))
        .with_vector(Joint::RightAnkle, Vector3::new(0.3, -1.0, 0.0))
}

/// [`stance`] with both feet planted and the right wrist at `wrist_height`.
pub fn reaching_beat(wrist_height: f32) -> BeatData {
    BeatData::new()
        .with_joints(stance().with_vector(Joint::RightWrist, Vector3::new(0.4, wrist_height, 0.0)))
        .with_grounding(GroundingState::both_planted())
}

/// Write `beat` into the engine's sequence.
pub fn put(engine: &ChoreoEngine, bar: u32, step: u32, beat: BeatData) {
    engine.sequence_mut(|seq| {
        *seq.beat_mut(GridPosition::new(bar, step))
            .expect("position out of range") = beat;
    });
}
