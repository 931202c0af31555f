//! Capture integration tests
//!
//! Keypoint frames recorded into the grid at the playing step.

use crate::helpers::*;
use choreo::capture::{landmarks as lm, Keypoint, LANDMARK_COUNT};
use choreo::prelude::*;

fn standing_frame(timestamp: f64) -> KeypointFrame {
    let mut points = vec![Keypoint::default(); LANDMARK_COUNT];
    for (i, x, y) in [
        (lm::NOSE, 0.5, 0.2),
        (lm::LEFT_SHOULDER, 0.55, 0.3),
        (lm::RIGHT_SHOULDER, 0.45, 0.3),
        (lm::LEFT_WRIST, 0.6, 0.1),
        (lm::LEFT_HIP, 0.53, 0.5),
        (lm::RIGHT_HIP, 0.47, 0.5),
        (lm::LEFT_ANKLE, 0.53, 0.7),
        (lm::RIGHT_ANKLE, 0.47, 0.7),
    ] {
        points[i] = Keypoint::new(x, y, 0.0, 0.9);
    }
    KeypointFrame::new(timestamp, points).unwrap()
}

#[test]
fn test_record_at_playing_step() {
    let engine = test_engine(1);
    engine.sequence_mut(|seq| {
        seq.beat_mut(GridPosition::new(1, 2))
            .unwrap()
            .sounds
            .add("snare")
            .unwrap();
    });

    engine.transport().seek(GridPosition::new(1, 2)).unwrap();
    engine.transport().start();
    engine.tick();
    let captured = engine.record_frame(&standing_frame(0.25)).unwrap();
    assert_eq!(captured.grounding.grounded_count(), 2);

    let beat = engine.sequence(|seq| seq.beat(GridPosition::new(1, 2)).cloned().unwrap());
    assert!(beat.joint_info.contains(Joint::LeftWrist));
    assert!(beat.sounds.contains("snare"));

    let result = engine.analyze(1, 2).unwrap();
    assert!(result.driver.is_some());
    assert!(result.stability > 0 && result.stability < 100);
}

#[test]
fn test_capture_from_provider_while_stopped() {
    let engine = test_engine(1);
    let mut provider = ReplayProvider::new([standing_frame(0.0), standing_frame(0.1)]);

    engine.transport().seek(GridPosition::new(1, 5)).unwrap();
    assert!(engine.capture_from(&mut provider).unwrap().is_some());
    assert!(engine.capture_from(&mut provider).unwrap().is_some());
    assert!(engine.capture_from(&mut provider).unwrap().is_none());

    assert_eq!(engine.capture_stats(), (2, 0));
    assert!(engine.sequence(|seq| !seq.beat(GridPosition::new(1, 5)).unwrap().is_empty()));
}

#[test]
fn test_rejected_frame_leaves_sequence() {
    let engine = test_engine(1);
    let mut points = standing_frame(0.0).landmarks().to_vec();
    points[lm::LEFT_SHOULDER].confidence = 0.1;
    points[lm::RIGHT_SHOULDER].confidence = 0.1;
    let frame = KeypointFrame::new(0.0, points).unwrap();

    assert!(matches!(
        engine.record_frame(&frame),
        Err(choreo::Error::Capture(choreo::capture::Error::MissingReference("shoulders")))
    ));
    assert_eq!(engine.capture_stats(), (0, 1));
    assert!(engine.sequence(|seq| seq.beat(GridPosition::new(1, 0)).unwrap().is_empty()));
}
