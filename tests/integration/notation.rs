//! Notation integration tests
//!
//! The three text views produced for authored beats.

use crate::helpers::*;
use choreo::core::{AnkleOrientation, JointSample, Orientation};
use choreo::prelude::*;

#[test]
fn test_empty_beat_notation() {
    let engine = test_engine(1);
    let notation = engine.notate(1, 0).unwrap();
    assert_eq!(notation.shorthand, "1:00 @00:00.00 | L:- R:- W50/50 | -");
    assert_eq!(notation.plain_english, "Nothing happens on this beat.");
    assert!(notation.analysis.starts_with("Stability 0/100 (airborne)"));
}

#[test]
fn test_sound_only_beat() {
    let engine = test_engine(1);
    engine.sequence_mut(|seq| {
        let beat = seq.beat_mut(GridPosition::new(1, 4)).unwrap();
        beat.sounds.add("kick").unwrap();
        beat.sounds.add("clap").unwrap();
        beat.syllable = Some("ha".to_string());
    });

    let notation = engine.notate(1, 4).unwrap();
    assert_eq!(
        notation.plain_english,
        "Triggers kick and clap, says \"ha\"."
    );
    assert!(notation.shorthand.starts_with("1:04 @00:00.50"));
    assert!(notation.shorthand.ends_with("| S:kick+clap | \"ha\""));
}

#[test]
fn test_reaching_pose_notation() {
    let engine = test_engine(2);
    put(&engine, 2, 0, reaching_beat(0.9));

    let notation = engine.notate(2, 0).unwrap();
    assert!(notation.shorthand.starts_with("2:00 @00:02.00"));
    assert!(notation.shorthand.contains("RW"));
    assert_eq!(
        notation.plain_english,
        "Right wrist, left ankle and right ankle are placed, left foot planted flat, right foot planted flat."
    );
    assert_eq!(
        notation.analysis,
        "Stability 56/100 (shifting); right wrist drives from the left ankle; momentum 45.0 (explosive)."
    );
}

#[test]
fn test_detailed_joints_described() {
    let engine = test_engine(1);
    let mut joints = stance();
    joints
        .insert(
            Joint::LeftShoulder,
            JointSample::at(Vector3::new(-0.2, 0.5, 0.0))
                .with_rotation(45.0)
                .with_orientation(Orientation::Neutral),
        )
        .unwrap();
    joints
        .insert(
            Joint::LeftAnkle,
            JointSample::at(Vector3::new(-0.3, -1.0, 0.0))
                .with_ankle(AnkleOrientation {
                    sagittal: -20.0,
                    ..AnkleOrientation::default()
                }),
        )
        .unwrap();
    put(
        &engine,
        1,
        0,
        BeatData::new()
            .with_joints(joints)
            .with_grounding(GroundingState::both_planted()),
    );

    let notation = engine.notate(1, 0).unwrap();
    assert!(notation.plain_english.starts_with("Left shoulder rotated 45°"));
    assert!(notation.plain_english.contains("left ankle pointed 20°"));
    assert!(notation.shorthand.contains("LS:"));
}

#[test]
fn test_playback_notation_matches_notate() {
    let engine = test_engine(1);
    put(&engine, 1, 0, reaching_beat(0.7));

    engine.transport().start();
    let report = engine.tick().unwrap();
    assert_eq!(report.notation, engine.notate(1, 0).unwrap());
}
