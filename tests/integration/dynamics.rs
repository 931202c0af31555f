//! Dynamics integration tests
//!
//! Stability, kinetic flow and step-to-step motion through the engine.

use crate::helpers::tolerances::{MOMENTUM_EPSILON, POSITION_EPSILON};
use crate::helpers::*;
use choreo::prelude::*;

#[test]
fn test_planted_stance_is_fully_stable() {
    let engine = test_engine(1);
    put(
        &engine,
        1,
        0,
        BeatData::new()
            .with_joints(stance())
            .with_grounding(GroundingState::both_planted()),
    );

    let result = engine.analyze(1, 0).unwrap();
    assert_eq!(result.stability, 100);
    assert!((result.center_of_mass.y + 1.0).abs() < POSITION_EPSILON);
    assert!(result.center_of_mass.x.abs() < POSITION_EPSILON);
}

#[test]
fn test_airborne_scores_zero() {
    let engine = test_engine(1);
    put(&engine, 1, 0, BeatData::new().with_joints(stance()));

    let result = engine.analyze(1, 0).unwrap();
    assert_eq!(result.stability, 0);
}

#[test]
fn test_single_foot_balance() {
    let engine = test_engine(1);
    let over_foot = JointInfo::new()
        .with_vector(Joint::LeftAnkle, Vector3::new(-0.3, -1.0, 0.0))
        .with_vector(Joint::Core, Vector3::new(-0.3, 0.0, 0.0))
        .with_vector(Joint::Head, Vector3::new(-0.3, 1.0, 0.0));
    put(
        &engine,
        1,
        0,
        BeatData::new()
            .with_joints(over_foot.clone())
            .with_grounding(GroundingState::single(Side::Left)),
    );

    let leaning = over_foot.with_vector(Joint::Head, Vector3::new(-0.2, 1.0, 0.0));
    put(
        &engine,
        1,
        1,
        BeatData::new()
            .with_joints(leaning)
            .with_grounding(GroundingState::single(Side::Left)),
    );

    let balanced = engine.analyze(1, 0).unwrap().stability;
    let leaning = engine.analyze(1, 1).unwrap().stability;
    assert_eq!(balanced, 100);
    assert!(leaning < balanced && leaning > 50, "leaning = {leaning}");
}

#[test]
fn test_heuristic_flow_follows_highest_joint() {
    let engine = test_engine(1);
    put(&engine, 1, 0, reaching_beat(0.9));

    let result = engine.analyze(1, 0).unwrap();
    assert_eq!(result.driver, Some(Joint::RightWrist));
    assert_eq!(result.anchor, Joint::LeftAnkle);
    assert_eq!(result.terminus, Some(Joint::RightWrist));
    assert_eq!(result.path.first(), Some(&Joint::Core));
    assert!((result.momentum - 45.0).abs() < MOMENTUM_EPSILON);
    // First step has no previous beat to compare against
    assert!(result.com_velocity.is_none());
}

#[test]
fn test_chain_flow_uses_motion() {
    init_tracing();
    let engine = ChoreoEngine::builder()
        .flow_strategy(ChainFlow)
        .build()
        .unwrap();
    put(&engine, 1, 0, reaching_beat(0.5));
    put(&engine, 1, 1, reaching_beat(0.9));

    let result = engine.analyze(1, 1).unwrap();
    assert_eq!(result.driver, Some(Joint::RightWrist));
    assert_eq!(result.path.first(), Some(&Joint::LeftAnkle));
    assert_eq!(result.path.last(), Some(&Joint::RightWrist));
    // 0.4 units in one 0.125 s step, scaled by 50
    assert!((result.momentum - 160.0).abs() < MOMENTUM_EPSILON * 100.0);

    let com_velocity = result.com_velocity.unwrap();
    assert!(com_velocity.y > 0.0);
    assert!(com_velocity.x.abs() < POSITION_EPSILON);
}

#[test]
fn test_empty_step_has_no_driver() {
    let engine = test_engine(1);
    let result = engine.analyze(1, 3).unwrap();
    assert_eq!(result.driver, None);
    assert!(result.path.is_empty());
    assert_eq!(result.momentum, 0.0);
}
