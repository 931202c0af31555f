//! Kinetic flow: which joint drives a movement, which one anchors it, and the
//! chain between them.
//!
//! [`HeuristicFlow`] reproduces the classic readout (highest joint drives, a
//! fixed arm chain, momentum from height). [`ChainFlow`] walks the skeleton
//! from anchor to driver and measures momentum from actual displacement when
//! the previous beat is known.

use crate::config::DynamicsConfig;
use crate::motion::MotionContext;
use choreo_core::{GroundingState, Joint, JointInfo, Side};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Driver, anchor and the joint chain connecting them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KineticFlow {
    pub path: Vec<Joint>,
    /// `None` when no joint has a finite height.
    pub driver: Option<Joint>,
    pub anchor: Joint,
    pub terminus: Option<Joint>,
    pub momentum: f32,
}

/// Pluggable kinetic flow algorithm.
pub trait KineticFlowStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn flow(
        &self,
        joints: &JointInfo,
        grounding: &GroundingState,
        motion: &MotionContext<'_>,
        config: &DynamicsConfig,
    ) -> KineticFlow;
}

/// Highest joint in the body frame. Ties go to the first in joint order.
///
/// Joints with a non-finite height never drive.
pub fn find_driver(joints: &JointInfo) -> Option<Joint> {
    let mut best: Option<(Joint, f32)> = None;
    for (&joint, sample) in joints {
        let y = sample.vector.y;
        if !y.is_finite() {
            continue;
        }
        if best.map_or(true, |(_, top)| y > top) {
            best = Some((joint, y));
        }
    }
    best.map(|(joint, _)| joint)
}

/// Left ankle when the left foot is down, otherwise the right ankle.
///
/// The right ankle is returned even when both feet are lifted.
pub fn find_anchor(grounding: &GroundingState) -> Joint {
    if grounding.is_grounded(Side::Left) {
        Joint::LeftAnkle
    } else {
        Joint::RightAnkle
    }
}

fn static_momentum(joints: &JointInfo, driver: Option<Joint>, config: &DynamicsConfig) -> f32 {
    driver
        .and_then(|d| joints.vector(d))
        .map_or(0.0, |v| v.y * config.momentum_scale)
}

/// Max-height driver with a fixed core-to-wrist chain.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicFlow;

impl HeuristicFlow {
    /// Core, neck, then shoulder, elbow and wrist on `side`.
    pub fn arm_chain(side: Side) -> Vec<Joint> {
        match side {
            Side::Left => vec![
                Joint::Core,
                Joint::Neck,
                Joint::LeftShoulder,
                Joint::LeftElbow,
                Joint::LeftWrist,
            ],
            Side::Right => vec![
                Joint::Core,
                Joint::Neck,
                Joint::RightShoulder,
                Joint::RightElbow,
                Joint::RightWrist,
            ],
        }
    }
}

impl KineticFlowStrategy for HeuristicFlow {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn flow(
        &self,
        joints: &JointInfo,
        grounding: &GroundingState,
        _motion: &MotionContext<'_>,
        config: &DynamicsConfig,
    ) -> KineticFlow {
        let driver = find_driver(joints);
        let side = driver.and_then(Joint::side).unwrap_or(Side::Right);
        let path = if driver.is_some() {
            Self::arm_chain(side)
        } else {
            Vec::new()
        };

        KineticFlow {
            terminus: path.last().copied(),
            path,
            driver,
            anchor: find_anchor(grounding),
            momentum: static_momentum(joints, driver, config),
        }
    }
}

/// Bones of the tracked skeleton.
pub const SKELETON_EDGES: [(Joint, Joint); 14] = [
    (Joint::Head, Joint::Neck),
    (Joint::Neck, Joint::Core),
    (Joint::Neck, Joint::LeftShoulder),
    (Joint::Neck, Joint::RightShoulder),
    (Joint::LeftShoulder, Joint::LeftElbow),
    (Joint::LeftElbow, Joint::LeftWrist),
    (Joint::RightShoulder, Joint::RightElbow),
    (Joint::RightElbow, Joint::RightWrist),
    (Joint::Core, Joint::LeftHip),
    (Joint::Core, Joint::RightHip),
    (Joint::LeftHip, Joint::LeftKnee),
    (Joint::LeftKnee, Joint::LeftAnkle),
    (Joint::RightHip, Joint::RightKnee),
    (Joint::RightKnee, Joint::RightAnkle),
];

/// Joints one bone away from `joint`, in joint order.
pub fn neighbors(joint: Joint) -> impl Iterator<Item = Joint> {
    let mut out: Vec<Joint> = SKELETON_EDGES
        .iter()
        .filter_map(move |&(a, b)| match joint {
            j if j == a => Some(b),
            j if j == b => Some(a),
            _ => None,
        })
        .collect();
    out.sort();
    out.into_iter()
}

/// Shortest bone path from `from` to `to`, both ends included.
pub fn skeleton_path(from: Joint, to: Joint) -> Vec<Joint> {
    let mut parent: [Option<Joint>; Joint::ALL.len()] = [None; Joint::ALL.len()];
    let mut seen = [false; Joint::ALL.len()];
    let mut queue = VecDeque::from([from]);
    seen[from as usize] = true;

    while let Some(joint) = queue.pop_front() {
        if joint == to {
            break;
        }
        for next in neighbors(joint) {
            if !seen[next as usize] {
                seen[next as usize] = true;
                parent[next as usize] = Some(joint);
                queue.push_back(next);
            }
        }
    }

    let mut path = vec![to];
    let mut cursor = to;
    while let Some(prev) = parent[cursor as usize] {
        path.push(prev);
        cursor = prev;
    }
    path.reverse();
    path
}

/// Skeleton traversal from anchor to driver, with measured momentum.
///
/// Momentum is the driver's speed times `momentum_scale`, signed by its
/// vertical direction. Without a usable previous beat it falls back to the
/// height heuristic.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChainFlow;

impl KineticFlowStrategy for ChainFlow {
    fn name(&self) -> &'static str {
        "chain"
    }

    fn flow(
        &self,
        joints: &JointInfo,
        grounding: &GroundingState,
        motion: &MotionContext<'_>,
        config: &DynamicsConfig,
    ) -> KineticFlow {
        let driver = find_driver(joints);
        let anchor = find_anchor(grounding);
        let path = driver.map_or_else(Vec::new, |d| skeleton_path(anchor, d));

        let measured = driver
            .and_then(|d| joints.vector(d).and_then(|v| motion.joint_velocity(d, v)))
            .map(|velocity| {
                let sign = if velocity.y < 0.0 { -1.0 } else { 1.0 };
                sign * velocity.length() * config.momentum_scale
            });

        KineticFlow {
            terminus: driver,
            path,
            driver,
            anchor,
            momentum: measured.unwrap_or_else(|| static_momentum(joints, driver, config)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use choreo_core::{BeatData, Vector3};

    fn raised_right_arm() -> JointInfo {
        JointInfo::new()
            .with_vector(Joint::Head, Vector3::new(0.0, 0.8, 0.0))
            .with_vector(Joint::RightWrist, Vector3::new(0.4, 1.0, 0.0))
            .with_vector(Joint::LeftAnkle, Vector3::new(-0.2, -1.0, 0.0))
            .with_vector(Joint::RightAnkle, Vector3::new(0.2, -1.0, 0.0))
    }

    #[test]
    fn test_driver_is_highest_joint() {
        assert_eq!(find_driver(&raised_right_arm()), Some(Joint::RightWrist));
        assert_eq!(find_driver(&JointInfo::new()), None);
    }

    #[test]
    fn test_driver_skips_non_finite_heights() {
        let joints = raised_right_arm().with_vector(Joint::Head, Vector3::new(0.0, f32::NAN, 0.0));
        assert_eq!(find_driver(&joints), Some(Joint::RightWrist));

        let flow = HeuristicFlow.flow(
            &joints,
            &GroundingState::both_planted(),
            &MotionContext::default(),
            &DynamicsConfig::default(),
        );
        assert_eq!(flow.driver, Some(Joint::RightWrist));
        assert!(flow.momentum.is_finite());

        let lost = JointInfo::new().with_vector(Joint::Head, Vector3::new(0.0, f32::INFINITY, 0.0));
        assert_eq!(find_driver(&lost), None);
    }

    #[test]
    fn test_driver_ties_keep_first() {
        let joints = JointInfo::new()
            .with_vector(Joint::LeftWrist, Vector3::new(-0.4, 1.0, 0.0))
            .with_vector(Joint::RightWrist, Vector3::new(0.4, 1.0, 0.0));
        assert_eq!(find_driver(&joints), Some(Joint::LeftWrist));
    }

    #[test]
    fn test_anchor_falls_back_to_right() {
        assert_eq!(find_anchor(&GroundingState::both_planted()), Joint::LeftAnkle);
        assert_eq!(find_anchor(&GroundingState::single(Side::Right)), Joint::RightAnkle);
        assert_eq!(find_anchor(&GroundingState::airborne()), Joint::RightAnkle);
    }

    #[test]
    fn test_heuristic_flow() {
        let flow = HeuristicFlow.flow(
            &raised_right_arm(),
            &GroundingState::both_planted(),
            &MotionContext::default(),
            &DynamicsConfig::default(),
        );
        assert_eq!(flow.driver, Some(Joint::RightWrist));
        assert_eq!(flow.anchor, Joint::LeftAnkle);
        assert_eq!(flow.path, HeuristicFlow::arm_chain(Side::Right));
        assert_eq!(flow.terminus, Some(Joint::RightWrist));
        assert_relative_eq!(flow.momentum, 50.0);
    }

    #[test]
    fn test_heuristic_flow_empty_pose() {
        let flow = HeuristicFlow.flow(
            &JointInfo::new(),
            &GroundingState::airborne(),
            &MotionContext::default(),
            &DynamicsConfig::default(),
        );
        assert_eq!(flow.driver, None);
        assert!(flow.path.is_empty());
        assert_eq!(flow.terminus, None);
        assert_eq!(flow.anchor, Joint::RightAnkle);
        assert_eq!(flow.momentum, 0.0);
    }

    #[test]
    fn test_skeleton_path() {
        assert_eq!(
            skeleton_path(Joint::LeftAnkle, Joint::RightWrist),
            vec![
                Joint::LeftAnkle,
                Joint::LeftKnee,
                Joint::LeftHip,
                Joint::Core,
                Joint::Neck,
                Joint::RightShoulder,
                Joint::RightElbow,
                Joint::RightWrist,
            ]
        );
        assert_eq!(skeleton_path(Joint::Head, Joint::Head), vec![Joint::Head]);
    }

    #[test]
    fn test_every_joint_reachable() {
        for joint in Joint::ALL {
            let path = skeleton_path(Joint::RightAnkle, joint);
            assert_eq!(path.first(), Some(&Joint::RightAnkle));
            assert_eq!(path.last(), Some(&joint));
        }
    }

    #[test]
    fn test_chain_flow_measures_displacement() {
        let current = raised_right_arm();
        let previous = BeatData::new().with_joints(
            current
                .clone()
                .with_vector(Joint::RightWrist, Vector3::new(0.4, 0.5, 0.0)),
        );
        let motion = MotionContext::new(Some(&previous), Some(0.25));
        let flow = ChainFlow.flow(
            &current,
            &GroundingState::single(Side::Left),
            &motion,
            &DynamicsConfig::default(),
        );
        assert_eq!(flow.anchor, Joint::LeftAnkle);
        assert_eq!(flow.path.first(), Some(&Joint::LeftAnkle));
        assert_eq!(flow.terminus, Some(Joint::RightWrist));
        // 0.5 up in 0.25s = 2 units/s
        assert_relative_eq!(flow.momentum, 100.0);
    }

    #[test]
    fn test_chain_flow_without_history_uses_height() {
        let flow = ChainFlow.flow(
            &raised_right_arm(),
            &GroundingState::both_planted(),
            &MotionContext::default(),
            &DynamicsConfig::default(),
        );
        assert_relative_eq!(flow.momentum, 50.0);
    }
}
