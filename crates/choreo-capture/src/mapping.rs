//! Landmarks to body-frame joints, and foot contact inferred from them.
//!
//! The body frame has its origin at the hip centre, one unit per torso length
//! (shoulder centre to hip centre), y up and z away from the camera. Every
//! axis is clamped to [-1, 1].

use crate::config::CaptureConfig;
use crate::keypoint::{landmarks as lm, Keypoint, KeypointFrame};
use crate::{Error, Result};
use choreo_core::{
    distance_2d, GroundingState, Joint, JointInfo, JointSample, Side, Vector3,
};
use choreo_dynamics::calculate_center_of_mass;

/// Torso lengths shorter than this (in image units) cannot define a scale.
const MIN_TORSO_LENGTH: f32 = 1e-4;

/// Where a joint is read from in the landmark set.
enum Source {
    Landmark(usize),
    Midpoint(usize, usize),
    /// Halfway between the shoulder centre and the hip centre.
    MidTorso,
}

fn source(joint: Joint) -> Source {
    match joint {
        Joint::Head => Source::Landmark(lm::NOSE),
        Joint::Neck => Source::Midpoint(lm::LEFT_SHOULDER, lm::RIGHT_SHOULDER),
        Joint::Core => Source::MidTorso,
        Joint::LeftShoulder => Source::Landmark(lm::LEFT_SHOULDER),
        Joint::RightShoulder => Source::Landmark(lm::RIGHT_SHOULDER),
        Joint::LeftElbow => Source::Landmark(lm::LEFT_ELBOW),
        Joint::RightElbow => Source::Landmark(lm::RIGHT_ELBOW),
        Joint::LeftWrist => Source::Landmark(lm::LEFT_WRIST),
        Joint::RightWrist => Source::Landmark(lm::RIGHT_WRIST),
        Joint::LeftHip => Source::Landmark(lm::LEFT_HIP),
        Joint::RightHip => Source::Landmark(lm::RIGHT_HIP),
        Joint::LeftKnee => Source::Landmark(lm::LEFT_KNEE),
        Joint::RightKnee => Source::Landmark(lm::RIGHT_KNEE),
        Joint::LeftAnkle => Source::Landmark(lm::LEFT_ANKLE),
        Joint::RightAnkle => Source::Landmark(lm::RIGHT_ANKLE),
    }
}

struct BodyFrame {
    origin: Keypoint,
    scale: f32,
    mirror_x: bool,
}

impl BodyFrame {
    fn locate(frame: &KeypointFrame, config: &CaptureConfig) -> Result<Self> {
        let min = config.min_confidence;
        let hips = pair(frame, lm::LEFT_HIP, lm::RIGHT_HIP, min)
            .ok_or(Error::MissingReference("hips"))?;
        let shoulders = pair(frame, lm::LEFT_SHOULDER, lm::RIGHT_SHOULDER, min)
            .ok_or(Error::MissingReference("shoulders"))?;

        let torso = shoulders.distance_2d(&hips);
        if !(torso.is_finite() && torso >= MIN_TORSO_LENGTH) {
            return Err(Error::MissingReference("torso length"));
        }

        Ok(Self {
            origin: hips,
            scale: torso,
            mirror_x: config.mirror_x,
        })
    }

    fn project(&self, k: &Keypoint) -> Vector3 {
        let x = (k.x - self.origin.x) / self.scale;
        Vector3::new(
            if self.mirror_x { -x } else { x },
            -(k.y - self.origin.y) / self.scale,
            (k.z - self.origin.z) / self.scale,
        )
        .clamp_unit()
    }
}

fn pair(frame: &KeypointFrame, a: usize, b: usize, min_confidence: f32) -> Option<Keypoint> {
    let a = frame.confident(a, min_confidence)?;
    let b = frame.confident(b, min_confidence)?;
    Some(a.midpoint(b))
}

/// Convert a detector frame into body-frame joint samples.
///
/// Keypoints below `min_confidence` are left out. Fails only when the hips
/// or shoulders needed to place the body frame are unusable.
pub fn frame_to_joint_info(frame: &KeypointFrame, config: &CaptureConfig) -> Result<JointInfo> {
    let body = BodyFrame::locate(frame, config)?;
    let min = config.min_confidence;

    let mut joints = JointInfo::new();
    for joint in Joint::ALL {
        let keypoint = match source(joint) {
            Source::Landmark(i) => frame.confident(i, min).copied(),
            Source::Midpoint(a, b) => pair(frame, a, b, min),
            Source::MidTorso => {
                let neck = pair(frame, lm::LEFT_SHOULDER, lm::RIGHT_SHOULDER, min);
                let hips = pair(frame, lm::LEFT_HIP, lm::RIGHT_HIP, min);
                neck.zip(hips).map(|(n, h)| n.midpoint(&h))
            }
        };
        if let Some(k) = keypoint {
            let sample = JointSample::at(body.project(&k)).with_score(k.confidence);
            joints.insert(joint, sample)?;
        }
    }
    Ok(joints)
}

/// Guess foot contact from a body-frame pose.
///
/// The lowest ankle is planted, and so is the other one when it sits within
/// `ground_tolerance` of it. With both feet down the weight goes to the foot
/// horizontally closer to the center of mass. No ankles means airborne.
pub fn infer_grounding(joints: &JointInfo, config: &CaptureConfig) -> GroundingState {
    let left = joints.vector(Joint::LeftAnkle);
    let right = joints.vector(Joint::RightAnkle);
    let lowest = match (left, right) {
        (Some(l), Some(r)) => l.y.min(r.y),
        (Some(l), None) => l.y,
        (None, Some(r)) => r.y,
        (None, None) => return GroundingState::airborne(),
    };
    let planted =
        |ankle: Option<Vector3>| ankle.is_some_and(|a| a.y <= lowest + config.ground_tolerance);

    match (planted(left), planted(right)) {
        (true, true) => {
            let (Some(l), Some(r)) = (left, right) else {
                return GroundingState::both_planted();
            };
            let com = calculate_center_of_mass(joints);
            let to_left = distance_2d(com, l);
            let to_right = distance_2d(com, r);
            let span = to_left + to_right;
            let left_weight = if span > f32::EPSILON && span.is_finite() {
                (100.0 * to_right / span).round().clamp(0.0, 100.0) as u8
            } else {
                50
            };
            GroundingState::planted_with_weight(left_weight)
        }
        (true, false) => GroundingState::single(Side::Left),
        (false, true) => GroundingState::single(Side::Right),
        (false, false) => GroundingState::airborne(),
    }
}
