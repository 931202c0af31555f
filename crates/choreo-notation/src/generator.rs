use crate::analysis::analysis_summary;
use crate::english::plain_english;
use crate::shorthand::shorthand;
use choreo_core::{BeatData, GridPosition, Timecode};
use choreo_dynamics::PoseDynamicsResult;
use serde::{Deserialize, Serialize};

/// Three textual views of one beat. None of them is ever blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notation {
    pub shorthand: String,
    pub plain_english: String,
    pub analysis: String,
}

/// Renders [`Notation`]. Output depends only on the inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotationGenerator;

impl NotationGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(
        &self,
        bar: u32,
        step: u32,
        beat: &BeatData,
        analysis: Option<&PoseDynamicsResult>,
        timecode: &Timecode,
    ) -> Notation {
        Notation {
            shorthand: shorthand(bar, step, beat, timecode),
            plain_english: plain_english(beat),
            analysis: analysis_summary(beat, analysis),
        }
    }

    pub fn generate_at(
        &self,
        position: GridPosition,
        beat: &BeatData,
        analysis: Option<&PoseDynamicsResult>,
        timecode: &Timecode,
    ) -> Notation {
        self.generate(position.bar, position.step, beat, analysis, timecode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use choreo_core::{
        ContactCode, GroundingState, Intent, Joint, JointInfo, JointSample, Orientation, Side,
        Vector3,
    };
    use choreo_dynamics::analyze_pose_dynamics;
    use proptest::prelude::*;

    #[test]
    fn test_empty_beat_is_never_blank() {
        let notation = NotationGenerator::new().generate(1, 0, &BeatData::new(), None, &Timecode::ZERO);
        assert!(!notation.shorthand.is_empty());
        assert!(!notation.plain_english.is_empty());
        assert!(!notation.analysis.is_empty());
    }

    #[test]
    fn test_generate_with_analysis() {
        let beat = BeatData::new()
            .with_joints(
                JointInfo::new()
                    .with_vector(Joint::LeftAnkle, Vector3::new(-0.3, -1.0, 0.0))
                    .with_vector(Joint::RightAnkle, Vector3::new(0.3, -1.0, 0.0)),
            )
            .with_grounding(GroundingState::both_planted());
        let dynamics = analyze_pose_dynamics(&beat, None, None);
        let notation =
            NotationGenerator::new().generate(3, 12, &beat, Some(&dynamics), &Timecode::ZERO);

        assert!(notation.shorthand.starts_with("3:12 @00:00.00"));
        assert!(notation.shorthand.contains("LA:N"));
        assert!(notation.shorthand.contains("RA:N"));
        assert!(notation.analysis.contains("(stable)"));
    }

    fn arb_orientation() -> impl Strategy<Value = Orientation> {
        prop_oneof![
            Just(Orientation::Neutral),
            Just(Orientation::Inward),
            Just(Orientation::Outward),
            Just(Orientation::Upward),
        ]
    }

    fn arb_beat() -> impl Strategy<Value = BeatData> {
        (
            proptest::collection::vec((0..Joint::ALL.len(), -1.0f32..1.0, -180.0f32..180.0, arb_orientation()), 0..8),
            any::<bool>(),
            any::<bool>(),
            0u8..=100,
        )
            .prop_map(|(samples, left, right, weight)| {
                let mut joints = JointInfo::new();
                for (idx, y, rotation, orientation) in samples {
                    let sample = JointSample::at(Vector3::new(0.0, y, 0.0))
                        .with_rotation(rotation)
                        .with_orientation(orientation)
                        .with_intent(Intent::Active);
                    joints.insert(Joint::ALL[idx], sample).unwrap();
                }
                let grounding = GroundingState::new(
                    left.then(|| ContactCode::full_plant(Side::Left)),
                    right.then(|| ContactCode::full_plant(Side::Right)),
                    weight,
                )
                .unwrap();
                BeatData::new().with_joints(joints).with_grounding(grounding)
            })
    }

    proptest! {
        #[test]
        fn generation_is_deterministic(beat in arb_beat(), bar in 1u32..64, step in 0u32..16) {
            let dynamics = analyze_pose_dynamics(&beat, None, None);
            let generator = NotationGenerator::new();
            let timecode = Timecode::from_seconds(f64::from(step) * 0.125);
            let first = generator.generate(bar, step, &beat, Some(&dynamics), &timecode);
            let second = generator.generate(bar, step, &beat, Some(&dynamics), &timecode);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn shorthand_lists_every_joint(beat in arb_beat()) {
            let notation = NotationGenerator::new().generate(1, 0, &beat, None, &Timecode::ZERO);
            for joint in beat.joint_info.joints() {
                let needle = format!(" {}:", joint.abbrev());
                prop_assert!(notation.shorthand.contains(&needle));
            }
        }
    }
}
