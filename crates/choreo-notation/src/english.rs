//! Plain-English description of a beat.

use choreo_core::{BeatData, GroundingState, Joint, JointSample, Orientation, Side};

/// Sentence used for a beat with nothing on it.
pub const EMPTY_BEAT: &str = "Nothing happens on this beat.";

/// Describe which joints are engaged and how, then the feet, then the sounds.
pub fn plain_english(beat: &BeatData) -> String {
    if beat.is_empty() {
        return EMPTY_BEAT.to_string();
    }

    let mut clauses: Vec<String> = Vec::new();
    let mut placed: Vec<Joint> = Vec::new();
    for (&joint, sample) in &beat.joint_info {
        match describe_joint(joint, sample) {
            Some(clause) => clauses.push(clause),
            None => placed.push(joint),
        }
    }
    if !placed.is_empty() {
        let names: Vec<&str> = placed.iter().map(|j| j.name()).collect();
        let verb = if names.len() == 1 { "is" } else { "are" };
        clauses.push(format!("{} {verb} placed", join_list(&names)));
    }

    clauses.extend(describe_feet(&beat.grounding, !beat.joint_info.is_empty()));

    if !beat.sounds.is_empty() {
        let sounds: Vec<&str> = beat.sounds.iter().collect();
        clauses.push(format!("triggers {}", join_list(&sounds)));
    }
    if let Some(syllable) = beat.syllable.as_deref().filter(|s| !s.is_empty()) {
        clauses.push(format!("says \"{syllable}\""));
    }
    if let Some(head_over) = beat.head_over.as_deref().filter(|s| !s.is_empty()) {
        clauses.push(format!("head over {head_over}"));
    }
    if let Some(cue) = beat.media_cue_point.filter(|c| c.is_finite()) {
        clauses.push(format!("cued to {cue:.2}s of media"));
    }

    sentence(&clauses)
}

/// `None` when the joint has nothing beyond its position.
fn describe_joint(joint: Joint, sample: &JointSample) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();
    if let Some(rotation) = sample.rotation {
        parts.push(format!("rotated {rotation:.0}°"));
    }
    if let Some(orientation) = sample.orientation.filter(|o| *o != Orientation::Neutral) {
        parts.push(orientation.name().to_string());
    }
    if let Some(extension) = sample.extension {
        parts.push(format!("extended to {:.0}%", extension * 100.0));
    }
    if let Some(ankle) = sample.ankle() {
        if ankle.sagittal >= 1.0 {
            parts.push(format!("dorsiflexed {:.0}°", ankle.sagittal));
        } else if ankle.sagittal <= -1.0 {
            parts.push(format!("pointed {:.0}°", -ankle.sagittal));
        }
    }
    if let Some(intent) = sample.intent {
        parts.push(format!("({})", intent.name()));
    }

    if parts.is_empty() {
        None
    } else {
        Some(format!("{} {}", joint.name(), parts.join(" ")))
    }
}

fn describe_feet(grounding: &GroundingState, has_pose: bool) -> Vec<String> {
    let mut clauses = Vec::new();
    for side in [Side::Left, Side::Right] {
        if let Some(code) = grounding.contact(side) {
            clauses.push(format!("{} foot {}", side.name(), code.kind().description()));
        }
    }

    match grounding.grounded_count() {
        0 if has_pose => clauses.push("both feet off the floor".to_string()),
        2 if grounding.left_weight() != 50 => {
            let (side, weight) = if grounding.left_weight() > 50 {
                (Side::Left, grounding.left_weight())
            } else {
                (Side::Right, grounding.right_weight())
            };
            clauses.push(format!("{weight}% of the weight on the {} foot", side.name()));
        }
        _ => {}
    }
    clauses
}

/// `a`, `a and b`, `a, b and c`.
fn join_list(items: &[&str]) -> String {
    match items {
        [] => String::new(),
        [only] => only.to_string(),
        [init @ .., last] => format!("{} and {last}", init.join(", ")),
    }
}

fn sentence(clauses: &[String]) -> String {
    let body = clauses.join(", ");
    let mut chars = body.chars();
    match chars.next() {
        Some(first) => format!("{}{}.", first.to_uppercase(), chars.as_str()),
        None => EMPTY_BEAT.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use choreo_core::{ContactCode, Intent, JointInfo, Vector3};

    #[test]
    fn test_empty_beat_sentence() {
        assert_eq!(plain_english(&BeatData::new()), EMPTY_BEAT);
    }

    #[test]
    fn test_rotated_shoulder_and_heel() {
        let mut joints = JointInfo::new();
        joints
            .insert(
                Joint::LeftShoulder,
                JointSample::at(Vector3::new(-0.2, 0.6, 0.0))
                    .with_rotation(30.0)
                    .with_orientation(Orientation::Outward),
            )
            .unwrap();
        let mut beat = BeatData::new().with_joints(joints);
        beat.grounding
            .set_contact(Side::Right, Some(ContactCode::new("RF3")));

        assert_eq!(
            plain_english(&beat),
            "Left shoulder rotated 30° outward, right foot planted on heel."
        );
    }

    #[test]
    fn test_placed_joints_grouped() {
        let joints = JointInfo::new()
            .with_vector(Joint::Head, Vector3::new(0.0, 0.9, 0.0))
            .with_vector(Joint::Neck, Vector3::new(0.0, 0.7, 0.0))
            .with_vector(Joint::Core, Vector3::ZERO);
        let beat = BeatData::new().with_joints(joints);
        assert_eq!(
            plain_english(&beat),
            "Head, neck and core are placed, both feet off the floor."
        );
    }

    #[test]
    fn test_weight_shift_and_sounds() {
        let mut joints = JointInfo::new();
        joints
            .insert(
                Joint::RightWrist,
                JointSample::at(Vector3::new(0.4, 1.0, 0.0)).with_intent(Intent::Percussive),
            )
            .unwrap();
        let mut beat = BeatData::new()
            .with_joints(joints)
            .with_grounding(GroundingState::both_planted());
        beat.grounding.set_left_weight(30).unwrap();
        beat.sounds.add("clap").unwrap();
        beat.syllable = Some("ka".into());

        assert_eq!(
            plain_english(&beat),
            "Right wrist (percussive), left foot planted flat, right foot planted flat, \
             70% of the weight on the right foot, triggers clap, says \"ka\"."
        );
    }

    #[test]
    fn test_sound_only_beat() {
        let mut beat = BeatData::new();
        beat.sounds.add("kick").unwrap();
        beat.sounds.add("hat").unwrap();
        assert_eq!(plain_english(&beat), "Triggers kick and hat.");
    }

    #[test]
    fn test_join_list() {
        assert_eq!(join_list(&[]), "");
        assert_eq!(join_list(&["a"]), "a");
        assert_eq!(join_list(&["a", "b"]), "a and b");
        assert_eq!(join_list(&["a", "b", "c"]), "a, b and c");
    }
}
