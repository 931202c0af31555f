//! Compact machine notation.
//!
//! ```text
//! 2:04 @00:02.50 | L:LF123T12345 R:- W100/0 | H:N LS:Or30e0.80!x LA:Na10/0/0 | S:kick+snare | "ba" ^spin
//! ```
//!
//! Sections are separated by ` | `. The sound section and the syllable and
//! head-over section are omitted when empty. Joints appear in canonical joint order.

use choreo_core::{BeatData, GroundingState, JointSample, Side, Timecode};

pub const EMPTY_MARK: &str = "-";

/// Shorthand line for the beat at `bar:step`.
pub fn shorthand(bar: u32, step: u32, beat: &BeatData, timecode: &Timecode) -> String {
    let mut out = format!("{bar}:{step:02} @{timecode} | {}", grounding(&beat.grounding));

    out.push_str(" | ");
    if beat.joint_info.is_empty() {
        out.push_str(EMPTY_MARK);
    } else {
        let joints: Vec<String> = beat
            .joint_info
            .iter()
            .map(|(joint, sample)| format!("{}:{}", joint.abbrev(), joint_code(sample)))
            .collect();
        out.push_str(&joints.join(" "));
    }

    if !beat.sounds.is_empty() {
        out.push_str(" | S:");
        out.push_str(&beat.sounds.iter().collect::<Vec<_>>().join("+"));
    }

    let mut words = Vec::new();
    if let Some(syllable) = beat.syllable.as_deref().filter(|s| !s.is_empty()) {
        words.push(format!("\"{syllable}\""));
    }
    if let Some(head_over) = beat.head_over.as_deref().filter(|s| !s.is_empty()) {
        words.push(format!("^{head_over}"));
    }
    if !words.is_empty() {
        out.push_str(" | ");
        out.push_str(&words.join(" "));
    }
    out
}

fn grounding(state: &GroundingState) -> String {
    let code = |side| {
        state
            .contact(side)
            .map_or(EMPTY_MARK, |c| c.as_str().trim())
            .to_string()
    };
    format!(
        "L:{} R:{} W{}/{}",
        code(Side::Left),
        code(Side::Right),
        state.left_weight(),
        state.right_weight()
    )
}

/// Orientation letter, then optional rotation, extension, ankle planes and intent.
fn joint_code(sample: &JointSample) -> String {
    let mut code = String::new();
    code.push(sample.orientation.unwrap_or_default().code());
    if let Some(rotation) = sample.rotation {
        code.push_str(&format!("r{rotation:.0}"));
    }
    if let Some(extension) = sample.extension {
        code.push_str(&format!("e{extension:.2}"));
    }
    if let Some(ankle) = sample.ankle() {
        code.push_str(&format!(
            "a{:.0}/{:.0}/{:.0}",
            ankle.sagittal, ankle.frontal, ankle.transverse
        ));
    }
    if let Some(intent) = sample.intent {
        code.push('!');
        code.push(intent.code());
    }
    code
}
