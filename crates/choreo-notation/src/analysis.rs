//! One-line summary of a [`PoseDynamicsResult`].

use crate::labels::{MomentumBucket, StabilityLabel};
use choreo_core::BeatData;
use choreo_dynamics::PoseDynamicsResult;

pub const NO_ANALYSIS: &str = "No dynamics analysis for this beat.";

pub fn analysis_summary(beat: &BeatData, result: Option<&PoseDynamicsResult>) -> String {
    let Some(result) = result else {
        return NO_ANALYSIS.to_string();
    };

    let label = StabilityLabel::classify(result.stability, beat.grounding.is_airborne());
    let driver = match result.driver {
        Some(driver) => format!("{} drives from the {}", driver.name(), result.anchor.name()),
        None => format!("no driver, anchored at the {}", result.anchor.name()),
    };
    let bucket = MomentumBucket::classify(result.momentum);

    format!(
        "Stability {}/100 ({label}); {driver}; momentum {:.1} ({bucket}).",
        result.stability, result.momentum
    )
}
