use choreo_core::Error as CoreError;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Keypoints below this confidence are dropped.
pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.5;

/// An ankle this close (body-frame units) to the lowest ankle counts as planted.
pub const DEFAULT_GROUND_TOLERANCE: f32 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    pub min_confidence: f32,
    pub ground_tolerance: f32,
    /// Flip x, for front-facing cameras that deliver a mirrored image.
    pub mirror_x: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            ground_tolerance: DEFAULT_GROUND_TOLERANCE,
            mirror_x: false,
        }
    }
}

impl CaptureConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(CoreError::InvalidConfig(format!(
                "min_confidence must be within 0..=1, got {}",
                self.min_confidence
            ))
            .into());
        }
        if !(self.ground_tolerance.is_finite() && self.ground_tolerance >= 0.0) {
            return Err(CoreError::InvalidConfig(format!(
                "ground_tolerance must be non-negative, got {}",
                self.ground_tolerance
            ))
            .into());
        }
        Ok(())
    }
}
