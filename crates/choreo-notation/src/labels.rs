//! Qualitative buckets for the numeric dynamics readouts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stability scores below this read as unstable.
pub const UNSTABLE_BELOW: u8 = 40;

/// Stability scores below this (and at least [`UNSTABLE_BELOW`]) read as shifting.
pub const SHIFTING_BELOW: u8 = 75;

/// Momentum magnitudes below this read as still.
pub const STILL_BELOW: f32 = 10.0;

/// Momentum magnitudes below this (and at least [`STILL_BELOW`]) read as moderate.
pub const MODERATE_BELOW: f32 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StabilityLabel {
    Airborne,
    Unstable,
    Shifting,
    Stable,
}

impl StabilityLabel {
    /// Airborne wins over any score.
    pub fn classify(stability: u8, airborne: bool) -> Self {
        if airborne {
            StabilityLabel::Airborne
        } else if stability < UNSTABLE_BELOW {
            StabilityLabel::Unstable
        } else if stability < SHIFTING_BELOW {
            StabilityLabel::Shifting
        } else {
            StabilityLabel::Stable
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StabilityLabel::Airborne => "airborne",
            StabilityLabel::Unstable => "unstable",
            StabilityLabel::Shifting => "shifting",
            StabilityLabel::Stable => "stable",
        }
    }
}

impl fmt::Display for StabilityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MomentumBucket {
    Still,
    Moderate,
    Explosive,
}

impl MomentumBucket {
    /// Buckets by magnitude; direction is ignored. Non-finite momentum is still.
    pub fn classify(momentum: f32) -> Self {
        let magnitude = momentum.abs();
        if !magnitude.is_finite() || magnitude < STILL_BELOW {
            MomentumBucket::Still
        } else if magnitude < MODERATE_BELOW {
            MomentumBucket::Moderate
        } else {
            MomentumBucket::Explosive
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MomentumBucket::Still => "still",
            MomentumBucket::Moderate => "moderate",
            MomentumBucket::Explosive => "explosive",
        }
    }
}

impl fmt::Display for MomentumBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
