//! Error types for choreo-core.

use crate::time_grid::GridPosition;
use thiserror::Error;

/// Error type for choreo-core operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid timing at {bpm} BPM: {reason}")]
    InvalidTiming { bpm: f64, reason: &'static str },

    #[error("Invalid time signature: {beats_per_bar}/{beat_unit}")]
    InvalidTimeSignature { beats_per_bar: u32, beat_unit: u32 },

    /// Recoverable: carries the position reached before the walk gave up.
    #[error("Step {global_step} lies beyond the {max_bars}-bar limit (stopped at {best_effort})")]
    BarLimitExceeded {
        max_bars: u32,
        global_step: u64,
        best_effort: GridPosition,
    },

    #[error("Invalid left-foot weight: {0}. Must be between 0 and 100")]
    InvalidWeight(u8),

    #[error("A step holds at most {max} sounds")]
    SoundLimit { max: usize },

    #[error("Sound already on this step: {0}")]
    DuplicateSound(String),

    #[error("Ankle orientation is only valid on ankle joints, not {joint}")]
    JointCategoryMismatch { joint: &'static str },

    #[error("Bar {bar} out of range (sequence has {bars} bars)")]
    BarOutOfRange { bar: u32, bars: u32 },

    #[error("Step {step} out of range (bar has {steps} steps)")]
    StepOutOfRange { step: u32, steps: u32 },

    #[error("Sequence already holds the maximum of {max_bars} bars")]
    SequenceFull { max_bars: u32 },

    #[error("Unknown joint abbreviation: {0}")]
    UnknownJoint(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type alias.
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Best-effort grid position for errors that still produce one.
    pub fn best_effort(&self) -> Option<GridPosition> {
        match self {
            Error::BarLimitExceeded { best_effort, .. } => Some(*best_effort),
            _ => None,
        }
    }
}
