//! Error types for choreo-capture.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Expected {expected} landmarks per frame, got {actual}")]
    LandmarkCount { expected: usize, actual: usize },

    /// A landmark needed to place the body frame is missing or unconfident.
    #[error("Reference landmarks unusable: {0}")]
    MissingReference(&'static str),

    #[error(transparent)]
    Core(#[from] choreo_core::Error),
}

pub type Result<T> = core::result::Result<T, Error>;
