//! Pose capture ingestion.
//!
//! A [`PoseCaptureProvider`] yields [`KeypointFrame`]s from a pose detector.
//! [`frame_to_joint_info`] turns a frame into the same [`JointInfo`] shape the
//! editor produces, so captured and hand-authored poses flow through the same
//! analyzer. [`CaptureRecorder`] stores them in a [`Sequence`] during playback.
//!
//! [`JointInfo`]: choreo_core::JointInfo
//! [`Sequence`]: choreo_core::Sequence

pub mod config;
pub mod error;
pub mod keypoint;
pub mod mapping;
pub mod provider;
pub mod recorder;

pub use config::CaptureConfig;
pub use error::{Error, Result};
pub use keypoint::{landmarks, Keypoint, KeypointFrame, LANDMARK_COUNT};
pub use mapping::{frame_to_joint_info, infer_grounding};
pub use provider::{PoseCaptureProvider, ReplayProvider};
pub use recorder::{CaptureRecorder, CapturedPose};
