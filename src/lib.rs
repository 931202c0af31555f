//! # Choreo - Choreography Step Sequencer Engine
//!
//! Beat-synchronised movement notation built from modular subsystems.
//!
//! ## Architecture
//!
//! Choreo is an umbrella crate that coordinates:
//! - **choreo-core** - Vector math, time grid, pose data model, transport
//! - **choreo-dynamics** - Center of mass, kinetic flow, stability
//! - **choreo-notation** - Shorthand, plain-English and analysis text
//! - **choreo-capture** - Keypoint-frame ingestion and recording
//!
//! ## Quick Start
//!
//! ```ignore
//! use choreo::prelude::*;
//!
//! let engine = ChoreoEngine::builder()
//!     .bpm(120.0)
//!     .bars(2)
//!     .build()?;
//!
//! // Author a pose
//! engine.sequence_mut(|seq| {
//!     let beat = seq.beat_mut(GridPosition::new(1, 0)).unwrap();
//!     beat.joint_info.insert_vector(Joint::RightWrist, Vector3::new(0.4, 0.9, 0.0));
//!     beat.grounding = GroundingState::both_planted();
//! });
//!
//! // Describe it
//! let notation = engine.notate(1, 0)?;
//! println!("{}", notation.plain_english);
//!
//! // Play it back
//! engine.transport().start();
//! let report = engine.tick();
//! ```
//!
//! ## Feature Flags
//!
//! - `default` - Everything enabled
//! - `full` - Everything enabled
//! - `capture` - Pose capture ingestion

/// Re-export of choreo-core for direct access
pub use choreo_core as core;

pub use choreo_core::{
    // Vector math
    average,
    distance_2d,
    lerp,
    lerp_vector,
    // Data model
    BeatData,
    ContactCode,
    GridConfig,
    GridPosition,
    GroundingState,
    Joint,
    JointInfo,
    Sequence,
    Side,
    // Timing
    TimeGrid,
    TimeSignature,
    Timecode,
    TransportClock,
    TransportTick,
    Vector3,
};

// Dynamics
pub use choreo_dynamics as dynamics;

pub use choreo_dynamics::{
    analyze_pose_dynamics, calculate_center_of_mass, calculate_kinetic_flow, calculate_stability,
    ChainFlow, DynamicsConfig, HeuristicFlow, KineticFlowStrategy, PoseDynamicsAnalyzer,
    PoseDynamicsResult,
};

// Notation
pub use choreo_notation as notation;

pub use choreo_notation::{Notation, NotationGenerator};

// Capture
#[cfg(feature = "capture")]
pub use choreo_capture as capture;

#[cfg(feature = "capture")]
pub use choreo_capture::{
    CaptureConfig, CaptureRecorder, CapturedPose, Keypoint, KeypointFrame, PoseCaptureProvider,
    ReplayProvider,
};

mod builder;
mod config;
mod engine;
mod error;

pub use builder::ChoreoEngineBuilder;
pub use config::ChoreoConfig;
pub use engine::{BeatReport, ChoreoEngine};
pub use error::{Error, Result};

/// Convenience prelude for common imports
pub mod prelude {
    // Main engine
    pub use crate::{BeatReport, ChoreoConfig, ChoreoEngine, ChoreoEngineBuilder};

    // Data model
    pub use crate::core::{
        BeatData, GridPosition, GroundingState, Joint, JointInfo, Sequence, Side, TimeSignature,
        Vector3,
    };

    // Analysis and notation
    pub use crate::dynamics::{ChainFlow, HeuristicFlow, PoseDynamicsResult};
    pub use crate::notation::Notation;

    // Capture
    #[cfg(feature = "capture")]
    pub use crate::capture::{KeypointFrame, PoseCaptureProvider, ReplayProvider};
}
