//! Pose dynamics for a single beat.
//!
//! - [`calculate_center_of_mass`]: unweighted mean of the tracked joints
//! - [`calculate_kinetic_flow`]: driver, anchor, chain and momentum
//! - [`calculate_stability`]: 0-100 balance score over the base of support
//! - [`PoseDynamicsAnalyzer`]: all of the above with configurable tuning and
//!   a swappable [`KineticFlowStrategy`]
//!
//! ```ignore
//! use choreo_dynamics::analyze_pose_dynamics;
//!
//! let result = analyze_pose_dynamics(&beat, previous.as_ref(), Some(0.125));
//! println!("stability {}", result.stability);
//! ```

pub mod analyzer;
pub mod center_of_mass;
pub mod config;
pub mod flow;
pub mod motion;
pub mod stability;

pub use analyzer::{
    analyze_pose_dynamics, calculate_kinetic_flow, PoseDynamicsAnalyzer, PoseDynamicsResult,
};
pub use center_of_mass::calculate_center_of_mass;
pub use config::DynamicsConfig;
pub use flow::{
    find_anchor, find_driver, skeleton_path, ChainFlow, HeuristicFlow, KineticFlow,
    KineticFlowStrategy,
};
pub use motion::MotionContext;
pub use stability::{
    base_of_support, calculate_stability, calculate_stability_with, BaseOfSupport, MAX_STABILITY,
};
