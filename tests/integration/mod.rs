//! Integration test modules for choreo
//!
//! - timing: tempo, meter, timecodes and transport looping
//! - dynamics: stability and kinetic flow through the engine
//! - notation: shorthand, plain English and analysis text
//! - engine: sequence editing, playback and threading
//! - capture: recording keypoint frames into the grid

pub mod dynamics;
pub mod engine;
pub mod notation;
pub mod timing;

#[cfg(feature = "capture")]
pub mod capture;
