//! Raw detector output: 33 BlazePose landmarks per frame.
//!
//! Coordinates are image-normalized: x to the right, y downward, z toward the
//! camera as it decreases. "Left" and "right" are the subject's.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Landmarks per BlazePose frame.
pub const LANDMARK_COUNT: usize = 33;

/// BlazePose landmark indices used by the joint mapping.
pub mod landmarks {
    pub const NOSE: usize = 0;
    pub const LEFT_SHOULDER: usize = 11;
    pub const RIGHT_SHOULDER: usize = 12;
    pub const LEFT_ELBOW: usize = 13;
    pub const RIGHT_ELBOW: usize = 14;
    pub const LEFT_WRIST: usize = 15;
    pub const RIGHT_WRIST: usize = 16;
    pub const LEFT_HIP: usize = 23;
    pub const RIGHT_HIP: usize = 24;
    pub const LEFT_KNEE: usize = 25;
    pub const RIGHT_KNEE: usize = 26;
    pub const LEFT_ANKLE: usize = 27;
    pub const RIGHT_ANKLE: usize = 28;
    pub const LEFT_HEEL: usize = 29;
    pub const RIGHT_HEEL: usize = 30;
    pub const LEFT_FOOT_INDEX: usize = 31;
    pub const RIGHT_FOOT_INDEX: usize = 32;
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Keypoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Detector confidence in 0..=1.
    pub confidence: f32,
}

impl Keypoint {
    pub fn new(x: f32, y: f32, z: f32, confidence: f32) -> Self {
        Self { x, y, z, confidence }
    }

    pub fn is_valid(&self, min_confidence: f32) -> bool {
        self.confidence >= min_confidence
            && self.x.is_finite()
            && self.y.is_finite()
            && self.z.is_finite()
    }

    pub fn midpoint(&self, other: &Keypoint) -> Keypoint {
        Keypoint {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
            z: (self.z + other.z) / 2.0,
            confidence: self.confidence.min(other.confidence),
        }
    }

    /// Image-plane distance.
    pub fn distance_2d(&self, other: &Keypoint) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// One detector frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeypointFrame {
    /// Seconds since capture start.
    pub timestamp: f64,
    landmarks: Vec<Keypoint>,
}

impl KeypointFrame {
    pub fn new(timestamp: f64, landmarks: Vec<Keypoint>) -> Result<Self> {
        if landmarks.len() != LANDMARK_COUNT {
            return Err(Error::LandmarkCount {
                expected: LANDMARK_COUNT,
                actual: landmarks.len(),
            });
        }
        Ok(Self {
            timestamp,
            landmarks,
        })
    }

    pub fn landmark(&self, index: usize) -> Option<&Keypoint> {
        self.landmarks.get(index)
    }

    pub fn landmarks(&self) -> &[Keypoint] {
        &self.landmarks
    }

    /// Landmark at `index` if it clears `min_confidence`.
    pub fn confident(&self, index: usize, min_confidence: f32) -> Option<&Keypoint> {
        self.landmark(index).filter(|k| k.is_valid(min_confidence))
    }
}
