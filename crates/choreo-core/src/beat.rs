//! One grid cell: pose, grounding and the sounds triggered on it.

use crate::grounding::GroundingState;
use crate::pose::JointInfo;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Maximum sounds on a single step.
pub const MAX_SOUNDS_PER_STEP: usize = 4;

/// Unique sound-bank keys for one step, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct SoundSet {
    keys: Vec<String>,
}

impl SoundSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: impl Into<String>) -> Result<()> {
        let key = key.into();
        if self.keys.contains(&key) {
            return Err(Error::DuplicateSound(key));
        }
        if self.keys.len() >= MAX_SOUNDS_PER_STEP {
            return Err(Error::SoundLimit {
                max: MAX_SOUNDS_PER_STEP,
            });
        }
        self.keys.push(key);
        Ok(())
    }

    /// Add the key if absent, remove it if present. Returns whether it is now set.
    pub fn toggle(&mut self, key: &str) -> Result<bool> {
        if self.remove(key) {
            return Ok(false);
        }
        self.add(key)?;
        Ok(true)
    }

    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.keys.len();
        self.keys.retain(|k| k != key);
        self.keys.len() != before
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.keys.iter().map(String::as_str)
    }
}

impl TryFrom<Vec<String>> for SoundSet {
    type Error = Error;

    fn try_from(keys: Vec<String>) -> Result<Self> {
        let mut set = Self::new();
        for key in keys {
            set.add(key)?;
        }
        Ok(set)
    }
}

impl From<SoundSet> for Vec<String> {
    fn from(set: SoundSet) -> Self {
        set.keys
    }
}

/// A single step of the choreography grid.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeatData {
    #[serde(default)]
    pub joint_info: JointInfo,
    #[serde(default)]
    pub grounding: GroundingState,
    #[serde(default)]
    pub sounds: SoundSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub syllable: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head_over: Option<String>,
    /// Media time in seconds this step is cued to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_cue_point: Option<f64>,
}

impl BeatData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_joints(mut self, joint_info: JointInfo) -> Self {
        self.joint_info = joint_info;
        self
    }

    pub fn with_grounding(mut self, grounding: GroundingState) -> Self {
        self.grounding = grounding;
        self
    }

    pub fn clear_pose(&mut self) {
        self.joint_info.clear();
    }

    pub fn clear_grounding(&mut self) {
        self.grounding.clear();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// No pose, no contacts, no sounds and no annotations.
    pub fn is_empty(&self) -> bool {
        self.joint_info.is_empty()
            && self.grounding.is_airborne()
            && self.sounds.is_empty()
            && self.syllable.is_none()
            && self.head_over.is_none()
            && self.media_cue_point.is_none()
    }
}
