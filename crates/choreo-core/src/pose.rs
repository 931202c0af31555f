//! Joint samples and the per-beat joint map.
//!
//! Editor-authored poses and pose-capture frames share this shape, so both flow
//! through the same analysis path.

use crate::vector::{lerp_vector, Vector3};
use crate::{Error, Result};
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};

/// Body side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn name(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Tracked body point, keyed by its notation abbreviation.
///
/// Declaration order is the canonical iteration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Joint {
    #[serde(rename = "H")]
    Head,
    #[serde(rename = "N")]
    Neck,
    #[serde(rename = "C")]
    Core,
    #[serde(rename = "LS")]
    LeftShoulder,
    #[serde(rename = "RS")]
    RightShoulder,
    #[serde(rename = "LE")]
    LeftElbow,
    #[serde(rename = "RE")]
    RightElbow,
    #[serde(rename = "LW")]
    LeftWrist,
    #[serde(rename = "RW")]
    RightWrist,
    #[serde(rename = "LH")]
    LeftHip,
    #[serde(rename = "RH")]
    RightHip,
    #[serde(rename = "LK")]
    LeftKnee,
    #[serde(rename = "RK")]
    RightKnee,
    #[serde(rename = "LA")]
    LeftAnkle,
    #[serde(rename = "RA")]
    RightAnkle,
}

impl Joint {
    pub const ALL: [Joint; 15] = [
        Joint::Head,
        Joint::Neck,
        Joint::Core,
        Joint::LeftShoulder,
        Joint::RightShoulder,
        Joint::LeftElbow,
        Joint::RightElbow,
        Joint::LeftWrist,
        Joint::RightWrist,
        Joint::LeftHip,
        Joint::RightHip,
        Joint::LeftKnee,
        Joint::RightKnee,
        Joint::LeftAnkle,
        Joint::RightAnkle,
    ];

    pub fn abbrev(self) -> &'static str {
        match self {
            Joint::Head => "H",
            Joint::Neck => "N",
            Joint::Core => "C",
            Joint::LeftShoulder => "LS",
            Joint::RightShoulder => "RS",
            Joint::LeftElbow => "LE",
            Joint::RightElbow => "RE",
            Joint::LeftWrist => "LW",
            Joint::RightWrist => "RW",
            Joint::LeftHip => "LH",
            Joint::RightHip => "RH",
            Joint::LeftKnee => "LK",
            Joint::RightKnee => "RK",
            Joint::LeftAnkle => "LA",
            Joint::RightAnkle => "RA",
        }
    }

    /// Lower-case English name, e.g. "left shoulder".
    pub fn name(self) -> &'static str {
        match self {
            Joint::Head => "head",
            Joint::Neck => "neck",
            Joint::Core => "core",
            Joint::LeftShoulder => "left shoulder",
            Joint::RightShoulder => "right shoulder",
            Joint::LeftElbow => "left elbow",
            Joint::RightElbow => "right elbow",
            Joint::LeftWrist => "left wrist",
            Joint::RightWrist => "right wrist",
            Joint::LeftHip => "left hip",
            Joint::RightHip => "right hip",
            Joint::LeftKnee => "left knee",
            Joint::RightKnee => "right knee",
            Joint::LeftAnkle => "left ankle",
            Joint::RightAnkle => "right ankle",
        }
    }

    pub fn side(self) -> Option<Side> {
        match self {
            Joint::Head | Joint::Neck | Joint::Core => None,
            Joint::LeftShoulder
            | Joint::LeftElbow
            | Joint::LeftWrist
            | Joint::LeftHip
            | Joint::LeftKnee
            | Joint::LeftAnkle => Some(Side::Left),
            _ => Some(Side::Right),
        }
    }

    pub fn is_ankle(self) -> bool {
        matches!(self, Joint::LeftAnkle | Joint::RightAnkle)
    }

    pub fn ankle(side: Side) -> Self {
        match side {
            Side::Left => Joint::LeftAnkle,
            Side::Right => Joint::RightAnkle,
        }
    }
}

impl fmt::Display for Joint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbrev())
    }
}

impl FromStr for Joint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Joint::ALL
            .into_iter()
            .find(|j| j.abbrev() == s)
            .ok_or_else(|| Error::UnknownJoint(s.to_string()))
    }
}

/// Direction a joint is turned or pointed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Neutral,
    Inward,
    Outward,
    Forward,
    Backward,
    Upward,
    Downward,
}

impl Orientation {
    pub fn code(self) -> char {
        match self {
            Orientation::Neutral => 'N',
            Orientation::Inward => 'I',
            Orientation::Outward => 'O',
            Orientation::Forward => 'F',
            Orientation::Backward => 'B',
            Orientation::Upward => 'U',
            Orientation::Downward => 'D',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Orientation::Neutral => "neutral",
            Orientation::Inward => "inward",
            Orientation::Outward => "outward",
            Orientation::Forward => "forward",
            Orientation::Backward => "backward",
            Orientation::Upward => "upward",
            Orientation::Downward => "downward",
        }
    }
}

/// Movement quality the dancer is aiming for with a joint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    Passive,
    Active,
    Percussive,
    Sustained,
}

impl Intent {
    pub fn code(self) -> char {
        match self {
            Intent::Passive => 'p',
            Intent::Active => 'a',
            Intent::Percussive => 'x',
            Intent::Sustained => 's',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Intent::Passive => "passive",
            Intent::Active => "active",
            Intent::Percussive => "percussive",
            Intent::Sustained => "sustained",
        }
    }
}

/// Ankle rotation in degrees about the three anatomical planes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnkleOrientation {
    /// Dorsiflexion (+) / plantarflexion (-).
    pub sagittal: f32,
    /// Inversion (+) / eversion (-).
    pub frontal: f32,
    /// Toe-out (+) / toe-in (-).
    pub transverse: f32,
}

/// Per-category extras. Only ankles carry plane orientation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum JointDetail {
    #[default]
    General,
    Ankle(AnkleOrientation),
}

/// One joint's state on one beat.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct JointSample {
    pub vector: Vector3,
    /// Degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,
    /// Detector confidence in 0..=1, only set on captured samples.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
    #[serde(default)]
    pub detail: JointDetail,
}

impl JointSample {
    pub fn at(vector: Vector3) -> Self {
        Self {
            vector,
            ..Self::default()
        }
    }

    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = Some(degrees);
        self
    }

    pub fn with_extension(mut self, extension: f32) -> Self {
        self.extension = Some(extension);
        self
    }

    pub fn with_energy(mut self, energy: f32) -> Self {
        self.energy = Some(energy);
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    pub fn with_intent(mut self, intent: Intent) -> Self {
        self.intent = Some(intent);
        self
    }

    pub fn with_score(mut self, score: f32) -> Self {
        self.score = Some(score.clamp(0.0, 1.0));
        self
    }

    pub fn with_ankle(mut self, ankle: AnkleOrientation) -> Self {
        self.detail = JointDetail::Ankle(ankle);
        self
    }

    pub fn ankle(&self) -> Option<&AnkleOrientation> {
        match &self.detail {
            JointDetail::Ankle(a) => Some(a),
            JointDetail::General => None,
        }
    }

    /// Move the position toward `target` by `t`; `t` outside 0..=1 extrapolates.
    pub fn nudged_toward(&self, target: Vector3, t: f32) -> Self {
        Self {
            vector: lerp_vector(self.vector, target, t),
            ..self.clone()
        }
    }
}

/// Joint samples for one beat, ordered by [`Joint`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<Joint, JointSample>",
    into = "BTreeMap<Joint, JointSample>"
)]
pub struct JointInfo {
    samples: BTreeMap<Joint, JointSample>,
}

impl JointInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from samples, rejecting ankle detail on non-ankle joints.
    pub fn from_samples<I>(samples: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Joint, JointSample)>,
    {
        let mut info = Self::new();
        for (joint, sample) in samples {
            info.insert(joint, sample)?;
        }
        Ok(info)
    }

    pub fn insert(&mut self, joint: Joint, sample: JointSample) -> Result<Option<JointSample>> {
        if sample.ankle().is_some() && !joint.is_ankle() {
            return Err(Error::JointCategoryMismatch {
                joint: joint.name(),
            });
        }
        Ok(self.samples.insert(joint, sample))
    }

    /// Insert a plain sample at `vector`, replacing any existing one.
    pub fn insert_vector(&mut self, joint: Joint, vector: Vector3) -> Option<JointSample> {
        self.samples.insert(joint, JointSample::at(vector))
    }

    pub fn with_vector(mut self, joint: Joint, vector: Vector3) -> Self {
        self.insert_vector(joint, vector);
        self
    }

    pub fn get(&self, joint: Joint) -> Option<&JointSample> {
        self.samples.get(&joint)
    }

    pub fn vector(&self, joint: Joint) -> Option<Vector3> {
        self.samples.get(&joint).map(|s| s.vector)
    }

    pub fn contains(&self, joint: Joint) -> bool {
        self.samples.contains_key(&joint)
    }

    pub fn remove(&mut self, joint: Joint) -> Option<JointSample> {
        self.samples.remove(&joint)
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, Joint, JointSample> {
        self.samples.iter()
    }

    pub fn joints(&self) -> impl Iterator<Item = Joint> + '_ {
        self.samples.keys().copied()
    }

    pub fn vectors(&self) -> impl Iterator<Item = &Vector3> + '_ {
        self.samples.values().map(|s| &s.vector)
    }
}

impl<'a> IntoIterator for &'a JointInfo {
    type Item = (&'a Joint, &'a JointSample);
    type IntoIter = btree_map::Iter<'a, Joint, JointSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

impl TryFrom<BTreeMap<Joint, JointSample>> for JointInfo {
    type Error = Error;

    fn try_from(samples: BTreeMap<Joint, JointSample>) -> Result<Self> {
        Self::from_samples(samples)
    }
}

impl From<JointInfo> for BTreeMap<Joint, JointSample> {
    fn from(info: JointInfo) -> Self {
        info.samples
    }
}
