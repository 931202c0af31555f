//! Foot contact notation and per-beat grounding state.
//!
//! Contact codes read `<side>F<sole points>[T<toes>]`:
//! - side: `L` or `R`
//! - sole points: `1` ball, `2` mid-foot, `3` heel
//! - toes: `T` followed by toe digits `1`-`5`
//!
//! `LF123T12345` is a full plant of the left foot.

use crate::pose::Side;
use crate::{Error, Result};
use core::fmt;
use serde::{Deserialize, Deserializer, Serialize};

/// How a foot meets the floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactKind {
    FullPlant,
    Heel,
    Ball,
    Toes,
    Partial,
    Unrecognized,
}

impl ContactKind {
    pub fn description(self) -> &'static str {
        match self {
            ContactKind::FullPlant => "planted flat",
            ContactKind::Heel => "planted on heel",
            ContactKind::Ball => "on the ball of the foot",
            ContactKind::Toes => "on toes",
            ContactKind::Partial => "partially planted",
            ContactKind::Unrecognized => "in contact",
        }
    }
}

/// Decoded contact points of a [`ContactCode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContactPoints {
    pub side: Option<Side>,
    pub ball: bool,
    pub mid: bool,
    pub heel: bool,
    pub toes: [bool; 5],
}

impl ContactPoints {
    pub fn any_toe(&self) -> bool {
        self.toes.iter().any(|&t| t)
    }
}

/// A foot contact code such as `RF3` or `LF123T12345`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactCode(String);

impl ContactCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Every sole point and every toe down.
    pub fn full_plant(side: Side) -> Self {
        match side {
            Side::Left => Self::new("LF123T12345"),
            Side::Right => Self::new("RF123T12345"),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Decode the code. Returns `None` for anything that is not
    /// `<L|R>F<1-3>*[T<1-5>*]`.
    pub fn points(&self) -> Option<ContactPoints> {
        let mut chars = self.0.trim().chars();
        let side = match chars.next()? {
            'L' => Side::Left,
            'R' => Side::Right,
            _ => return None,
        };
        if chars.next()? != 'F' {
            return None;
        }

        let mut points = ContactPoints {
            side: Some(side),
            ..ContactPoints::default()
        };
        let mut in_toes = false;
        for c in chars {
            match (in_toes, c) {
                (false, '1') => points.ball = true,
                (false, '2') => points.mid = true,
                (false, '3') => points.heel = true,
                (false, 'T') => in_toes = true,
                (true, '1'..='5') => {
                    let idx = c as usize - '1' as usize;
                    points.toes[idx] = true;
                }
                _ => return None,
            }
        }
        Some(points)
    }

    pub fn kind(&self) -> ContactKind {
        let Some(p) = self.points() else {
            return ContactKind::Unrecognized;
        };
        match (p.ball, p.mid, p.heel, p.any_toe()) {
            (true, true, true, _) => ContactKind::FullPlant,
            (false, _, true, _) => ContactKind::Heel,
            (true, _, false, _) => ContactKind::Ball,
            (false, false, false, true) => ContactKind::Toes,
            _ => ContactKind::Partial,
        }
    }
}

impl fmt::Display for ContactCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContactCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Which feet touch the floor and how weight is split between them.
///
/// `left_weight` is the percentage borne by the left foot; the right foot
/// carries the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingState {
    #[serde(rename = "L", default)]
    pub left: Option<ContactCode>,
    #[serde(rename = "R", default)]
    pub right: Option<ContactCode>,
    #[serde(
        rename = "L_weight",
        default = "default_weight",
        deserialize_with = "deserialize_weight"
    )]
    left_weight: u8,
}

fn default_weight() -> u8 {
    50
}

fn deserialize_weight<'de, D>(deserializer: D) -> core::result::Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let weight = u8::deserialize(deserializer)?;
    if weight > 100 {
        return Err(serde::de::Error::custom(Error::InvalidWeight(weight)));
    }
    Ok(weight)
}

impl Default for GroundingState {
    fn default() -> Self {
        Self {
            left: None,
            right: None,
            left_weight: default_weight(),
        }
    }
}

impl GroundingState {
    /// Both feet lifted.
    pub fn airborne() -> Self {
        Self::default()
    }

    pub fn new(
        left: Option<ContactCode>,
        right: Option<ContactCode>,
        left_weight: u8,
    ) -> Result<Self> {
        let mut state = Self {
            left,
            right,
            left_weight: default_weight(),
        };
        state.set_left_weight(left_weight)?;
        Ok(state)
    }

    /// Both feet fully planted with weight split evenly.
    pub fn both_planted() -> Self {
        Self {
            left: Some(ContactCode::full_plant(Side::Left)),
            right: Some(ContactCode::full_plant(Side::Right)),
            left_weight: 50,
        }
    }

    /// Both feet fully planted with `left_weight` percent on the left,
    /// capped at 100.
    pub fn planted_with_weight(left_weight: u8) -> Self {
        Self {
            left_weight: left_weight.min(100),
            ..Self::both_planted()
        }
    }

    /// One foot fully planted and bearing all the weight.
    pub fn single(side: Side) -> Self {
        match side {
            Side::Left => Self {
                left: Some(ContactCode::full_plant(Side::Left)),
                right: None,
                left_weight: 100,
            },
            Side::Right => Self {
                left: None,
                right: Some(ContactCode::full_plant(Side::Right)),
                left_weight: 0,
            },
        }
    }

    pub fn contact(&self, side: Side) -> Option<&ContactCode> {
        match side {
            Side::Left => self.left.as_ref(),
            Side::Right => self.right.as_ref(),
        }
        .filter(|c| !c.is_empty())
    }

    /// A foot counts as grounded when its code is present and non-empty.
    pub fn is_grounded(&self, side: Side) -> bool {
        self.contact(side).is_some()
    }

    pub fn grounded_count(&self) -> usize {
        [Side::Left, Side::Right]
            .into_iter()
            .filter(|&s| self.is_grounded(s))
            .count()
    }

    pub fn is_airborne(&self) -> bool {
        self.grounded_count() == 0
    }

    pub fn left_weight(&self) -> u8 {
        self.left_weight
    }

    pub fn right_weight(&self) -> u8 {
        100 - self.left_weight
    }

    pub fn weight(&self, side: Side) -> u8 {
        match side {
            Side::Left => self.left_weight(),
            Side::Right => self.right_weight(),
        }
    }

    pub fn set_left_weight(&mut self, weight: u8) -> Result<()> {
        if weight > 100 {
            return Err(Error::InvalidWeight(weight));
        }
        self.left_weight = weight;
        Ok(())
    }

    pub fn set_contact(&mut self, side: Side, code: Option<ContactCode>) {
        match side {
            Side::Left => self.left = code,
            Side::Right => self.right = code,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
