//! 3D vector arithmetic for body-relative joint positions.
//!
//! Coordinates live in a body-centred, scale-normalized frame:
//! - X: screen-plane offset, negative = dancer's left
//! - Y: height, positive = up
//! - Z: depth, -1 = nearest the camera, +1 = farthest
//!
//! Components are normally in [-1, 1] but nothing here enforces it.

use core::ops::{Add, AddAssign, Div, Mul, Neg, Sub};
use serde::{Deserialize, Serialize};

/// Joint position in the body-relative frame.
///
/// Missing axes deserialize as `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

impl Vector3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn length_sq(self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.length_sq().sqrt()
    }

    #[inline]
    pub fn distance(self, other: Self) -> f32 {
        (self - other).length()
    }

    /// Ground-plane projection (height dropped).
    #[inline]
    pub fn ground(self) -> Self {
        Self::new(self.x, 0.0, self.z)
    }

    /// Clamp every component into [-1, 1].
    pub fn clamp_unit(self) -> Self {
        Self::new(
            self.x.clamp(-1.0, 1.0),
            self.y.clamp(-1.0, 1.0),
            self.z.clamp(-1.0, 1.0),
        )
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Vector3 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vector3 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub for Vector3 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vector3 {
    type Output = Self;

    #[inline]
    fn mul(self, s: f32) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s)
    }
}

impl Div<f32> for Vector3 {
    type Output = Self;

    #[inline]
    fn div(self, s: f32) -> Self {
        Self::new(self.x / s, self.y / s, self.z / s)
    }
}

impl Neg for Vector3 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

/// Component-wise mean. An empty input yields [`Vector3::ZERO`].
pub fn average<'a, I>(vectors: I) -> Vector3
where
    I: IntoIterator<Item = &'a Vector3>,
{
    let mut sum = Vector3::ZERO;
    let mut count = 0usize;
    for v in vectors {
        sum += *v;
        count += 1;
    }
    if count == 0 {
        return Vector3::ZERO;
    }
    sum / count as f32
}

/// `a + (b - a) * t`. `t` is not clamped so callers can extrapolate (nudges).
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Per-axis [`lerp`].
#[inline]
pub fn lerp_vector(a: Vector3, b: Vector3, t: f32) -> Vector3 {
    Vector3::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t), lerp(a.z, b.z, t))
}

/// Planar (x, z) distance. Height is ignored because balance is judged on the
/// ground plane.
#[inline]
pub fn distance_2d(a: Vector3, b: Vector3) -> f32 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    (dx * dx + dz * dz).sqrt()
}
