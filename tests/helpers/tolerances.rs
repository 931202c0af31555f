//! Tolerance constants for pose and timing comparisons.

/// Joint coordinates and derived vectors (f32 arithmetic).
pub const POSITION_EPSILON: f32 = 1e-5;

/// Momentum is scaled by 50 by default, so f32 error grows with it.
pub const MOMENTUM_EPSILON: f32 = 1e-3;

/// Seconds (f64 arithmetic).
pub const TIME_EPSILON: f64 = 1e-9;
