//! Tuning constants for the analyzer.

use choreo_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Radius of the support disc around a single planted ankle.
pub const DEFAULT_SINGLE_FOOT_RADIUS: f32 = 0.2;

/// Multiplier turning the driver's height (or speed) into momentum.
pub const DEFAULT_MOMENTUM_SCALE: f32 = 50.0;

/// Below this base-of-support radius the feet count as together.
pub const DEFAULT_FEET_TOGETHER_RADIUS: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DynamicsConfig {
    pub single_foot_radius: f32,
    pub momentum_scale: f32,
    pub feet_together_radius: f32,
}

impl Default for DynamicsConfig {
    fn default() -> Self {
        Self {
            single_foot_radius: DEFAULT_SINGLE_FOOT_RADIUS,
            momentum_scale: DEFAULT_MOMENTUM_SCALE,
            feet_together_radius: DEFAULT_FEET_TOGETHER_RADIUS,
        }
    }
}

impl DynamicsConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.single_foot_radius.is_finite() && self.single_foot_radius > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "single_foot_radius must be positive, got {}",
                self.single_foot_radius
            )));
        }
        if !self.momentum_scale.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "momentum_scale must be finite, got {}",
                self.momentum_scale
            )));
        }
        if !(self.feet_together_radius.is_finite() && self.feet_together_radius >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "feet_together_radius must be non-negative, got {}",
                self.feet_together_radius
            )));
        }
        Ok(())
    }
}
