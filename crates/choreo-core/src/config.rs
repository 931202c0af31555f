//! Step grid configuration.

use crate::time_grid::{TimeSignature, MAX_BARS, STEPS_PER_BAR};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Tempo, meter and grid dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub bpm: f64,
    pub time_signature: TimeSignature,
    pub steps_per_bar: u32,
    pub max_bars: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            bpm: 120.0,
            time_signature: TimeSignature::default(),
            steps_per_bar: STEPS_PER_BAR,
            max_bars: MAX_BARS,
        }
    }
}

impl GridConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.bpm.is_finite() || self.bpm <= 0.0 {
            return Err(Error::InvalidTiming {
                bpm: self.bpm,
                reason: "tempo must be a positive finite number",
            });
        }
        self.time_signature.validate()?;
        // Every `Bar` holds exactly STEPS_PER_BAR beats.
        if self.steps_per_bar != STEPS_PER_BAR {
            return Err(Error::InvalidConfig(format!(
                "steps_per_bar must be {STEPS_PER_BAR}, got {}",
                self.steps_per_bar
            )));
        }
        if self.max_bars == 0 {
            return Err(Error::InvalidConfig("max_bars must be at least 1".into()));
        }
        Ok(())
    }
}
