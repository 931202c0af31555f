//! Engine configuration, loadable from TOML.
//!
//! ```toml
//! [grid]
//! bpm = 96.0
//! time_signature = { beats_per_bar = 3, beat_unit = 4 }
//!
//! [dynamics]
//! single_foot_radius = 0.25
//!
//! [capture]
//! mirror_x = true
//! ```
//!
//! Every section and every key is optional.

use crate::Result;
use choreo_core::GridConfig;
use choreo_dynamics::DynamicsConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[cfg(feature = "capture")]
use choreo_capture::CaptureConfig;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChoreoConfig {
    pub grid: GridConfig,
    pub dynamics: DynamicsConfig,
    #[cfg(feature = "capture")]
    pub capture: CaptureConfig,
}

impl ChoreoConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path.as_ref())?;
        tracing::debug!("Loading config from {}", path.as_ref().display());
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<()> {
        self.grid.validate()?;
        self.dynamics.validate()?;
        #[cfg(feature = "capture")]
        self.capture.validate()?;
        Ok(())
    }
}
