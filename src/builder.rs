//! Builder for configuring and constructing a `ChoreoEngine`.

use crate::config::ChoreoConfig;
use crate::{ChoreoEngine, Result};
use choreo_core::{Sequence, TimeGrid, TimeSignature, TransportClock};
use choreo_dynamics::{DynamicsConfig, KineticFlowStrategy, PoseDynamicsAnalyzer};

#[cfg(feature = "capture")]
use choreo_capture::{CaptureConfig, CaptureRecorder};

/// Settings are validated once, in [`ChoreoEngineBuilder::build`].
///
/// # Example
///
/// ```ignore
/// use choreo::prelude::*;
///
/// let engine = ChoreoEngine::builder()
///     .config(ChoreoConfig::from_file("choreo.toml")?)
///     .bpm(96.0)
///     .flow_strategy(ChainFlow)
///     .bars(8)
///     .build()?;
/// ```
pub struct ChoreoEngineBuilder {
    config: ChoreoConfig,
    bars: u32,
    sequence: Option<Sequence>,
    strategy: Option<Box<dyn KineticFlowStrategy>>,
}

impl Default for ChoreoEngineBuilder {
    fn default() -> Self {
        Self {
            config: ChoreoConfig::default(),
            bars: 1,
            sequence: None,
            strategy: None,
        }
    }
}

impl ChoreoEngineBuilder {
    /// Replace every setting with `config`. Later setters still apply.
    pub fn config(mut self, config: ChoreoConfig) -> Self {
        self.config = config;
        self
    }

    /// Default: 120
    pub fn bpm(mut self, bpm: f64) -> Self {
        self.config.grid.bpm = bpm;
        self
    }

    /// Default: 4/4
    pub fn time_signature(mut self, time_signature: TimeSignature) -> Self {
        self.config.grid.time_signature = time_signature;
        self
    }

    pub fn max_bars(mut self, max_bars: u32) -> Self {
        self.config.grid.max_bars = max_bars;
        self
    }

    /// Empty bars to start with. Ignored when a sequence is supplied.
    ///
    /// Default: 1
    pub fn bars(mut self, bars: u32) -> Self {
        self.bars = bars;
        self
    }

    /// Start from an existing sequence.
    pub fn sequence(mut self, sequence: Sequence) -> Self {
        self.sequence = Some(sequence);
        self
    }

    pub fn dynamics(mut self, dynamics: DynamicsConfig) -> Self {
        self.config.dynamics = dynamics;
        self
    }

    /// Default: the heuristic arm-chain flow.
    pub fn flow_strategy(mut self, strategy: impl KineticFlowStrategy + 'static) -> Self {
        self.strategy = Some(Box::new(strategy));
        self
    }

    #[cfg(feature = "capture")]
    pub fn capture(mut self, capture: CaptureConfig) -> Self {
        self.config.capture = capture;
        self
    }

    pub fn build(self) -> Result<ChoreoEngine> {
        self.config.validate()?;

        let max_bars = self.config.grid.max_bars;
        let mut sequence = self
            .sequence
            .unwrap_or_else(|| Sequence::with_bars(self.bars));
        sequence.set_max_bars(max_bars)?;

        let grid = TimeGrid::new(&self.config.grid).with_bar_lengths(sequence.bar_lengths());
        let transport = TransportClock::new(&grid)?;

        let mut analyzer = PoseDynamicsAnalyzer::new(self.config.dynamics);
        if let Some(strategy) = self.strategy {
            analyzer = analyzer.with_boxed_strategy(strategy);
        }

        #[cfg(feature = "capture")]
        let recorder = CaptureRecorder::new(self.config.capture)?;

        tracing::debug!(
            "ChoreoEngine: {} bars at {} BPM, {} flow",
            sequence.bar_count(),
            grid.bpm(),
            analyzer.strategy_name()
        );

        Ok(ChoreoEngine::from_parts(
            self.config,
            grid,
            sequence,
            transport,
            analyzer,
            #[cfg(feature = "capture")]
            recorder,
        ))
    }
}
