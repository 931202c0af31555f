//! ChoreoEngine that coordinates the grid, transport, analysis and notation.

use crate::config::ChoreoConfig;
use crate::Result;
use choreo_core::{
    Bar, BeatData, Error as CoreError, GridPosition, Sequence, TimeGrid, TimeSignature, Timecode,
    TransportClock, TransportTick,
};
use choreo_dynamics::{PoseDynamicsAnalyzer, PoseDynamicsResult};
use choreo_notation::{Notation, NotationGenerator};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};

#[cfg(feature = "capture")]
use choreo_capture::{CaptureRecorder, CapturedPose, KeypointFrame, PoseCaptureProvider};

/// Everything derived for the step that just played.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeatReport {
    pub tick: TransportTick,
    pub dynamics: PoseDynamicsResult,
    pub notation: Notation,
}

/// Main choreography engine.
///
/// Owns the sequence and the transport. Analysis and notation are pure
/// functions of sequence snapshots; the engine only wires them to grid
/// positions and timing.
///
/// # Example
///
/// ```ignore
/// use choreo::prelude::*;
///
/// let engine = ChoreoEngine::builder().bpm(100.0).bars(4).build()?;
///
/// engine.sequence_mut(|seq| {
///     seq.beat_mut(GridPosition::new(1, 0)).unwrap().grounding = GroundingState::both_planted();
/// });
///
/// engine.transport().start();
/// while let Some(report) = engine.tick() {
///     println!("{}", report.notation.shorthand);
/// }
/// ```
pub struct ChoreoEngine {
    config: ChoreoConfig,
    grid: RwLock<TimeGrid>,
    sequence: RwLock<Sequence>,
    transport: TransportClock,
    analyzer: PoseDynamicsAnalyzer,
    notation: NotationGenerator,
    last_tick: Mutex<Option<TransportTick>>,

    #[cfg(feature = "capture")]
    recorder: Mutex<CaptureRecorder>,
}

impl ChoreoEngine {
    pub fn builder() -> crate::ChoreoEngineBuilder {
        crate::ChoreoEngineBuilder::default()
    }

    pub(crate) fn from_parts(
        config: ChoreoConfig,
        grid: TimeGrid,
        sequence: Sequence,
        transport: TransportClock,
        analyzer: PoseDynamicsAnalyzer,
        #[cfg(feature = "capture")] recorder: CaptureRecorder,
    ) -> Self {
        Self {
            config,
            grid: RwLock::new(grid),
            sequence: RwLock::new(sequence),
            transport,
            analyzer,
            notation: NotationGenerator::new(),
            last_tick: Mutex::new(None),
            #[cfg(feature = "capture")]
            recorder: Mutex::new(recorder),
        }
    }

    pub fn config(&self) -> &ChoreoConfig {
        &self.config
    }

    pub fn transport(&self) -> &TransportClock {
        &self.transport
    }

    pub fn analyzer(&self) -> &PoseDynamicsAnalyzer {
        &self.analyzer
    }

    /// Snapshot of the current timing.
    pub fn grid(&self) -> TimeGrid {
        self.grid.read().clone()
    }

    pub fn seconds_per_step(&self) -> Result<f64> {
        Ok(self.grid.read().seconds_per_step()?)
    }

    /// Change tempo. Rejected tempos leave the engine untouched.
    pub fn set_bpm(&self, bpm: f64) -> Result<()> {
        let mut candidate = self.grid();
        candidate.set_bpm(bpm);
        self.apply_timing(candidate)
    }

    pub fn set_time_signature(&self, time_signature: TimeSignature) -> Result<()> {
        time_signature.validate()?;
        let mut candidate = self.grid();
        candidate.set_time_signature(time_signature);
        self.apply_timing(candidate)
    }

    fn apply_timing(&self, candidate: TimeGrid) -> Result<()> {
        self.transport.set_timing(&candidate)?;
        tracing::debug!(
            "Timing: {} BPM, {}",
            candidate.bpm(),
            candidate.time_signature()
        );
        *self.grid.write() = candidate;
        Ok(())
    }

    /// Read access to the sequence.
    pub fn sequence<R>(&self, f: impl FnOnce(&Sequence) -> R) -> R {
        f(&*self.sequence.read())
    }

    /// Edit the sequence. The transport layout follows any change in bars.
    ///
    /// Bars past the configured cap are dropped when the edit returns.
    pub fn sequence_mut<R>(&self, f: impl FnOnce(&mut Sequence) -> R) -> R {
        let max_bars = self.grid.read().max_bars();
        let mut sequence = self.sequence.write();
        let before = sequence.bar_count();
        let result = f(&mut *sequence);
        let dropped = sequence.cap_bars(max_bars);
        if dropped > 0 {
            tracing::warn!(
                "Sequence edit went {} bars past the cap of {}; dropped them",
                dropped,
                max_bars
            );
        }
        if sequence.bar_count() != before {
            self.sync_layout(&sequence);
        }
        result
    }

    /// Append an empty bar, up to the configured bar cap.
    pub fn add_bar(&self) -> Result<u32> {
        let max_bars = self.grid.read().max_bars();
        let mut sequence = self.sequence.write();
        if sequence.bar_count() >= max_bars {
            return Err(CoreError::SequenceFull { max_bars }.into());
        }
        let bar = sequence.add_bar()?;
        self.sync_layout(&sequence);
        Ok(bar)
    }

    pub fn remove_bar(&self, bar: u32) -> Result<Bar> {
        let mut sequence = self.sequence.write();
        let removed = sequence.remove_bar(bar)?;
        self.sync_layout(&sequence);
        Ok(removed)
    }

    fn sync_layout(&self, sequence: &Sequence) {
        let lengths = sequence.bar_lengths();
        self.grid.write().set_bar_lengths(lengths.clone());
        self.transport.set_bar_lengths(lengths);
    }

    pub fn timecode(&self, bar: u32, step: u32) -> Result<Timecode> {
        Ok(self.grid.read().timecode(GridPosition::new(bar, step))?)
    }

    /// Dynamics of one beat, using the step before it for motion.
    pub fn analyze(&self, bar: u32, step: u32) -> Result<PoseDynamicsResult> {
        let position = GridPosition::new(bar, step);
        let seconds_per_step = self.grid.read().seconds_per_step().ok();
        let sequence = self.sequence.read();
        let beat = lookup(&sequence, position)?;
        Ok(self
            .analyzer
            .analyze(beat, sequence.previous_beat(position), seconds_per_step))
    }

    pub fn notate(&self, bar: u32, step: u32) -> Result<Notation> {
        let position = GridPosition::new(bar, step);
        let dynamics = self.analyze(bar, step)?;
        let timecode = self.timecode(bar, step)?;
        let sequence = self.sequence.read();
        let beat = lookup(&sequence, position)?;
        Ok(self
            .notation
            .generate(bar, step, beat, Some(&dynamics), &timecode))
    }

    /// Advance the transport one step and describe the step that played.
    ///
    /// `None` while stopped.
    pub fn tick(&self) -> Option<BeatReport> {
        let tick = self.transport.tick()?;
        *self.last_tick.lock() = Some(tick);

        let seconds_per_step = Some(self.transport.seconds_per_step());
        let sequence = self.sequence.read();
        let empty = BeatData::default();
        let beat = sequence.beat(tick.position).unwrap_or(&empty);
        let previous = sequence.previous_beat(tick.position);

        let dynamics = self.analyzer.analyze(beat, previous, seconds_per_step);
        let notation = self.notation.generate_at(
            tick.position,
            beat,
            Some(&dynamics),
            &tick.timecode,
        );
        Some(BeatReport {
            tick,
            dynamics,
            notation,
        })
    }

    /// The step most recently played, if any.
    pub fn last_tick(&self) -> Option<TransportTick> {
        *self.last_tick.lock()
    }

    /// Where a captured frame lands: the sounding step while playing,
    /// otherwise the playhead.
    pub fn record_position(&self) -> GridPosition {
        match self.last_tick() {
            Some(tick) if self.transport.is_playing() => tick.position,
            _ => self.transport.position(),
        }
    }

    /// Store one captured frame at [`ChoreoEngine::record_position`].
    #[cfg(feature = "capture")]
    pub fn record_frame(&self, frame: &KeypointFrame) -> Result<CapturedPose> {
        let position = self.record_position();
        let mut sequence = self.sequence.write();
        Ok(self.recorder.lock().record(frame, &mut *sequence, position)?)
    }

    /// Pull one frame from `provider` and record it. `Ok(None)` when no frame
    /// was ready.
    #[cfg(feature = "capture")]
    pub fn capture_from(
        &self,
        provider: &mut dyn PoseCaptureProvider,
    ) -> Result<Option<CapturedPose>> {
        let position = self.record_position();
        let mut sequence = self.sequence.write();
        Ok(self
            .recorder
            .lock()
            .capture_next(provider, &mut *sequence, position)?)
    }

    /// Frames written and rejected so far.
    #[cfg(feature = "capture")]
    pub fn capture_stats(&self) -> (u64, u64) {
        let recorder = self.recorder.lock();
        (recorder.frames_written(), recorder.frames_rejected())
    }
}

fn lookup(sequence: &Sequence, position: GridPosition) -> choreo_core::Result<&BeatData> {
    let bar = sequence.bar(position.bar).ok_or(CoreError::BarOutOfRange {
        bar: position.bar,
        bars: sequence.bar_count(),
    })?;
    bar.step(position.step).ok_or(CoreError::StepOutOfRange {
        step: position.step,
        steps: bar.len(),
    })
}
