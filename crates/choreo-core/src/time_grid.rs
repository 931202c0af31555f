//! Step grid timing: (bar, step) coordinates, global step indices and wall-clock time.
//!
//! Bars are addressed 1-based, steps within a bar 0-based. `bar_lengths[i]` is the
//! step count of bar `i + 1`; bars past the end of the slice have
//! [`STEPS_PER_BAR`] steps.

use crate::config::GridConfig;
use crate::{Error, Result};
use core::fmt;
use serde::{Deserialize, Serialize};

/// Steps in a standard bar.
pub const STEPS_PER_BAR: u32 = 16;

/// Upper bound on bars walked when mapping a global step back onto the grid.
pub const MAX_BARS: u32 = 256;

const VALID_BEAT_UNITS: [u32; 5] = [2, 4, 8, 16, 32];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSignature {
    pub beats_per_bar: u32,
    pub beat_unit: u32,
}

impl TimeSignature {
    pub const fn new(beats_per_bar: u32, beat_unit: u32) -> Self {
        Self {
            beats_per_bar,
            beat_unit,
        }
    }

    /// Strict check: beats per bar must be positive and the unit one of 2, 4, 8, 16, 32.
    ///
    /// The timing functions themselves tolerate `beats_per_bar == 0`.
    pub fn validate(&self) -> Result<()> {
        if self.beats_per_bar == 0 || !VALID_BEAT_UNITS.contains(&self.beat_unit) {
            return Err(Error::InvalidTimeSignature {
                beats_per_bar: self.beats_per_bar,
                beat_unit: self.beat_unit,
            });
        }
        Ok(())
    }
}

impl Default for TimeSignature {
    fn default() -> Self {
        Self::new(4, 4)
    }
}

impl fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.beats_per_bar, self.beat_unit)
    }
}

/// A cell on the grid: 1-based bar, 0-based step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridPosition {
    pub bar: u32,
    pub step: u32,
}

impl GridPosition {
    pub const fn new(bar: u32, step: u32) -> Self {
        Self { bar, step }
    }
}

impl Default for GridPosition {
    fn default() -> Self {
        Self::new(1, 0)
    }
}

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.bar, self.step)
    }
}

/// Minutes / seconds / centiseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Timecode {
    pub minutes: u32,
    pub seconds: u32,
    pub centiseconds: u32,
}

impl Timecode {
    pub const ZERO: Self = Self {
        minutes: 0,
        seconds: 0,
        centiseconds: 0,
    };

    pub fn from_seconds(total: f64) -> Self {
        if !total.is_finite() || total <= 0.0 {
            return Self::ZERO;
        }
        Self {
            minutes: (total / 60.0).floor() as u32,
            seconds: (total % 60.0).floor() as u32,
            centiseconds: ((total * 100.0) % 100.0).floor() as u32,
        }
    }

    /// Zero-padded minutes.
    pub fn mm(&self) -> String {
        format!("{:02}", self.minutes)
    }

    /// Zero-padded seconds.
    pub fn ss(&self) -> String {
        format!("{:02}", self.seconds)
    }

    /// Zero-padded centiseconds.
    pub fn cs(&self) -> String {
        format!("{:02}", self.centiseconds)
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}.{:02}",
            self.minutes, self.seconds, self.centiseconds
        )
    }
}

/// Grid steps per musical beat. Falls back to the whole bar when
/// `beats_per_bar` is zero.
#[inline]
pub fn steps_per_musical_beat(steps_in_bar: u32, time_signature: TimeSignature) -> f64 {
    if time_signature.beats_per_bar > 0 {
        steps_in_bar as f64 / time_signature.beats_per_bar as f64
    } else {
        steps_in_bar as f64
    }
}

/// Duration of one grid step in seconds.
///
/// Fails with [`Error::InvalidTiming`] instead of returning a value that could
/// not be scheduled (zero, negative or non-finite).
pub fn seconds_per_step(bpm: f64, steps_in_bar: u32, time_signature: TimeSignature) -> Result<f64> {
    if !bpm.is_finite() || bpm <= 0.0 {
        return Err(Error::InvalidTiming {
            bpm,
            reason: "tempo must be a positive finite number",
        });
    }

    let per_beat = steps_per_musical_beat(steps_in_bar, time_signature);
    if !per_beat.is_finite() || per_beat <= 0.0 {
        return Err(Error::InvalidTiming {
            bpm,
            reason: "bar has no steps",
        });
    }

    let interval = (60.0 / bpm) / per_beat;
    if !interval.is_finite() || interval <= 0.0 {
        return Err(Error::InvalidTiming {
            bpm,
            reason: "step interval is not finite",
        });
    }
    Ok(interval)
}

/// Step count of a 1-based bar.
#[inline]
pub fn bar_length(bar: u32, bar_lengths: &[u32]) -> u32 {
    bar.checked_sub(1)
        .and_then(|i| bar_lengths.get(i as usize))
        .copied()
        .unwrap_or(STEPS_PER_BAR)
}

/// Global step index of `(bar, step)`: the lengths of every earlier bar plus `step`.
///
/// Bar 0 is treated as bar 1.
pub fn global_step_index(bar: u32, step: u32, bar_lengths: &[u32]) -> u64 {
    let prior_bars = bar.saturating_sub(1) as usize;
    let sized = prior_bars.min(bar_lengths.len());

    let sized_steps: u64 = bar_lengths[..sized].iter().map(|&len| len as u64).sum();
    let default_steps = (prior_bars - sized) as u64 * STEPS_PER_BAR as u64;

    sized_steps + default_steps + step as u64
}

/// Inverse of [`global_step_index`], walking at most [`MAX_BARS`] bars.
pub fn bar_beat_from_global_step(global_step: u64, bar_lengths: &[u32]) -> Result<GridPosition> {
    bar_beat_from_global_step_capped(global_step, bar_lengths, MAX_BARS)
}

/// Inverse of [`global_step_index`] with an explicit bar cap.
///
/// A step past the cap yields [`Error::BarLimitExceeded`] carrying the last
/// step of the final bar walked.
pub fn bar_beat_from_global_step_capped(
    global_step: u64,
    bar_lengths: &[u32],
    max_bars: u32,
) -> Result<GridPosition> {
    let mut bar_start = 0u64;
    let mut best_effort = GridPosition::default();

    for bar in 1..=max_bars {
        let len = bar_length(bar, bar_lengths);
        if global_step < bar_start + len as u64 {
            return Ok(GridPosition::new(bar, (global_step - bar_start) as u32));
        }
        if len > 0 {
            best_effort = GridPosition::new(bar, len - 1);
        }
        bar_start += len as u64;
    }

    tracing::warn!(
        "Global step {} lies beyond the {}-bar walk limit",
        global_step,
        max_bars
    );
    Err(Error::BarLimitExceeded {
        max_bars,
        global_step,
        best_effort,
    })
}

/// Convert a global step into a timecode. Step 0 is always `00:00.00`.
pub fn step_to_timecode(global_step: u64, seconds_per_step: f64) -> Timecode {
    Timecode::from_seconds(global_step as f64 * seconds_per_step)
}

/// Nearest grid step at or before `seconds`. Non-finite input maps to step 0.
pub fn seconds_to_global_step(seconds: f64, seconds_per_step: f64) -> u64 {
    if !seconds.is_finite() || seconds <= 0.0 {
        return 0;
    }
    if !seconds_per_step.is_finite() || seconds_per_step <= 0.0 {
        return 0;
    }
    // Absorb float error so exact step boundaries do not round down a step.
    (seconds / seconds_per_step + 1e-9).floor() as u64
}

/// Grid timing bound to a tempo, meter and bar layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeGrid {
    bpm: f64,
    time_signature: TimeSignature,
    steps_per_bar: u32,
    max_bars: u32,
    bar_lengths: Vec<u32>,
}

impl TimeGrid {
    pub fn new(config: &GridConfig) -> Self {
        Self {
            bpm: config.bpm,
            time_signature: config.time_signature,
            steps_per_bar: config.steps_per_bar,
            max_bars: config.max_bars,
            bar_lengths: Vec::new(),
        }
    }

    pub fn with_bar_lengths(mut self, bar_lengths: Vec<u32>) -> Self {
        self.bar_lengths = bar_lengths;
        self
    }

    pub fn bpm(&self) -> f64 {
        self.bpm
    }

    pub fn set_bpm(&mut self, bpm: f64) {
        self.bpm = bpm;
    }

    pub fn time_signature(&self) -> TimeSignature {
        self.time_signature
    }

    pub fn set_time_signature(&mut self, time_signature: TimeSignature) {
        self.time_signature = time_signature;
    }

    pub fn steps_per_bar(&self) -> u32 {
        self.steps_per_bar
    }

    pub fn max_bars(&self) -> u32 {
        self.max_bars
    }

    pub fn bar_lengths(&self) -> &[u32] {
        &self.bar_lengths
    }

    pub fn set_bar_lengths(&mut self, bar_lengths: Vec<u32>) {
        self.bar_lengths = bar_lengths;
    }

    pub fn steps_per_musical_beat(&self) -> f64 {
        steps_per_musical_beat(self.steps_per_bar, self.time_signature)
    }

    pub fn seconds_per_step(&self) -> Result<f64> {
        seconds_per_step(self.bpm, self.steps_per_bar, self.time_signature)
    }

    pub fn global_step(&self, position: GridPosition) -> u64 {
        global_step_index(position.bar, position.step, &self.bar_lengths)
    }

    pub fn position(&self, global_step: u64) -> Result<GridPosition> {
        bar_beat_from_global_step_capped(global_step, &self.bar_lengths, self.max_bars)
    }

    pub fn timecode(&self, position: GridPosition) -> Result<Timecode> {
        self.check_position(position)?;
        Ok(step_to_timecode(
            self.global_step(position),
            self.seconds_per_step()?,
        ))
    }

    /// Seconds from the top of the grid to the start of `position`.
    pub fn elapsed_seconds(&self, position: GridPosition) -> Result<f64> {
        self.check_position(position)?;
        Ok(self.global_step(position) as f64 * self.seconds_per_step()?)
    }

    /// Positions must fall inside the bar layout. A grid without a layout
    /// accepts any bar of [`STEPS_PER_BAR`] steps.
    fn check_position(&self, position: GridPosition) -> Result<()> {
        let bars = self.bar_lengths.len() as u32;
        if position.bar == 0 || (bars > 0 && position.bar > bars) {
            return Err(Error::BarOutOfRange {
                bar: position.bar,
                bars,
            });
        }
        let steps = bar_length(position.bar, &self.bar_lengths);
        if position.step >= steps {
            return Err(Error::StepOutOfRange {
                step: position.step,
                steps,
            });
        }
        Ok(())
    }

    /// Grid cell sounding at `seconds` (e.g. a media cue point).
    pub fn position_at_seconds(&self, seconds: f64) -> Result<GridPosition> {
        let step = seconds_to_global_step(seconds, self.seconds_per_step()?);
        self.position(step)
    }
}

impl Default for TimeGrid {
    fn default() -> Self {
        Self::new(&GridConfig::default())
    }
}
