//! Bars of beats: the grid that the editor and the capture recorder write into.
//!
//! Bars are numbered from 1 and always contiguous; removing a bar renumbers
//! everything after it.

use crate::beat::BeatData;
use crate::time_grid::{GridPosition, MAX_BARS, STEPS_PER_BAR};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Exactly [`STEPS_PER_BAR`] beats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<BeatData>", into = "Vec<BeatData>")]
pub struct Bar {
    steps: Vec<BeatData>,
}

impl Bar {
    pub fn new() -> Self {
        Self {
            steps: vec![BeatData::default(); STEPS_PER_BAR as usize],
        }
    }

    pub fn len(&self) -> u32 {
        STEPS_PER_BAR
    }

    pub fn is_empty(&self) -> bool {
        self.steps.iter().all(BeatData::is_empty)
    }

    pub fn step(&self, step: u32) -> Option<&BeatData> {
        self.steps.get(step as usize)
    }

    pub fn step_mut(&mut self, step: u32) -> Option<&mut BeatData> {
        self.steps.get_mut(step as usize)
    }

    pub fn steps(&self) -> &[BeatData] {
        &self.steps
    }

    pub fn clear(&mut self) {
        self.steps.iter_mut().for_each(BeatData::clear);
    }
}

impl Default for Bar {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<Vec<BeatData>> for Bar {
    type Error = Error;

    fn try_from(steps: Vec<BeatData>) -> Result<Self> {
        if steps.len() != STEPS_PER_BAR as usize {
            return Err(Error::InvalidConfig(format!(
                "bar must hold {} steps, found {}",
                STEPS_PER_BAR,
                steps.len()
            )));
        }
        Ok(Self { steps })
    }
}

impl From<Bar> for Vec<BeatData> {
    fn from(bar: Bar) -> Self {
        bar.steps
    }
}

/// The full choreography grid, holding at most `max_bars` bars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sequence {
    bars: Vec<Bar>,
    #[serde(skip, default = "default_max_bars")]
    max_bars: u32,
}

fn default_max_bars() -> u32 {
    MAX_BARS
}

impl Default for Sequence {
    fn default() -> Self {
        Self {
            bars: Vec::new(),
            max_bars: MAX_BARS,
        }
    }
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sequence with `bars` empty bars.
    pub fn with_bars(bars: u32) -> Self {
        Self {
            bars: (0..bars).map(|_| Bar::new()).collect(),
            ..Self::default()
        }
    }

    pub fn max_bars(&self) -> u32 {
        self.max_bars
    }

    /// Fails with [`Error::SequenceFull`] if the sequence already holds more
    /// than `max_bars` bars.
    pub fn set_max_bars(&mut self, max_bars: u32) -> Result<()> {
        if self.bar_count() > max_bars {
            return Err(Error::SequenceFull { max_bars });
        }
        self.max_bars = max_bars;
        Ok(())
    }

    pub fn bar_count(&self) -> u32 {
        self.bars.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Append an empty bar and return its number.
    pub fn add_bar(&mut self) -> Result<u32> {
        self.ensure_room()?;
        self.bars.push(Bar::new());
        Ok(self.bar_count())
    }

    /// Insert an empty bar so that it becomes bar `at`.
    pub fn insert_bar(&mut self, at: u32) -> Result<()> {
        self.ensure_room()?;
        if at == 0 || at > self.bar_count() + 1 {
            return Err(Error::BarOutOfRange {
                bar: at,
                bars: self.bar_count(),
            });
        }
        self.bars.insert((at - 1) as usize, Bar::new());
        Ok(())
    }

    /// Drop every bar past `max_bars` and hold the cap there. Returns how many
    /// bars were dropped.
    pub fn cap_bars(&mut self, max_bars: u32) -> u32 {
        let dropped = self.bar_count().saturating_sub(max_bars);
        self.bars.truncate(max_bars as usize);
        self.max_bars = max_bars;
        dropped
    }

    /// Remove bar `bar`; later bars shift down by one.
    pub fn remove_bar(&mut self, bar: u32) -> Result<Bar> {
        let idx = self.index(bar)?;
        Ok(self.bars.remove(idx))
    }

    pub fn bar(&self, bar: u32) -> Option<&Bar> {
        self.index(bar).ok().map(|i| &self.bars[i])
    }

    pub fn bar_mut(&mut self, bar: u32) -> Option<&mut Bar> {
        let idx = self.index(bar).ok()?;
        Some(&mut self.bars[idx])
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn beat(&self, position: GridPosition) -> Option<&BeatData> {
        self.bar(position.bar)?.step(position.step)
    }

    pub fn beat_mut(&mut self, position: GridPosition) -> Option<&mut BeatData> {
        self.bar_mut(position.bar)?.step_mut(position.step)
    }

    /// Like [`Sequence::beat_mut`], but says why the cell is missing.
    pub fn try_beat_mut(&mut self, position: GridPosition) -> Result<&mut BeatData> {
        let idx = self.index(position.bar)?;
        let bar = &mut self.bars[idx];
        let steps = bar.len();
        bar.step_mut(position.step).ok_or(Error::StepOutOfRange {
            step: position.step,
            steps,
        })
    }

    /// The step before `position`, crossing back into the previous bar.
    pub fn previous_position(&self, position: GridPosition) -> Option<GridPosition> {
        if position.step > 0 {
            return Some(GridPosition::new(position.bar, position.step - 1));
        }
        let prev_bar = position.bar.checked_sub(1).filter(|&b| b >= 1)?;
        let len = self.bar(prev_bar)?.len();
        Some(GridPosition::new(prev_bar, len - 1))
    }

    pub fn previous_beat(&self, position: GridPosition) -> Option<&BeatData> {
        self.beat(self.previous_position(position)?)
    }

    /// Step count of every bar, in bar order.
    pub fn bar_lengths(&self) -> Vec<u32> {
        self.bars.iter().map(Bar::len).collect()
    }

    pub fn clear_pose(&mut self, position: GridPosition) -> Result<()> {
        self.try_beat_mut(position)?.clear_pose();
        Ok(())
    }

    pub fn clear_grounding(&mut self, position: GridPosition) -> Result<()> {
        self.try_beat_mut(position)?.clear_grounding();
        Ok(())
    }

    /// Every cell with its position.
    pub fn iter_beats(&self) -> impl Iterator<Item = (GridPosition, &BeatData)> + '_ {
        self.bars.iter().enumerate().flat_map(|(i, bar)| {
            bar.steps()
                .iter()
                .enumerate()
                .map(move |(s, beat)| (GridPosition::new(i as u32 + 1, s as u32), beat))
        })
    }

    fn ensure_room(&self) -> Result<()> {
        if self.bar_count() >= self.max_bars {
            return Err(Error::SequenceFull {
                max_bars: self.max_bars,
            });
        }
        Ok(())
    }

    fn index(&self, bar: u32) -> Result<usize> {
        if bar == 0 || bar > self.bar_count() {
            return Err(Error::BarOutOfRange {
                bar,
                bars: self.bar_count(),
            });
        }
        Ok((bar - 1) as usize)
    }
}
