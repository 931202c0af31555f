//! Transport clock: the single owner of the playhead.
//!
//! Consumers either call [`TransportClock::tick`] from the playback timer or
//! subscribe to the tick stream; nobody keeps a shadow copy of the position.

use crate::time_grid::{
    bar_beat_from_global_step_capped, global_step_index, step_to_timecode, GridPosition, TimeGrid,
    Timecode,
};
use crate::{Error, Result};
use arc_swap::ArcSwap;
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Ticks a subscriber may fall behind by before newer ticks are dropped for it.
pub const SUBSCRIBER_CAPACITY: usize = 256;

/// The step that just sounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransportTick {
    pub position: GridPosition,
    pub global_step: u64,
    /// Seconds from the top of the grid.
    pub elapsed: f64,
    pub timecode: Timecode,
}

#[derive(Debug)]
struct ClockState {
    next_step: u64,
    seconds_per_step: f64,
}

/// Playhead over a bar layout. Loops back to bar 1 after the last step.
pub struct TransportClock {
    playing: AtomicBool,
    state: Mutex<ClockState>,
    layout: ArcSwap<Vec<u32>>,
    subscribers: Mutex<Vec<Sender<TransportTick>>>,
}

impl TransportClock {
    /// Clock over `grid`'s bar layout and tempo. Fails on unschedulable timing.
    pub fn new(grid: &TimeGrid) -> Result<Self> {
        let seconds_per_step = grid.seconds_per_step()?;
        Ok(Self {
            playing: AtomicBool::new(false),
            state: Mutex::new(ClockState {
                next_step: 0,
                seconds_per_step,
            }),
            layout: ArcSwap::from_pointee(grid.bar_lengths().to_vec()),
            subscribers: Mutex::new(Vec::new()),
        })
    }

    pub fn start(&self) {
        if !self.playing.swap(true, Ordering::AcqRel) {
            tracing::debug!("Transport started at {}", self.position());
        }
    }

    pub fn stop(&self) {
        if self.playing.swap(false, Ordering::AcqRel) {
            tracing::debug!("Transport stopped at {}", self.position());
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing.load(Ordering::Acquire)
    }

    /// Stop and return to bar 1, step 0.
    pub fn reset(&self) {
        self.stop();
        self.state.lock().next_step = 0;
    }

    pub fn seconds_per_step(&self) -> f64 {
        self.state.lock().seconds_per_step
    }

    /// Adopt a new tempo / meter. The playhead keeps its step.
    pub fn set_timing(&self, grid: &TimeGrid) -> Result<()> {
        let seconds_per_step = grid.seconds_per_step()?;
        self.state.lock().seconds_per_step = seconds_per_step;
        Ok(())
    }

    pub fn bar_lengths(&self) -> Arc<Vec<u32>> {
        self.layout.load_full()
    }

    /// Swap in a new bar layout, wrapping the playhead if it fell off the end.
    pub fn set_bar_lengths(&self, bar_lengths: Vec<u32>) {
        let total: u64 = bar_lengths.iter().map(|&l| l as u64).sum();
        tracing::debug!(
            "Transport layout: {} bars, {} steps",
            bar_lengths.len(),
            total
        );
        self.layout.store(Arc::new(bar_lengths));

        let mut state = self.state.lock();
        if state.next_step >= total {
            state.next_step = 0;
        }
    }

    /// Position of the next step to sound.
    pub fn position(&self) -> GridPosition {
        let layout = self.layout.load();
        let next = self.state.lock().next_step;
        locate(next, &layout)
    }

    /// Move the playhead. The target must exist in the current layout.
    pub fn seek(&self, position: GridPosition) -> Result<()> {
        let layout = self.layout.load();
        let bars = layout.len() as u32;
        if position.bar == 0 || position.bar > bars {
            return Err(Error::BarOutOfRange {
                bar: position.bar,
                bars,
            });
        }
        let steps = layout[(position.bar - 1) as usize];
        if position.step >= steps {
            return Err(Error::StepOutOfRange {
                step: position.step,
                steps,
            });
        }

        self.state.lock().next_step = global_step_index(position.bar, position.step, &layout);
        tracing::debug!("Transport seek to {}", position);
        Ok(())
    }

    /// Receive ticks from now on. A subscriber holding [`SUBSCRIBER_CAPACITY`]
    /// unread ticks misses new ones until it drains.
    pub fn subscribe(&self) -> Receiver<TransportTick> {
        let (tx, rx) = bounded(SUBSCRIBER_CAPACITY);
        self.subscribers.lock().push(tx);
        rx
    }

    /// Advance one step while playing. Returns the step that sounded and
    /// forwards it to subscribers.
    pub fn tick(&self) -> Option<TransportTick> {
        if !self.is_playing() {
            return None;
        }

        let layout = self.layout.load();
        let total: u64 = layout.iter().map(|&l| l as u64).sum();
        if total == 0 {
            return None;
        }

        let tick = {
            let mut state = self.state.lock();
            let global_step = state.next_step % total;
            state.next_step = (global_step + 1) % total;
            TransportTick {
                position: locate(global_step, &layout),
                global_step,
                elapsed: global_step as f64 * state.seconds_per_step,
                timecode: step_to_timecode(global_step, state.seconds_per_step),
            }
        };

        self.broadcast(tick);
        Some(tick)
    }

    fn broadcast(&self, tick: TransportTick) {
        let mut subscribers = self.subscribers.lock();
        let before = subscribers.len();
        subscribers.retain(|tx| match tx.try_send(tick) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                tracing::trace!("Transport subscriber full, skipping step {}", tick.global_step);
                true
            }
            Err(TrySendError::Disconnected(_)) => false,
        });
        let dropped = before - subscribers.len();
        if dropped > 0 {
            tracing::warn!("Dropped {} disconnected transport subscribers", dropped);
        }
    }
}

fn locate(global_step: u64, layout: &[u32]) -> GridPosition {
    let max_bars = (layout.len() as u32).max(1);
    bar_beat_from_global_step_capped(global_step, layout, max_bars)
        .unwrap_or_else(|e| e.best_effort().unwrap_or_default())
}
