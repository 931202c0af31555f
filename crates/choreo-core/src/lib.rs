//! Step-grid runtime for choreography sequencing.
//!
//! # Primary API
//!
//! - [`TimeGrid`]: (bar, step) ↔ global step ↔ seconds
//! - [`TransportClock`]: playback ticks and subscriptions
//! - [`Sequence`] / [`BeatData`]: the grid and its cells
//! - [`JointInfo`] / [`GroundingState`]: pose snapshot of a single beat
//!
//! Bars are numbered from 1, steps within a bar from 0.
//!
//! # Example
//!
//! ```ignore
//! use choreo_core::prelude::*;
//!
//! let grid = TimeGrid::default().with_bar_lengths(vec![16, 16]);
//! let timecode = grid.timecode(GridPosition::new(2, 0))?;
//! assert_eq!(timecode.to_string(), "00:02.00");
//! ```

pub mod error;
pub use error::{Error, Result};

pub mod config;
pub use config::GridConfig;

pub mod vector;
pub use vector::{average, distance_2d, lerp, lerp_vector, Vector3};

pub mod time_grid;
pub use time_grid::{
    bar_beat_from_global_step, bar_beat_from_global_step_capped, bar_length, global_step_index,
    seconds_per_step, seconds_to_global_step, step_to_timecode, steps_per_musical_beat,
    GridPosition, TimeGrid, TimeSignature, Timecode, MAX_BARS, STEPS_PER_BAR,
};

pub mod pose;
pub use pose::{
    AnkleOrientation, Intent, Joint, JointDetail, JointInfo, JointSample, Orientation, Side,
};

pub mod grounding;
pub use grounding::{ContactCode, ContactKind, ContactPoints, GroundingState};

pub mod beat;
pub use beat::{BeatData, SoundSet, MAX_SOUNDS_PER_STEP};

pub mod sequence;
pub use sequence::{Bar, Sequence};

pub mod transport;
pub use transport::{TransportClock, TransportTick, SUBSCRIBER_CAPACITY};

pub mod prelude {
    pub use crate::{
        BeatData, ContactCode, Error, GridConfig, GridPosition, GroundingState, Joint, JointInfo,
        JointSample, Result, Sequence, Side, TimeGrid, TimeSignature, Timecode, TransportClock,
        TransportTick, Vector3,
    };
}
