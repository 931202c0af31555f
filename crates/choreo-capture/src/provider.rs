//! Sources of keypoint frames.

use crate::keypoint::KeypointFrame;
use std::collections::VecDeque;

/// A live or recorded stream of detector frames.
///
/// `None` means no frame is ready right now; it does not end the stream.
pub trait PoseCaptureProvider: Send {
    fn next_frame(&mut self) -> Option<KeypointFrame>;
}

impl<F> PoseCaptureProvider for F
where
    F: FnMut() -> Option<KeypointFrame> + Send,
{
    fn next_frame(&mut self) -> Option<KeypointFrame> {
        self()
    }
}

/// Plays back a fixed list of frames, optionally looping.
#[derive(Debug, Clone, Default)]
pub struct ReplayProvider {
    frames: VecDeque<KeypointFrame>,
    looping: bool,
}

impl ReplayProvider {
    pub fn new(frames: impl IntoIterator<Item = KeypointFrame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            looping: false,
        }
    }

    /// Start over from the first frame after the last one.
    pub fn looping(mut self) -> Self {
        self.looping = true;
        self
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl PoseCaptureProvider for ReplayProvider {
    fn next_frame(&mut self) -> Option<KeypointFrame> {
        let frame = self.frames.pop_front()?;
        if self.looping {
            self.frames.push_back(frame.clone());
        }
        Some(frame)
    }
}
