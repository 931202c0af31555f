//! Writes captured poses into the sequence grid.

use crate::config::CaptureConfig;
use crate::keypoint::KeypointFrame;
use crate::mapping::{frame_to_joint_info, infer_grounding};
use crate::provider::PoseCaptureProvider;
use crate::Result;
use choreo_core::{GridPosition, GroundingState, JointInfo, Sequence};

/// Pose and contacts derived from one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedPose {
    pub joints: JointInfo,
    pub grounding: GroundingState,
}

/// Converts frames and stores them at grid positions. Sounds, syllables and
/// cue points already on a step are left alone.
#[derive(Debug, Clone, Default)]
pub struct CaptureRecorder {
    config: CaptureConfig,
    frames_written: u64,
    frames_rejected: u64,
}

impl CaptureRecorder {
    pub fn new(config: CaptureConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            frames_written: 0,
            frames_rejected: 0,
        })
    }

    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    pub fn frames_rejected(&self) -> u64 {
        self.frames_rejected
    }

    /// Convert without storing.
    pub fn process(&self, frame: &KeypointFrame) -> Result<CapturedPose> {
        let joints = frame_to_joint_info(frame, &self.config)?;
        let grounding = infer_grounding(&joints, &self.config);
        Ok(CapturedPose { joints, grounding })
    }

    /// Convert `frame` and overwrite the pose and grounding at `position`.
    pub fn record(
        &mut self,
        frame: &KeypointFrame,
        sequence: &mut Sequence,
        position: GridPosition,
    ) -> Result<CapturedPose> {
        let captured = match self.process(frame) {
            Ok(captured) => captured,
            Err(e) => {
                self.frames_rejected += 1;
                tracing::warn!("Rejected capture frame at {:.3}s: {}", frame.timestamp, e);
                return Err(e);
            }
        };

        let beat = sequence.try_beat_mut(position)?;
        beat.joint_info = captured.joints.clone();
        beat.grounding = captured.grounding.clone();
        self.frames_written += 1;

        tracing::debug!(
            "Recorded {} joints at {} (frame {:.3}s)",
            captured.joints.len(),
            position,
            frame.timestamp
        );
        Ok(captured)
    }

    /// Pull one frame from `provider` and record it. `Ok(None)` when no frame
    /// was ready.
    pub fn capture_next(
        &mut self,
        provider: &mut dyn PoseCaptureProvider,
        sequence: &mut Sequence,
        position: GridPosition,
    ) -> Result<Option<CapturedPose>> {
        match provider.next_frame() {
            Some(frame) => self.record(&frame, sequence, position).map(Some),
            None => Ok(None),
        }
    }
}
