//! Beat-to-beat motion: what the previous step looked like and how long ago it was.

use crate::center_of_mass::calculate_center_of_mass;
use choreo_core::{BeatData, Joint, Vector3};

/// Optional history for velocity-based measures.
///
/// Either half may be missing; measures that need both return `None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MotionContext<'a> {
    pub previous: Option<&'a BeatData>,
    pub seconds_per_step: Option<f64>,
}

impl<'a> MotionContext<'a> {
    pub fn new(previous: Option<&'a BeatData>, seconds_per_step: Option<f64>) -> Self {
        Self {
            previous,
            seconds_per_step,
        }
    }

    /// Step duration, if it is usable as a divisor.
    pub fn step_seconds(&self) -> Option<f32> {
        self.seconds_per_step
            .filter(|s| s.is_finite() && *s > 0.0)
            .map(|s| s as f32)
    }

    /// Velocity of `joint` from the previous beat to `current`, in units per second.
    pub fn joint_velocity(&self, joint: Joint, current: Vector3) -> Option<Vector3> {
        let dt = self.step_seconds()?;
        let before = self.previous?.joint_info.vector(joint)?;
        finite((current - before) / dt)
    }

    /// Center-of-mass velocity from the previous beat to `current_com`.
    ///
    /// `None` when the previous beat has no pose.
    pub fn com_velocity(&self, current_com: Vector3) -> Option<Vector3> {
        let dt = self.step_seconds()?;
        let previous = self.previous?;
        if previous.joint_info.is_empty() {
            return None;
        }
        finite((current_com - calculate_center_of_mass(&previous.joint_info)) / dt)
    }
}

fn finite(v: Vector3) -> Option<Vector3> {
    v.is_finite().then_some(v)
}
