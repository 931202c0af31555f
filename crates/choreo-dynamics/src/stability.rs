//! Balance score from the ground-plane projection of the center of mass.
//!
//! The base of support is a disc on the (x, z) plane:
//! - both feet down: centred between the ankles, radius half their spacing
//! - one foot down: centred on that ankle, fixed radius
//!
//! Height is ignored.

use crate::config::DynamicsConfig;
use choreo_core::{distance_2d, GroundingState, Joint, JointInfo, Side, Vector3};

/// Perfect balance.
pub const MAX_STABILITY: u8 = 100;

/// Ground-plane support disc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseOfSupport {
    pub center: Vector3,
    pub radius: f32,
}

/// Support disc for the current contacts, or `None` when airborne.
///
/// A grounded foot without an ankle sample is treated as standing at the origin.
pub fn base_of_support(
    grounding: &GroundingState,
    joints: &JointInfo,
    config: &DynamicsConfig,
) -> Option<BaseOfSupport> {
    let ankle = |side| joints.vector(Joint::ankle(side)).unwrap_or(Vector3::ZERO);

    match (
        grounding.is_grounded(Side::Left),
        grounding.is_grounded(Side::Right),
    ) {
        (true, true) => {
            let (left, right) = (ankle(Side::Left), ankle(Side::Right));
            let center = (left + right) / 2.0;
            Some(BaseOfSupport {
                center,
                radius: distance_2d(left, center),
            })
        }
        (true, false) => Some(BaseOfSupport {
            center: ankle(Side::Left),
            radius: config.single_foot_radius,
        }),
        (false, true) => Some(BaseOfSupport {
            center: ankle(Side::Right),
            radius: config.single_foot_radius,
        }),
        (false, false) => None,
    }
}

/// Stability in `0..=100` with the default tuning.
pub fn calculate_stability(
    center_of_mass: Vector3,
    grounding: &GroundingState,
    joints: &JointInfo,
) -> u8 {
    calculate_stability_with(center_of_mass, grounding, joints, &DynamicsConfig::default())
}

/// Stability in `0..=100`: linear falloff from the support centre to its rim.
///
/// Airborne is always 0. Feet closer together than
/// `feet_together_radius` score 100 regardless of the center of mass.
pub fn calculate_stability_with(
    center_of_mass: Vector3,
    grounding: &GroundingState,
    joints: &JointInfo,
    config: &DynamicsConfig,
) -> u8 {
    let Some(support) = base_of_support(grounding, joints, config) else {
        return 0;
    };

    if grounding.grounded_count() == 2 && support.radius < config.feet_together_radius {
        return MAX_STABILITY;
    }

    falloff(distance_2d(center_of_mass, support.center), support.radius)
}

fn falloff(distance: f32, radius: f32) -> u8 {
    if radius.is_nan() || radius <= 0.0 {
        return if distance <= f32::EPSILON { MAX_STABILITY } else { 0 };
    }
    // NaN distances collapse to 0 through `max`.
    let score = 100.0 * (1.0 - distance / radius).max(0.0);
    score.round().clamp(0.0, 100.0) as u8
}
