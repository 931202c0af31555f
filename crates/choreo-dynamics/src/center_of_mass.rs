use choreo_core::{average, JointInfo, Vector3};

/// Unweighted mean of every joint present.
///
/// Every joint counts equally; this is not an anthropometric mass model.
/// An empty pose yields the origin.
pub fn calculate_center_of_mass(joints: &JointInfo) -> Vector3 {
    average(joints.vectors())
}
