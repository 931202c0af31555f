//! Per-beat dynamics: center of mass, kinetic flow and stability in one pass.
//!
//! Every function here is total. Missing joints, missing grounding or an empty
//! pose produce documented defaults instead of errors.

use crate::center_of_mass::calculate_center_of_mass;
use crate::config::DynamicsConfig;
use crate::flow::{HeuristicFlow, KineticFlow, KineticFlowStrategy};
use crate::motion::MotionContext;
use crate::stability::calculate_stability_with;
use choreo_core::{BeatData, GroundingState, Joint, JointInfo, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Derived physical readout of one beat. Recomputed on demand, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoseDynamicsResult {
    pub center_of_mass: Vector3,
    pub path: Vec<Joint>,
    pub driver: Option<Joint>,
    pub anchor: Joint,
    pub terminus: Option<Joint>,
    pub momentum: f32,
    /// 0 (falling) to 100 (balanced).
    pub stability: u8,
    /// Units per second, when the previous beat and step duration are known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub com_velocity: Option<Vector3>,
}

/// Heuristic kinetic flow with default tuning.
pub fn calculate_kinetic_flow(joints: &JointInfo, grounding: &GroundingState) -> KineticFlow {
    HeuristicFlow.flow(
        joints,
        grounding,
        &MotionContext::default(),
        &DynamicsConfig::default(),
    )
}

/// Analyze one beat with the heuristic flow and default tuning.
///
/// `previous` and `seconds_per_step` feed the velocity readouts and may be
/// omitted.
pub fn analyze_pose_dynamics(
    beat: &BeatData,
    previous: Option<&BeatData>,
    seconds_per_step: Option<f64>,
) -> PoseDynamicsResult {
    PoseDynamicsAnalyzer::default().analyze(beat, previous, seconds_per_step)
}

/// Configured analyzer with a swappable [`KineticFlowStrategy`].
pub struct PoseDynamicsAnalyzer {
    config: DynamicsConfig,
    strategy: Box<dyn KineticFlowStrategy>,
}

impl PoseDynamicsAnalyzer {
    pub fn new(config: DynamicsConfig) -> Self {
        Self {
            config,
            strategy: Box::new(HeuristicFlow),
        }
    }

    pub fn with_strategy(mut self, strategy: impl KineticFlowStrategy + 'static) -> Self {
        self.strategy = Box::new(strategy);
        self
    }

    pub fn with_boxed_strategy(mut self, strategy: Box<dyn KineticFlowStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn config(&self) -> &DynamicsConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: DynamicsConfig) {
        self.config = config;
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    pub fn center_of_mass(&self, joints: &JointInfo) -> Vector3 {
        calculate_center_of_mass(joints)
    }

    pub fn stability(&self, center_of_mass: Vector3, beat: &BeatData) -> u8 {
        calculate_stability_with(
            center_of_mass,
            &beat.grounding,
            &beat.joint_info,
            &self.config,
        )
    }

    pub fn analyze(
        &self,
        beat: &BeatData,
        previous: Option<&BeatData>,
        seconds_per_step: Option<f64>,
    ) -> PoseDynamicsResult {
        let motion = MotionContext::new(previous, seconds_per_step);
        let center_of_mass = self.center_of_mass(&beat.joint_info);
        let flow = self
            .strategy
            .flow(&beat.joint_info, &beat.grounding, &motion, &self.config);

        PoseDynamicsResult {
            center_of_mass,
            path: flow.path,
            driver: flow.driver,
            anchor: flow.anchor,
            terminus: flow.terminus,
            momentum: flow.momentum,
            stability: self.stability(center_of_mass, beat),
            com_velocity: motion.com_velocity(center_of_mass),
        }
    }
}

impl Default for PoseDynamicsAnalyzer {
    fn default() -> Self {
        Self::new(DynamicsConfig::default())
    }
}

impl fmt::Debug for PoseDynamicsAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoseDynamicsAnalyzer")
            .field("config", &self.config)
            .field("strategy", &self.strategy.name())
            .finish()
    }
}
