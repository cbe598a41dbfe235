use serde::Serialize;
use utoipa::ToSchema;

use crate::predict::{Policy, RiskAssessment};
use crate::tle::{adjust_mean_motion, ElementSet, TleError, UNKNOWN_NAME};

/// Name given to a synthesized element set whose source had none.
pub const SAFE_NAME: &str = "SAFE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ManeuverKind {
    NoAction,
    RetrogradeBurn,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ManeuverPlan {
    #[serde(rename = "type")]
    pub kind: ManeuverKind,
    #[serde(rename = "recommended_dv_mps")]
    pub delta_v_mps: f64,
    #[serde(rename = "note")]
    pub rationale: String,
}

/// Produces a plan from an assessed conjunction.
pub trait ManeuverStrategy {
    fn plan(&self, risk: &RiskAssessment) -> ManeuverPlan;
}

/// Fixed along-track nudge whenever the pair is flagged.
#[derive(Debug, Clone, Copy)]
pub struct HeuristicManeuver {
    pub delta_v_mps: f64,
}

impl HeuristicManeuver {
    pub fn from_policy(policy: &Policy) -> Self {
        Self {
            delta_v_mps: policy.nominal_delta_v_mps,
        }
    }
}

impl ManeuverStrategy for HeuristicManeuver {
    fn plan(&self, risk: &RiskAssessment) -> ManeuverPlan {
        if risk.risky {
            ManeuverPlan {
                kind: ManeuverKind::RetrogradeBurn,
                delta_v_mps: self.delta_v_mps,
                rationale: "small along-track adjustment to desynchronize time of closest approach"
                    .to_string(),
            }
        } else {
            ManeuverPlan {
                kind: ManeuverKind::NoAction,
                delta_v_mps: 0.0,
                rationale: "separation above threshold".to_string(),
            }
        }
    }
}

/// Plan a maneuver and derive the element set that would result from it.
///
/// The mean motion shift is `delta_v_mps * policy.mean_motion_per_delta_v`,
/// a coarse calibration rather than a physical delta-v conversion.
pub fn plan_and_apply(
    strategy: &impl ManeuverStrategy,
    policy: &Policy,
    satellite: &ElementSet,
    risk: &RiskAssessment,
) -> Result<(ManeuverPlan, ElementSet), TleError> {
    let plan = strategy.plan(risk);
    if plan.kind == ManeuverKind::NoAction {
        return Ok((plan, satellite.clone()));
    }

    let delta = plan.delta_v_mps * policy.mean_motion_per_delta_v;
    let line2 = adjust_mean_motion(&satellite.line2, delta)?;
    let name = if satellite.name == UNKNOWN_NAME {
        SAFE_NAME.to_string()
    } else {
        satellite.name.clone()
    };

    Ok((plan, ElementSet::new(name, satellite.line1.clone(), line2)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predict::Regime;
    use crate::tle::checksum;

    const L1: &str = "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927";
    const L2: &str = "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.50000000563532";

    fn risk(risky: bool) -> RiskAssessment {
        RiskAssessment {
            min_distance_km: Some(if risky { 2.0 } else { 50.0 }),
            tca: None,
            regime: Regime::Leo,
            threshold_km: 5.0,
            risky,
        }
    }

    fn apply(set: &ElementSet, risky: bool) -> (ManeuverPlan, ElementSet) {
        let policy = Policy::default();
        plan_and_apply(&HeuristicManeuver::from_policy(&policy), &policy, set, &risk(risky)).unwrap()
    }

    #[test]
    fn no_risk_returns_input_unchanged() {
        let set = ElementSet::new(UNKNOWN_NAME, L1, L2);
        let (plan, out) = apply(&set, false);
        assert_eq!(plan.kind, ManeuverKind::NoAction);
        assert_eq!(plan.delta_v_mps, 0.0);
        assert_eq!(plan.rationale, "separation above threshold");
        assert_eq!(out, set);
    }

    #[test]
    fn risk_nudges_mean_motion() {
        let set = ElementSet::new(UNKNOWN_NAME, L1, L2);
        let (plan, out) = apply(&set, true);
        assert_eq!(plan.kind, ManeuverKind::RetrogradeBurn);
        assert_eq!(plan.delta_v_mps, 1.0);
        assert_eq!(out.name, SAFE_NAME);
        assert_eq!(out.line1, L1);
        assert_eq!(
            out.line2,
            "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.50005000563537"
        );
        assert_eq!(checksum(&out.line2), 7);
    }

    #[test]
    fn named_satellite_keeps_name() {
        let set = ElementSet::new("SENTINEL-1A", L1, L2);
        let (_, out) = apply(&set, true);
        assert_eq!(out.name, "SENTINEL-1A");
    }

    #[test]
    fn plan_serializes_with_service_field_names() {
        let (plan, _) = apply(&ElementSet::new(UNKNOWN_NAME, L1, L2), true);
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["type"], "retrograde_burn");
        assert_eq!(json["recommended_dv_mps"], 1.0);
    }
}
