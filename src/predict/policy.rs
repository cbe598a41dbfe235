use serde::Deserialize;

use crate::predict::Regime;

/// Named policy constants for regime classification, risk thresholds,
/// sampling cadence and the maneuver heuristic.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Policy {
    /// Mean motion (rev/day) above which an orbit is LEO.
    pub leo_min_mean_motion: f64,
    /// Mean motion (rev/day) below which an orbit is GEO.
    pub geo_max_mean_motion: f64,
    pub leo_threshold_km: f64,
    pub meo_threshold_km: f64,
    pub geo_threshold_km: f64,
    /// Sampling step floor for GEO satellites.
    pub geo_min_step_seconds: u32,
    /// Upper bound on propagator calls per object and request.
    pub max_samples_per_object: u64,
    pub nominal_delta_v_mps: f64,
    /// Heuristic calibration from delta-v (m/s) to mean motion (rev/day).
    /// Not derived from orbital mechanics.
    pub mean_motion_per_delta_v: f64,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            leo_min_mean_motion: 10.0,
            geo_max_mean_motion: 2.0,
            leo_threshold_km: 5.0,
            meo_threshold_km: 25.0,
            geo_threshold_km: 25.0,
            geo_min_step_seconds: 300,
            max_samples_per_object: 20_000,
            nominal_delta_v_mps: 1.0,
            mean_motion_per_delta_v: 0.00005,
        }
    }
}

impl Policy {
    pub fn classify(&self, mean_motion: f64) -> Regime {
        if mean_motion > self.leo_min_mean_motion {
            Regime::Leo
        } else if mean_motion < self.geo_max_mean_motion {
            Regime::Geo
        } else {
            Regime::Meo
        }
    }

    pub fn threshold_for(&self, regime: Regime) -> f64 {
        match regime {
            Regime::Leo => self.leo_threshold_km,
            Regime::Meo => self.meo_threshold_km,
            Regime::Geo => self.geo_threshold_km,
        }
    }

    /// Step actually used for a pair whose satellite sits in `regime`.
    pub fn sampling_step(&self, regime: Regime, step_seconds: u32) -> u32 {
        match regime {
            Regime::Geo => step_seconds.max(self.geo_min_step_seconds),
            Regime::Leo | Regime::Meo => step_seconds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regime_boundaries_are_exclusive() {
        let policy = Policy::default();
        assert_eq!(policy.classify(0.5), Regime::Geo);
        assert_eq!(policy.classify(2.0), Regime::Meo);
        assert_eq!(policy.classify(10.0), Regime::Meo);
        assert_eq!(policy.classify(10.1), Regime::Leo);
        assert_eq!(policy.classify(15.5), Regime::Leo);
    }

    #[test]
    fn thresholds_by_regime() {
        let policy = Policy::default();
        assert_eq!(policy.threshold_for(Regime::Leo), 5.0);
        assert_eq!(policy.threshold_for(Regime::Meo), 25.0);
        assert_eq!(policy.threshold_for(Regime::Geo), 25.0);
    }

    #[test]
    fn geo_step_has_floor() {
        let policy = Policy::default();
        assert_eq!(policy.sampling_step(Regime::Geo, 30), 300);
        assert_eq!(policy.sampling_step(Regime::Geo, 600), 600);
        assert_eq!(policy.sampling_step(Regime::Leo, 30), 30);
        assert_eq!(policy.sampling_step(Regime::Meo, 45), 45);
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let policy: Policy = serde_yaml::from_str("meo_threshold_km: 5.0\n").unwrap();
        assert_eq!(policy.meo_threshold_km, 5.0);
        assert_eq!(policy.leo_threshold_km, 5.0);
        assert_eq!(policy.geo_min_step_seconds, 300);
    }
}
