use std::thread;

use chrono::{DateTime, Utc};

use crate::predict::{
    assess, nearest_approach, plan_and_apply, sample, Diagnostics, HeuristicManeuver, Paths,
    Policy, PredictError, PredictionResult, Propagator, RiskAssessment, SamplingWindow,
    TleOutput, Trajectory,
};
use crate::tle::{parse_and_validate, ElementSet};

pub const DEFAULT_HORIZON_MINUTES: u32 = 60;
pub const DEFAULT_STEP_SECONDS: u32 = 30;

#[derive(Debug, Clone)]
pub struct PredictRequest {
    pub satellite_tle: String,
    pub debris_tle: String,
    pub horizon_minutes: u32,
    pub step_seconds: u32,
}

/// Screens one satellite/debris pair and proposes a correction when needed.
pub struct Predictor<P> {
    propagator: P,
    policy: Policy,
    strategy: HeuristicManeuver,
}

impl<P: Propagator> Predictor<P> {
    pub fn new(propagator: P, policy: Policy) -> Self {
        let strategy = HeuristicManeuver::from_policy(&policy);
        Self {
            propagator,
            policy,
            strategy,
        }
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Run the full pipeline with sampling anchored at `epoch`.
    pub fn predict(
        &self,
        request: &PredictRequest,
        epoch: DateTime<Utc>,
    ) -> Result<PredictionResult, PredictError> {
        let satellite = parse_and_validate(&request.satellite_tle)?;
        let debris = parse_and_validate(&request.debris_tle)?;
        let window = SamplingWindow::new(request.horizon_minutes, request.step_seconds)?;

        let regime = self.policy.classify(satellite.mean_motion()?);
        let window = window.with_step(self.policy.sampling_step(regime, window.step_seconds()));
        if window.sample_count() > self.policy.max_samples_per_object {
            return Err(PredictError::InvalidWindow(format!(
                "{} samples per object exceeds the limit of {}",
                window.sample_count(),
                self.policy.max_samples_per_object
            )));
        }
        log::debug!(
            "{} vs {}: {} regime, {} min every {} s",
            satellite.name,
            debris.name,
            regime,
            window.horizon_minutes(),
            window.step_seconds()
        );

        let (sat_path, deb_path) = self.sample_pair(&satellite, &debris, epoch, window);

        let mut diagnostics = Diagnostics {
            satellite_samples: sat_path.len(),
            debris_samples: deb_path.len(),
            sanitized_components: sat_path.sanitized_components + deb_path.sanitized_components,
            propagation_gaps: Vec::new(),
            closest_approach: None,
        };
        for (object, path) in [("satellite", &sat_path), ("debris", &deb_path)] {
            if path.is_empty() {
                log::warn!("{object}: propagator rejected all {} instants", path.skipped);
                diagnostics.propagation_gaps.push(object.to_string());
            }
        }

        let approach = nearest_approach(&sat_path.samples, &deb_path.samples)
            .filter(|a| a.min_distance_km.is_finite());
        let min_distance_km = approach.as_ref().map(|a| a.min_distance_km);
        let threshold_km = self.policy.threshold_for(regime);

        let risk = RiskAssessment {
            min_distance_km: min_distance_km.map(round3),
            tca: approach.as_ref().map(|a| a.at_time),
            regime,
            threshold_km,
            risky: assess(min_distance_km, threshold_km),
        };
        if risk.risky {
            log::info!(
                "{} flagged: {:.3} km from {} (threshold {} km)",
                satellite.name,
                min_distance_km.unwrap_or_default(),
                debris.name,
                threshold_km
            );
        }

        diagnostics.closest_approach = approach;

        let (maneuver, safe) = plan_and_apply(&self.strategy, &self.policy, &satellite, &risk)
            .map_err(PredictError::Maneuver)?;

        Ok(PredictionResult {
            risk,
            maneuver,
            tle_output: TleOutput {
                satellite_tle: satellite.to_block(),
                debris_tle: debris.to_block(),
                predicted_safe_tle: safe.to_block(),
            },
            paths: Paths {
                satellite_xyz_km: sat_path.positions(),
                debris_xyz_km: deb_path.positions(),
            },
            diagnostics,
        })
    }

    // Both objects share the satellite's grid so samples align by index.
    fn sample_pair(
        &self,
        satellite: &ElementSet,
        debris: &ElementSet,
        epoch: DateTime<Utc>,
        window: SamplingWindow,
    ) -> (Trajectory, Trajectory) {
        let propagator = &self.propagator;
        thread::scope(|s| {
            let debris_worker = s.spawn(|| sample(propagator, debris, epoch, window));
            let sat = sample(propagator, satellite, epoch, window);
            let deb = debris_worker
                .join()
                .unwrap_or_else(|panic| std::panic::resume_unwind(panic));
            (sat, deb)
        })
    }
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}
