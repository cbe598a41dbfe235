use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::predict::{ManeuverPlan, RiskAssessment};

/// One propagated instant. Non-finite components have already been zeroed.
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectorySample {
    pub timestamp: DateTime<Utc>,
    pub position_km: [f64; 3],
    pub velocity_km_s: [f64; 3],
}

/// Time-ordered samples for one object on a shared start epoch and cadence.
#[derive(Debug, Clone, Default)]
pub struct Trajectory {
    pub samples: Vec<TrajectorySample>,
    /// Instants the propagator refused.
    pub skipped: usize,
    /// Non-finite components replaced with zero.
    pub sanitized_components: usize,
}

impl Trajectory {
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn positions(&self) -> Vec<[f64; 3]> {
        self.samples.iter().map(|s| s.position_km).collect()
    }
}

/// Minimum separation found between two index-aligned trajectories.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ClosestApproach {
    pub min_distance_km: f64,
    pub at_time: DateTime<Utc>,
    pub sample_index: usize,
    #[schema(value_type = Vec<f64>)]
    pub satellite_position: [f64; 3],
    #[schema(value_type = Vec<f64>)]
    pub debris_position: [f64; 3],
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TleOutput {
    pub satellite_tle: String,
    pub debris_tle: String,
    pub predicted_safe_tle: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Paths {
    #[schema(value_type = Vec<Vec<f64>>)]
    pub satellite_xyz_km: Vec<[f64; 3]>,
    #[schema(value_type = Vec<Vec<f64>>)]
    pub debris_xyz_km: Vec<[f64; 3]>,
}

#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct Diagnostics {
    pub satellite_samples: usize,
    pub debris_samples: usize,
    pub sanitized_components: usize,
    /// Objects for which the propagator rejected every instant.
    pub propagation_gaps: Vec<String>,
    /// Unrounded separation with the winning sample index and both positions.
    pub closest_approach: Option<ClosestApproach>,
}

/// Full answer for one satellite/debris pair.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PredictionResult {
    pub risk: RiskAssessment,
    pub maneuver: ManeuverPlan,
    pub tle_output: TleOutput,
    pub paths: Paths,
    pub diagnostics: Diagnostics,
}
