mod approach;
mod error;
mod maneuver;
mod pipeline;
mod policy;
mod propagator;
mod risk;
mod sampler;
mod types;

pub use approach::nearest_approach;
pub use error::{PredictError, PropagationError};
pub use maneuver::{plan_and_apply, HeuristicManeuver, ManeuverKind, ManeuverPlan};
pub use pipeline::{PredictRequest, Predictor, DEFAULT_HORIZON_MINUTES, DEFAULT_STEP_SECONDS};
pub use policy::Policy;
pub use propagator::{Propagator, Sgp4Propagator};
pub use risk::{assess, Regime, RiskAssessment};
pub use sampler::{sample, SamplingWindow};
pub use types::{
    ClosestApproach, Diagnostics, Paths, PredictionResult, TleOutput, Trajectory, TrajectorySample,
};
