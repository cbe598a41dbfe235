use thiserror::Error;

use crate::tle::TleError;

/// Failure reported by the propagator, either for a whole element set or for
/// a single instant.
#[derive(Debug, Error)]
pub enum PropagationError {
    #[error("invalid tle: {0}")]
    InvalidTle(#[from] sgp4::TleError),
    #[error("elements error: {0}")]
    Elements(#[from] sgp4::ElementsError),
    #[error("{0}")]
    Model(String),
}

impl From<sgp4::Error> for PropagationError {
    fn from(err: sgp4::Error) -> Self {
        PropagationError::Model(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("element-set validation failed: {0}")]
    Validation(#[from] TleError),
    #[error("invalid sampling window: {0}")]
    InvalidWindow(String),
    #[error("maneuver synthesis failed: {0}")]
    Maneuver(TleError),
}
