use chrono::{DateTime, Utc};
use sgp4::{Constants, Elements};

use crate::predict::PropagationError;
use crate::tle::ElementSet;

/// Position (km) and velocity (km/s) in an Earth-centred inertial frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateVector {
    pub position_km: [f64; 3],
    pub velocity_km_s: [f64; 3],
}

/// Force model that turns a validated element set into state vectors.
///
/// `load` is called once per object and request; `propagate` once per
/// sampled instant. An error from `propagate` means the instant lies outside
/// the model's valid domain and the caller skips it.
pub trait Propagator: Sync {
    type Model;

    fn load(&self, set: &ElementSet) -> Result<Self::Model, PropagationError>;

    fn propagate(
        &self,
        model: &Self::Model,
        at: DateTime<Utc>,
    ) -> Result<StateVector, PropagationError>;
}

pub struct Sgp4Model {
    elements: Elements,
    constants: Constants,
}

/// SGP4/SDP4 propagation backed by the `sgp4` crate (TEME frame).
#[derive(Debug, Clone, Copy, Default)]
pub struct Sgp4Propagator;

impl Propagator for Sgp4Propagator {
    type Model = Sgp4Model;

    fn load(&self, set: &ElementSet) -> Result<Sgp4Model, PropagationError> {
        let elements = Elements::from_tle(
            Some(set.name.clone()),
            set.line1.as_bytes(),
            set.line2.as_bytes(),
        )?;
        let constants = Constants::from_elements(&elements)?;
        Ok(Sgp4Model {
            elements,
            constants,
        })
    }

    fn propagate(
        &self,
        model: &Sgp4Model,
        at: DateTime<Utc>,
    ) -> Result<StateVector, PropagationError> {
        let minutes = model
            .elements
            .datetime_to_minutes_since_epoch(&at.naive_utc())
            .map_err(|e| PropagationError::Model(e.to_string()))?;

        let prediction = model.constants.propagate(minutes)?;

        Ok(StateVector {
            position_km: prediction.position,
            velocity_km_s: prediction.velocity,
        })
    }
}
