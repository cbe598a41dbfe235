use chrono::{DateTime, Duration, Utc};

use crate::predict::{PredictError, Propagator, Trajectory, TrajectorySample};
use crate::tle::ElementSet;

/// Sampling horizon and cadence, both strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingWindow {
    horizon_minutes: u32,
    step_seconds: u32,
}

impl SamplingWindow {
    pub fn new(horizon_minutes: u32, step_seconds: u32) -> Result<Self, PredictError> {
        if horizon_minutes == 0 {
            return Err(PredictError::InvalidWindow(
                "horizon_minutes must be positive".to_string(),
            ));
        }
        if step_seconds == 0 {
            return Err(PredictError::InvalidWindow(
                "step_seconds must be positive".to_string(),
            ));
        }
        Ok(Self {
            horizon_minutes,
            step_seconds,
        })
    }

    pub fn with_step(self, step_seconds: u32) -> Self {
        Self {
            step_seconds: step_seconds.max(1),
            ..self
        }
    }

    pub fn horizon_minutes(&self) -> u32 {
        self.horizon_minutes
    }

    pub fn step_seconds(&self) -> u32 {
        self.step_seconds
    }

    /// Number of instants sampled per object.
    pub fn sample_count(&self) -> u64 {
        u64::from(self.horizon_minutes) * 60 / u64::from(self.step_seconds) + 1
    }

    /// Offsets in seconds from the epoch, horizon included when it lands on
    /// the grid.
    pub fn offsets(&self) -> impl Iterator<Item = i64> {
        let end = i64::from(self.horizon_minutes) * 60;
        (0..=end).step_by(self.step_seconds as usize)
    }
}

/// Propagate one element set across the window starting at `epoch`.
///
/// Instants the propagator refuses are skipped. An element set the model
/// cannot load at all yields an empty trajectory with every instant skipped.
pub fn sample<P: Propagator>(
    propagator: &P,
    set: &ElementSet,
    epoch: DateTime<Utc>,
    window: SamplingWindow,
) -> Trajectory {
    let mut trajectory = Trajectory::default();
    let model = match propagator.load(set) {
        Ok(model) => model,
        Err(e) => {
            log::warn!("{}: propagator rejected element set: {}", set.name, e);
            trajectory.skipped = window.offsets().count();
            return trajectory;
        }
    };

    for offset in window.offsets() {
        let timestamp = epoch + Duration::seconds(offset);
        let state = match propagator.propagate(&model, timestamp) {
            Ok(state) => state,
            Err(e) => {
                log::debug!("{}: skipping {}: {}", set.name, timestamp, e);
                trajectory.skipped += 1;
                continue;
            }
        };

        let position_km = sanitize(state.position_km, &mut trajectory.sanitized_components);
        let velocity_km_s = sanitize(state.velocity_km_s, &mut trajectory.sanitized_components);
        trajectory.samples.push(TrajectorySample {
            timestamp,
            position_km,
            velocity_km_s,
        });
    }

    if trajectory.sanitized_components > 0 {
        log::warn!(
            "{}: replaced {} non-finite components with zero",
            set.name,
            trajectory.sanitized_components
        );
    }

    trajectory
}

fn sanitize(v: [f64; 3], replaced: &mut usize) -> [f64; 3] {
    v.map(|c| {
        if c.is_finite() {
            c
        } else {
            *replaced += 1;
            0.0
        }
    })
}
