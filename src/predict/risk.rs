use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema, strum_macros::Display,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Regime {
    Leo,
    Meo,
    Geo,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RiskAssessment {
    /// `None` when no aligned sample pair existed.
    pub min_distance_km: Option<f64>,
    /// Time of closest approach.
    pub tca: Option<DateTime<Utc>>,
    pub regime: Regime,
    pub threshold_km: f64,
    pub risky: bool,
}

/// Risky iff a real separation exists and lies within `[0, threshold_km]`.
pub fn assess(min_distance_km: Option<f64>, threshold_km: f64) -> bool {
    min_distance_km.is_some_and(|d| (0.0..=threshold_km).contains(&d))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_inclusive() {
        assert!(assess(Some(5.0), 5.0));
        assert!(!assess(Some(5.0 + 1e-9), 5.0));
        assert!(assess(Some(0.0), 5.0));
    }

    #[test]
    fn no_data_is_never_risky() {
        assert!(!assess(None, 25.0));
    }

    #[test]
    fn regime_renders_uppercase() {
        assert_eq!(Regime::Leo.to_string(), "LEO");
        assert_eq!(serde_json::to_string(&Regime::Geo).unwrap(), "\"GEO\"");
    }
}
