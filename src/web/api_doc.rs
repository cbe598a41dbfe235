use utoipa::OpenApi;

use super::api::error::ErrorResponse;
use super::api::predict::{PredictBody, ValidateBody, ValidateResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::predict::predict_query,
        super::api::predict::predict_json,
        super::api::predict::validate_tle,
    ),
    components(
        schemas(
            PredictBody,
            ValidateBody,
            ValidateResponse,
            ErrorResponse,
            crate::predict::PredictionResult,
            crate::predict::RiskAssessment,
            crate::predict::Regime,
            crate::predict::ManeuverPlan,
            crate::predict::ManeuverKind,
            crate::predict::TleOutput,
            crate::predict::Paths,
            crate::predict::Diagnostics,
            crate::tle::ElementSet,
        )
    ),
    info(
        title = "Debris Triage API",
        description = "Closest-approach screening and maneuver synthesis for satellite/debris pairs",
        version = "0.1.0"
    ),
    tags(
        (name = "predict", description = "Conjunction screening"),
        (name = "tle", description = "Element set handling")
    )
)]
pub struct ApiDoc;
