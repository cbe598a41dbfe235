use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::predict::{PredictRequest, PredictionResult, Regime};
use crate::tle::{parse_and_validate, ElementSet};
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PredictQuery {
    /// Satellite element set (2 or 3 lines, or one blob)
    pub satellite_tle: String,
    /// Debris element set
    pub debris_tle: String,
    pub horizon_minutes: Option<u32>,
    pub step_seconds: Option<u32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PredictBody {
    pub satellite_tle: String,
    pub debris_tle: String,
    #[serde(default)]
    pub horizon_minutes: Option<u32>,
    #[serde(default)]
    pub step_seconds: Option<u32>,
    /// Sampling start (RFC3339); defaults to now
    #[serde(default)]
    pub epoch: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ValidateBody {
    pub tle: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ValidateResponse {
    pub element_set: ElementSet,
    pub mean_motion: f64,
    pub regime: Regime,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct IndexResponse {
    pub message: String,
    pub endpoints: Vec<String>,
}

pub async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        message: "Debris triage API is running".to_string(),
        endpoints: vec![
            "/predict".to_string(),
            "/api/predict".to_string(),
            "/api/tle/validate".to_string(),
        ],
    })
}

#[utoipa::path(
    get,
    path = "/predict",
    tag = "predict",
    params(PredictQuery),
    responses(
        (status = 200, description = "Conjunction assessment", body = PredictionResult),
        (status = 400, description = "Invalid request, element set or window", body = ErrorResponse),
        (status = 422, description = "Maneuver synthesis failed", body = ErrorResponse)
    )
)]
pub async fn predict_query(
    State(state): State<AppState>,
    query: Result<Query<PredictQuery>, QueryRejection>,
) -> ApiResult<Json<PredictionResult>> {
    let Query(query) = query?;
    let request = build_request(
        &state,
        query.satellite_tle,
        query.debris_tle,
        query.horizon_minutes,
        query.step_seconds,
    );
    run_prediction(state, request, Utc::now()).await
}

#[utoipa::path(
    post,
    path = "/api/predict",
    tag = "predict",
    request_body = PredictBody,
    responses(
        (status = 200, description = "Conjunction assessment", body = PredictionResult),
        (status = 400, description = "Invalid request, element set or window", body = ErrorResponse),
        (status = 422, description = "Maneuver synthesis failed", body = ErrorResponse)
    )
)]
pub async fn predict_json(
    State(state): State<AppState>,
    body: Result<Json<PredictBody>, JsonRejection>,
) -> ApiResult<Json<PredictionResult>> {
    let Json(body) = body?;
    let epoch = body.epoch.unwrap_or_else(Utc::now);
    let request = build_request(
        &state,
        body.satellite_tle,
        body.debris_tle,
        body.horizon_minutes,
        body.step_seconds,
    );
    run_prediction(state, request, epoch).await
}

#[utoipa::path(
    post,
    path = "/api/tle/validate",
    tag = "tle",
    request_body = ValidateBody,
    responses(
        (status = 200, description = "Normalized element set", body = ValidateResponse),
        (status = 400, description = "Invalid request or element set", body = ErrorResponse)
    )
)]
pub async fn validate_tle(
    State(state): State<AppState>,
    body: Result<Json<ValidateBody>, JsonRejection>,
) -> ApiResult<Json<ValidateResponse>> {
    let Json(body) = body?;
    let element_set = parse_and_validate(&body.tle)?;
    let mean_motion = element_set.mean_motion()?;
    let regime = state.predictor.policy().classify(mean_motion);
    Ok(Json(ValidateResponse {
        element_set,
        mean_motion,
        regime,
    }))
}

fn build_request(
    state: &AppState,
    satellite_tle: String,
    debris_tle: String,
    horizon_minutes: Option<u32>,
    step_seconds: Option<u32>,
) -> PredictRequest {
    let defaults = &state.config.prediction;
    PredictRequest {
        satellite_tle,
        debris_tle,
        horizon_minutes: horizon_minutes.unwrap_or(defaults.horizon_minutes),
        step_seconds: step_seconds.unwrap_or(defaults.step_seconds),
    }
}

async fn run_prediction(
    state: AppState,
    request: PredictRequest,
    epoch: DateTime<Utc>,
) -> ApiResult<Json<PredictionResult>> {
    let predictor = state.predictor.clone();
    let result = tokio::task::spawn_blocking(move || predictor.predict(&request, epoch))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;
    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use tower::ServiceExt;

    use crate::web::server::router;
    use crate::web::state::AppState;
    use crate::web::Config;

    const L1: &str = "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927";
    const L2: &str = "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537";

    async fn send(request: Request<Body>) -> Response {
        router(AppState::new(Config::default()))
            .oneshot(request)
            .await
            .unwrap()
    }

    async fn assert_validation_failed(response: Response) -> serde_json::Value {
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
        assert!(content_type.starts_with("application/json"), "{content_type}");
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"], "validation_failed");
        assert!(!json["message"].as_str().unwrap().is_empty());
        json
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn missing_debris_query_parameter_is_json_error() {
        let json = assert_validation_failed(send(get("/predict?satellite_tle=abc")).await).await;
        assert!(json["message"].as_str().unwrap().contains("debris_tle"));
    }

    #[tokio::test]
    async fn negative_horizon_is_json_error() {
        let uri = "/predict?satellite_tle=a&debris_tle=b&horizon_minutes=-5";
        assert_validation_failed(send(get(uri)).await).await;
    }

    #[tokio::test]
    async fn unparseable_epoch_in_body_is_json_error() {
        let body = serde_json::json!({
            "satellite_tle": format!("{L1}\n{L2}"),
            "debris_tle": format!("{L1}\n{L2}"),
            "epoch": "yesterday",
        });
        assert_validation_failed(send(post_json("/api/predict", body)).await).await;
    }

    #[tokio::test]
    async fn validate_body_without_tle_is_json_error() {
        let body = serde_json::json!({ "text": "nothing" });
        assert_validation_failed(send(post_json("/api/tle/validate", body)).await).await;
    }

    #[tokio::test]
    async fn validate_reports_regime() {
        let body = serde_json::json!({ "tle": format!("ISS\n{L1}\n{L2}") });
        let response = send(post_json("/api/tle/validate", body)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["regime"], "LEO");
        assert_eq!(json["element_set"]["name"], "ISS");
    }
}
