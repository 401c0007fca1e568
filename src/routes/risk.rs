use axum::{
    extract::Query, extract::State, http::StatusCode, response::IntoResponse, routing::get,
    routing::post, Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::models::{DailyReading, RiskLevel, RiskRow};
use crate::pipeline::{
    assess_mold_risk, calculate_mold_risk_score, generate_monthly_risk_data, simple_dew_point,
};
use crate::PipelineOptions;

// ---

pub fn router() -> Router<PipelineOptions> {
    // ---
    Router::new()
        .route("/risk/monthly", post(monthly))
        .route("/risk/assess", get(assess))
}

async fn monthly(
    State(options): State<PipelineOptions>,
    Json(readings): Json<Vec<DailyReading>>,
) -> Json<Vec<RiskRow>> {
    // ---
    let rows = generate_monthly_risk_data(&readings, &options);
    info!(
        "POST /risk/monthly - {} readings -> {} rows ({} in alarm)",
        readings.len(),
        rows.len(),
        rows.iter().filter(|r| r.overall_risk == RiskLevel::Alarm).count()
    );

    Json(rows)
}

/// Query parameters for a single risk assessment
#[derive(Debug, Deserialize)]
pub struct AssessQuery {
    temperature: f64,
    humidity: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Assessment {
    temperature: f64,
    humidity: f64,
    level: RiskLevel,
    score: u8,
    dew_point: f64,
}

async fn assess(Query(params): Query<AssessQuery>) -> impl IntoResponse {
    // ---
    let AssessQuery {
        temperature,
        humidity,
    } = params;

    if !temperature.is_finite() || !humidity.is_finite() {
        warn!("GET /risk/assess - rejecting non-finite input {:?}", params);
        return (
            StatusCode::BAD_REQUEST,
            Json("temperature and humidity must be finite numbers"),
        )
            .into_response();
    }

    let assessment = Assessment {
        temperature,
        humidity,
        level: assess_mold_risk(temperature, humidity),
        score: calculate_mold_risk_score(temperature, humidity),
        dew_point: simple_dew_point(temperature, humidity),
    };

    (StatusCode::OK, Json(assessment)).into_response()
}
