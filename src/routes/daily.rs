use axum::{extract::State, routing::post, Json, Router};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;

use crate::models::{DailyReading, MonthlyPoint};
use crate::pipeline::daily_series;
use crate::PipelineOptions;

// ---

pub fn router() -> Router<PipelineOptions> {
    // ---
    Router::new().route("/pipeline/daily", post(handler))
}

/// Readings to summarize, plus the caller's notion of "today".
#[derive(Debug, Deserialize)]
pub struct DailyRequest {
    today: NaiveDate,
    readings: Vec<DailyReading>,
}

async fn handler(
    State(options): State<PipelineOptions>,
    Json(request): Json<DailyRequest>,
) -> Json<Vec<MonthlyPoint>> {
    // ---
    let points = daily_series(&request.readings, request.today, &options);
    info!(
        "POST /pipeline/daily - {} readings -> {} days ending {}",
        request.readings.len(),
        points.len(),
        request.today
    );

    Json(points)
}
