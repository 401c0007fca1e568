use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use tracing::{debug, info};

use crate::models::{HourlyPoint, RawSample};
use crate::pipeline::hourly_series;
use crate::PipelineOptions;

// ---

pub fn router() -> Router<PipelineOptions> {
    // ---
    Router::new().route("/pipeline/hourly", post(handler))
}

/// One day of raw samples per metric.
#[derive(Debug, Deserialize)]
pub struct HourlyRequest {
    #[serde(default)]
    temperature: Vec<RawSample>,
    #[serde(default)]
    humidity: Vec<RawSample>,
}

async fn handler(
    State(options): State<PipelineOptions>,
    Json(request): Json<HourlyRequest>,
) -> Json<Vec<HourlyPoint>> {
    // ---
    info!(
        "POST /pipeline/hourly - {} temperature, {} humidity samples",
        request.temperature.len(),
        request.humidity.len()
    );

    let points = hourly_series(&request.temperature, &request.humidity, &options);

    let synthetic = points
        .iter()
        .filter(|p| !p.is_real.temperature || !p.is_real.humidity)
        .count();
    debug!("POST /pipeline/hourly - {} of 24 slots carry synthetic values", synthetic);

    Json(points)
}
