//! HTTP gateway for the pipeline (EMBP).
//!
//! Each sibling module exports a subrouter; this gateway merges them and
//! attaches the shared `PipelineOptions` state so `main.rs` only sees
//! [`router`].

use axum::Router;

use crate::PipelineOptions;

mod daily;
mod health;
mod hourly;
mod risk;

// ---

pub fn router(options: PipelineOptions) -> Router {
    // ---
    Router::new()
        .merge(hourly::router())
        .merge(daily::router())
        .merge(risk::router())
        .merge(health::router())
        .with_state(options)
}
