//! Sensor reading aggregation and mold risk pipeline.
//!
//! Gateway for the pipeline stages (EMBP): siblings stay private and only the
//! operations callers need are re-exported here.
//!
//! Data flows one way:
//! raw samples → [`bucket_by_hour`] → [`fill_gaps`] → [`assess_mold_risk`] →
//! [`generate_monthly_risk_data`]. Every stage is a pure function of its
//! input and the [`PipelineOptions`] it is handed.

use chrono::{FixedOffset, Offset, Utc};

mod aggregate;
mod backfill;
mod daily;
mod gap_fill;
mod risk;
mod rollup;
mod timestamp;

pub use aggregate::{aggregate_hourly, bucket_by_hour, hour_labels, HourlyBuckets, HOURS_PER_DAY};
pub use backfill::{Backfill, BackfillPolicy, NoBackfill, SineWaveBackfill};
pub use daily::daily_series;
pub use gap_fill::{fill_gaps, EdgePolicy};
pub use risk::{assess_mold_risk, calculate_mold_risk_score, simple_dew_point};
pub use rollup::{generate_monthly_risk_data, UNKNOWN_BUILDING, UNKNOWN_ZONE};
pub use timestamp::parse_local;

use crate::models::{HourlyPoint, RawSample};

// ---

/// Knobs shared by the pipeline stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    // ---
    /// Site-local offset used to pick the hour and calendar day of a sample.
    pub utc_offset: FixedOffset,

    /// Placeholder strategy for a metric with no samples at all.
    pub backfill: Backfill,

    /// Treatment of empty slots before the first / after the last value.
    pub edge_policy: EdgePolicy,

    /// Hours each daily reading stands for when computing time at risk.
    pub hours_per_reading: u32,

    /// Length of the daily summary window, in days.
    pub window_days: u32,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        PipelineOptions {
            utc_offset: Utc.fix(),
            backfill: Backfill::default(),
            edge_policy: EdgePolicy::default(),
            hours_per_reading: 4,
            window_days: 30,
        }
    }
}

/// Aggregate one day of samples into 24 hourly points and fill interior gaps.
pub fn hourly_series(
    temperature: &[RawSample],
    humidity: &[RawSample],
    options: &PipelineOptions,
) -> Vec<HourlyPoint> {
    // ---
    let mut points = aggregate_hourly(temperature, humidity, &options.utc_offset, &options.backfill);
    fill_gaps(&mut points, options.edge_policy);
    points
}
