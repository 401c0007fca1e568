//! Library half of the `codemetal-dampwatch` service.
//!
//! Exposes the aggregation and mold risk pipeline (`pipeline`), its data
//! models, configuration and the HTTP routes, so the binary and the
//! integration tests build the same router.

pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod routes;

pub use config::Config;
pub use error::SampleError;
pub use models::{DailyReading, HourlyPoint, MonthlyPoint, RawSample, RiskLevel, RiskRow};
pub use pipeline::PipelineOptions;
