//! Configuration loader for the `codemetal-dampwatch` service.
//!
//! This module centralizes all runtime configuration values and their defaults,
//! loading from environment variables (with optional `.env` file support
//! provided by the caller). By consolidating configuration logic here, we
//! avoid scattering `env::var` calls throughout the codebase.
//!
use std::{env, net::SocketAddr};

use anyhow::{anyhow, ensure, Result};
use chrono::FixedOffset;

use crate::pipeline::{Backfill, EdgePolicy, PipelineOptions};

/// Parse an optional environment variable with a default value.
macro_rules! parse_env {
    ($var_name:expr, $ty:ty, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.parse::<$ty>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

const MAX_OFFSET_MINUTES: i32 = 24 * 60 - 1;
const MAX_HOURS_PER_READING: u32 = 24;

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent configuration
/// snapshot for the lifetime of the application.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,

    /// Site-local offset from UTC, in minutes.
    pub utc_offset_minutes: i32,

    /// Placeholder strategy for days with no samples for a metric.
    pub backfill: Backfill,

    /// Treatment of leading/trailing gaps in hourly series.
    pub gap_edge_policy: EdgePolicy,

    /// Hours represented by each daily reading in the risk rollup.
    pub hours_per_reading: u32,

    /// Length of the daily summary window, in days.
    pub summary_window_days: u32,
}

impl Default for Config {
    fn default() -> Self {
        let options = PipelineOptions::default();
        Config {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            utc_offset_minutes: 0,
            backfill: options.backfill,
            gap_edge_policy: options.edge_policy,
            hours_per_reading: options.hours_per_reading,
            summary_window_days: options.window_days,
        }
    }
}

/// Load configuration from environment variables with defaults.
///
/// Optional:
/// - `BIND_ADDR` – listen address (default: `0.0.0.0:8080`)
/// - `LOCAL_UTC_OFFSET_MINUTES` – site offset from UTC (default: 0)
/// - `BACKFILL_POLICY` – `sine` | `none` (default: `sine`)
/// - `GAP_EDGE_POLICY` – `leave` | `hold` (default: `leave`)
/// - `HOURS_PER_READING` – hours per daily reading, 1..=24 (default: 4)
/// - `SUMMARY_WINDOW_DAYS` – daily summary window (default: 30)
///
/// Returns an error if any variable is present but invalid.
pub fn load_from_env() -> Result<Config> {
    // ---
    let defaults = Config::default();

    let cfg = Config {
        bind_addr: parse_env!("BIND_ADDR", SocketAddr, defaults.bind_addr),
        utc_offset_minutes: parse_env!("LOCAL_UTC_OFFSET_MINUTES", i32, defaults.utc_offset_minutes),
        backfill: parse_env!("BACKFILL_POLICY", Backfill, defaults.backfill),
        gap_edge_policy: parse_env!("GAP_EDGE_POLICY", EdgePolicy, defaults.gap_edge_policy),
        hours_per_reading: parse_env!("HOURS_PER_READING", u32, defaults.hours_per_reading),
        summary_window_days: parse_env!("SUMMARY_WINDOW_DAYS", u32, defaults.summary_window_days),
    };

    cfg.validate()?;
    Ok(cfg)
}

impl Config {
    // ---
    /// Check ranges the type system can't express.
    pub fn validate(&self) -> Result<()> {
        // ---
        ensure!(
            self.utc_offset_minutes.abs() <= MAX_OFFSET_MINUTES,
            "Invalid LOCAL_UTC_OFFSET_MINUTES: {} is outside ±{}",
            self.utc_offset_minutes,
            MAX_OFFSET_MINUTES
        );
        ensure!(
            self.summary_window_days >= 1,
            "Invalid SUMMARY_WINDOW_DAYS: must be at least 1"
        );
        ensure!(
            (1..=MAX_HOURS_PER_READING).contains(&self.hours_per_reading),
            "Invalid HOURS_PER_READING: {} is outside 1..={}",
            self.hours_per_reading,
            MAX_HOURS_PER_READING
        );
        Ok(())
    }

    /// Pipeline options derived from this configuration.
    pub fn pipeline_options(&self) -> Result<PipelineOptions> {
        // ---
        let utc_offset = FixedOffset::east_opt(self.utc_offset_minutes * 60).ok_or_else(|| {
            anyhow!("Invalid UTC offset: {} minutes", self.utc_offset_minutes)
        })?;

        Ok(PipelineOptions {
            utc_offset,
            backfill: self.backfill,
            edge_policy: self.gap_edge_policy,
            hours_per_reading: self.hours_per_reading,
            window_days: self.summary_window_days,
        })
    }

    /// Log the loaded configuration for debugging purposes.
    pub fn log_config(&self) {
        // ---
        tracing::info!("Configuration loaded:");
        tracing::info!("  BIND_ADDR                : {}", self.bind_addr);
        tracing::info!("  LOCAL_UTC_OFFSET_MINUTES : {}", self.utc_offset_minutes);
        tracing::info!("  BACKFILL_POLICY          : {}", self.backfill.as_str());
        tracing::info!("  GAP_EDGE_POLICY          : {}", self.gap_edge_policy.as_str());
        tracing::info!("  HOURS_PER_READING        : {}", self.hours_per_reading);
        tracing::info!("  SUMMARY_WINDOW_DAYS      : {}", self.summary_window_days);
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        // ---
        let cfg = Config::default();
        assert!(cfg.validate().is_ok());

        let options = cfg.pipeline_options().unwrap();
        assert_eq!(options, PipelineOptions::default());
    }

    #[test]
    fn test_offset_is_converted_to_seconds() {
        // ---
        let cfg = Config {
            utc_offset_minutes: -330,
            ..Config::default()
        };
        let options = cfg.pipeline_options().unwrap();
        assert_eq!(options.utc_offset.local_minus_utc(), -330 * 60);
    }

    #[test]
    fn test_out_of_range_values_are_rejected() {
        // ---
        let bad_offset = Config {
            utc_offset_minutes: 24 * 60,
            ..Config::default()
        };
        assert!(bad_offset.validate().is_err());
        assert!(bad_offset.pipeline_options().is_err());

        let bad_window = Config {
            summary_window_days: 0,
            ..Config::default()
        };
        assert!(bad_window.validate().is_err());
    }

    #[test]
    fn test_hours_per_reading_bounds() {
        // ---
        for hours in [0, 25, u32::MAX] {
            let cfg = Config {
                hours_per_reading: hours,
                ..Config::default()
            };
            assert!(cfg.validate().is_err(), "{} hours should be rejected", hours);
        }

        for hours in [1, 4, 24] {
            let cfg = Config {
                hours_per_reading: hours,
                ..Config::default()
            };
            assert!(cfg.validate().is_ok(), "{} hours should be accepted", hours);
        }
    }
}
