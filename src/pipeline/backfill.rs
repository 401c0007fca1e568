//! Placeholder values for a metric that has no samples at all for the day.
//!
//! The aggregator consults a [`BackfillPolicy`] only when an entire metric is
//! empty. Whatever it returns is flagged synthetic.

use std::f64::consts::PI;
use std::str::FromStr;

use anyhow::{anyhow, Error};

use crate::models::Metric;

// ---

/// Strategy for synthesizing an hour's value when the day has no data.
pub trait BackfillPolicy {
    /// Placeholder for `metric` at `hour` (0..24), or `None` to leave it empty.
    fn placeholder(&self, metric: Metric, hour: usize) -> Option<f64>;
}

/// Smooth diurnal curve so an empty chart still has a plausible shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SineWaveBackfill;

impl BackfillPolicy for SineWaveBackfill {
    fn placeholder(&self, metric: Metric, hour: usize) -> Option<f64> {
        // ---
        let phase = hour as f64 / 24.0 * 2.0 * PI;
        let value = match metric {
            Metric::Temperature => 18.0 + phase.sin() * 6.0,
            Metric::Humidity => 40.0 + (phase + 1.0).sin() * 15.0,
        };
        Some(value)
    }
}

/// Leaves empty metrics as `null`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoBackfill;

impl BackfillPolicy for NoBackfill {
    fn placeholder(&self, _metric: Metric, _hour: usize) -> Option<f64> {
        None
    }
}

/// Configurable selection between the built-in policies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Backfill {
    #[default]
    SineWave,
    None,
}

impl BackfillPolicy for Backfill {
    fn placeholder(&self, metric: Metric, hour: usize) -> Option<f64> {
        match self {
            Backfill::SineWave => SineWaveBackfill.placeholder(metric, hour),
            Backfill::None => NoBackfill.placeholder(metric, hour),
        }
    }
}

impl FromStr for Backfill {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sine" | "sine_wave" => Ok(Backfill::SineWave),
            "none" | "off" => Ok(Backfill::None),
            other => Err(anyhow!("unknown backfill policy '{}' (expected sine|none)", other)),
        }
    }
}

impl Backfill {
    pub const fn as_str(self) -> &'static str {
        match self {
            Backfill::SineWave => "sine",
            Backfill::None => "none",
        }
    }
}
