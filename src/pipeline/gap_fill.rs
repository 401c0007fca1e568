//! Linear interpolation of missing hourly values.

use std::str::FromStr;

use anyhow::{anyhow, Error};

use crate::models::{HourlyPoint, Metric};

// ---

/// What to do with empty slots before the first or after the last value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EdgePolicy {
    /// Leading and trailing slots stay `None`.
    #[default]
    Leave,
    /// Extend the nearest value outward, flagged synthetic.
    Hold,
}

impl FromStr for EdgePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "leave" => Ok(EdgePolicy::Leave),
            "hold" => Ok(EdgePolicy::Hold),
            other => Err(anyhow!("unknown gap edge policy '{}' (expected leave|hold)", other)),
        }
    }
}

impl EdgePolicy {
    pub const fn as_str(self) -> &'static str {
        match self {
            EdgePolicy::Leave => "leave",
            EdgePolicy::Hold => "hold",
        }
    }
}

/// Fill `None` slots between known values, for each metric independently.
///
/// Each interior gap is interpolated between its nearest known neighbours:
/// `prev + (next - prev) * (i - prev_idx) / (next_idx - prev_idx)`.
/// Filled slots are marked not real. A metric with no values is untouched.
pub fn fill_gaps(points: &mut [HourlyPoint], edge: EdgePolicy) {
    for metric in Metric::ALL {
        fill_metric(points, metric, edge);
    }
}

fn fill_metric(points: &mut [HourlyPoint], metric: Metric, edge: EdgePolicy) {
    // ---
    let known: Vec<(usize, f64)> = points
        .iter()
        .enumerate()
        .filter_map(|(i, p)| p.value(metric).map(|v| (i, v)))
        .collect();

    let (Some(&(first, first_value)), Some(&(last, last_value))) = (known.first(), known.last())
    else {
        return;
    };

    for pair in known.windows(2) {
        let (prev_idx, prev) = pair[0];
        let (next_idx, next) = pair[1];
        let span = (next_idx - prev_idx) as f64;

        for (i, point) in points.iter_mut().enumerate().take(next_idx).skip(prev_idx + 1) {
            let value = prev + (next - prev) * (i - prev_idx) as f64 / span;
            point.set(metric, Some(value), false);
        }
    }

    if edge == EdgePolicy::Hold {
        for point in &mut points[..first] {
            point.set(metric, Some(first_value), false);
        }
        for point in &mut points[last + 1..] {
            point.set(metric, Some(last_value), false);
        }
    }
}
