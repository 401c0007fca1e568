//! Hourly aggregation of one day's raw samples.
//!
//! Samples are bucketed by local hour of day and each bucket is averaged.
//! Unparseable samples are dropped with a warning; an entirely empty metric
//! is handed to the [`BackfillPolicy`].

use chrono::{FixedOffset, Timelike};
use tracing::{debug, warn};

use super::backfill::BackfillPolicy;
use super::timestamp::parse_local;
use crate::error::SampleError;
use crate::models::{hour_label, HourlyPoint, Metric, RawSample};

pub const HOURS_PER_DAY: usize = 24;

// ---

/// Samples grouped by hour of day, before averaging.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HourlyBuckets {
    // ---
    pub hourly_temperatures: [Vec<f64>; HOURS_PER_DAY],
    pub hourly_humidities: [Vec<f64>; HOURS_PER_DAY],
    pub has_real_temp_data: bool,
    pub has_real_humidity_data: bool,
}

impl HourlyBuckets {
    // ---
    pub fn buckets(&self, metric: Metric) -> &[Vec<f64>; HOURS_PER_DAY] {
        match metric {
            Metric::Temperature => &self.hourly_temperatures,
            Metric::Humidity => &self.hourly_humidities,
        }
    }

    /// Bucket for an hour label such as `"13:00"`.
    pub fn bucket_for_label(&self, metric: Metric, label: &str) -> Option<&[f64]> {
        // ---
        let hour = label.strip_suffix(":00")?.parse::<usize>().ok()?;
        self.buckets(metric).get(hour).map(Vec::as_slice)
    }

    pub fn has_real_data(&self, metric: Metric) -> bool {
        match metric {
            Metric::Temperature => self.has_real_temp_data,
            Metric::Humidity => self.has_real_humidity_data,
        }
    }

    /// Average every bucket into the 24 hourly points.
    ///
    /// Empty buckets stay `None` unless the metric has no data at all, in
    /// which case `backfill` supplies a synthetic value.
    pub fn into_points<B: BackfillPolicy + ?Sized>(self, backfill: &B) -> Vec<HourlyPoint> {
        // ---
        let mut points: Vec<HourlyPoint> = (0..HOURS_PER_DAY).map(HourlyPoint::empty).collect();

        for metric in Metric::ALL {
            let has_real = self.has_real_data(metric);
            if !has_real {
                debug!("No {} samples for the day; using backfill", metric.name());
            }

            for (hour, bucket) in self.buckets(metric).iter().enumerate() {
                let point = &mut points[hour];
                match mean(bucket) {
                    Some(avg) => point.set(metric, Some(avg), true),
                    None if !has_real => point.set(metric, backfill.placeholder(metric, hour), false),
                    None => point.set(metric, None, false),
                }
            }
        }

        points
    }
}

/// Group one day's temperature and humidity samples by local hour.
pub fn bucket_by_hour(
    temperature: &[RawSample],
    humidity: &[RawSample],
    offset: &FixedOffset,
) -> HourlyBuckets {
    // ---
    let mut buckets = HourlyBuckets::default();

    for (metric, samples) in [(Metric::Temperature, temperature), (Metric::Humidity, humidity)] {
        let target = match metric {
            Metric::Temperature => &mut buckets.hourly_temperatures,
            Metric::Humidity => &mut buckets.hourly_humidities,
        };

        for (i, sample) in samples.iter().enumerate() {
            match parse_sample(sample, offset) {
                Ok((hour, value)) => target[hour].push(value),
                Err(e) => warn!(
                    "Skipping {} sample {} ({:?}): {}",
                    metric.name(),
                    i,
                    sample.timestamp,
                    e
                ),
            }
        }
    }

    buckets.has_real_temp_data = buckets.hourly_temperatures.iter().any(|b| !b.is_empty());
    buckets.has_real_humidity_data = buckets.hourly_humidities.iter().any(|b| !b.is_empty());
    buckets
}

/// Bucket and average in one step.
pub fn aggregate_hourly<B: BackfillPolicy + ?Sized>(
    temperature: &[RawSample],
    humidity: &[RawSample],
    offset: &FixedOffset,
    backfill: &B,
) -> Vec<HourlyPoint> {
    bucket_by_hour(temperature, humidity, offset).into_points(backfill)
}

fn parse_sample(sample: &RawSample, offset: &FixedOffset) -> Result<(usize, f64), SampleError> {
    // ---
    let local = parse_local(&sample.timestamp, offset)?;
    let value = sample.value.as_f64()?;
    Ok((local.hour() as usize, value))
}

pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Labels of all 24 slots, in order.
pub fn hour_labels() -> impl Iterator<Item = String> {
    (0..HOURS_PER_DAY).map(hour_label)
}
