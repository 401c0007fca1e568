//! Per-day summary series for the 30-day chart.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use tracing::warn;

use super::aggregate::mean;
use super::timestamp::parse_local;
use super::PipelineOptions;
use crate::models::{DailyReading, Metric, MonthlyPoint};

// ---

#[derive(Debug, Default)]
struct Day {
    temperatures: Vec<f64>,
    humidities: Vec<f64>,
}

/// Summarize readings per local calendar day over the window ending `today`.
///
/// The window is `options.window_days` days long and includes `today`. Days
/// without any temperature or humidity value are omitted. Points come back
/// oldest first.
pub fn daily_series(
    readings: &[DailyReading],
    today: NaiveDate,
    options: &PipelineOptions,
) -> Vec<MonthlyPoint> {
    // ---
    let span = u64::from(options.window_days.max(1) - 1);
    let start = today.checked_sub_days(Days::new(span)).unwrap_or(NaiveDate::MIN);

    let mut days: BTreeMap<NaiveDate, Day> = BTreeMap::new();

    for (i, reading) in readings.iter().enumerate() {
        let date = match parse_local(&reading.timestamp, &options.utc_offset) {
            Ok(ts) => ts.date(),
            Err(e) => {
                warn!("Skipping daily reading {}: {}", i, e);
                continue;
            }
        };
        if date < start || date > today {
            continue;
        }

        let day = days.entry(date).or_default();
        for metric in Metric::ALL {
            let Some(raw) = reading.raw_value(metric) else {
                continue;
            };
            match raw.as_f64() {
                Ok(v) if metric == Metric::Temperature => day.temperatures.push(v),
                Ok(v) => day.humidities.push(v),
                Err(e) => warn!("Ignoring {} of daily reading {}: {}", metric.name(), i, e),
            }
        }
    }

    days.into_iter()
        .filter(|(_, day)| !day.temperatures.is_empty() || !day.humidities.is_empty())
        .map(|(date, day)| MonthlyPoint {
            date: date.format("%Y-%m-%d").to_string(),
            avg_temp: mean(&day.temperatures),
            min_temp: day.temperatures.iter().copied().reduce(f64::min),
            max_temp: day.temperatures.iter().copied().reduce(f64::max),
            avg_humidity: mean(&day.humidities),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::models::SampleValue;

    fn create_test_reading(timestamp: &str, temperature: Option<f64>, humidity: Option<f64>) -> DailyReading {
        // ---
        DailyReading {
            timestamp: timestamp.to_string(),
            temperature: temperature.map(SampleValue::Number),
            humidity: humidity.map(SampleValue::Number),
            site_id: None,
            zone_id: None,
            site_name: None,
            zone_name: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 30).unwrap()
    }

    #[test]
    fn test_daily_min_max_avg() {
        // ---
        let readings = vec![
            create_test_reading("2025-03-29T02:00:00Z", Some(10.0), Some(60.0)),
            create_test_reading("2025-03-29T10:00:00Z", Some(16.0), Some(50.0)),
            create_test_reading("2025-03-29T18:00:00Z", Some(13.0), None),
        ];

        let points = daily_series(&readings, today(), &PipelineOptions::default());

        assert_eq!(points.len(), 1);
        assert_eq!(points[0].date, "2025-03-29");
        assert_eq!(points[0].avg_temp, Some(13.0));
        assert_eq!(points[0].min_temp, Some(10.0));
        assert_eq!(points[0].max_temp, Some(16.0));
        assert_eq!(points[0].avg_humidity, Some(55.0));
    }

    #[test]
    fn test_window_bounds() {
        // ---
        let readings = vec![
            create_test_reading("2025-02-28", Some(1.0), None),
            create_test_reading("2025-03-01", Some(2.0), None),
            create_test_reading("2025-03-30T23:59:00", Some(3.0), None),
            create_test_reading("2025-03-31", Some(4.0), None),
        ];

        let points = daily_series(&readings, today(), &PipelineOptions::default());
        let dates: Vec<&str> = points.iter().map(|p| p.date.as_str()).collect();

        // 30 days ending 2025-03-30 starts on 2025-03-01
        assert_eq!(dates, vec!["2025-03-01", "2025-03-30"]);
        assert!(points.len() <= 30);
    }

    #[test]
    fn test_days_without_values_are_omitted() {
        // ---
        let readings = vec![
            create_test_reading("2025-03-20", None, None),
            create_test_reading("2025-03-21", None, Some(45.0)),
            create_test_reading("bogus", Some(1.0), Some(1.0)),
        ];

        let points = daily_series(&readings, today(), &PipelineOptions::default());

        assert_eq!(points.len(), 1);
        assert_eq!(points[0].date, "2025-03-21");
        assert_eq!(points[0].avg_temp, None);
        assert_eq!(points[0].avg_humidity, Some(45.0));
    }

    #[test]
    fn test_series_is_sorted_oldest_first() {
        // ---
        let readings = vec![
            create_test_reading("2025-03-25", Some(20.0), None),
            create_test_reading("2025-03-05", Some(18.0), None),
            create_test_reading("2025-03-15", Some(19.0), None),
        ];

        let points = daily_series(&readings, today(), &PipelineOptions::default());
        let dates: Vec<&str> = points.iter().map(|p| p.date.as_str()).collect();

        assert_eq!(dates, vec!["2025-03-05", "2025-03-15", "2025-03-25"]);
    }
}
