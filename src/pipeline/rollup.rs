//! Monthly risk rollup for the risk table.
//!
//! Daily readings are grouped by `(YYYY-MM, site, zone)`. Each group yields a
//! single [`RiskRow`] whose overall risk is the classification of the group's
//! average conditions. Alarm/caution counts come from classifying every
//! reading on its own.

use std::collections::BTreeMap;

use chrono::Datelike;
use tracing::{debug, warn};

use super::aggregate::mean;
use super::risk::{assess_mold_risk, simple_dew_point};
use super::timestamp::parse_local;
use super::PipelineOptions;
use crate::models::{id_key, DailyReading, EntityId, Metric, RiskLevel, RiskRow};

pub const UNKNOWN_BUILDING: &str = "Unknown Building";
pub const UNKNOWN_ZONE: &str = "Unknown Zone";
const NOT_AVAILABLE: &str = "N/A";

// ---

/// (month, site, zone); a missing ID sorts before any present one.
type GroupKey = (String, Option<EntityId>, Option<EntityId>);

#[derive(Debug, Default)]
struct Group {
    // ---
    temperatures: Vec<f64>,
    humidities: Vec<f64>,
    alarm_count: u32,
    caution_count: u32,
    site_name: Option<String>,
    zone_name: Option<String>,
}

impl Group {
    // ---
    fn add(&mut self, reading: &DailyReading, temperature: Option<f64>, humidity: Option<f64>) {
        // ---
        self.temperatures.extend(temperature);
        self.humidities.extend(humidity);

        if let (Some(t), Some(h)) = (temperature, humidity) {
            match assess_mold_risk(t, h) {
                RiskLevel::Alarm => self.alarm_count += 1,
                RiskLevel::Caution => self.caution_count += 1,
                RiskLevel::Good => {}
            }
        }

        if self.site_name.is_none() {
            self.site_name = non_blank(reading.site_name.as_deref());
        }
        if self.zone_name.is_none() {
            self.zone_name = non_blank(reading.zone_name.as_deref());
        }
    }

    fn into_row(self, (month, site, zone): GroupKey, hours_per_reading: u32) -> RiskRow {
        // ---
        let avg_temp = mean(&self.temperatures);
        let avg_humidity = mean(&self.humidities);

        let (overall_risk, dew_point) = match (avg_temp, avg_humidity) {
            (Some(t), Some(h)) => (assess_mold_risk(t, h), Some(simple_dew_point(t, h))),
            _ => (self.worst_individual_level(), None),
        };

        // widened so a large HOURS_PER_READING cannot overflow
        let hours_at_risk = u64::from(self.alarm_count) * u64::from(hours_per_reading);

        let building = self
            .site_name
            .unwrap_or_else(|| fallback_name(site.as_ref(), "Site", UNKNOWN_BUILDING));
        let zone_label = self
            .zone_name
            .unwrap_or_else(|| fallback_name(zone.as_ref(), "Zone", UNKNOWN_ZONE));
        let site_id = id_key(site.as_ref());
        let zone_id = id_key(zone.as_ref());

        RiskRow {
            id: format!("{}-{}-{}", month, site_id, zone_id),
            month,
            building,
            zone: zone_label,
            temp: one_decimal(avg_temp),
            rh: one_decimal(avg_humidity),
            dew_point: one_decimal(dew_point),
            overall_risk,
            alarm_count: self.alarm_count,
            caution_count: self.caution_count,
            time_at_risk: hours_at_risk.to_string(),
            comments: overall_risk.comment().to_string(),
            site_id,
            zone_id,
        }
    }

    fn worst_individual_level(&self) -> RiskLevel {
        if self.alarm_count > 0 {
            RiskLevel::Alarm
        } else if self.caution_count > 0 {
            RiskLevel::Caution
        } else {
            RiskLevel::Good
        }
    }
}

/// Roll daily readings up into one risk row per (month, site, zone).
///
/// Readings with an unparseable timestamp are skipped. A temperature or
/// humidity of `0` is a real reading and is averaged; only missing or
/// non-numeric values are left out.
///
/// Rows come back sorted by month, then site, then zone. Numeric IDs sort
/// numerically (site 2 before site 10) and ahead of text IDs; readings with
/// no ID come first.
pub fn generate_monthly_risk_data(
    readings: &[DailyReading],
    options: &PipelineOptions,
) -> Vec<RiskRow> {
    // ---
    let mut groups: BTreeMap<GroupKey, Group> = BTreeMap::new();

    for (i, reading) in readings.iter().enumerate() {
        let local = match parse_local(&reading.timestamp, &options.utc_offset) {
            Ok(ts) => ts,
            Err(e) => {
                warn!("Skipping daily reading {}: {}", i, e);
                continue;
            }
        };

        let month = format!("{:04}-{:02}", local.year(), local.month());
        let key = (
            month,
            reading.site_id.as_ref().map(EntityId::normalized),
            reading.zone_id.as_ref().map(EntityId::normalized),
        );

        let temperature = reading_value(reading, Metric::Temperature, i);
        let humidity = reading_value(reading, Metric::Humidity, i);

        groups.entry(key).or_default().add(reading, temperature, humidity);
    }

    debug!(
        "Grouped {} readings into {} monthly risk rows",
        readings.len(),
        groups.len()
    );

    groups
        .into_iter()
        .map(|(key, group)| group.into_row(key, options.hours_per_reading))
        .collect()
}

fn reading_value(reading: &DailyReading, metric: Metric, index: usize) -> Option<f64> {
    // ---
    let raw = reading.raw_value(metric)?;
    match raw.as_f64() {
        Ok(v) => Some(v),
        Err(e) => {
            warn!("Ignoring {} of daily reading {}: {}", metric.name(), index, e);
            None
        }
    }
}

/// Label for a site or zone without a name: `"Site 7"`, or the unknown label.
fn fallback_name(id: Option<&EntityId>, kind: &str, unknown: &str) -> String {
    id.map_or_else(|| unknown.to_string(), |id| format!("{} {}", kind, id))
}

fn non_blank(name: Option<&str>) -> Option<String> {
    name.map(str::trim).filter(|n| !n.is_empty()).map(String::from)
}

fn one_decimal(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| format!("{:.1}", v))
}
