//! Data models for the damp-risk pipeline.
//!
//! Inbound shapes (`RawSample`, `DailyReading`) mirror what the dashboard's
//! fetch layer hands over, so they stay loose: values may arrive as numbers or
//! strings and every location field is optional. Outbound shapes
//! (`HourlyPoint`, `MonthlyPoint`, `RiskRow`) serialize in camelCase for the
//! chart and table components.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::SampleError;

// ---

/// A sensor value as delivered upstream: JSON number or numeric string.
///
/// Anything else (`null`, booleans, objects) lands in `Other` so one bad row
/// does not reject the whole batch; it fails coercion instead.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum SampleValue {
    // ---
    Number(f64),
    Text(String),
    Other(Value),
}

impl Default for SampleValue {
    fn default() -> Self {
        SampleValue::Other(Value::Null)
    }
}

impl SampleValue {
    // ---
    /// Coerce to a finite `f64`. Text is trimmed before parsing.
    pub fn as_f64(&self) -> Result<f64, SampleError> {
        // ---
        let value = match self {
            SampleValue::Number(n) => *n,
            SampleValue::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| SampleError::NonNumericValue(s.clone()))?,
            SampleValue::Other(Value::Null) => return Err(SampleError::MissingValue),
            SampleValue::Other(other) => {
                return Err(SampleError::NonNumericValue(other.to_string()))
            }
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(SampleError::NonFiniteValue(value))
        }
    }
}

impl From<f64> for SampleValue {
    fn from(value: f64) -> Self {
        SampleValue::Number(value)
    }
}

/// Raw sensor sample from the fetch layer
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawSample {
    // ---
    #[serde(default, deserialize_with = "loose_string")]
    pub timestamp: String,
    #[serde(default)]
    pub value: SampleValue,
}

/// Accept any JSON for a timestamp field. Non-strings keep their JSON text
/// (`null`, `1711447200`) and are rejected later by timestamp parsing.
fn loose_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    // ---
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        other => other.to_string(),
    })
}

/// The two metrics tracked per hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Temperature,
    Humidity,
}

impl Metric {
    pub const ALL: [Metric; 2] = [Metric::Temperature, Metric::Humidity];

    pub const fn name(self) -> &'static str {
        match self {
            Metric::Temperature => "temperature",
            Metric::Humidity => "humidity",
        }
    }
}

/// Whether each metric of an hourly slot was measured (`true`) or synthesized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealFlags {
    pub temperature: bool,
    pub humidity: bool,
}

/// One hour-of-day slot of a daily chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyPoint {
    // ---
    /// Hour label, `"0:00"` through `"23:00"`.
    pub time: String,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub is_real: RealFlags,
}

impl HourlyPoint {
    // ---
    /// An empty slot for `hour` with no values and nothing measured.
    pub fn empty(hour: usize) -> Self {
        HourlyPoint {
            time: hour_label(hour),
            temperature: None,
            humidity: None,
            is_real: RealFlags::default(),
        }
    }

    pub fn value(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Temperature => self.temperature,
            Metric::Humidity => self.humidity,
        }
    }

    pub fn is_real(&self, metric: Metric) -> bool {
        match metric {
            Metric::Temperature => self.is_real.temperature,
            Metric::Humidity => self.is_real.humidity,
        }
    }

    /// Store a value for `metric`, recording whether it was measured.
    pub fn set(&mut self, metric: Metric, value: Option<f64>, real: bool) {
        match metric {
            Metric::Temperature => {
                self.temperature = value;
                self.is_real.temperature = real;
            }
            Metric::Humidity => {
                self.humidity = value;
                self.is_real.humidity = real;
            }
        }
    }
}

/// Chart label for an hour of the day.
pub fn hour_label(hour: usize) -> String {
    format!("{}:00", hour)
}

/// Per-day rollup for the 30-day chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPoint {
    // ---
    /// Local calendar date, `YYYY-MM-DD`.
    pub date: String,
    pub avg_temp: Option<f64>,
    pub min_temp: Option<f64>,
    pub max_temp: Option<f64>,
    pub avg_humidity: Option<f64>,
}

/// Site or zone identifier; the database hands out integers, CSV imports strings.
///
/// Ordering puts integer IDs first, numerically, then text IDs.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(untagged)]
pub enum EntityId {
    Int(i64),
    Text(String),
}

impl EntityId {
    /// Fold numeric text (`"7"`) into `Int` so both spellings group together.
    pub fn normalized(&self) -> EntityId {
        match self {
            EntityId::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_or_else(|_| self.clone(), EntityId::Int),
            EntityId::Int(_) => self.clone(),
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Int(id) => write!(f, "{}", id),
            EntityId::Text(id) => f.write_str(id),
        }
    }
}

/// Grouping key used when a reading carries no site or zone ID.
pub const UNDEFINED_ID: &str = "undefined";

/// One daily (or sub-daily) reading fed to the monthly rollup.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyReading {
    // ---
    #[serde(alias = "time", default, deserialize_with = "loose_string")]
    pub timestamp: String,
    pub temperature: Option<SampleValue>,
    pub humidity: Option<SampleValue>,
    pub site_id: Option<EntityId>,
    pub zone_id: Option<EntityId>,
    pub site_name: Option<String>,
    pub zone_name: Option<String>,
}

impl DailyReading {
    // ---
    pub fn site_key(&self) -> String {
        id_key(self.site_id.as_ref())
    }

    pub fn zone_key(&self) -> String {
        id_key(self.zone_id.as_ref())
    }

    pub fn raw_value(&self, metric: Metric) -> Option<&SampleValue> {
        match metric {
            Metric::Temperature => self.temperature.as_ref(),
            Metric::Humidity => self.humidity.as_ref(),
        }
    }
}

/// Row key for an optional ID; a missing one renders as [`UNDEFINED_ID`].
pub fn id_key(id: Option<&EntityId>) -> String {
    id.map_or_else(|| UNDEFINED_ID.to_string(), |id| id.to_string())
}

/// Mold risk category, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Good,
    Caution,
    Alarm,
}

impl RiskLevel {
    /// Table comment shown next to a row at this level.
    pub const fn comment(self) -> &'static str {
        match self {
            RiskLevel::Alarm => "Needs immediate attention",
            RiskLevel::Caution => "Monitor closely",
            RiskLevel::Good => "Normal operation",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::Good => "Good",
            RiskLevel::Caution => "Caution",
            RiskLevel::Alarm => "Alarm",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classified summary of one (month, site, zone) group for the risk table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskRow {
    // ---
    pub id: String,
    /// `YYYY-MM`
    pub month: String,
    pub building: String,
    pub zone: String,
    pub temp: String,
    pub rh: String,
    pub dew_point: String,
    pub overall_risk: RiskLevel,
    pub alarm_count: u32,
    pub caution_count: u32,
    pub time_at_risk: String,
    pub comments: String,
    pub site_id: String,
    pub zone_id: String,
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    fn create_test_reading(json: &str) -> DailyReading {
        // ---
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_sample_value_coercion() {
        // ---
        assert_eq!(SampleValue::Number(21.5).as_f64(), Ok(21.5));
        assert_eq!(SampleValue::Text(" 18.25 ".into()).as_f64(), Ok(18.25));
        assert_eq!(
            SampleValue::Text("n/a".into()).as_f64(),
            Err(SampleError::NonNumericValue("n/a".into()))
        );
        assert!(matches!(
            SampleValue::Text("NaN".into()).as_f64(),
            Err(SampleError::NonFiniteValue(_))
        ));
    }

    #[test]
    fn test_raw_sample_accepts_number_or_string() {
        // ---
        let samples: Vec<RawSample> = serde_json::from_str(
            r#"[{"timestamp":"2025-03-26T10:00:00Z","value":20.5},
                {"timestamp":"2025-03-26T11:00:00Z","value":"21"}]"#,
        )
        .unwrap();

        assert_eq!(samples[0].value, SampleValue::Number(20.5));
        assert_eq!(samples[1].value, SampleValue::Text("21".into()));
    }

    #[test]
    fn test_loose_values_and_timestamps_still_deserialize() {
        // ---
        let samples: Vec<RawSample> = serde_json::from_str(
            r#"[{"timestamp":"2025-03-26T10:00:00Z","value":null},
                {"timestamp":"2025-03-26T11:00:00Z","value":true},
                {"timestamp":"2025-03-26T12:00:00Z"},
                {"timestamp":null,"value":20},
                {"timestamp":1711447200,"value":21}]"#,
        )
        .unwrap();

        assert_eq!(samples[0].value.as_f64(), Err(SampleError::MissingValue));
        assert_eq!(
            samples[1].value.as_f64(),
            Err(SampleError::NonNumericValue("true".into()))
        );
        assert_eq!(samples[2].value.as_f64(), Err(SampleError::MissingValue));
        assert_eq!(samples[3].timestamp, "null");
        assert_eq!(samples[4].timestamp, "1711447200");
        assert_eq!(samples[4].value.as_f64(), Ok(21.0));
    }

    #[test]
    fn test_daily_reading_loose_fields() {
        // ---
        let reading = create_test_reading(r#"{"timestamp":null,"temperature":false,"humidity":null}"#);

        assert_eq!(reading.timestamp, "null");
        assert!(reading.temperature.as_ref().unwrap().as_f64().is_err());
        assert!(reading.humidity.is_none());
    }

    #[test]
    fn test_daily_reading_time_alias_and_missing_ids() {
        // ---
        let reading = create_test_reading(r#"{"time":"2025-03-01","temperature":12}"#);

        assert_eq!(reading.timestamp, "2025-03-01");
        assert!(reading.humidity.is_none());
        assert_eq!(reading.site_key(), UNDEFINED_ID);
        assert_eq!(reading.zone_key(), UNDEFINED_ID);
    }

    #[test]
    fn test_entity_ids_render_as_keys() {
        // ---
        let reading = create_test_reading(
            r#"{"timestamp":"2025-03-01","siteId":7,"zoneId":"north-wing","humidity":null}"#,
        );

        assert_eq!(reading.site_key(), "7");
        assert_eq!(reading.zone_key(), "north-wing");
        assert!(reading.humidity.is_none());
    }

    #[test]
    fn test_entity_ids_order_numerically() {
        // ---
        let mut ids = vec![
            EntityId::Text("annex".into()),
            EntityId::Int(10),
            EntityId::Text(" 2 ".into()).normalized(),
        ];
        ids.sort();

        assert_eq!(
            ids,
            vec![EntityId::Int(2), EntityId::Int(10), EntityId::Text("annex".into())]
        );
    }

    #[test]
    fn test_hourly_point_serializes_camel_case() {
        // ---
        let mut point = HourlyPoint::empty(5);
        point.set(Metric::Temperature, Some(19.0), true);

        let json = serde_json::to_value(&point).unwrap();
        assert_eq!(json["time"], "5:00");
        assert_eq!(json["temperature"], 19.0);
        assert!(json["humidity"].is_null());
        assert_eq!(json["isReal"]["temperature"], true);
        assert_eq!(json["isReal"]["humidity"], false);
    }

    #[test]
    fn test_risk_level_ordering_and_comments() {
        // ---
        assert!(RiskLevel::Good < RiskLevel::Caution);
        assert!(RiskLevel::Caution < RiskLevel::Alarm);
        assert_eq!(RiskLevel::Alarm.comment(), "Needs immediate attention");
        assert_eq!(RiskLevel::Caution.comment(), "Monitor closely");
        assert_eq!(RiskLevel::Good.comment(), "Normal operation");
        assert_eq!(serde_json::to_string(&RiskLevel::Caution).unwrap(), r#""Caution""#);
    }
}
