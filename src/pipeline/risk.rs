//! Mold and condensation risk classification.
//!
//! Thresholds follow the usual damp-survey bands: sustained relative humidity
//! of 70% or more is an alarm on its own; 60–70% becomes an alarm on cold
//! surfaces (below 16 °C); below 60% only very cold conditions (below 12 °C)
//! warrant caution.

use crate::models::RiskLevel;

pub const RH_ALARM: f64 = 70.0;
pub const RH_ELEVATED: f64 = 60.0;
pub const COLD_SURFACE_C: f64 = 16.0;
pub const VERY_COLD_C: f64 = 12.0;

// ---

/// Classify a temperature (°C) / relative humidity (%) pair.
pub fn assess_mold_risk(temperature: f64, humidity: f64) -> RiskLevel {
    // ---
    if humidity >= RH_ALARM {
        RiskLevel::Alarm
    } else if humidity >= RH_ELEVATED {
        if temperature < COLD_SURFACE_C {
            RiskLevel::Alarm
        } else {
            RiskLevel::Caution
        }
    } else if temperature < VERY_COLD_C {
        RiskLevel::Caution
    } else {
        RiskLevel::Good
    }
}

/// Numeric risk score in `0..=3`.
///
/// Humidity contributes 0, 1 or 2 (below 60, below 70, otherwise) and a cold
/// surface adds one.
pub fn calculate_mold_risk_score(temperature: f64, humidity: f64) -> u8 {
    // ---
    let base = if humidity < RH_ELEVATED {
        0
    } else if humidity < RH_ALARM {
        1
    } else {
        2
    };

    base + u8::from(temperature < COLD_SURFACE_C)
}

/// Linear dew point approximation used by the risk table.
///
/// Not the Magnus formula; close enough above ~50% RH.
pub fn simple_dew_point(temperature: f64, humidity: f64) -> f64 {
    temperature - (100.0 - humidity) / 5.0
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_boundary_classification() {
        // ---
        assert_eq!(assess_mold_risk(15.0, 65.0), RiskLevel::Alarm);
        assert_eq!(assess_mold_risk(20.0, 65.0), RiskLevel::Caution);
        assert_eq!(assess_mold_risk(20.0, 75.0), RiskLevel::Alarm);
        assert_eq!(assess_mold_risk(13.0, 50.0), RiskLevel::Good);
        assert_eq!(assess_mold_risk(10.0, 50.0), RiskLevel::Caution);
    }

    #[test]
    fn test_threshold_edges() {
        // ---
        assert_eq!(assess_mold_risk(25.0, 70.0), RiskLevel::Alarm);
        assert_eq!(assess_mold_risk(25.0, 69.999), RiskLevel::Caution);
        assert_eq!(assess_mold_risk(16.0, 60.0), RiskLevel::Caution);
        assert_eq!(assess_mold_risk(15.999, 60.0), RiskLevel::Alarm);
        assert_eq!(assess_mold_risk(12.0, 59.9), RiskLevel::Good);
        assert_eq!(assess_mold_risk(11.9, 59.9), RiskLevel::Caution);
    }

    #[test]
    fn test_risk_is_monotonic_in_humidity() {
        // ---
        let temps = [-5.0, 0.0, 11.5, 12.0, 14.0, 15.99, 16.0, 22.0, 35.0];
        for t in temps {
            let mut previous = RiskLevel::Good;
            for step in 0..=200 {
                let h = step as f64 * 0.5;
                let level = assess_mold_risk(t, h);
                assert!(level >= previous, "t={} h={} went {:?} -> {:?}", t, h, previous, level);
                previous = level;
            }
        }
    }

    #[test]
    fn test_score_bounds_and_values() {
        // ---
        assert_eq!(calculate_mold_risk_score(20.0, 50.0), 0);
        assert_eq!(calculate_mold_risk_score(20.0, 60.0), 1);
        assert_eq!(calculate_mold_risk_score(20.0, 69.999), 1);
        assert_eq!(calculate_mold_risk_score(20.0, 70.0), 2);
        assert_eq!(calculate_mold_risk_score(15.0, 50.0), 1);
        assert_eq!(calculate_mold_risk_score(15.0, 95.0), 3);

        for t in [-40.0, 0.0, 15.9, 16.0, 50.0, f64::NAN, f64::INFINITY] {
            for h in [0.0, 59.0, 60.0, 70.0, 100.0, f64::NAN, f64::NEG_INFINITY] {
                assert!(calculate_mold_risk_score(t, h) <= 3);
            }
        }
    }

    #[test]
    fn test_score_monotonicity() {
        // ---
        for t in [5.0, 15.0, 16.0, 25.0] {
            let mut previous = 0;
            for step in 0..=100 {
                let score = calculate_mold_risk_score(t, step as f64);
                assert!(score >= previous);
                previous = score;
            }
        }
        for h in [40.0, 65.0, 80.0] {
            assert!(calculate_mold_risk_score(10.0, h) >= calculate_mold_risk_score(20.0, h));
        }
    }

    #[test]
    fn test_simple_dew_point() {
        // ---
        assert_eq!(simple_dew_point(21.0, 70.0), 15.0);
        assert_eq!(simple_dew_point(20.0, 100.0), 20.0);
    }
}
