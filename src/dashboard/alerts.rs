//! threshold alerts, recomputed from scratch on every update.
//!
//! no history, no hysteresis: the evaluated set replaces the previous
//! one entirely. thresholds are evaluated on the raw optional values,
//! so a missing metric raises nothing.

use std::fmt;

/// CO2 above this is an alert (ppm)
const CO2_ALERT_PPM: f64 = 600.0;
/// temperature above this is a warning (°C)
const TEMP_WARN_C: f64 = 30.0;
/// humidity above this is a warning (% RH)
const HUMIDITY_WARN_PCT: f64 = 80.0;
/// illuminance below this is a warning (lux)
const LUX_WARN_FLOOR: f64 = 200.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Alert,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Alert => write!(f, "alert"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub severity: Severity,
    pub message: String,
}

/// evaluate all thresholds against one reading. multiple alerts may
/// co-occur; the caller replaces its previous set with the result.
pub fn evaluate(latest: &super::ReadingSnapshot) -> Vec<Alert> {
    let mut alerts = Vec::new();

    if let Some(co2) = latest.co2.filter(|v| *v > CO2_ALERT_PPM) {
        alerts.push(Alert {
            severity: Severity::Alert,
            message: format!(
                "High air pollution detected: {} ppm (consider ventilation)",
                co2.round()
            ),
        });
    }

    if let Some(temperature) = latest.temperature.filter(|v| *v > TEMP_WARN_C) {
        alerts.push(Alert {
            severity: Severity::Warning,
            message: format!("High temperature: {temperature}°C (consider cooling)"),
        });
    }

    if let Some(humidity) = latest.humidity.filter(|v| *v > HUMIDITY_WARN_PCT) {
        alerts.push(Alert {
            severity: Severity::Warning,
            message: format!("High humidity: {humidity}% (consider dehumidification)"),
        });
    }

    if let Some(lux) = latest.lux.filter(|v| *v < LUX_WARN_FLOOR) {
        alerts.push(Alert {
            severity: Severity::Warning,
            message: format!("Low light level: {} lux (consider lighting)", lux.round()),
        });
    }

    alerts
}
