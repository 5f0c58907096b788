//! ==============================================================================
//! dashboard - polling client state
//! ==============================================================================
//!
//! purpose:
//!     everything the terminal dashboard derives from the hub: the
//!     numeric display panel, the connection status, the rolling chart
//!     series and the current alert set.
//!
//! structure:
//!     - mod.rs:    shared state types, coalesce helpers, text render
//!     - series.rs: bounded rolling chart windows
//!     - alerts.rs: stateless threshold evaluation
//!     - poller.rs: fetch loop and state transitions
//!
//! all of it is ephemeral: rebuilt fresh each dashboard start, never
//! persisted.
//!
//! ==============================================================================

pub mod alerts;
pub mod poller;
pub mod series;

use std::fmt::Write as _;

use serde::Deserialize;

use alerts::Alert;
use series::TrendCharts;

/// one reading as fetched from GET /get-sensor-data. every field is
/// optional: the hub may hold NULLs, and the dashboard stays usable
/// against older hubs that omit fields entirely.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReadingSnapshot {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub co2: Option<f64>,
    pub lux: Option<f64>,
    pub air_quality: Option<String>,
}

/// absent-metric default for display. unlike a `|| 0` fallback this
/// never masks a legitimate zero: Some(0.0) passes through unchanged.
pub fn coalesce(field: Option<f64>, default: f64) -> f64 {
    field.unwrap_or(default)
}

/// label counterpart of [`coalesce`]; absent air quality reads "Unknown"
pub fn coalesce_label(field: Option<&str>, default: &str) -> String {
    field.unwrap_or(default).to_string()
}

/// connection indicator shown on the dashboard; Offline until the
/// first fetch outcome is known
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    Online,
    #[default]
    Offline,
}

/// the five numeric/text display fields plus the "as of" label
#[derive(Debug, Clone)]
pub struct DisplayPanel {
    pub co2: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub lux: f64,
    pub air_quality: String,
    pub as_of: String,
}

impl Default for DisplayPanel {
    fn default() -> Self {
        Self {
            co2: 0.0,
            temperature: 0.0,
            humidity: 0.0,
            lux: 0.0,
            air_quality: "Unknown".to_string(),
            as_of: "--".to_string(),
        }
    }
}

impl DisplayPanel {
    pub fn update(&mut self, latest: &ReadingSnapshot, as_of: &str) {
        self.co2 = coalesce(latest.co2, 0.0);
        self.temperature = coalesce(latest.temperature, 0.0);
        self.humidity = coalesce(latest.humidity, 0.0);
        self.lux = coalesce(latest.lux, 0.0);
        self.air_quality = coalesce_label(latest.air_quality.as_deref(), "Unknown");
        self.as_of = as_of.to_string();
    }
}

/// everything the poller owns; an explicit value rather than shared
/// globals so update functions take it as a parameter
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub status: ConnectionStatus,
    pub panel: DisplayPanel,
    pub alerts: Vec<Alert>,
    pub charts: TrendCharts,
}

impl DashboardState {
    /// plain-text frame for the terminal dashboard
    pub fn render(&self) -> String {
        let status = match self.status {
            ConnectionStatus::Online => "● Online",
            ConnectionStatus::Offline => "● Offline",
        };

        let mut out = String::new();
        let _ = writeln!(out, "{status}   as of {}", self.panel.as_of);
        let _ = writeln!(
            out,
            "CO2 {:.2} ppm | Temp {:.2} °C | Humidity {:.2} % | Light {:.2} lux | Air quality: {}",
            self.panel.co2,
            self.panel.temperature,
            self.panel.humidity,
            self.panel.lux,
            self.panel.air_quality,
        );

        for alert in &self.alerts {
            let _ = writeln!(out, "[{}] {}", alert.severity, alert.message);
        }

        let _ = write!(out, "{}", self.charts.render());
        out
    }
}
