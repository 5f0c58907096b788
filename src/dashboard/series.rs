//! bounded rolling chart windows.
//!
//! each metric keeps at most 20 (label, value) pairs; pushing the 21st
//! evicts the oldest. the three charts (co2, temperature+humidity,
//! light) share one timestamp label per poll, so dedup of a repeated
//! label happens once for all of them.

use std::collections::VecDeque;
use std::fmt::Write as _;

use super::ReadingSnapshot;

/// points kept per series before FIFO eviction
pub const MAX_POINTS: usize = 20;

/// one rolling (label, value) window
#[derive(Debug, Clone, Default)]
pub struct ChartSeries {
    points: VecDeque<(String, f64)>,
}

impl ChartSeries {
    pub fn push(&mut self, label: &str, value: f64) {
        self.points.push_back((label.to_string(), value));
        if self.points.len() > MAX_POINTS {
            self.points.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last_label(&self) -> Option<&str> {
        self.points.back().map(|(label, _)| label.as_str())
    }

    pub fn points(&self) -> impl Iterator<Item = (&str, f64)> {
        self.points.iter().map(|(label, value)| (label.as_str(), *value))
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|(_, value)| *value).collect()
    }
}

/// the three dashboard charts (four series; the temperature chart
/// carries humidity as its second dataset)
#[derive(Debug, Clone, Default)]
pub struct TrendCharts {
    pub co2: ChartSeries,
    pub temperature: ChartSeries,
    pub humidity: ChartSeries,
    pub lux: ChartSeries,
}

impl TrendCharts {
    /// append one point per series. if the newest label already equals
    /// `label` the append is skipped entirely for all series, so two
    /// polls inside the same clock-second never double-plot.
    pub fn record(&mut self, label: &str, latest: &ReadingSnapshot) {
        if self.co2.last_label() == Some(label) {
            return;
        }

        self.co2.push(label, super::coalesce(latest.co2, 0.0));
        self.temperature
            .push(label, super::coalesce(latest.temperature, 0.0));
        self.humidity
            .push(label, super::coalesce(latest.humidity, 0.0));
        self.lux.push(label, super::coalesce(latest.lux, 0.0));
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for (name, series) in [
            ("co2 ppm ", &self.co2),
            ("temp °C ", &self.temperature),
            ("humid % ", &self.humidity),
            ("lux     ", &self.lux),
        ] {
            let values: Vec<String> = series
                .points()
                .map(|(_, value)| format!("{value:.1}"))
                .collect();
            let _ = writeln!(out, "{name}| {}", values.join(" "));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(co2: f64) -> ReadingSnapshot {
        ReadingSnapshot {
            co2: Some(co2),
            temperature: Some(21.0),
            humidity: Some(40.0),
            lux: Some(300.0),
            air_quality: Some("Good".into()),
        }
    }

    #[test]
    fn series_evicts_oldest_in_fifo_order() {
        let mut series = ChartSeries::default();
        for i in 0..25 {
            series.push(&format!("t{i}"), i as f64);
        }

        assert_eq!(series.len(), MAX_POINTS);
        // t0..t4 evicted, window starts at t5
        let first = series.points().next().unwrap();
        assert_eq!(first, ("t5", 5.0));
        assert_eq!(series.last_label(), Some("t24"));
        assert_eq!(series.values().first(), Some(&5.0));
    }

    #[test]
    fn repeated_label_is_skipped_for_all_series() {
        let mut charts = TrendCharts::default();
        charts.record("12:00:01", &snapshot(400.0));
        charts.record("12:00:01", &snapshot(999.0));

        assert_eq!(charts.co2.len(), 1);
        assert_eq!(charts.temperature.len(), 1);
        assert_eq!(charts.humidity.len(), 1);
        assert_eq!(charts.lux.len(), 1);
        // the skipped update leaves the original point untouched
        assert_eq!(charts.co2.values(), vec![400.0]);
    }

    #[test]
    fn distinct_labels_accumulate() {
        let mut charts = TrendCharts::default();
        charts.record("12:00:01", &snapshot(400.0));
        charts.record("12:00:02", &snapshot(410.0));
        assert_eq!(charts.co2.values(), vec![400.0, 410.0]);
    }

    #[test]
    fn absent_metrics_plot_as_zero() {
        let mut charts = TrendCharts::default();
        charts.record("12:00:01", &ReadingSnapshot::default());
        assert_eq!(charts.lux.values(), vec![0.0]);
    }
}
