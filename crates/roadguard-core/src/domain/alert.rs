// ============================================================================
// RoadGuard Core - Alert Entity
// File: crates/roadguard-core/src/domain/alert.rs
// Description: Driving-behaviour alerts and the report time series
// ============================================================================

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Utc};
use roadguard_shared::constants::{ALERT_CHART_WINDOW_DAYS, ALERT_TYPE_DANGEROUS_MANEUVER};
use roadguard_shared::utils::sql_datetime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub alerta_id: i32,
    pub conductor_id: i32,
    pub tipo: String,
    pub descripcion: String,
    #[serde(with = "sql_datetime")]
    pub fecha: DateTime<Utc>,
}

/// The report distinguishes only two alert families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    DangerousManeuver,
    Proximity,
}

impl Alert {
    pub fn kind(&self) -> AlertKind {
        if self.tipo == ALERT_TYPE_DANGEROUS_MANEUVER {
            AlertKind::DangerousManeuver
        } else {
            AlertKind::Proximity
        }
    }

    /// Newest first; ties keep their original order.
    pub fn sort_newest_first(alerts: &mut [Alert]) {
        alerts.sort_by(|a, b| b.fecha.cmp(&a.fecha));
    }
}

/// Daily alert counts for the chart on the driver report, oldest day first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AlertChart {
    pub labels: Vec<String>,
    pub maniobras: Vec<u32>,
    pub proximidad: Vec<u32>,
}

impl AlertChart {
    /// Buckets alerts newer than `now - 30 days` by calendar day as seen
    /// at `offset`.
    pub fn from_alerts(alerts: &[Alert], now: DateTime<Utc>, offset: FixedOffset) -> Self {
        let cutoff = now - Duration::days(ALERT_CHART_WINDOW_DAYS);
        let mut by_day: BTreeMap<NaiveDate, (u32, u32)> = BTreeMap::new();

        for alert in alerts.iter().filter(|a| a.fecha > cutoff) {
            let day = alert.fecha.with_timezone(&offset).date_naive();
            let bucket = by_day.entry(day).or_default();
            match alert.kind() {
                AlertKind::DangerousManeuver => bucket.0 += 1,
                AlertKind::Proximity => bucket.1 += 1,
            }
        }

        let mut chart = AlertChart::default();
        for (day, (maniobras, proximidad)) in by_day {
            chart.labels.push(day.format("%-d/%-m/%Y").to_string());
            chart.maniobras.push(maniobras);
            chart.proximidad.push(proximidad);
        }
        chart
    }
}
