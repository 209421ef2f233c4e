// Dashboard snapshot domain model

use super::chart::Chart;
use super::visualization::Visualization;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// What the presentation layer serves: the outcome of the most recent tick.
/// Exactly one snapshot is live at any time; each tick replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub key: String,
    pub visualization: Visualization,
    pub interval_secs: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<Chart>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub refreshed_at: DateTime<Utc>,
}

impl DashboardSnapshot {
    /// Initial snapshot published before the first tick completes.
    pub fn pending(visualization: Visualization, interval_secs: u64) -> Self {
        Self {
            key: String::new(),
            visualization,
            interval_secs,
            chart: None,
            error: None,
            refreshed_at: Utc::now(),
        }
    }

    pub fn rendered(
        key: String,
        visualization: Visualization,
        interval_secs: u64,
        chart: Chart,
    ) -> Self {
        Self {
            key,
            visualization,
            interval_secs,
            chart: Some(chart),
            error: None,
            refreshed_at: Utc::now(),
        }
    }

    /// Failed tick: no chart, the error surfaced to the operator instead.
    pub fn failed(
        key: String,
        visualization: Visualization,
        interval_secs: u64,
        error: String,
    ) -> Self {
        Self {
            key,
            visualization,
            interval_secs,
            chart: None,
            error: Some(error),
            refreshed_at: Utc::now(),
        }
    }
}
