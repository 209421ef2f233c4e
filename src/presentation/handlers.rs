// HTTP request handlers
use crate::domain::dashboard::DashboardSnapshot;
use crate::domain::refresh::clamp_interval;
use crate::domain::visualization::Visualization;
use crate::presentation::app_state::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// List the five visualization selector names for the UI shell.
pub async fn list_visualizations() -> Json<Vec<&'static str>> {
    Json(Visualization::ALL.iter().map(|v| v.name()).collect())
}

/// Current dashboard snapshot: the one live chart, or the last tick's error.
pub async fn get_dashboard(State(state): State<Arc<AppState>>) -> Json<DashboardSnapshot> {
    Json(state.snapshot_rx.borrow().clone())
}

#[derive(Debug, Deserialize)]
pub struct ControlsRequest {
    pub visualization: Option<Visualization>,
    pub interval_secs: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct ControlsApplied {
    pub visualization: Visualization,
    pub interval_secs: u64,
}

/// Update the selection and/or refresh interval. Applied at the start of
/// the next tick, so the change can lag by up to one interval. Out-of-range
/// intervals are clamped to [1, 30]; an unknown visualization name fails
/// JSON deserialization and never reaches this handler.
pub async fn update_controls(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ControlsRequest>,
) -> Json<ControlsApplied> {
    let mut refresh_state = state.refresh_state.write().await;

    if let Some(visualization) = request.visualization {
        tracing::info!("Selection changed to {}", visualization.name());
        refresh_state.set_selection(visualization);
    }
    if let Some(interval) = request.interval_secs {
        let clamped = clamp_interval(interval);
        if clamped != interval {
            tracing::info!("Interval {}s out of range, clamped to {}s", interval, clamped);
        }
        refresh_state.set_interval(interval);
    }

    Json(ControlsApplied {
        visualization: refresh_state.selection,
        interval_secs: refresh_state.interval_secs,
    })
}
