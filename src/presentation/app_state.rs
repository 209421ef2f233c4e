// Application state for HTTP handlers
use crate::application::refresh_loop::SharedRefreshState;
use crate::domain::dashboard::DashboardSnapshot;
use tokio::sync::watch;

#[derive(Clone)]
pub struct AppState {
    pub refresh_state: SharedRefreshState,
    pub snapshot_rx: watch::Receiver<DashboardSnapshot>,
}
