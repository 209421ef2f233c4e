// Refresh loop - Cancellable tick driver for the live dashboard

use crate::application::dashboard_service::{DashboardService, TickError};
use crate::domain::dashboard::DashboardSnapshot;
use crate::domain::refresh::RefreshState;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, RwLock};

pub type SharedRefreshState = Arc<RwLock<RefreshState>>;

/// Drives one chart per tick. State is explicit and shared with the control
/// endpoint; the latest snapshot goes out over a watch channel so exactly
/// one chart is live at any time. The loop never terminates on its own,
/// only via the stop signal.
pub struct RefreshLoop {
    service: DashboardService,
    state: SharedRefreshState,
    snapshot_tx: watch::Sender<DashboardSnapshot>,
}

impl RefreshLoop {
    pub fn new(
        service: DashboardService,
        initial: RefreshState,
    ) -> (
        Self,
        SharedRefreshState,
        watch::Receiver<DashboardSnapshot>,
    ) {
        let pending = DashboardSnapshot::pending(initial.selection, initial.interval_secs);
        let (snapshot_tx, snapshot_rx) = watch::channel(pending);
        let state = Arc::new(RwLock::new(initial));

        (
            Self {
                service,
                state: state.clone(),
                snapshot_tx,
            },
            state,
            snapshot_rx,
        )
    }

    /// One full tick: read the current selection, build the chart under a
    /// key derived from the tick counter, publish the snapshot (replacing
    /// the previous one), advance the counter. Failures are published, not
    /// propagated; the loop keeps ticking.
    pub async fn tick(&self) {
        let (selection, interval_secs, key) = {
            let state = self.state.read().await;
            (state.selection, state.interval_secs, state.display_key())
        };

        let snapshot = match self.service.build_chart(selection, &key).await {
            Ok(chart) => DashboardSnapshot::rendered(key, selection, interval_secs, chart),
            Err(e) => {
                match &e {
                    TickError::Query(q) if q.is_transient() => {
                        tracing::warn!("Tick {} failed, retrying next interval: {}", key, q);
                    }
                    other => {
                        tracing::error!("Tick {} failed (configuration mismatch?): {}", key, other);
                    }
                }
                DashboardSnapshot::failed(key, selection, interval_secs, e.to_string())
            }
        };

        let _ = self.snapshot_tx.send(snapshot);
        self.state.write().await.advance();
    }

    /// Tick until the stop signal fires. A changed selection or interval is
    /// picked up at the start of the next tick, so a control update can lag
    /// by up to one full interval.
    pub async fn run(self, mut stop: watch::Receiver<bool>) {
        loop {
            self.tick().await;

            let interval = Duration::from_secs(self.state.read().await.interval_secs);
            tokio::select! {
                _ = tokio::time::sleep(interval) => {}
                changed = stop.changed() => {
                    if changed.is_err() || *stop.borrow() {
                        break;
                    }
                }
            }
        }
        tracing::info!("Refresh loop stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::query_repository::{QueryError, QueryRepository};
    use crate::domain::table::Table;
    use crate::domain::visualization::Visualization;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct ScriptedRepository {
        calls: AtomicUsize,
        fail_first: usize,
    }

    impl ScriptedRepository {
        fn new(fail_first: usize) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_first,
            }
        }
    }

    #[async_trait]
    impl QueryRepository for ScriptedRepository {
        async fn fetch_table(&self, _sql: &str) -> Result<Table, QueryError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.fail_first {
                return Err(QueryError::Connection("engine down".to_string()));
            }
            Ok(Table::new(
                vec!["category".to_string(), "total_inventory".to_string()],
                vec!["STRING".to_string(), "LONG".to_string()],
                vec![vec![json!("shoes"), json!(5)]],
            ))
        }
    }

    fn make_loop(
        fail_first: usize,
    ) -> (
        RefreshLoop,
        SharedRefreshState,
        watch::Receiver<DashboardSnapshot>,
    ) {
        let service = DashboardService::new(Arc::new(ScriptedRepository::new(fail_first)));
        RefreshLoop::new(
            service,
            RefreshState::new(Visualization::InventoryByCategory, 5),
        )
    }

    #[tokio::test]
    async fn test_ticks_publish_unique_keys_and_advance_counter() {
        let (refresh_loop, state, snapshot_rx) = make_loop(0);

        for _ in 0..3 {
            refresh_loop.tick().await;
        }

        let snapshot = snapshot_rx.borrow().clone();
        assert_eq!(snapshot.key, "plot2");
        assert!(snapshot.chart.is_some());
        assert!(snapshot.error.is_none());
        assert_eq!(state.read().await.tick, 3);
    }

    #[tokio::test]
    async fn test_failed_tick_surfaces_error_and_loop_recovers() {
        let (refresh_loop, _state, snapshot_rx) = make_loop(1);

        refresh_loop.tick().await;
        let failed = snapshot_rx.borrow().clone();
        assert!(failed.chart.is_none());
        assert!(failed.error.as_deref().unwrap().contains("engine down"));

        refresh_loop.tick().await;
        let recovered = snapshot_rx.borrow().clone();
        assert!(recovered.chart.is_some());
        assert!(recovered.error.is_none());
        assert_eq!(recovered.key, "plot1");
    }

    #[tokio::test]
    async fn test_selection_change_applies_on_next_tick() {
        let (refresh_loop, state, snapshot_rx) = make_loop(0);

        refresh_loop.tick().await;
        assert_eq!(
            snapshot_rx.borrow().visualization,
            Visualization::InventoryByCategory
        );

        state
            .write()
            .await
            .set_selection(Visualization::MostRecentPageViews);
        refresh_loop.tick().await;
        assert_eq!(
            snapshot_rx.borrow().visualization,
            Visualization::MostRecentPageViews
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_stops_on_signal() {
        let (refresh_loop, _state, snapshot_rx) = make_loop(0);
        let (stop_tx, stop_rx) = watch::channel(false);

        let handle = tokio::spawn(refresh_loop.run(stop_rx));
        stop_tx.send(true).unwrap();
        handle.await.unwrap();

        // At least the first tick ran before the signal was observed.
        assert!(!snapshot_rx.borrow().key.is_empty());
    }
}
