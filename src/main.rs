// Main entry point - Dependency injection, refresh loop, and server setup
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc, time::Duration};
use axum::{
    routing::{get, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::application::dashboard_service::DashboardService;
use crate::application::refresh_loop::RefreshLoop;
use crate::domain::refresh::RefreshState;
use crate::infrastructure::config::{load_dashboard_config, load_pinot_config};
use crate::infrastructure::pinot_repository::PinotRepository;
use crate::infrastructure::query_cache::{CachedRepository, QueryCache};
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    get_dashboard, health_check, list_visualizations, update_controls,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let pinot_config = load_pinot_config()?;
    let dashboard_config = load_dashboard_config()?;
    let settings = dashboard_config.dashboard;

    // Create repository with the memoization window (infrastructure layer)
    let broker = Arc::new(PinotRepository::new(&pinot_config.pinot));
    let repository = Arc::new(CachedRepository::new(
        broker,
        QueryCache::new(Duration::from_secs(settings.cache_ttl_secs)),
    ));

    // Create service and refresh loop (application layer)
    let service = DashboardService::new(repository);
    let initial = RefreshState::new(
        settings.default_visualization,
        settings.refresh_interval_secs,
    );
    let (refresh_loop, refresh_state, snapshot_rx) = RefreshLoop::new(service, initial);

    // The stop sender lives for the whole process; dropping it would end
    // the loop, so it is bound until main returns.
    let (stop_tx, stop_rx) = tokio::sync::watch::channel(false);
    tokio::spawn(refresh_loop.run(stop_rx));

    // Create application state
    let state = Arc::new(AppState {
        refresh_state,
        snapshot_rx,
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/visualizations", get(list_visualizations))
        .route("/dashboard", get(get_dashboard))
        .route("/controls", put(update_controls))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = settings.listen_addr.parse()?;
    println!("Starting pinot-dashboard service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    drop(stop_tx);
    Ok(())
}
