use axum::{routing::get, Router};
use dashboard::Dashboard;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
// Note: Tracing is initialized by the binary that calls `run_server`.

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub dashboard: Dashboard,
}

/// Builds the API router around an already loaded dashboard.
pub fn router(dashboard: Dashboard) -> Router {
    let app_state = Arc::new(AppState { dashboard });
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any());

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/date-range", get(handlers::get_date_range))
        .route("/api/tabs", get(handlers::get_tabs))
        .route("/api/tabs/:tab", get(handlers::get_tab))
        .route("/api/report", get(handlers::get_report))
        .with_state(app_state)
        .layer(cors)
        // Logs every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// Serves the dashboard API on `addr` until the process is stopped.
pub async fn run_server(addr: SocketAddr, dashboard: Dashboard) -> anyhow::Result<()> {
    let rows = dashboard.repository().len();
    let app = router(dashboard);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, rows, "Web server started and listening.");
    axum::serve(listener, app).await?;

    Ok(())
}
