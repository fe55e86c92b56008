// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use crate::application::backend::DashboardBackend;
use crate::application::details_service::DetailsService;
use crate::application::pollers::{LiveReadingsPoller, SunTimesPoller};
use crate::application::render_service::ChartRenderService;
use crate::application::visibility_service::VisibilityService;
use crate::infrastructure::board::InMemoryBoard;
use crate::infrastructure::config::load_dashboard_config;
use crate::infrastructure::http_backend::HttpBackend;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("enviro_dashboard=info,tower_http=info")),
        )
        .init();

    // Load configuration
    let config = load_dashboard_config()?;
    let catalogue = Arc::new(config.catalogue()?);

    // Create backend client and board (infrastructure layer)
    let backend: Arc<dyn DashboardBackend> = Arc::new(HttpBackend::new(
        &config.backend.base_url,
        std::time::Duration::from_secs(config.backend.timeout_secs),
    )?);
    let board = Arc::new(InMemoryBoard::default());

    // Create services (application layer)
    let renderer = ChartRenderService::new(backend.clone(), board.clone(), catalogue.clone());
    let visibility = VisibilityService::new(backend.clone(), catalogue.clone());
    let details = DetailsService::new(
        backend.clone(),
        board.clone(),
        catalogue.clone(),
        config.polling.details_dismiss_after(),
    );

    LiveReadingsPoller::new(
        backend.clone(),
        board.clone(),
        Arc::new(config.icons.clone()),
        config.polling.readings_every(),
    )
    .spawn();
    SunTimesPoller::new(backend.clone(), board.clone(), config.polling.sun_every()).spawn();

    // Create application state and draw the initial charts
    let state = Arc::new(AppState::new(catalogue, board, renderer, visibility, details));
    state.refresh_charts();

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(handlers::health_check))
        .route("/board", get(handlers::board))
        .route("/charts/:canvas", get(handlers::chart))
        .route("/period", post(handlers::set_period))
        .route("/visibility", post(handlers::set_visibility))
        .route("/details/:metric", post(handlers::show_details))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server host/port")?;
    tracing::info!("Starting enviro-dashboard on {}, backend {}", addr, config.backend.base_url);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
