//! HTTP JSON API and static file serving

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use eyre::{Context, Result};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

mod error;
mod handlers;
mod legacy;
pub mod models;
mod registry;

pub use error::ApiError;
pub use registry::SessionRegistry;

use crate::config::ServerConfig;
use crate::orchestrator::Generator;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub generator: Generator,
    pub registry: Arc<SessionRegistry>,
}

impl AppState {
    pub fn new(generator: Generator, config: &ServerConfig) -> Self {
        Self {
            generator,
            registry: Arc::new(SessionRegistry::from_config(config)),
        }
    }
}

/// Build the router; anything that is not an API route is served from `static_dir`
pub fn router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        // Stateless routes
        .route("/api/generate-account-plan", post(legacy::generate_account_plan))
        .route("/api/coaching-chat", post(legacy::coaching_chat))
        .route("/api/coaching-feedback", post(legacy::coaching_feedback))
        .route("/api/competitor-battlecards", post(legacy::competitor_battlecards))
        .route("/api/analyst-report", post(legacy::analyst_report))
        .route("/api/sales-analyst-chat", post(legacy::sales_analyst_chat))
        .route("/api/competitor-analyst-chat", post(legacy::competitor_analyst_chat))
        .route("/api/company-analyst-chat", post(legacy::company_analyst_chat))
        // Sessions
        .route("/api/sessions", post(handlers::create_session))
        .route(
            "/api/sessions/:id",
            get(handlers::get_session).delete(handlers::delete_session),
        )
        .route("/api/sessions/:id/plan", post(handlers::regenerate_plan))
        .route("/api/sessions/:id/battlecards", post(handlers::battlecards))
        .route("/api/sessions/:id/analyst-report", post(handlers::analyst_report))
        .route("/api/sessions/:id/coaching", post(handlers::coaching_turn))
        .route("/api/sessions/:id/coaching/feedback", post(handlers::coaching_feedback))
        .route("/api/sessions/:id/advisors/:variant", post(handlers::advisor_turn))
        .fallback_service(ServeDir::new(static_dir))
        .layer(
            ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            ),
        )
        .with_state(state)
}

/// Bind and serve until Ctrl-C
pub async fn serve(config: &ServerConfig, state: AppState) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context(format!("Invalid listen address {}:{}", config.host, config.port))?;
    let app = router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context(format!("Failed to bind {}", addr))?;
    info!(%addr, static_dir = %config.static_dir.display(), "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
