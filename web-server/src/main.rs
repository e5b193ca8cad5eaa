//! HEWS Web Server
//!
//! Single-page front end for the Hybrid Early Warning System.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      HEWS SERVER                         │
//! ├──────────────────────────────────────────────────────────┤
//! │  GET  /                 form + JSON viewer               │
//! │  GET  /api/v1/options   dropdown choices                 │
//! │  POST /api/v1/predict   ──► spawn_blocking(respond)      │
//! │  GET  /health                       │                    │
//! │                                     ▼                    │
//! │                       ┌───────────────────────────┐      │
//! │                       │ HewsContext (Arc, RO)     │      │
//! │                       │  preprocessor + 2× ONNX   │      │
//! │                       └───────────────────────────┘      │
//! └──────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use hews_core::HewsContext;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Initialize logging (also captures `log` records from hews_core)
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "hews_server=debug,hews_core=info,tower_http=debug".into());
    if config.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("HEWS server starting ({})...", config.environment);
    tracing::info!("Model artifact: {}", config.model_path.display());

    // Load models once; they are read-only from here on
    let ctx = HewsContext::from_artifact(&config.model_path)
        .with_context(|| format!("Failed to load model artifact {}", config.model_path.display()))?;

    let state = AppState {
        ctx: Arc::new(ctx),
        config: config.clone(),
    };

    let app = create_router(state);

    let addr = config.socket_addr();
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub ctx: Arc<HewsContext>,
    pub config: config::Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/", get(handlers::page::index))
        .route("/health", get(handlers::health::check))
        .route("/api/v1/options", get(handlers::options::list))
        .route("/api/v1/predict", post(handlers::predict::predict))
        .fallback(not_found)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http());

    if !state.config.is_production() {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    router.with_state(state)
}

async fn not_found(uri: axum::http::Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}
