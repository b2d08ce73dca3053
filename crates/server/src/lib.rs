//! # salescast-server
//!
//! REST API serving linear-trend forecasts over posted sequences and
//! document collections.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use data_facade::{DocumentStore, JsonLinesStore};
use forecast_facade::{Forecaster, LinearTrendForecaster};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod routes;

pub use config::{ConfigError, ServerConfig};
pub use error::{ApiError, ServerError};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub forecaster: Arc<dyn Forecaster>,
    /// Value field used when a request does not name one
    pub value_field: String,
    /// Timestamp field used when a request does not name one
    pub timestamp_field: Option<String>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        value_field: &str,
        timestamp_field: Option<&str>,
    ) -> Self {
        Self {
            store,
            forecaster: Arc::new(LinearTrendForecaster::new()),
            value_field: value_field.to_string(),
            timestamp_field: timestamp_field.map(str::to_string),
        }
    }

    /// State for a server configuration over the given store.
    pub fn from_config(store: Arc<dyn DocumentStore>, config: &ServerConfig) -> Self {
        Self::new(
            store,
            &config.value_field,
            config.timestamp_field.as_deref(),
        )
    }
}

/// Liveness check - is the server running?
async fn liveness() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness check - can the document store be listed?
async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    match state.store.collections() {
        Ok(collections) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "status": "ready",
                "version": env!("CARGO_PKG_VERSION"),
                "store": state.store.name(),
                "collections": collections,
            })),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "document store unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({
                    "status": "unavailable",
                    "version": env!("CARGO_PKG_VERSION"),
                    "store": state.store.name(),
                    "error": e.to_string(),
                })),
            )
        }
    }
}

/// Build the application router with middleware
pub fn build_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health endpoints (Kubernetes-compatible)
        .route("/health/live", get(liveness))
        .route("/health/ready", get(readiness))
        .route("/health", get(liveness))
        // API endpoints
        .route("/api/v1/predict", post(routes::predict))
        .route("/api/v1/collections", get(routes::collections))
        .route(
            "/api/v1/collections/:collection/predict",
            get(routes::predict_collection),
        )
        // Middleware layers
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Bind `config`'s address and serve the JSON-lines store under `data_dir`
/// until the listener fails.
pub async fn serve(config: ServerConfig) -> Result<(), ServerError> {
    let addr = config.socket_addr()?;
    let store = Arc::new(JsonLinesStore::new(&config.data_dir));
    let app = build_router(AppState::from_config(store, &config));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        "salescast-server v{} listening on {} (data dir {})",
        env!("CARGO_PKG_VERSION"),
        listener.local_addr()?,
        config.data_dir.display()
    );
    axum::serve(listener, app).await?;
    Ok(())
}
