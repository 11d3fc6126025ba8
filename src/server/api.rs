//! HTTP API server implementation
//!
//! The translate endpoint never surfaces a distinguishable error: provider
//! rejection, exhausted retries and unrecognized model identifiers all
//! answer `200` with a null translation.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::config::TranslatorConfig;
use crate::core::models::{TranslationRequest, TranslationResult};
use crate::core::router::TranslationRouter;

/// Application state
#[derive(Clone)]
pub struct AppState {
    /// Shared translation router
    router: Arc<TranslationRouter>,
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    service: String,
    version: String,
}

/// Query parameters for the translate endpoint. Absent parameters default
/// to empty strings rather than rejecting the request.
#[derive(Debug, Deserialize)]
pub struct TranslateQuery {
    /// Sentence to translate
    #[serde(default)]
    sentence: String,
    /// Source language name
    #[serde(default)]
    source: String,
    /// Destination language name
    #[serde(default)]
    destination: String,
    /// Provider/model identifier
    #[serde(default)]
    llm: String,
}

/// Health check handler
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Translate handler
async fn translate(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TranslateQuery>,
) -> Json<TranslationResult> {
    let request =
        TranslationRequest::new(query.sentence, query.source, query.destination, query.llm);
    Json(state.router.translate(&request).await)
}

/// Build the application router.
pub fn app(router: TranslationRouter) -> Router {
    let state = Arc::new(AppState {
        router: Arc::new(router),
    });

    Router::new()
        .route("/", get(health_check))
        .route("/translate", get(translate))
        .with_state(state)
}

/// Run the HTTP server.
pub async fn run_server(host: String, port: u16) -> anyhow::Result<()> {
    let config = TranslatorConfig::from_env();
    let app = app(TranslationRouter::new(&config));

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
