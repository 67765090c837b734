//! Service-level route handlers.

use axum::{extract::State, response::Json};

use crate::types::{ConfigResponse, HealthResponse, ServerInfo};

use super::AppState;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Health check endpoint
///
/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: VERSION.to_string(),
    })
}

/// Non-secret configuration echo
///
/// GET /config
pub async fn config(State(state): State<AppState>) -> Json<ConfigResponse> {
    let config = &state.config;

    Json(ConfigResponse {
        server: ServerInfo {
            host: config.server.host.clone(),
            port: config.server.port,
        },
        streaming_api: config.streaming.api_base.clone(),
        analysis_model: config.analysis.model.clone(),
    })
}
