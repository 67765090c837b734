//! HTTP server setup and routing.

mod auth;
mod routes;
mod score;

use axum::{routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::providers::{AuthProvider, MistralClient, SpotifyClient, StreamingProvider, TextGenProvider};
use crate::score::WeightTable;
use crate::session::SessionStore;

/// Shared application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub auth: Arc<dyn AuthProvider>,
    pub streaming: Arc<dyn StreamingProvider>,
    pub textgen: Arc<dyn TextGenProvider>,
    pub sessions: SessionStore,
    pub weights: Arc<WeightTable>,
}

impl AppState {
    /// Build state with the real provider clients
    pub fn new(config: AppConfig) -> Self {
        let spotify = Arc::new(SpotifyClient::new(config.streaming.clone()));
        let mistral = Arc::new(MistralClient::new(config.analysis.clone()));
        let sessions = SessionStore::new(Duration::from_secs(config.server.session_ttl_s));

        Self {
            config: Arc::new(config),
            auth: spotify.clone(),
            streaming: spotify,
            textgen: mistral,
            sessions,
            weights: Arc::new(WeightTable::default()),
        }
    }

    /// Build state with injected providers, for tests
    pub fn with_providers(
        config: AppConfig,
        auth: Arc<dyn AuthProvider>,
        streaming: Arc<dyn StreamingProvider>,
        textgen: Arc<dyn TextGenProvider>,
    ) -> Self {
        let sessions = SessionStore::new(Duration::from_secs(config.server.session_ttl_s));

        Self {
            config: Arc::new(config),
            auth,
            streaming,
            textgen,
            sessions,
            weights: Arc::new(WeightTable::default()),
        }
    }
}

/// Creates the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/config", get(routes::config))
        .route("/login", get(auth::login))
        .route("/callback", get(auth::callback))
        .route("/fan-score", get(score::fan_score))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
