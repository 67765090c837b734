//! Request and response types for the HTTP API.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Non-secret configuration echo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigResponse {
    pub server: ServerInfo,
    /// Streaming data API base URL
    pub streaming_api: String,
    /// Text-generation model in use
    pub analysis_model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerInfo {
    pub host: String,
    pub port: u16,
}

/// Query parameters for `GET /login`
#[derive(Debug, Clone, Deserialize)]
pub struct LoginQuery {
    pub artist_name: String,
}

/// Query parameters for `GET /callback`
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub code: String,
    /// Artist name carried through the OAuth round-trip
    pub state: String,
}

/// Query parameters for `GET /fan-score`
#[derive(Debug, Clone, Deserialize)]
pub struct ScoreQuery {
    pub artist_name: String,
}

/// Fan score response.
///
/// All values are percentages in [0, 100]. The qualitative score is surfaced
/// separately from the algorithmic factors so callers can audit the
/// language-model contribution on its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FanScoreResponse {
    pub artist_name: String,
    /// Final weighted percentage across all seven factors
    pub fan_score: f64,
    /// Raw qualitative sub-score as a percentage
    pub qualitative_score: f64,
    /// Per-factor percentages for the six algorithmic factors
    pub factors: BTreeMap<String, f64>,
}
