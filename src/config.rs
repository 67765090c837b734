use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use std::net::SocketAddr;

/// Application configuration loaded from environment variables.
///
/// All settings can be configured via environment variables with the
/// `FANSCORE_` prefix. For example: `FANSCORE_SERVER__PORT=8080`,
/// `FANSCORE_STREAMING__CLIENT_ID=abc123`
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Streaming provider (OAuth + data API) configuration
    #[serde(default)]
    pub streaming: StreamingConfig,

    /// Text-generation provider configuration
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Session lifetime in seconds
    #[serde(default = "default_session_ttl_s")]
    pub session_ttl_s: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            session_ttl_s: default_session_ttl_s(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_session_ttl_s() -> u64 {
    3600
}

impl ServerConfig {
    /// Returns the socket address for binding the server
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConfigError::Message(format!("Invalid socket address: {e}")))
    }
}

/// Streaming provider configuration (Spotify-compatible Web API)
#[derive(Debug, Clone, Deserialize)]
pub struct StreamingConfig {
    /// OAuth client ID
    #[serde(default)]
    pub client_id: String,

    /// OAuth client secret
    #[serde(default)]
    pub client_secret: String,

    /// Redirect URI registered with the provider
    #[serde(default)]
    pub redirect_uri: String,

    /// OAuth scopes requested during login
    #[serde(default = "default_scopes")]
    pub scopes: String,

    /// Authorization endpoint
    #[serde(default = "default_auth_url")]
    pub auth_url: String,

    /// Token exchange endpoint
    #[serde(default = "default_token_url")]
    pub token_url: String,

    /// Data API base URL
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            redirect_uri: String::new(),
            scopes: default_scopes(),
            auth_url: default_auth_url(),
            token_url: default_token_url(),
            api_base: default_api_base(),
        }
    }
}

fn default_scopes() -> String {
    "user-top-read user-follow-read playlist-read-private".to_string()
}

fn default_auth_url() -> String {
    "https://accounts.spotify.com/authorize".to_string()
}

fn default_token_url() -> String {
    "https://accounts.spotify.com/api/token".to_string()
}

fn default_api_base() -> String {
    "https://api.spotify.com/v1".to_string()
}

/// Text-generation provider configuration (chat-completions style API)
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Chat completions endpoint
    #[serde(default = "default_analysis_url")]
    pub api_url: String,

    /// API key sent as a bearer token
    #[serde(default)]
    pub api_key: String,

    /// Model identifier
    #[serde(default = "default_analysis_model")]
    pub model: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Completion token budget
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Request timeout in seconds; a timed-out call fails the scoring request
    #[serde(default = "default_analysis_timeout_s")]
    pub timeout_s: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            api_url: default_analysis_url(),
            api_key: String::new(),
            model: default_analysis_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_s: default_analysis_timeout_s(),
        }
    }
}

fn default_analysis_url() -> String {
    "https://api.mistral.ai/v1/chat/completions".to_string()
}

fn default_analysis_model() -> String {
    "mistral-large-latest".to_string()
}

fn default_temperature() -> f64 {
    0.7
}

fn default_max_tokens() -> u32 {
    150
}

fn default_analysis_timeout_s() -> u64 {
    30
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables should be prefixed with `FANSCORE_` and use
    /// double underscores for nested values:
    /// - `FANSCORE_SERVER__PORT` -> server.port
    /// - `FANSCORE_STREAMING__CLIENT_ID` -> streaming.client_id
    /// - `FANSCORE_ANALYSIS__API_KEY` -> analysis.api_key
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("FANSCORE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
