//! Provider adapters: the only boundary the scoring core depends on.
//!
//! Three collaborator contracts: an auth provider (access token for a code),
//! a streaming provider (listening data for a token), and a text-generation
//! provider (free-text assessment for a prompt). HTTP transport, auth
//! headers, and pagination cursors are adapter implementation detail.

mod mistral;
mod spotify;

pub use mistral::MistralClient;
pub use spotify::SpotifyClient;

use async_trait::async_trait;

use crate::types::ListeningProfile;

/// Error type for provider operations
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("token exchange failed: {0}")]
    TokenExchange(String),

    #[error("unexpected provider payload: {0}")]
    Payload(String),
}

/// OAuth collaborator: delivers an access token given an authorization code.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// URL to send the user to for authorization; `state` is carried through
    /// the round-trip unchanged.
    fn authorize_url(&self, state: &str) -> String;

    /// Exchange an authorization code for a bearer access token
    async fn exchange_code(&self, code: &str) -> Result<String, ProviderError>;
}

/// Streaming data collaborator: listening history, follows, playlists.
#[async_trait]
pub trait StreamingProvider: Send + Sync {
    /// Resolve the artist query and assemble the full listening profile.
    ///
    /// Returns `None` when the query resolves to zero artists.
    async fn fetch_listening_profile(
        &self,
        access_token: &str,
        artist_query: &str,
    ) -> Result<Option<ListeningProfile>, ProviderError>;

    /// The target artist's own top-track IDs, for the overlap factor
    async fn artist_top_tracks(
        &self,
        access_token: &str,
        artist_id: &str,
    ) -> Result<Vec<String>, ProviderError>;
}

/// Text-generation collaborator: free-text assessment for a prompt.
///
/// A non-success response is fatal for the whole scoring request; an
/// unparseable but successful response is handled by the qualitative parser.
#[async_trait]
pub trait TextGenProvider: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError>;
}
