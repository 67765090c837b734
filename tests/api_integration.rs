//! Integration tests for the scoring API.
//!
//! Providers are replaced with in-process mocks so the full OAuth-to-score
//! flow can be exercised without network access.

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::{TestServer, TestServerConfig};
use std::collections::HashSet;
use std::sync::Arc;

use fanscore::config::AppConfig;
use fanscore::providers::{AuthProvider, ProviderError, StreamingProvider, TextGenProvider};
use fanscore::server::{create_router, AppState};
use fanscore::types::{FanScoreResponse, ListeningProfile, TopArtist, TrackEntry};

struct MockAuth;

#[async_trait]
impl AuthProvider for MockAuth {
    fn authorize_url(&self, state: &str) -> String {
        format!(
            "https://auth.example/authorize?state={}",
            urlencoding::encode(state)
        )
    }

    async fn exchange_code(&self, code: &str) -> Result<String, ProviderError> {
        if code == "good-code" {
            Ok("token-123".to_string())
        } else {
            Err(ProviderError::TokenExchange("invalid code".to_string()))
        }
    }
}

/// Serves the reference listening profile: target artist at rank 4 of the
/// top artists, 3 of 10 top tracks credited, followed, 8 playlist matches,
/// overlap of 5, one shared genre.
struct MockStreaming;

const TARGET: &str = "artist_d";

fn reference_profile() -> ListeningProfile {
    let top_artists = ["artist_a", "artist_b", "artist_c", TARGET, "artist_e", "artist_f"]
        .iter()
        .enumerate()
        .map(|(i, id)| TopArtist {
            id: id.to_string(),
            name: format!("Artist {i}"),
            genres: if i == 0 {
                vec!["electronic".to_string()]
            } else {
                vec![]
            },
        })
        .collect();

    let top_tracks = (0..10)
        .map(|i| TrackEntry {
            id: format!("t{i}"),
            name: format!("Track {i}"),
            artist_ids: if i < 3 {
                vec![TARGET.to_string()]
            } else {
                vec!["artist_a".to_string()]
            },
        })
        .collect();

    let playlist_tracks = (0..8)
        .map(|i| TrackEntry {
            id: format!("p{i}"),
            name: format!("Playlist Track {i}"),
            artist_ids: vec![TARGET.to_string()],
        })
        .collect();

    ListeningProfile::new(
        TARGET.to_string(),
        "The Target".to_string(),
        HashSet::from(["electronic".to_string()]),
        top_artists,
        top_tracks,
        true,
        playlist_tracks,
    )
}

#[async_trait]
impl StreamingProvider for MockStreaming {
    async fn fetch_listening_profile(
        &self,
        access_token: &str,
        artist_query: &str,
    ) -> Result<Option<ListeningProfile>, ProviderError> {
        assert_eq!(access_token, "token-123");
        if artist_query == "Nobody" {
            return Ok(None);
        }
        Ok(Some(reference_profile()))
    }

    async fn artist_top_tracks(
        &self,
        _access_token: &str,
        artist_id: &str,
    ) -> Result<Vec<String>, ProviderError> {
        assert_eq!(artist_id, TARGET);
        // Shares 5 tracks with the user's top-10 window
        Ok((0..5).map(|i| format!("t{i}")).collect())
    }
}

struct MockTextGen {
    response: Result<String, ()>,
}

#[async_trait]
impl TextGenProvider for MockTextGen {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        assert!(prompt.contains("fan engagement score"));
        self.response
            .clone()
            .map_err(|()| ProviderError::Payload("completion failed".to_string()))
    }
}

fn create_test_server(textgen_response: Result<String, ()>) -> TestServer {
    let state = AppState::with_providers(
        AppConfig::default(),
        Arc::new(MockAuth),
        Arc::new(MockStreaming),
        Arc::new(MockTextGen {
            response: textgen_response,
        }),
    );
    let app = create_router(state);

    let config = TestServerConfig {
        save_cookies: true,
        ..TestServerConfig::default()
    };
    TestServer::new_with_config(app, config).unwrap()
}

/// Run the OAuth callback so the server's cookie jar holds a session
async fn establish_session(server: &TestServer) {
    let response = server
        .get("/callback")
        .add_query_param("code", "good-code")
        .add_query_param("state", "The Target")
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_health_endpoint() {
    let server = create_test_server(Ok("0.6".to_string()));

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body = response.text();
    assert!(body.contains("ok"));
    assert!(body.contains("version"));
}

#[tokio::test]
async fn test_config_endpoint() {
    let server = create_test_server(Ok("0.6".to_string()));

    let response = server.get("/config").await;

    response.assert_status_ok();
    let body = response.text();
    assert!(body.contains("streaming_api"));
    // Secrets never appear in the echo
    assert!(!body.contains("client_secret"));
    assert!(!body.contains("api_key"));
}

#[tokio::test]
async fn test_login_redirects_to_authorize_url() {
    let server = create_test_server(Ok("0.6".to_string()));

    let response = server
        .get("/login")
        .add_query_param("artist_name", "The Target")
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    let location = response
        .headers()
        .get("location")
        .expect("redirect location")
        .to_str()
        .unwrap()
        .to_string();
    assert!(location.starts_with("https://auth.example/authorize"));
    assert!(location.contains("state=The%20Target"));
}

#[tokio::test]
async fn test_callback_issues_session_and_redirects() {
    let server = create_test_server(Ok("0.6".to_string()));

    let response = server
        .get("/callback")
        .add_query_param("code", "good-code")
        .add_query_param("state", "The Target")
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    let location = response
        .headers()
        .get("location")
        .expect("redirect location")
        .to_str()
        .unwrap()
        .to_string();
    assert!(location.starts_with("/fan-score?artist_name=The%20Target"));
    assert!(response.headers().get("set-cookie").is_some());
}

#[tokio::test]
async fn test_callback_with_bad_code_fails() {
    let server = create_test_server(Ok("0.6".to_string()));

    let response = server
        .get("/callback")
        .add_query_param("code", "bad-code")
        .add_query_param("state", "The Target")
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_fan_score_without_session_is_unauthorized() {
    let server = create_test_server(Ok("0.6".to_string()));

    let response = server
        .get("/fan-score")
        .add_query_param("artist_name", "The Target")
        .await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn test_fan_score_reference_scenario() {
    let server = create_test_server(Ok(
        "I'd estimate a score of 0.6 given the alignment.".to_string()
    ));
    establish_session(&server).await;

    let response = server
        .get("/fan-score")
        .add_query_param("artist_name", "The Target")
        .await;

    response.assert_status_ok();
    let body: FanScoreResponse = response.json();

    assert_eq!(body.artist_name, "The Target");
    assert!((body.fan_score - 58.5).abs() < 1e-9);
    assert!((body.qualitative_score - 60.0).abs() < 1e-9);

    assert!((body.factors["top_artist_rank"] - 40.0).abs() < 1e-9);
    assert!((body.factors["top_tracks"] - 30.0).abs() < 1e-9);
    assert!((body.factors["follows_artist"] - 100.0).abs() < 1e-9);
    assert!((body.factors["songs_in_playlists"] - 40.0).abs() < 1e-9);
    assert!((body.factors["overlapping_tracks"] - 50.0).abs() < 1e-9);
    assert!((body.factors["similar_genres"] - 100.0).abs() < 1e-9);
    // The qualitative factor is surfaced separately, not in the factor map
    assert!(!body.factors.contains_key("qualitative_analysis"));
}

#[tokio::test]
async fn test_fan_score_unparseable_assessment_uses_neutral_fallback() {
    let server = create_test_server(Ok("A very enthusiastic listener indeed.".to_string()));
    establish_session(&server).await;

    let response = server
        .get("/fan-score")
        .add_query_param("artist_name", "The Target")
        .await;

    response.assert_status_ok();
    let body: FanScoreResponse = response.json();

    // Neutral 0.5 instead of 0.6 shifts the weighted sum by 0.1 * 0.20
    assert!((body.qualitative_score - 50.0).abs() < 1e-9);
    assert!((body.fan_score - 56.5).abs() < 1e-9);
}

#[tokio::test]
async fn test_fan_score_unknown_artist_is_not_found() {
    let server = create_test_server(Ok("0.6".to_string()));
    establish_session(&server).await;

    let response = server
        .get("/fan-score")
        .add_query_param("artist_name", "Nobody")
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_fan_score_textgen_failure_aborts_request() {
    let server = create_test_server(Err(()));
    establish_session(&server).await;

    let response = server
        .get("/fan-score")
        .add_query_param("artist_name", "The Target")
        .await;

    // No partial score: a collaborator failure fails the whole request
    response.assert_status(StatusCode::BAD_GATEWAY);
}
