//! Spotify Web API adapter: OAuth token exchange and listening data.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashSet;
use tracing::debug;

use super::{AuthProvider, ProviderError, StreamingProvider};
use crate::config::StreamingConfig;
use crate::types::{ListeningProfile, TopArtist, TrackEntry};

/// At most this many playlists are scanned for the playlist factor.
///
/// This cap affects scoring and must stay aligned with the scoring core.
const PLAYLIST_CAP: usize = 30;

/// Page size for the user's playlist listing
const PLAYLIST_PAGE_SIZE: usize = 20;

/// Page size for per-playlist track listings
const PLAYLIST_TRACKS_PAGE_SIZE: usize = 100;

/// How many top artists and top tracks to request
const TOP_ITEMS_LIMIT: usize = 50;

pub struct SpotifyClient {
    http: Client,
    config: StreamingConfig,
}

impl SpotifyClient {
    pub fn new(config: StreamingConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        access_token: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ProviderError> {
        let response = self
            .http
            .get(url)
            .bearer_auth(access_token)
            .query(query)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }

    /// Resolve the artist query to the single best match, if any
    async fn search_artist(
        &self,
        access_token: &str,
        artist_query: &str,
    ) -> Result<Option<ArtistItem>, ProviderError> {
        let url = format!("{}/search", self.config.api_base);
        let response: SearchResponse = self
            .get_json(
                &url,
                access_token,
                &[("q", artist_query), ("type", "artist"), ("limit", "1")],
            )
            .await?;

        Ok(response
            .artists
            .map(|page| page.items)
            .unwrap_or_default()
            .into_iter()
            .next())
    }

    /// Collect the user's playlists, following pagination cursors until the
    /// provider signals no more pages or the playlist cap is hit.
    async fn fetch_playlists(&self, access_token: &str) -> Result<Vec<PlaylistItem>, ProviderError> {
        let mut playlists = Vec::new();
        let mut next_url = Some(format!(
            "{}/me/playlists?limit={PLAYLIST_PAGE_SIZE}",
            self.config.api_base
        ));

        while let Some(url) = next_url {
            let page: PlaylistPage = self.get_json(&url, access_token, &[]).await?;
            playlists.extend(page.items);
            if playlists.len() >= PLAYLIST_CAP {
                playlists.truncate(PLAYLIST_CAP);
                break;
            }
            next_url = page.next;
        }

        Ok(playlists)
    }

    /// Collect every track of a playlist, following pagination cursors
    async fn fetch_playlist_tracks(
        &self,
        access_token: &str,
        playlist_id: &str,
    ) -> Result<Vec<TrackEntry>, ProviderError> {
        let mut tracks = Vec::new();
        let mut next_url = Some(format!(
            "{}/playlists/{playlist_id}/tracks?limit={PLAYLIST_TRACKS_PAGE_SIZE}",
            self.config.api_base
        ));

        while let Some(url) = next_url {
            let page: PlaylistTracksPage = self.get_json(&url, access_token, &[]).await?;
            tracks.extend(
                page.items
                    .into_iter()
                    .filter_map(|item| item.track)
                    .filter_map(track_entry),
            );
            next_url = page.next;
        }

        Ok(tracks)
    }
}

#[async_trait]
impl AuthProvider for SpotifyClient {
    fn authorize_url(&self, state: &str) -> String {
        format!(
            "{}?client_id={}&response_type=code&redirect_uri={}&scope={}&state={}",
            self.config.auth_url,
            urlencoding::encode(&self.config.client_id),
            urlencoding::encode(&self.config.redirect_uri),
            urlencoding::encode(&self.config.scopes),
            urlencoding::encode(state),
        )
    }

    async fn exchange_code(&self, code: &str) -> Result<String, ProviderError> {
        let response = self
            .http
            .post(&self.config.token_url)
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.config.redirect_uri.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let token: TokenResponse = response.json().await?;
        token
            .access_token
            .ok_or_else(|| ProviderError::TokenExchange("no access token in response".to_string()))
    }
}

#[async_trait]
impl StreamingProvider for SpotifyClient {
    async fn fetch_listening_profile(
        &self,
        access_token: &str,
        artist_query: &str,
    ) -> Result<Option<ListeningProfile>, ProviderError> {
        let Some(artist) = self.search_artist(access_token, artist_query).await? else {
            return Ok(None);
        };
        debug!(artist_id = %artist.id, artist_name = %artist.name, "resolved artist query");

        let limit = TOP_ITEMS_LIMIT.to_string();
        let top_artists: TopArtistsResponse = self
            .get_json(
                &format!("{}/me/top/artists", self.config.api_base),
                access_token,
                &[("limit", limit.as_str())],
            )
            .await?;

        let top_tracks: TopTracksResponse = self
            .get_json(
                &format!("{}/me/top/tracks", self.config.api_base),
                access_token,
                &[("limit", limit.as_str())],
            )
            .await?;

        let follows: Vec<bool> = self
            .get_json(
                &format!("{}/me/following/contains", self.config.api_base),
                access_token,
                &[("type", "artist"), ("ids", artist.id.as_str())],
            )
            .await?;
        let follows_artist = follows.first().copied().unwrap_or(false);

        let playlists = self.fetch_playlists(access_token).await?;
        debug!(playlist_count = playlists.len(), "collected playlists");

        let mut playlist_tracks = Vec::new();
        for playlist in &playlists {
            playlist_tracks
                .extend(self.fetch_playlist_tracks(access_token, &playlist.id).await?);
        }

        Ok(Some(ListeningProfile::new(
            artist.id,
            artist.name,
            artist.genres.into_iter().collect::<HashSet<_>>(),
            top_artists
                .items
                .into_iter()
                .map(|item| TopArtist {
                    id: item.id,
                    name: item.name,
                    genres: item.genres,
                })
                .collect(),
            top_tracks.items.into_iter().filter_map(track_entry).collect(),
            follows_artist,
            playlist_tracks,
        )))
    }

    async fn artist_top_tracks(
        &self,
        access_token: &str,
        artist_id: &str,
    ) -> Result<Vec<String>, ProviderError> {
        let url = format!("{}/artists/{artist_id}/top-tracks", self.config.api_base);
        let response: ArtistTopTracksResponse = self
            .get_json(&url, access_token, &[("market", "from_token")])
            .await?;

        Ok(response
            .tracks
            .into_iter()
            .filter_map(|track| track.id)
            .collect())
    }
}

/// Convert a wire track into a domain entry; tracks without an ID (local
/// files, removed content) are skipped.
fn track_entry(item: TrackItem) -> Option<TrackEntry> {
    let id = item.id?;
    Some(TrackEntry {
        id,
        name: item.name,
        artist_ids: item.artists.into_iter().filter_map(|a| a.id).collect(),
    })
}

// Wire types

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    artists: Option<ArtistPage>,
}

#[derive(Debug, Deserialize)]
struct ArtistPage {
    #[serde(default)]
    items: Vec<ArtistItem>,
}

#[derive(Debug, Deserialize)]
struct ArtistItem {
    id: String,
    name: String,
    #[serde(default)]
    genres: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TopArtistsResponse {
    #[serde(default)]
    items: Vec<ArtistItem>,
}

#[derive(Debug, Deserialize)]
struct TopTracksResponse {
    #[serde(default)]
    items: Vec<TrackItem>,
}

#[derive(Debug, Deserialize)]
struct TrackItem {
    id: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    artists: Vec<TrackArtistRef>,
}

#[derive(Debug, Deserialize)]
struct TrackArtistRef {
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaylistPage {
    #[serde(default)]
    items: Vec<PlaylistItem>,
    next: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaylistItem {
    id: String,
}

#[derive(Debug, Deserialize)]
struct PlaylistTracksPage {
    #[serde(default)]
    items: Vec<PlaylistTrackItem>,
    next: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaylistTrackItem {
    track: Option<TrackItem>,
}

#[derive(Debug, Deserialize)]
struct ArtistTopTracksResponse {
    #[serde(default)]
    tracks: Vec<TrackItem>,
}
