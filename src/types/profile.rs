//! Listening profile snapshot used as scoring input.

use std::collections::HashSet;

/// An artist entry from the user's top-artists ranking, ordered by
/// provider-defined relevance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopArtist {
    pub id: String,
    pub name: String,
    pub genres: Vec<String>,
}

/// A track reference with the IDs of all credited artists.
///
/// Used both for the user's top-tracks ranking and for playlist contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackEntry {
    pub id: String,
    pub name: String,
    pub artist_ids: Vec<String>,
}

impl TrackEntry {
    /// Whether the given artist is credited on this track
    pub fn credits_artist(&self, artist_id: &str) -> bool {
        self.artist_ids.iter().any(|id| id == artist_id)
    }
}

/// Immutable snapshot of a user's streaming activity against a target artist.
///
/// Built once per scoring request by the streaming provider adapter and never
/// mutated afterward; discarded once the response is produced.
#[derive(Debug, Clone)]
pub struct ListeningProfile {
    /// Canonical ID of the target artist
    pub artist_id: String,
    /// Display name of the target artist
    pub artist_name: String,
    /// Genres attributed to the target artist
    pub artist_genres: HashSet<String>,
    /// User's top artists, most relevant first
    pub top_artists: Vec<TopArtist>,
    /// User's top tracks, most relevant first
    pub top_tracks: Vec<TrackEntry>,
    /// Whether the user follows the target artist
    pub follows_artist: bool,
    /// Tracks collected from the user's playlists (not deduplicated)
    pub playlist_tracks: Vec<TrackEntry>,
    /// Union of all top-artist genres, derived at construction
    user_genres: HashSet<String>,
}

impl ListeningProfile {
    pub fn new(
        artist_id: String,
        artist_name: String,
        artist_genres: HashSet<String>,
        top_artists: Vec<TopArtist>,
        top_tracks: Vec<TrackEntry>,
        follows_artist: bool,
        playlist_tracks: Vec<TrackEntry>,
    ) -> Self {
        let user_genres = top_artists
            .iter()
            .flat_map(|artist| artist.genres.iter().cloned())
            .collect();

        Self {
            artist_id,
            artist_name,
            artist_genres,
            top_artists,
            top_tracks,
            follows_artist,
            playlist_tracks,
            user_genres,
        }
    }

    /// The user's aggregated genre set (union of all top-artist genres)
    pub fn user_genres(&self) -> &HashSet<String> {
        &self.user_genres
    }
}
