//! Feature extraction: deterministic sub-scores from a listening profile.
//!
//! Each extractor maps raw provider records to a score in [0, 1]. Every
//! branch has an explicit zero-division guard; no score is ever undefined.

use std::collections::{HashMap, HashSet};

use crate::score::weights::Factor;
use crate::types::ListeningProfile;

/// Only the first N top artists count toward the rank factor
pub const TOP_ARTIST_WINDOW: usize = 5;

/// Only the first N top tracks are considered for track-based factors
pub const TOP_TRACK_WINDOW: usize = 10;

/// Playlist factor saturates at this many matching tracks
pub const PLAYLIST_SATURATION: usize = 20;

/// Overlap factor saturates at this many shared tracks
pub const OVERLAP_SATURATION: usize = 10;

/// How many artist and track names go into the qualitative prompt
pub const PROMPT_ITEMS: usize = 5;

/// Rank of the target artist within the user's top artists.
///
/// Rank r in 1..=5 scores (6 - r) / 5; absent from the window scores 0.
/// Duplicate IDs are not deduplicated, first occurrence wins.
pub fn top_artist_rank_score(profile: &ListeningProfile) -> f64 {
    profile
        .top_artists
        .iter()
        .take(TOP_ARTIST_WINDOW)
        .position(|artist| artist.id == profile.artist_id)
        .map(|index| (TOP_ARTIST_WINDOW - index) as f64 / TOP_ARTIST_WINDOW as f64)
        .unwrap_or(0.0)
}

/// Share of the user's first ten top tracks crediting the target artist
pub fn top_tracks_score(profile: &ListeningProfile) -> f64 {
    let window: Vec<_> = profile.top_tracks.iter().take(TOP_TRACK_WINDOW).collect();
    if window.is_empty() {
        return 0.0;
    }

    let matching = window
        .iter()
        .filter(|track| track.credits_artist(&profile.artist_id))
        .count();
    matching as f64 / window.len() as f64
}

/// 1 if the user follows the target artist, else 0
pub fn follows_artist_score(profile: &ListeningProfile) -> f64 {
    if profile.follows_artist {
        1.0
    } else {
        0.0
    }
}

/// Playlist presence: linear ramp saturating at 20 matching tracks.
///
/// Playlist tracks are counted as collected, without deduplication.
pub fn songs_in_playlists_score(profile: &ListeningProfile) -> f64 {
    let matching = profile
        .playlist_tracks
        .iter()
        .filter(|track| track.credits_artist(&profile.artist_id))
        .count();
    (matching as f64 / PLAYLIST_SATURATION as f64).min(1.0)
}

/// Overlap between the user's first ten top tracks and the artist's own
/// top tracks, capped at 10 shared tracks.
pub fn overlapping_tracks_score(profile: &ListeningProfile, artist_top_track_ids: &[String]) -> f64 {
    let user_ids: HashSet<&str> = profile
        .top_tracks
        .iter()
        .take(TOP_TRACK_WINDOW)
        .map(|track| track.id.as_str())
        .collect();
    let artist_ids: HashSet<&str> = artist_top_track_ids.iter().map(String::as_str).collect();

    let overlap = user_ids.intersection(&artist_ids).count();
    (overlap as f64 / OVERLAP_SATURATION as f64).min(1.0)
}

/// 1 if the user's aggregated genre set intersects the artist's genres
pub fn similar_genres_score(profile: &ListeningProfile) -> f64 {
    let shares_genre = profile
        .user_genres()
        .iter()
        .any(|genre| profile.artist_genres.contains(genre));
    if shares_genre {
        1.0
    } else {
        0.0
    }
}

/// Compute all six algorithmic sub-scores for a profile.
///
/// `artist_top_track_ids` is the target artist's own top-track listing,
/// fetched independently by the streaming provider.
pub fn algorithmic_scores(
    profile: &ListeningProfile,
    artist_top_track_ids: &[String],
) -> HashMap<Factor, f64> {
    HashMap::from([
        (Factor::TopArtistRank, top_artist_rank_score(profile)),
        (Factor::TopTracks, top_tracks_score(profile)),
        (Factor::FollowsArtist, follows_artist_score(profile)),
        (Factor::SongsInPlaylists, songs_in_playlists_score(profile)),
        (
            Factor::OverlappingTracks,
            overlapping_tracks_score(profile, artist_top_track_ids),
        ),
        (Factor::SimilarGenres, similar_genres_score(profile)),
    ])
}

/// Prompt context for the qualitative assessment: the slices of the profile
/// shown to the text-generation provider.
#[derive(Debug, Clone)]
pub struct PromptContext {
    /// Names of the user's top five artists
    pub top_artists: Vec<String>,
    /// Names of the user's top five tracks
    pub top_tracks: Vec<String>,
    /// Genres attributed to the target artist
    pub artist_genres: Vec<String>,
}

impl PromptContext {
    pub fn from_profile(profile: &ListeningProfile) -> Self {
        let mut artist_genres: Vec<String> = profile.artist_genres.iter().cloned().collect();
        artist_genres.sort();

        Self {
            top_artists: profile
                .top_artists
                .iter()
                .take(PROMPT_ITEMS)
                .map(|artist| artist.name.clone())
                .collect(),
            top_tracks: profile
                .top_tracks
                .iter()
                .take(PROMPT_ITEMS)
                .map(|track| track.name.clone())
                .collect(),
            artist_genres,
        }
    }
}
