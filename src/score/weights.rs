//! Scoring factors and their weight table.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A scoring factor contributing to the final fan score.
///
/// Six factors are computed deterministically from the listening profile;
/// `QualitativeAnalysis` is supplied by the text-generation provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    TopArtistRank,
    TopTracks,
    FollowsArtist,
    SongsInPlaylists,
    OverlappingTracks,
    SimilarGenres,
    QualitativeAnalysis,
}

impl Factor {
    /// All factors, in weight-table order
    pub const ALL: [Factor; 7] = [
        Factor::TopArtistRank,
        Factor::TopTracks,
        Factor::FollowsArtist,
        Factor::SongsInPlaylists,
        Factor::OverlappingTracks,
        Factor::SimilarGenres,
        Factor::QualitativeAnalysis,
    ];

    /// The six deterministic factors (everything except the qualitative one)
    pub const ALGORITHMIC: [Factor; 6] = [
        Factor::TopArtistRank,
        Factor::TopTracks,
        Factor::FollowsArtist,
        Factor::SongsInPlaylists,
        Factor::OverlappingTracks,
        Factor::SimilarGenres,
    ];

    /// Stable snake_case key for serialization and display
    pub fn as_str(&self) -> &'static str {
        match self {
            Factor::TopArtistRank => "top_artist_rank",
            Factor::TopTracks => "top_tracks",
            Factor::FollowsArtist => "follows_artist",
            Factor::SongsInPlaylists => "songs_in_playlists",
            Factor::OverlappingTracks => "overlapping_tracks",
            Factor::SimilarGenres => "similar_genres",
            Factor::QualitativeAnalysis => "qualitative_analysis",
        }
    }
}

impl std::fmt::Display for Factor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weight table mapping each factor to a positive weight.
///
/// Weights are always renormalized by their sum before use, so the formula
/// stays correct even if the table is edited without re-summing to 1.
#[derive(Debug, Clone)]
pub struct WeightTable {
    weights: HashMap<Factor, f64>,
}

impl Default for WeightTable {
    fn default() -> Self {
        let weights = HashMap::from([
            (Factor::TopArtistRank, 0.20),
            (Factor::TopTracks, 0.15),
            (Factor::FollowsArtist, 0.15),
            (Factor::SongsInPlaylists, 0.10),
            (Factor::OverlappingTracks, 0.10),
            (Factor::SimilarGenres, 0.10),
            (Factor::QualitativeAnalysis, 0.20),
        ]);
        Self { weights }
    }
}

impl WeightTable {
    /// Build a table from raw weights; missing factors weigh zero
    pub fn from_weights(weights: HashMap<Factor, f64>) -> Self {
        Self { weights }
    }

    /// Raw weight for a factor
    pub fn get(&self, factor: Factor) -> f64 {
        self.weights.get(&factor).copied().unwrap_or(0.0)
    }

    /// Weights divided by their sum, guaranteed to total 1.
    ///
    /// Returns an all-zero map if the table sums to zero.
    pub fn normalized(&self) -> HashMap<Factor, f64> {
        let total: f64 = Factor::ALL.iter().map(|f| self.get(*f)).sum();
        Factor::ALL
            .iter()
            .map(|f| {
                let w = if total > 0.0 { self.get(*f) / total } else { 0.0 };
                (*f, w)
            })
            .collect()
    }
}
