//! Shared domain and API types.

pub mod api;
pub mod profile;

pub use api::{
    CallbackQuery, ConfigResponse, FanScoreResponse, HealthResponse, LoginQuery, ScoreQuery,
    ServerInfo,
};
pub use profile::{ListeningProfile, TopArtist, TrackEntry};
