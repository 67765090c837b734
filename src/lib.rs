//! Fan Engagement Scoring Service
//!
//! Computes a fan engagement score for a user against a named artist by
//! combining signals from a music-streaming provider (listening history,
//! follows, playlists) with a qualitative assessment from a text-generation
//! provider, blended through a fixed weighted formula.

pub mod config;
pub mod error;
pub mod providers;
pub mod score;
pub mod server;
pub mod session;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, Result};
pub use score::{Factor, ScoreBreakdown, WeightTable};
pub use types::ListeningProfile;
