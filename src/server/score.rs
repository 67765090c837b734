//! Fan score endpoint: the full scoring pipeline for one request.

use axum::{
    extract::{Query, State},
    response::Json,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::info;
use uuid::Uuid;

use crate::error::AppError;
use crate::score::{self, Factor, PromptContext};
use crate::session::SESSION_COOKIE;
use crate::types::{FanScoreResponse, ScoreQuery};

use super::AppState;

/// Compute the fan score for the session user against the named artist.
///
/// Control flow: resolve session, fetch the listening profile and the
/// artist's own top tracks, extract the algorithmic sub-scores, request and
/// parse the qualitative assessment, aggregate. Any collaborator failure
/// aborts the whole request; there are no retries and no partial scores.
///
/// GET /fan-score?artist_name=
pub async fn fan_score(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<ScoreQuery>,
) -> Result<Json<FanScoreResponse>, AppError> {
    let session_id = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
        .ok_or_else(|| AppError::Unauthorized("no session; start at /login".to_string()))?;

    let access_token = state
        .sessions
        .access_token(session_id)
        .await
        .ok_or_else(|| AppError::Unauthorized("session expired; start at /login".to_string()))?;

    let profile = state
        .streaming
        .fetch_listening_profile(&access_token, &query.artist_name)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("artist not found: {}", query.artist_name)))?;

    let artist_top_tracks = state
        .streaming
        .artist_top_tracks(&access_token, &profile.artist_id)
        .await?;

    let mut sub_scores = score::algorithmic_scores(&profile, &artist_top_tracks);

    let prompt = score::build_prompt(&PromptContext::from_profile(&profile));
    let assessment = state.textgen.complete(&prompt).await?;
    sub_scores.insert(
        Factor::QualitativeAnalysis,
        score::score_or_neutral(&assessment),
    );

    let breakdown = score::aggregate(&sub_scores, &state.weights);
    info!(
        artist = %profile.artist_name,
        fan_score = breakdown.fan_score,
        "computed fan score"
    );

    let factors = Factor::ALGORITHMIC
        .iter()
        .map(|factor| (factor.as_str().to_string(), round2(breakdown.factor(*factor))))
        .collect();

    Ok(Json(FanScoreResponse {
        artist_name: profile.artist_name.clone(),
        fan_score: round2(breakdown.fan_score),
        qualitative_score: round2(breakdown.factor(Factor::QualitativeAnalysis)),
        factors,
    }))
}

/// Round a percentage to two decimals for display
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
