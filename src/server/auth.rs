//! OAuth login and callback handlers.

use axum::{
    extract::{Query, State},
    response::Redirect,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use tracing::info;

use crate::error::AppError;
use crate::session::SESSION_COOKIE;
use crate::types::{CallbackQuery, LoginQuery};

use super::AppState;

/// Redirect the user to the auth provider's authorize URL.
///
/// The artist name rides along in the OAuth `state` parameter so the
/// callback knows which artist to score.
///
/// GET /login?artist_name=
pub async fn login(
    State(state): State<AppState>,
    Query(query): Query<LoginQuery>,
) -> Redirect {
    let url = state.auth.authorize_url(&query.artist_name);
    Redirect::to(&url)
}

/// Exchange the authorization code for a token, issue a session, and send
/// the user on to the scoring endpoint.
///
/// GET /callback?code=&state=
pub async fn callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<CallbackQuery>,
) -> Result<(CookieJar, Redirect), AppError> {
    let access_token = state.auth.exchange_code(&query.code).await?;
    let session_id = state.sessions.issue(access_token).await;
    info!(%session_id, "issued session after token exchange");

    let cookie = Cookie::build((SESSION_COOKIE, session_id.to_string()))
        .path("/")
        .http_only(true)
        .build();

    let target = format!(
        "/fan-score?artist_name={}",
        urlencoding::encode(&query.state)
    );
    Ok((jar.add(cookie), Redirect::to(&target)))
}
