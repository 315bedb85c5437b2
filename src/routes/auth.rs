//! Auth route handlers

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{info, warn};

use super::AppState;
use crate::auth::{CurrentUser, SESSION_COOKIE};
use crate::error::ApiError;
use crate::store::UserStore;

/// Login payload. Fields default to empty so missing keys fail validation
/// with the form's own message instead of a deserialization error.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    username: String,
    password: String,
}

/// POST /api/auth/login - Check credentials and set the session cookie
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<(CookieJar, Json<Value>), ApiError> {
    let username = body.username.trim();
    if username.is_empty() || body.password.is_empty() {
        return Err(ApiError::MissingCredentials);
    }

    let Some(user) = state.users.find_by_username(username).await? else {
        warn!(username, "login rejected: unknown username");
        return Err(ApiError::InvalidCredentials);
    };

    if !UserStore::password_matches(&user, &body.password) {
        warn!(username, "login rejected: wrong password");
        return Err(ApiError::InvalidCredentials);
    }

    let token = state.tokens.sign(&user.username, &user.nome)?;

    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.cookie_secure)
        .max_age(time::Duration::seconds(state.session_ttl_seconds))
        .build();

    info!(username = %user.username, "user logged in");

    Ok((jar.add(cookie), Json(json!({ "ok": true, "nome": user.nome }))))
}

/// POST /api/auth/logout - Clear the session cookie
///
/// Tokens are stateless, so logout only removes the client's copy; an
/// already-leaked token stays valid until its expiry.
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<Value>) {
    let removal = Cookie::build((SESSION_COOKIE, "")).path("/").build();
    (jar.remove(removal), Json(json!({ "ok": true })))
}

/// GET /api/auth/session - Report the authenticated user, if any
///
/// The gate verified the cookie and stashed the claims; an absent extension
/// means the request carried no valid session.
pub async fn session(user: Option<Extension<CurrentUser>>) -> Response {
    match user {
        Some(Extension(user)) => (
            StatusCode::OK,
            Json(json!({
                "authenticated": true,
                "user": { "username": user.username, "nome": user.nome },
            })),
        )
            .into_response(),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "authenticated": false })),
        )
            .into_response(),
    }
}
