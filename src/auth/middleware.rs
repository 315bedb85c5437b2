//! Request gate
//!
//! Runs on every request and decides, from the request path and the session
//! cookie, whether to redirect, reject or allow. Signature and expiry are
//! verified here, once, at the boundary; handlers downstream trust the
//! [`CurrentUser`] extension instead of re-checking the cookie.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use tracing::debug;

use super::SESSION_COOKIE;
use crate::error::ApiError;
use crate::routes::AppState;

/// Verified session identity, inserted into request extensions by the gate.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub username: String,
    pub nome: String,
}

/// Path prefixes the gate cares about. Everything else passes through.
const DASHBOARD_PREFIX: &str = "/dashboard";
const LOGIN_PAGE: &str = "/login";
const VENTURES_API_PREFIX: &str = "/api/empreendimentos";

pub async fn session_gate(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path();

    let claims = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| match state.tokens.verify(cookie.value()) {
            Ok(claims) => Some(claims),
            Err(error) => {
                debug!(%error, "rejecting session cookie");
                None
            }
        });

    if claims.is_none() && path.starts_with(DASHBOARD_PREFIX) {
        return Redirect::to(LOGIN_PAGE).into_response();
    }

    if claims.is_some() && path == LOGIN_PAGE {
        return Redirect::to("/dashboard/resumo").into_response();
    }

    if claims.is_none() && path.starts_with(VENTURES_API_PREFIX) {
        // API consumers get a status code, not a redirect
        return ApiError::Unauthenticated.into_response();
    }

    if let Some(claims) = claims {
        request.extensions_mut().insert(CurrentUser {
            username: claims.username,
            nome: claims.nome,
        });
    }

    next.run(request).await
}
