use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post, put},
};
use std::path::Path;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::auth::{TokenCodec, session_gate};
use crate::store::{UserStore, VentureStore};

pub mod auth;
pub mod empreendimentos;
pub mod health;

#[derive(Clone)]
pub struct AppState {
    pub users: UserStore,
    pub ventures: VentureStore,
    pub tokens: TokenCodec,
    pub session_ttl_seconds: i64,
    pub cookie_secure: bool,
}

/// Build the application router: the JSON API plus a static file service for
/// the separately-built dashboard assets, with the session gate and request
/// tracing layered over everything.
pub fn router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        // Auth API
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/session", get(auth::session))
        // Venture API (gated)
        .route(
            "/api/empreendimentos",
            get(empreendimentos::list).post(empreendimentos::create),
        )
        .route(
            "/api/empreendimentos/{id}",
            put(empreendimentos::update).delete(empreendimentos::remove),
        )
        // Dashboard assets; the gate redirects unauthenticated /dashboard hits
        // before they reach the file service
        .fallback_service(ServeDir::new(static_dir))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            session_gate,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
