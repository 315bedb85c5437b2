pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod observability;
pub mod routes;
pub mod server;
pub mod store;

pub use routes::AppState;

use std::path::Path;

use auth::TokenCodec;
use config::Config;
use store::{UserStore, VentureStore};

/// Create the app router from configuration
///
/// Also used by the integration tests to drive the full router without
/// binding a listener.
pub fn create_app(config: &Config) -> axum::Router {
    let data_dir = Path::new(&config.storage.data_dir);

    let state = AppState {
        users: UserStore::new(data_dir),
        ventures: VentureStore::new(data_dir),
        tokens: TokenCodec::new(
            config.auth.session_secret.clone(),
            config.auth.session_ttl_seconds,
        ),
        session_ttl_seconds: config.auth.session_ttl_seconds,
        cookie_secure: config.auth.cookie_secure,
    };

    routes::router(state, Path::new(&config.server.static_dir))
}
