//! Authentication module
//!
//! HMAC-signed session tokens carried in an HTTP-only cookie, plus the
//! request gate that decides redirect/reject/allow per request.

pub mod middleware;
pub mod token;

pub use middleware::{CurrentUser, session_gate};
pub use token::{SessionClaims, TokenCodec, TokenError};

/// Cookie name for the session token
pub const SESSION_COOKIE: &str = "empre_session";
