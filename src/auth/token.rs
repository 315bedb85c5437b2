//! Session token minting and verification
//!
//! Tokens are self-contained: a base64url JSON payload plus an HMAC-SHA256
//! signature over it, `"{payload}.{signature}"`. Nothing is stored server
//! side, so a token stays valid until its embedded expiry. There is no
//! revocation list.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("malformed session token")]
    Malformed,
    #[error("session token signature mismatch")]
    Signature,
    #[error("session token expired")]
    Expired,
    #[error("session claims could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Payload carried by the session cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub username: String,
    pub nome: String,
    /// Expiry, Unix milliseconds.
    pub exp: i64,
}

/// Signs and verifies session tokens with a configured secret and TTL.
#[derive(Clone)]
pub struct TokenCodec {
    secret: String,
    ttl_seconds: i64,
}

impl TokenCodec {
    pub fn new(secret: impl Into<String>, ttl_seconds: i64) -> Self {
        Self {
            secret: secret.into(),
            ttl_seconds,
        }
    }

    /// Mint a token expiring `ttl_seconds` from now.
    pub fn sign(&self, username: &str, nome: &str) -> Result<String, TokenError> {
        let claims = SessionClaims {
            username: username.to_string(),
            nome: nome.to_string(),
            exp: Utc::now().timestamp_millis() + self.ttl_seconds * 1000,
        };

        let body = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims)?);
        Ok(format!("{}.{}", body, self.signature_for(&body)))
    }

    /// Verify signature and expiry, returning the claims on success.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        let (body, signature_b64) = token.split_once('.').ok_or(TokenError::Malformed)?;
        if body.is_empty() || signature_b64.contains('.') {
            return Err(TokenError::Malformed);
        }

        let signature = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|_| TokenError::Malformed)?;

        let mut mac = self.mac();
        mac.update(body.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::Signature)?;

        let payload = URL_SAFE_NO_PAD
            .decode(body)
            .map_err(|_| TokenError::Malformed)?;
        let claims: SessionClaims =
            serde_json::from_slice(&payload).map_err(|_| TokenError::Malformed)?;

        if Utc::now().timestamp_millis() > claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    fn mac(&self) -> Hmac<Sha256> {
        Hmac::<Sha256>::new_from_slice(self.secret.as_bytes())
            .expect("HMAC can take key of any size")
    }

    fn signature_for(&self, body: &str) -> String {
        let mut mac = self.mac();
        mac.update(body.as_bytes());
        URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes())
    }
}
