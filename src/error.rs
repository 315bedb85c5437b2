use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::auth::token::TokenError;
use crate::store::StoreError;

/// Request-level errors, surfaced to the caller as JSON.
///
/// The response bodies keep the wire contract the dashboard UI already
/// depends on, including the Portuguese messages.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("validation failed")]
    Validation(Vec<String>),

    #[error("missing credentials")]
    MissingCredentials,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("not authenticated")]
    Unauthenticated,

    #[error("empreendimento not found")]
    VentureNotFound,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response()
            }
            ApiError::MissingCredentials => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Usuário e senha são obrigatórios." })),
            )
                .into_response(),
            ApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Credenciais inválidas." })),
            )
                .into_response(),
            ApiError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Não autenticado." })),
            )
                .into_response(),
            ApiError::VentureNotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Empreendimento não encontrado." })),
            )
                .into_response(),
            ApiError::Store(e) => {
                tracing::error!(error = %e, "storage failure");
                internal_error()
            }
            ApiError::Token(e) => {
                tracing::error!(error = %e, "token failure");
                internal_error()
            }
        }
    }
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Erro interno do servidor." })),
    )
        .into_response()
}
