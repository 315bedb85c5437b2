//! Venture CRUD handlers
//!
//! The repository is a whole-document JSON file: every mutation reads the
//! full list, edits it in memory and replaces the file. Mutating handlers
//! hold the store's writer lock across that cycle so concurrent writes
//! serialize instead of overwriting each other.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::{Value, json};
use tracing::info;
use uuid::Uuid;

use super::AppState;
use crate::domain::{Venture, VentureInput};
use crate::error::ApiError;

/// GET /api/empreendimentos - Full list, newest first
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Venture>>, ApiError> {
    let items = state.ventures.list().await?;
    Ok(Json(items))
}

/// POST /api/empreendimentos - Register a venture
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<VentureInput>,
) -> Result<(StatusCode, Json<Venture>), ApiError> {
    let fields = input.into_fields().map_err(ApiError::Validation)?;
    let novo = Venture::create(fields);

    let _writer = state.ventures.lock_writer().await;
    let mut items = state.ventures.list().await?;
    items.insert(0, novo.clone());
    state.ventures.replace_all(&items).await?;

    info!(id = %novo.id, municipio = %novo.municipio, "empreendimento registered");

    Ok((StatusCode::CREATED, Json(novo)))
}

/// PUT /api/empreendimentos/{id} - Update a venture in place
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<VentureInput>,
) -> Result<Json<Venture>, ApiError> {
    let target = Uuid::parse_str(&id).map_err(|_| ApiError::VentureNotFound)?;

    let _writer = state.ventures.lock_writer().await;
    let mut items = state.ventures.list().await?;
    let index = items
        .iter()
        .position(|item| item.id == target)
        .ok_or(ApiError::VentureNotFound)?;

    let fields = input.into_fields().map_err(ApiError::Validation)?;
    items[index].apply(fields);
    let updated = items[index].clone();
    state.ventures.replace_all(&items).await?;

    info!(id = %updated.id, "empreendimento updated");

    Ok(Json(updated))
}

/// DELETE /api/empreendimentos/{id} - Remove a venture
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let target = Uuid::parse_str(&id).map_err(|_| ApiError::VentureNotFound)?;

    let _writer = state.ventures.lock_writer().await;
    let items = state.ventures.list().await?;
    let before = items.len();
    let remaining: Vec<Venture> = items.into_iter().filter(|item| item.id != target).collect();

    if remaining.len() == before {
        return Err(ApiError::VentureNotFound);
    }

    state.ventures.replace_all(&remaining).await?;

    info!(id = %target, "empreendimento removed");

    Ok(Json(json!({ "ok": true })))
}
