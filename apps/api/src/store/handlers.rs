use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::candidate::{CandidateRecord, CandidateSummary, DropdownEntry};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ExtractDataRequest {
    pub email_id: String,
}

/// POST /extractData — full single-record fetch for internal reconstruction.
pub async fn handle_extract_data(
    State(state): State<AppState>,
    Json(req): Json<ExtractDataRequest>,
) -> Result<Json<CandidateRecord>, AppError> {
    let record = state
        .store
        .get_by_email(&req.email_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No candidate found for '{}'", req.email_id)))?;
    Ok(Json(record))
}

/// GET /getAllCandidates
pub async fn handle_get_all_candidates(
    State(state): State<AppState>,
) -> Result<Json<Vec<CandidateSummary>>, AppError> {
    Ok(Json(state.store.get_all().await?))
}

/// GET /getAllCandidatesDropdown
pub async fn handle_get_all_candidates_dropdown(
    State(state): State<AppState>,
) -> Result<Json<Vec<DropdownEntry>>, AppError> {
    Ok(Json(state.store.get_all_dropdown().await?))
}
