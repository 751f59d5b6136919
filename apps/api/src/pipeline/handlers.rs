use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::ExtractionInput;
use crate::pipeline::assemble::{assemble_from_payload, AssemblePayload, Mode};
use crate::pipeline::orchestrator::{process, ProcessOutcome};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct BulkImportRequest {
    pub resume_text: String,
    #[serde(default)]
    pub job_role: Option<String>,
    #[serde(default)]
    pub mode: Option<Mode>,
}

/// POST /processBulkImport — runs the full fan-out for one candidate and
/// persists the assembled record. A phase-1 transport failure yields the
/// Unsuccessful failure shape instead of an error response.
pub async fn handle_process_bulk_import(
    State(state): State<AppState>,
    Json(req): Json<BulkImportRequest>,
) -> Result<Response, AppError> {
    let run_id = Uuid::new_v4();
    info!(%run_id, "processing candidate import");

    let input = ExtractionInput::new(req.resume_text, req.job_role);
    let mode = req.mode.unwrap_or(Mode::Batch);

    match process(state.extractor.as_ref(), &input, mode).await {
        ProcessOutcome::Processed(record) => {
            let response = state.store.upsert(&record).await?;
            info!(%run_id, email_id = %record.email_id, "candidate persisted");
            Ok(Json(json!({
                "status": "Successful",
                "response": response,
                "candidate_id": record.candidate_id,
                "name": record.name,
                "email_id": record.email_id,
            }))
            .into_response())
        }
        ProcessOutcome::Failed(failure) => {
            info!(%run_id, error = %failure.error, "candidate import unsuccessful");
            Ok(Json(failure).into_response())
        }
    }
}

/// POST /assembleData — accepts a fully assembled payload from the ad-hoc
/// flow and upserts it.
pub async fn handle_assemble_data(
    State(state): State<AppState>,
    Json(payload): Json<AssemblePayload>,
) -> Result<Json<serde_json::Value>, AppError> {
    let record = assemble_from_payload(payload);
    let response = state.store.upsert(&record).await?;
    Ok(Json(json!({ "response": response })))
}
