use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::candidate::CandidateSummary;
use crate::search::{refine, RefineRequest};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RefineQuery {
    /// Comma-separated keyword list.
    #[serde(rename = "wordList", default)]
    pub word_list: Option<String>,
    #[serde(rename = "jobRole", default)]
    pub job_role: Option<String>,
    #[serde(rename = "jobDescription", default)]
    pub job_description: Option<String>,
    #[serde(rename = "experienceFilter", default)]
    pub experience_filter: Option<String>,
    #[serde(rename = "recentResumeCount", default)]
    pub recent_resume_count: Option<i64>,
}

/// GET /getRefinedResume
pub async fn handle_get_refined_resume(
    State(state): State<AppState>,
    Query(query): Query<RefineQuery>,
) -> Result<Json<Vec<CandidateSummary>>, AppError> {
    let word_list = query
        .word_list
        .map(|raw| {
            raw.split(',')
                .map(|w| w.trim().to_string())
                .filter(|w| !w.is_empty())
                .collect()
        })
        .unwrap_or_default();

    let request = RefineRequest {
        word_list,
        job_role: query.job_role,
        job_description: query.job_description,
        experience_filter: query.experience_filter,
        recent_resume_count: query.recent_resume_count,
    };
    let results = refine(&state.store, state.embedder.as_ref(), request).await?;
    Ok(Json(results))
}
