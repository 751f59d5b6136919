//! Filter/search service over stored candidates.

pub mod embedding;
pub mod filters;
pub mod handlers;
pub mod ranking;

use crate::errors::AppError;
use crate::models::candidate::CandidateSummary;
use crate::search::embedding::Embedder;
use crate::search::filters::{parse_experience_range, SearchPredicate};
use crate::search::ranking::{rank_by_description, rank_by_score};
use crate::store::repository::CandidateStore;

/// Default top-k when re-ranking against a job description.
pub const DEFAULT_RESULT_LIMIT: usize = 10;
/// Descriptions at or below this length (after trimming) are treated as absent.
pub const MIN_DESCRIPTION_LEN: usize = 10;

#[derive(Debug, Clone, Default)]
pub struct RefineRequest {
    pub word_list: Vec<String>,
    pub job_role: Option<String>,
    pub job_description: Option<String>,
    pub experience_filter: Option<String>,
    pub recent_resume_count: Option<i64>,
}

/// Runs the conjunctive filter query, then ranks: semantically when a real
/// job description is present, by overall resume score otherwise.
pub async fn refine(
    store: &CandidateStore,
    embedder: &dyn Embedder,
    request: RefineRequest,
) -> Result<Vec<CandidateSummary>, AppError> {
    let experience_band = match request
        .experience_filter
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        Some(raw) => Some(parse_experience_range(raw)?),
        None => None,
    };

    let predicate = SearchPredicate {
        keywords: request.word_list,
        job_role: request.job_role.filter(|r| !r.trim().is_empty()),
        experience_band,
        recent_limit: request.recent_resume_count,
    };
    let records = store.search(&predicate).await?;

    let limit = request
        .recent_resume_count
        .map(|n| n.max(0) as usize)
        .unwrap_or(DEFAULT_RESULT_LIMIT);
    let description = request
        .job_description
        .as_deref()
        .map(str::trim)
        .unwrap_or("");

    let ranked = if description.len() > MIN_DESCRIPTION_LEN && !records.is_empty() {
        rank_by_description(embedder, description, records, limit).await?
    } else {
        // Score ordering; any row cap already happened in the query when
        // recency ordering was requested.
        rank_by_score(records)
    };

    Ok(ranked.into_iter().map(CandidateSummary::from).collect())
}
