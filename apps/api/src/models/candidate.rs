use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

/// The consolidated per-candidate record — one row in the resume store.
///
/// Scalar columns hold identifiers and derived numerics; one JSON column per
/// structured extraction kind. `email_id` is the natural dedup key: at most
/// one live row per email. `candidate_id` is generated per run and never
/// reused; `mode` records whether the row came from an ad-hoc submission or a
/// bulk import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CandidateRecord {
    pub candidate_id: String,
    pub name: String,
    pub job_role: String,
    pub resume_raw_text: String,
    pub email_id: String,
    pub mobile_number: String,
    pub years_of_experience: f64,
    pub relevant_years_of_experience: f64,
    /// Flattened `comment` of the summary-overview result.
    pub summary_overview: String,
    pub score_resume: Value,
    pub get_contacts: Value,
    pub get_summary_overview: Value,
    pub get_custom_scores: Value,
    pub get_other_comments: Value,
    pub get_functional_constituent: Value,
    pub get_technical_constituent: Value,
    pub get_education: Value,
    pub get_projects: Value,
    pub get_company: Value,
    pub get_location: Value,
    pub get_recruiters_overview: Value,
    pub get_designation: Value,
    pub mode: String,
    pub created_at: DateTime<Utc>,
}

impl CandidateRecord {
    /// Overall resume score, pulled out of the `score_resume` JSON.
    /// Missing or malformed scores sort as zero.
    pub fn overall_score(&self) -> i64 {
        self.score_resume
            .get("score")
            .and_then(Value::as_i64)
            .unwrap_or(0)
    }

    /// Recruiter-overview bullets joined for embedding.
    pub fn overview_text(&self) -> String {
        self.get_recruiters_overview
            .get("overview")
            .and_then(Value::as_array)
            .map(|bullets| {
                bullets
                    .iter()
                    .filter_map(Value::as_str)
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .unwrap_or_default()
    }
}

/// Read-path projection: internal bookkeeping columns (candidate_id, mode,
/// raw resume text) are stripped before leaving the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateSummary {
    pub name: String,
    pub job_role: String,
    pub email_id: String,
    pub mobile_number: String,
    pub years_of_experience: f64,
    pub relevant_years_of_experience: f64,
    pub summary_overview: String,
    pub score_resume: Value,
    pub get_contacts: Value,
    pub get_summary_overview: Value,
    pub get_custom_scores: Value,
    pub get_other_comments: Value,
    pub get_functional_constituent: Value,
    pub get_technical_constituent: Value,
    pub get_education: Value,
    pub get_projects: Value,
    pub get_company: Value,
    pub get_location: Value,
    pub get_recruiters_overview: Value,
    pub get_designation: Value,
    pub created_at: DateTime<Utc>,
}

impl From<CandidateRecord> for CandidateSummary {
    fn from(record: CandidateRecord) -> Self {
        CandidateSummary {
            name: record.name,
            job_role: record.job_role,
            email_id: record.email_id,
            mobile_number: record.mobile_number,
            years_of_experience: record.years_of_experience,
            relevant_years_of_experience: record.relevant_years_of_experience,
            summary_overview: record.summary_overview,
            score_resume: record.score_resume,
            get_contacts: record.get_contacts,
            get_summary_overview: record.get_summary_overview,
            get_custom_scores: record.get_custom_scores,
            get_other_comments: record.get_other_comments,
            get_functional_constituent: record.get_functional_constituent,
            get_technical_constituent: record.get_technical_constituent,
            get_education: record.get_education,
            get_projects: record.get_projects,
            get_company: record.get_company,
            get_location: record.get_location,
            get_recruiters_overview: record.get_recruiters_overview,
            get_designation: record.get_designation,
            created_at: record.created_at,
        }
    }
}

/// Display pair for the candidate dropdown.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DropdownEntry {
    pub name: String,
    pub email_id: String,
}
