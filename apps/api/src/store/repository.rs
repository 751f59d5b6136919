//! Candidate store — one row per candidate, keyed by email.
//!
//! Upsert is a single conditional statement (`INSERT ... ON CONFLICT
//! (email_id) DO UPDATE`), so concurrent submissions for the same email can
//! never interleave into duplicates or a transient empty window. The active
//! table name comes from configuration; every user-supplied filter value is
//! bound as a parameter, never interpolated.

use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::candidate::{CandidateRecord, CandidateSummary, DropdownEntry};
use crate::search::filters::{build_search_query, SearchPredicate};

/// Column order shared by the upsert statement and its binds.
const COLUMNS: [&str; 24] = [
    "candidate_id",
    "name",
    "job_role",
    "resume_raw_text",
    "email_id",
    "mobile_number",
    "years_of_experience",
    "relevant_years_of_experience",
    "summary_overview",
    "score_resume",
    "get_contacts",
    "get_summary_overview",
    "get_custom_scores",
    "get_other_comments",
    "get_functional_constituent",
    "get_technical_constituent",
    "get_education",
    "get_projects",
    "get_company",
    "get_location",
    "get_recruiters_overview",
    "get_designation",
    "mode",
    "created_at",
];

#[derive(Clone)]
pub struct CandidateStore {
    pool: PgPool,
    table: String,
}

impl CandidateStore {
    pub fn new(pool: PgPool, table: String) -> Self {
        Self { pool, table }
    }

    /// Insert-or-replace keyed by `email_id`. Rejects records missing any of
    /// the mandatory fields; partial records are never persisted.
    pub async fn upsert(&self, record: &CandidateRecord) -> Result<String, AppError> {
        validate_mandatory_fields(record)?;

        sqlx::query(&upsert_sql(&self.table))
            .bind(&record.candidate_id)
            .bind(&record.name)
            .bind(&record.job_role)
            .bind(&record.resume_raw_text)
            .bind(&record.email_id)
            .bind(&record.mobile_number)
            .bind(record.years_of_experience)
            .bind(record.relevant_years_of_experience)
            .bind(&record.summary_overview)
            .bind(&record.score_resume)
            .bind(&record.get_contacts)
            .bind(&record.get_summary_overview)
            .bind(&record.get_custom_scores)
            .bind(&record.get_other_comments)
            .bind(&record.get_functional_constituent)
            .bind(&record.get_technical_constituent)
            .bind(&record.get_education)
            .bind(&record.get_projects)
            .bind(&record.get_company)
            .bind(&record.get_location)
            .bind(&record.get_recruiters_overview)
            .bind(&record.get_designation)
            .bind(&record.mode)
            .bind(record.created_at)
            .execute(&self.pool)
            .await?;

        Ok("Data inserted successfully".to_string())
    }

    /// Full-row fetch used for internal reconstruction.
    pub async fn get_by_email(&self, email_id: &str) -> Result<Option<CandidateRecord>, AppError> {
        let sql = format!("SELECT * FROM {} WHERE email_id = $1", self.table);
        let record = sqlx::query_as::<_, CandidateRecord>(&sql)
            .bind(email_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(record)
    }

    /// All candidates, newest first, with internal columns stripped.
    pub async fn get_all(&self) -> Result<Vec<CandidateSummary>, AppError> {
        let sql = format!("SELECT * FROM {} ORDER BY created_at DESC", self.table);
        let records = sqlx::query_as::<_, CandidateRecord>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(records.into_iter().map(CandidateSummary::from).collect())
    }

    /// Name/email display pairs for the dropdown.
    pub async fn get_all_dropdown(&self) -> Result<Vec<DropdownEntry>, AppError> {
        let sql = format!("SELECT name, email_id FROM {} ORDER BY name", self.table);
        let entries = sqlx::query_as::<_, DropdownEntry>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(entries)
    }

    /// Executes the parameterized filter predicate.
    pub async fn search(
        &self,
        predicate: &SearchPredicate,
    ) -> Result<Vec<CandidateRecord>, AppError> {
        let mut query = build_search_query(&self.table, predicate);
        let records = query
            .build_query_as::<CandidateRecord>()
            .fetch_all(&self.pool)
            .await?;
        Ok(records)
    }
}

fn validate_mandatory_fields(record: &CandidateRecord) -> Result<(), AppError> {
    if record.name.trim().is_empty()
        || record.job_role.trim().is_empty()
        || record.resume_raw_text.trim().is_empty()
    {
        return Err(AppError::Validation(
            "Name/Job-Role/Resume cant be None".to_string(),
        ));
    }
    Ok(())
}

fn upsert_sql(table: &str) -> String {
    let cols = COLUMNS.join(", ");
    let placeholders = (1..=COLUMNS.len())
        .map(|i| format!("${i}"))
        .collect::<Vec<_>>()
        .join(", ");
    let updates = COLUMNS
        .iter()
        .filter(|&&c| c != "email_id")
        .map(|c| format!("{c} = EXCLUDED.{c}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {table} ({cols}) VALUES ({placeholders}) \
         ON CONFLICT (email_id) DO UPDATE SET {updates}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn minimal_record() -> CandidateRecord {
        CandidateRecord {
            candidate_id: "Candidate-1".to_string(),
            name: "Ada".to_string(),
            job_role: "SWE".to_string(),
            resume_raw_text: "text".to_string(),
            email_id: "ada@ex.com".to_string(),
            mobile_number: String::new(),
            years_of_experience: 0.0,
            relevant_years_of_experience: 0.0,
            summary_overview: String::new(),
            score_resume: json!({}),
            get_contacts: json!({}),
            get_summary_overview: json!({}),
            get_custom_scores: json!({}),
            get_other_comments: json!({}),
            get_functional_constituent: json!({}),
            get_technical_constituent: json!({}),
            get_education: json!({}),
            get_projects: json!({}),
            get_company: json!({}),
            get_location: json!({}),
            get_recruiters_overview: json!({}),
            get_designation: json!({}),
            mode: "adhoc".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_upsert_is_a_single_conditional_statement() {
        let sql = upsert_sql("resume_store");
        assert!(sql.starts_with("INSERT INTO resume_store ("));
        assert!(sql.contains("ON CONFLICT (email_id) DO UPDATE SET"));
        // The dedup key itself is never overwritten.
        assert!(!sql.contains("email_id = EXCLUDED.email_id"));
        // Every other column takes the new value, so last write wins fully.
        assert!(sql.contains("name = EXCLUDED.name"));
        assert!(sql.contains("created_at = EXCLUDED.created_at"));
        assert_eq!(sql.matches("EXCLUDED.").count(), COLUMNS.len() - 1);
    }

    #[test]
    fn test_mandatory_field_validation() {
        assert!(validate_mandatory_fields(&minimal_record()).is_ok());

        for blank_out in ["name", "job_role", "resume_raw_text"] {
            let mut record = minimal_record();
            match blank_out {
                "name" => record.name = "  ".to_string(),
                "job_role" => record.job_role = String::new(),
                _ => record.resume_raw_text = String::new(),
            }
            let err = validate_mandatory_fields(&record).unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }
    }
}
