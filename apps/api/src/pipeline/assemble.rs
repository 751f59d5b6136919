//! Aggregate assembly — folds the per-kind extraction results into one
//! `CandidateRecord` ready for persistence.
//!
//! Aggregation is an unordered map union keyed by each kind's record key.
//! No two kinds share a key, so last-writer-wins on collision is inert, but
//! the merge is written that way deliberately. Absent kinds are filled with
//! their fallback, wrapped-shape drift is normalized, and every string leaf
//! is sanitized before the record is built.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::extraction::retry::RetryOutcome;
use crate::extraction::{ExtractionInput, ExtractionKind};
use crate::models::candidate::CandidateRecord;
use crate::pipeline::sanitize::{sanitize_str, sanitize_value};

/// Provenance of a record: ad-hoc single submission or bulk import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Adhoc,
    Batch,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Adhoc => "adhoc",
            Mode::Batch => "batch",
        }
    }
}

/// Time-based candidate identifier. Never reused; collisions are possible at
/// sub-second request rates, which the email-keyed upsert tolerates.
pub fn generate_candidate_id() -> String {
    format!("Candidate-{}", Utc::now().timestamp())
}

/// Folds orchestrator outcomes into a record. The candidate name comes from
/// the name-extraction result.
pub fn assemble(input: &ExtractionInput, mode: Mode, outcomes: &[RetryOutcome]) -> CandidateRecord {
    let mut merged = Map::new();
    for outcome in outcomes {
        merged.insert(
            outcome.kind.record_key().to_string(),
            outcome.result.to_value(),
        );
    }
    from_parts(
        None,
        input.job_role.as_deref().unwrap_or(""),
        &input.resume_text,
        mode,
        merged,
    )
}

/// Builds the record from an explicit name (or the extracted one), job role,
/// resume text and the merged per-kind result map.
pub fn from_parts(
    name: Option<&str>,
    job_role: &str,
    resume_text: &str,
    mode: Mode,
    mut merged: Map<String, Value>,
) -> CandidateRecord {
    for kind in ExtractionKind::ALL {
        let value = merged
            .remove(kind.record_key())
            .filter(|v| !v.is_null())
            .unwrap_or_else(|| kind.fallback().to_value());
        merged.insert(
            kind.record_key().to_string(),
            sanitize_value(kind.normalize(value)),
        );
    }

    let field = |kind: ExtractionKind| -> Value {
        merged.get(kind.record_key()).cloned().unwrap_or(Value::Null)
    };

    let contacts = field(ExtractionKind::Contact);
    let email_id = str_at(&contacts, "email_id");
    let mobile_number = str_at(&contacts, "mobile_number");

    let name = match name {
        Some(n) => sanitize_str(n),
        None => str_at(&field(ExtractionKind::Name), "name"),
    };

    let yoe = field(ExtractionKind::YearsOfExperience);
    let years_of_experience = num_at(&yoe, "years_of_experience");
    let relevant_years_of_experience = num_at(&yoe, "relevant_years_of_experience");

    let summary = field(ExtractionKind::Summary);
    let summary_overview = str_at(&summary, "comment");

    CandidateRecord {
        candidate_id: generate_candidate_id(),
        name,
        job_role: sanitize_str(job_role),
        resume_raw_text: sanitize_str(resume_text),
        email_id,
        mobile_number,
        years_of_experience,
        relevant_years_of_experience,
        summary_overview,
        score_resume: field(ExtractionKind::Score),
        get_contacts: contacts,
        get_summary_overview: summary,
        get_custom_scores: field(ExtractionKind::CustomScores),
        get_other_comments: field(ExtractionKind::OtherComments),
        get_functional_constituent: field(ExtractionKind::FunctionalConstituent),
        get_technical_constituent: field(ExtractionKind::TechnicalConstituent),
        get_education: field(ExtractionKind::Education),
        get_projects: field(ExtractionKind::Projects),
        get_company: field(ExtractionKind::Company),
        get_location: field(ExtractionKind::Location),
        get_recruiters_overview: field(ExtractionKind::RecruiterOverview),
        get_designation: field(ExtractionKind::Designation),
        mode: mode.as_str().to_string(),
        created_at: Utc::now(),
    }
}

fn str_at(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(sanitize_str)
        .unwrap_or_default()
}

fn num_at(value: &Value, key: &str) -> f64 {
    value.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

// ── Ad-hoc assembled payload (POST /assembleData) ───────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct InputData {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub job_role: Option<String>,
    #[serde(default)]
    pub resume_text: Option<String>,
}

/// Fully assembled payload submitted by the ad-hoc frontend flow. Field names
/// mirror the extraction endpoints; absent kinds get their fallback.
#[derive(Debug, Clone, Deserialize)]
pub struct AssemblePayload {
    pub input_data: InputData,
    #[serde(default = "default_mode")]
    pub mode: Mode,
    #[serde(rename = "getContacts", default)]
    pub get_contacts: Option<Value>,
    #[serde(rename = "extractName", default)]
    pub extract_name: Option<Value>,
    #[serde(rename = "scoreResume", default)]
    pub score_resume: Option<Value>,
    #[serde(rename = "getSummaryOverview", default)]
    pub get_summary_overview: Option<Value>,
    #[serde(rename = "getCustomScores", default)]
    pub get_custom_scores: Option<Value>,
    #[serde(rename = "getOtherComments", default)]
    pub get_other_comments: Option<Value>,
    #[serde(rename = "getFunctionalConstituent", default)]
    pub get_functional_constituent: Option<Value>,
    #[serde(rename = "getTechnicalConstituent", default)]
    pub get_technical_constituent: Option<Value>,
    #[serde(rename = "getEducation", default)]
    pub get_education: Option<Value>,
    #[serde(rename = "getProjects", default)]
    pub get_projects: Option<Value>,
    #[serde(rename = "getCompany", default)]
    pub get_company: Option<Value>,
    #[serde(rename = "extractYoe", default)]
    pub extract_yoe: Option<Value>,
    #[serde(rename = "extractLocation", default)]
    pub extract_location: Option<Value>,
    #[serde(rename = "extractRecruitersOverview", default)]
    pub extract_recruiters_overview: Option<Value>,
    #[serde(rename = "extractDesignation", default)]
    pub extract_designation: Option<Value>,
}

fn default_mode() -> Mode {
    Mode::Adhoc
}

pub fn assemble_from_payload(payload: AssemblePayload) -> CandidateRecord {
    let mut merged = Map::new();
    let mut put = |kind: ExtractionKind, value: Option<Value>| {
        if let Some(v) = value {
            merged.insert(kind.record_key().to_string(), v);
        }
    };
    put(ExtractionKind::Contact, payload.get_contacts);
    put(ExtractionKind::Name, payload.extract_name);
    put(ExtractionKind::Score, payload.score_resume);
    put(ExtractionKind::Summary, payload.get_summary_overview);
    put(ExtractionKind::CustomScores, payload.get_custom_scores);
    put(ExtractionKind::OtherComments, payload.get_other_comments);
    put(
        ExtractionKind::FunctionalConstituent,
        payload.get_functional_constituent,
    );
    put(
        ExtractionKind::TechnicalConstituent,
        payload.get_technical_constituent,
    );
    put(ExtractionKind::Education, payload.get_education);
    put(ExtractionKind::Projects, payload.get_projects);
    put(ExtractionKind::Company, payload.get_company);
    put(ExtractionKind::YearsOfExperience, payload.extract_yoe);
    put(ExtractionKind::Location, payload.extract_location);
    put(
        ExtractionKind::RecruiterOverview,
        payload.extract_recruiters_overview,
    );
    put(ExtractionKind::Designation, payload.extract_designation);

    from_parts(
        payload.input_data.name.as_deref(),
        payload.input_data.job_role.as_deref().unwrap_or(""),
        payload.input_data.resume_text.as_deref().unwrap_or(""),
        payload.mode,
        merged,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn outcome(kind: ExtractionKind, raw: Value) -> RetryOutcome {
        RetryOutcome {
            kind,
            succeeded: true,
            result: kind.validate(&raw).unwrap(),
            attempts_used: 1,
        }
    }

    #[test]
    fn test_assemble_flattens_derived_fields() {
        let input = ExtractionInput::new("resume body", Some("Data Engineer".to_string()));
        let outcomes = vec![
            outcome(
                ExtractionKind::Contact,
                json!({"color": "green", "comment": "ok", "email_id": "ada@ex.com", "mobile_number": "555"}),
            ),
            outcome(ExtractionKind::Name, json!({"name": " Ada Lovelace "})),
            outcome(
                ExtractionKind::Summary,
                json!({"score": 85, "color": "green", "label": "good", "comment": " Crisp summary. "}),
            ),
            outcome(
                ExtractionKind::YearsOfExperience,
                json!({"years_of_experience": 6.5, "relevant_years_of_experience": 4.0}),
            ),
        ];

        let record = assemble(&input, Mode::Batch, &outcomes);
        assert_eq!(record.name, "Ada Lovelace");
        assert_eq!(record.email_id, "ada@ex.com");
        assert_eq!(record.mobile_number, "555");
        assert_eq!(record.summary_overview, "Crisp summary.");
        assert_eq!(record.years_of_experience, 6.5);
        assert_eq!(record.relevant_years_of_experience, 4.0);
        assert_eq!(record.mode, "batch");
        assert!(record.candidate_id.starts_with("Candidate-"));
    }

    #[test]
    fn test_absent_kinds_get_their_fallback() {
        let input = ExtractionInput::new("resume body", None);
        let record = assemble(&input, Mode::Adhoc, &[]);

        assert_eq!(record.name, "Name Not Found");
        assert_eq!(record.get_education, json!({"education_history": []}));
        assert_eq!(record.get_technical_constituent, json!({"high": [], "medium": [], "low": []}));
        assert_eq!(record.years_of_experience, 0.0);
        assert_eq!(record.overall_score(), 0);
    }

    #[test]
    fn test_payload_bare_list_normalized_before_persistence() {
        let entry = json!({"project_name": "Atlas", "description": "Search infra"});
        let wrapped = AssemblePayload {
            input_data: InputData {
                name: Some("Ada".to_string()),
                job_role: Some("SWE".to_string()),
                resume_text: Some("text".to_string()),
            },
            mode: Mode::Adhoc,
            get_projects: Some(json!({"projects": [entry.clone()]})),
            ..empty_payload()
        };
        let bare = AssemblePayload {
            get_projects: Some(json!([entry])),
            ..wrapped.clone()
        };

        let from_wrapped = assemble_from_payload(wrapped);
        let from_bare = assemble_from_payload(bare);
        assert_eq!(from_wrapped.get_projects, from_bare.get_projects);
        assert_eq!(
            from_bare.get_projects,
            json!({"projects": [{"project_name": "Atlas", "description": "Search infra"}]})
        );
    }

    #[test]
    fn test_payload_strings_are_sanitized() {
        let payload = AssemblePayload {
            input_data: InputData {
                name: Some(" Ada\0 ".to_string()),
                job_role: Some("SWE".to_string()),
                resume_text: Some("text".to_string()),
            },
            mode: Mode::Adhoc,
            get_other_comments: Some(json!({
                "headings_feedback": " tidy\u{FFFD} ",
                "title_match": "yes",
                "formatting_feedback": ""
            })),
            ..empty_payload()
        };
        let record = assemble_from_payload(payload);
        assert_eq!(record.name, "Ada");
        assert_eq!(
            record.get_other_comments["headings_feedback"],
            json!("tidy")
        );
    }

    fn empty_payload() -> AssemblePayload {
        AssemblePayload {
            input_data: InputData {
                name: None,
                job_role: None,
                resume_text: None,
            },
            mode: Mode::Adhoc,
            get_contacts: None,
            extract_name: None,
            score_resume: None,
            get_summary_overview: None,
            get_custom_scores: None,
            get_other_comments: None,
            get_functional_constituent: None,
            get_technical_constituent: None,
            get_education: None,
            get_projects: None,
            get_company: None,
            extract_yoe: None,
            extract_location: None,
            extract_recruiters_overview: None,
            extract_designation: None,
        }
    }
}
