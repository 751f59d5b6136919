//! Extraction layer — the 15 resume extraction operations, their schemas,
//! the HTTP transport to the extraction service, and the retry wrapper.

pub mod client;
pub mod retry;
pub mod schema;

use serde::{Deserialize, Serialize};

/// Every extraction operation the orchestrator fans out to.
///
/// This is the canonical superset from the latest revision of the extraction
/// service. Earlier, narrower endpoint sets (without designation / location /
/// recruiter-overview) are deprecated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractionKind {
    Contact,
    Name,
    Score,
    Summary,
    CustomScores,
    OtherComments,
    FunctionalConstituent,
    TechnicalConstituent,
    Education,
    Projects,
    Company,
    YearsOfExperience,
    Location,
    RecruiterOverview,
    Designation,
}

impl ExtractionKind {
    /// All extraction kinds, phase 1 (contact) first.
    pub const ALL: [ExtractionKind; 15] = [
        ExtractionKind::Contact,
        ExtractionKind::Name,
        ExtractionKind::Score,
        ExtractionKind::Summary,
        ExtractionKind::CustomScores,
        ExtractionKind::OtherComments,
        ExtractionKind::FunctionalConstituent,
        ExtractionKind::TechnicalConstituent,
        ExtractionKind::Education,
        ExtractionKind::Projects,
        ExtractionKind::Company,
        ExtractionKind::YearsOfExperience,
        ExtractionKind::Location,
        ExtractionKind::RecruiterOverview,
        ExtractionKind::Designation,
    ];

    /// The endpoint name on the extraction service (`POST /<endpoint>`).
    pub fn endpoint(&self) -> &'static str {
        match self {
            ExtractionKind::Contact => "getContacts",
            ExtractionKind::Name => "extractName",
            ExtractionKind::Score => "scoreResume",
            ExtractionKind::Summary => "getSummaryOverview",
            ExtractionKind::CustomScores => "getCustomScores",
            ExtractionKind::OtherComments => "getOtherComments",
            ExtractionKind::FunctionalConstituent => "getFunctionalConstituent",
            ExtractionKind::TechnicalConstituent => "getTechnicalConstituent",
            ExtractionKind::Education => "getEducation",
            ExtractionKind::Projects => "getProjects",
            ExtractionKind::Company => "getCompany",
            ExtractionKind::YearsOfExperience => "extractYoe",
            ExtractionKind::Location => "extractLocation",
            ExtractionKind::RecruiterOverview => "extractRecruitersOverview",
            ExtractionKind::Designation => "extractDesignation",
        }
    }

    /// Key under which this kind's result lands in the aggregate map.
    /// No two kinds share a key; the unordered map union during aggregation
    /// relies on that.
    pub fn record_key(&self) -> &'static str {
        match self {
            ExtractionKind::Contact => "get_contacts",
            ExtractionKind::Name => "extract_name",
            ExtractionKind::Score => "score_resume",
            ExtractionKind::Summary => "get_summary_overview",
            ExtractionKind::CustomScores => "get_custom_scores",
            ExtractionKind::OtherComments => "get_other_comments",
            ExtractionKind::FunctionalConstituent => "get_functional_constituent",
            ExtractionKind::TechnicalConstituent => "get_technical_constituent",
            ExtractionKind::Education => "get_education",
            ExtractionKind::Projects => "get_projects",
            ExtractionKind::Company => "get_company",
            ExtractionKind::YearsOfExperience => "extract_yoe",
            ExtractionKind::Location => "get_location",
            ExtractionKind::RecruiterOverview => "get_recruiters_overview",
            ExtractionKind::Designation => "get_designation",
        }
    }
}

/// Input contract shared by every extraction operation. Immutable for the
/// duration of one orchestration run, except that the orchestrator injects
/// `email_id` between phase 1 and phase 2.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionInput {
    pub resume_text: String,
    pub job_role: Option<String>,
    pub email_id: Option<String>,
}

impl ExtractionInput {
    pub fn new(resume_text: impl Into<String>, job_role: Option<String>) -> Self {
        Self {
            resume_text: resume_text.into(),
            job_role,
            email_id: None,
        }
    }

    /// Returns a copy with the phase-1 resolved email injected. Name
    /// extraction uses it as an inference fallback.
    pub fn with_email(&self, email_id: &str) -> Self {
        let mut input = self.clone();
        if !email_id.is_empty() {
            input.email_id = Some(email_id.to_string());
        }
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_all_kinds_have_unique_endpoints_and_keys() {
        let endpoints: HashSet<_> = ExtractionKind::ALL.iter().map(|k| k.endpoint()).collect();
        let keys: HashSet<_> = ExtractionKind::ALL.iter().map(|k| k.record_key()).collect();
        assert_eq!(endpoints.len(), ExtractionKind::ALL.len());
        assert_eq!(keys.len(), ExtractionKind::ALL.len());
    }

    #[test]
    fn test_with_email_ignores_blank_email() {
        let input = ExtractionInput::new("resume", None);
        assert_eq!(input.with_email("").email_id, None);
        assert_eq!(
            input.with_email("a@b.com").email_id.as_deref(),
            Some("a@b.com")
        );
    }
}
