//! Result schemas for every extraction kind.
//!
//! Each kind has a fixed required-key contract. A raw extraction payload is
//! accepted only if every required key is present with the right shape;
//! list-of-object kinds additionally require each entry to satisfy its own
//! key set. Anything else counts as a failed attempt in the retry wrapper.
//!
//! `education`, `projects` and `company` historically arrive either as a bare
//! JSON list or as the `{key: [...]}` wrapper; both are accepted and
//! normalized to the wrapped shape before validation.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

use super::ExtractionKind;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("expected a JSON object for {0}")]
    NotAnObject(&'static str),

    #[error("missing required key '{0}'")]
    MissingKey(&'static str),

    #[error("'{list}' entry {index} is missing required key '{key}'")]
    MissingEntryKey {
        list: &'static str,
        index: usize,
        key: &'static str,
    },

    #[error("shape mismatch: {0}")]
    Shape(#[from] serde_json::Error),
}

// ── Per-kind result shapes ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub color: String,
    pub comment: String,
    /// The extraction service returns `null` when no email was found.
    pub email_id: Option<String>,
    pub mobile_number: Option<String>,
}

impl Contact {
    pub fn email(&self) -> &str {
        self.email_id.as_deref().unwrap_or("")
    }

    pub fn mobile(&self) -> &str {
        self.mobile_number.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameInfo {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeScore {
    pub score: i64,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryOverview {
    pub score: i64,
    pub color: String,
    pub label: String,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomScores {
    // "searchibility" spelling matches the extraction service contract.
    pub searchibility_score: i64,
    pub hard_skills_score: i64,
    pub soft_skill_score: i64,
    pub formatting_score: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtherComments {
    pub headings_feedback: String,
    pub title_match: String,
    pub formatting_feedback: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionalConstituent {
    pub constituent: String,
    pub industries: String,
    pub has_industry_experience: String,
    pub has_completed_college: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalConstituent {
    pub high: Vec<String>,
    pub medium: Vec<String>,
    pub low: Vec<String>,
}

/// Years come back as either numbers or strings depending on the model run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum YearField {
    Number(i64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub start_year: YearField,
    pub end_year: YearField,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationHistory {
    pub education_history: Vec<EducationEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub project_name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectList {
    pub projects: Vec<ProjectEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyEntry {
    pub company_name: String,
    pub designation: String,
    pub duration: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyList {
    pub companies: Vec<CompanyEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceYears {
    pub years_of_experience: f64,
    pub relevant_years_of_experience: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationInfo {
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecruiterOverview {
    pub overview: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignationInfo {
    pub designation: String,
}

/// Closed tagged union over all extraction result shapes.
/// Serializes untagged to the canonical wire/persistence shape of its kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExtractionResult {
    Contact(Contact),
    Name(NameInfo),
    Score(ResumeScore),
    Summary(SummaryOverview),
    CustomScores(CustomScores),
    OtherComments(OtherComments),
    FunctionalConstituent(FunctionalConstituent),
    TechnicalConstituent(TechnicalConstituent),
    Education(EducationHistory),
    Projects(ProjectList),
    Company(CompanyList),
    YearsOfExperience(ExperienceYears),
    Location(LocationInfo),
    RecruiterOverview(RecruiterOverview),
    Designation(DesignationInfo),
}

impl ExtractionResult {
    pub fn kind(&self) -> ExtractionKind {
        match self {
            ExtractionResult::Contact(_) => ExtractionKind::Contact,
            ExtractionResult::Name(_) => ExtractionKind::Name,
            ExtractionResult::Score(_) => ExtractionKind::Score,
            ExtractionResult::Summary(_) => ExtractionKind::Summary,
            ExtractionResult::CustomScores(_) => ExtractionKind::CustomScores,
            ExtractionResult::OtherComments(_) => ExtractionKind::OtherComments,
            ExtractionResult::FunctionalConstituent(_) => ExtractionKind::FunctionalConstituent,
            ExtractionResult::TechnicalConstituent(_) => ExtractionKind::TechnicalConstituent,
            ExtractionResult::Education(_) => ExtractionKind::Education,
            ExtractionResult::Projects(_) => ExtractionKind::Projects,
            ExtractionResult::Company(_) => ExtractionKind::Company,
            ExtractionResult::YearsOfExperience(_) => ExtractionKind::YearsOfExperience,
            ExtractionResult::Location(_) => ExtractionKind::Location,
            ExtractionResult::RecruiterOverview(_) => ExtractionKind::RecruiterOverview,
            ExtractionResult::Designation(_) => ExtractionKind::Designation,
        }
    }

    /// Canonical JSON of this result, as persisted and returned on the wire.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

// ── Validation ──────────────────────────────────────────────────────────────

/// For list-of-object kinds: (wrapper key, per-entry required keys).
fn entry_contract(kind: ExtractionKind) -> Option<(&'static str, &'static [&'static str])> {
    match kind {
        ExtractionKind::Education => Some((
            "education_history",
            &["degree", "institution", "start_year", "end_year"],
        )),
        ExtractionKind::Projects => Some(("projects", &["project_name", "description"])),
        ExtractionKind::Company => Some(("companies", &["company_name", "designation", "duration"])),
        _ => None,
    }
}

impl ExtractionKind {
    pub fn required_keys(&self) -> &'static [&'static str] {
        match self {
            ExtractionKind::Contact => &["color", "comment", "email_id", "mobile_number"],
            ExtractionKind::Name => &["name"],
            ExtractionKind::Score => &["score", "items"],
            ExtractionKind::Summary => &["score", "color", "label", "comment"],
            ExtractionKind::CustomScores => &[
                "searchibility_score",
                "hard_skills_score",
                "soft_skill_score",
                "formatting_score",
            ],
            ExtractionKind::OtherComments => {
                &["headings_feedback", "title_match", "formatting_feedback"]
            }
            ExtractionKind::FunctionalConstituent => &[
                "constituent",
                "industries",
                "has_industry_experience",
                "has_completed_college",
            ],
            ExtractionKind::TechnicalConstituent => &["high", "medium", "low"],
            ExtractionKind::Education => &["education_history"],
            ExtractionKind::Projects => &["projects"],
            ExtractionKind::Company => &["companies"],
            ExtractionKind::YearsOfExperience => {
                &["years_of_experience", "relevant_years_of_experience"]
            }
            ExtractionKind::Location => &["location"],
            ExtractionKind::RecruiterOverview => &["overview"],
            ExtractionKind::Designation => &["designation"],
        }
    }

    /// Wraps a bare list into the canonical `{key: [...]}` shape for the
    /// kinds that drift. Everything else passes through untouched.
    pub fn normalize(&self, raw: Value) -> Value {
        match entry_contract(*self) {
            Some((wrapper, _)) if raw.is_array() => json!({ wrapper: raw }),
            _ => raw,
        }
    }

    /// Validates a raw payload against this kind's contract and parses it
    /// into the typed result. Presence of every required key is checked
    /// before the typed parse so a `null` value still counts as present.
    pub fn validate(&self, raw: &Value) -> Result<ExtractionResult, SchemaError> {
        let value = self.normalize(raw.clone());
        let obj = value
            .as_object()
            .ok_or(SchemaError::NotAnObject(self.endpoint()))?;

        for &key in self.required_keys() {
            if !obj.contains_key(key) {
                return Err(SchemaError::MissingKey(key));
            }
        }

        if let Some((list_key, entry_keys)) = entry_contract(*self) {
            let entries = obj
                .get(list_key)
                .and_then(Value::as_array)
                .ok_or(SchemaError::MissingKey(list_key))?;
            for (index, entry) in entries.iter().enumerate() {
                let entry_obj = entry
                    .as_object()
                    .ok_or(SchemaError::NotAnObject(list_key))?;
                for &key in entry_keys {
                    if !entry_obj.contains_key(key) {
                        return Err(SchemaError::MissingEntryKey {
                            list: list_key,
                            index,
                            key,
                        });
                    }
                }
            }
        }

        let result = match self {
            ExtractionKind::Contact => {
                ExtractionResult::Contact(serde_json::from_value(value)?)
            }
            ExtractionKind::Name => ExtractionResult::Name(serde_json::from_value(value)?),
            ExtractionKind::Score => ExtractionResult::Score(serde_json::from_value(value)?),
            ExtractionKind::Summary => ExtractionResult::Summary(serde_json::from_value(value)?),
            ExtractionKind::CustomScores => {
                ExtractionResult::CustomScores(serde_json::from_value(value)?)
            }
            ExtractionKind::OtherComments => {
                ExtractionResult::OtherComments(serde_json::from_value(value)?)
            }
            ExtractionKind::FunctionalConstituent => {
                ExtractionResult::FunctionalConstituent(serde_json::from_value(value)?)
            }
            ExtractionKind::TechnicalConstituent => {
                ExtractionResult::TechnicalConstituent(serde_json::from_value(value)?)
            }
            ExtractionKind::Education => {
                ExtractionResult::Education(serde_json::from_value(value)?)
            }
            ExtractionKind::Projects => {
                ExtractionResult::Projects(serde_json::from_value(value)?)
            }
            ExtractionKind::Company => ExtractionResult::Company(serde_json::from_value(value)?),
            ExtractionKind::YearsOfExperience => {
                ExtractionResult::YearsOfExperience(serde_json::from_value(value)?)
            }
            ExtractionKind::Location => {
                ExtractionResult::Location(serde_json::from_value(value)?)
            }
            ExtractionKind::RecruiterOverview => {
                ExtractionResult::RecruiterOverview(serde_json::from_value(value)?)
            }
            ExtractionKind::Designation => {
                ExtractionResult::Designation(serde_json::from_value(value)?)
            }
        };

        Ok(result)
    }

    /// Deterministic value used when an operation exhausts its retry budget.
    /// Always satisfies this kind's own contract, so downstream code never
    /// special-cases exhaustion.
    pub fn fallback(&self) -> ExtractionResult {
        match self {
            ExtractionKind::Contact => ExtractionResult::Contact(Contact {
                color: "red".to_string(),
                comment: "Issue in Processing".to_string(),
                email_id: Some(String::new()),
                mobile_number: Some(String::new()),
            }),
            ExtractionKind::Name => ExtractionResult::Name(NameInfo {
                name: "Name Not Found".to_string(),
            }),
            ExtractionKind::Score => ExtractionResult::Score(ResumeScore {
                score: 0,
                items: vec![],
            }),
            ExtractionKind::Summary => ExtractionResult::Summary(SummaryOverview {
                score: 0,
                color: "red".to_string(),
                label: "critical".to_string(),
                comment: "Issue in Processing".to_string(),
            }),
            ExtractionKind::CustomScores => ExtractionResult::CustomScores(CustomScores {
                searchibility_score: 0,
                hard_skills_score: 0,
                soft_skill_score: 0,
                formatting_score: 0,
            }),
            ExtractionKind::OtherComments => ExtractionResult::OtherComments(OtherComments {
                headings_feedback: String::new(),
                title_match: String::new(),
                formatting_feedback: String::new(),
            }),
            ExtractionKind::FunctionalConstituent => {
                ExtractionResult::FunctionalConstituent(FunctionalConstituent {
                    constituent: String::new(),
                    industries: String::new(),
                    has_industry_experience: String::new(),
                    has_completed_college: String::new(),
                })
            }
            ExtractionKind::TechnicalConstituent => {
                ExtractionResult::TechnicalConstituent(TechnicalConstituent {
                    high: vec![],
                    medium: vec![],
                    low: vec![],
                })
            }
            ExtractionKind::Education => ExtractionResult::Education(EducationHistory {
                education_history: vec![],
            }),
            ExtractionKind::Projects => {
                ExtractionResult::Projects(ProjectList { projects: vec![] })
            }
            ExtractionKind::Company => {
                ExtractionResult::Company(CompanyList { companies: vec![] })
            }
            ExtractionKind::YearsOfExperience => {
                ExtractionResult::YearsOfExperience(ExperienceYears {
                    years_of_experience: 0.0,
                    relevant_years_of_experience: 0.0,
                })
            }
            ExtractionKind::Location => ExtractionResult::Location(LocationInfo {
                location: String::new(),
            }),
            ExtractionKind::RecruiterOverview => {
                ExtractionResult::RecruiterOverview(RecruiterOverview { overview: vec![] })
            }
            ExtractionKind::Designation => ExtractionResult::Designation(DesignationInfo {
                designation: String::new(),
            }),
        }
    }
}
