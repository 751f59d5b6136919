//! Two-phase scatter-gather over the extraction operations.
//!
//! Phase 1 resolves contact information first because the extracted email is
//! load-bearing: it is the dedup key for persistence and an inference
//! fallback for name extraction. Only a phase-1 transport failure aborts the
//! candidate; every phase-2 task independently degrades to its kind's
//! fallback. Fan-out width is fixed at the number of extraction kinds.

use serde::Serialize;
use tracing::{debug, warn};

use crate::extraction::client::{Extractor, ExtractorError};
use crate::extraction::retry::{invoke_with_retry, RetryOutcome, MAX_ATTEMPTS};
use crate::extraction::schema::ExtractionResult;
use crate::extraction::{ExtractionInput, ExtractionKind};
use crate::models::candidate::CandidateRecord;
use crate::pipeline::assemble::{assemble, Mode};

/// Terminal failure shape returned when phase 1 cannot reach the extraction
/// service at all. Every field is blanked.
#[derive(Debug, Clone, Serialize)]
pub struct FailureRecord {
    pub status: String,
    pub candidate_id: String,
    pub name: String,
    pub email_id: String,
    pub job_role: String,
    pub error: String,
}

impl FailureRecord {
    fn unsuccessful(error: &ExtractorError) -> Self {
        FailureRecord {
            status: "Unsuccessful".to_string(),
            candidate_id: String::new(),
            name: String::new(),
            email_id: String::new(),
            job_role: String::new(),
            error: error.to_string(),
        }
    }
}

#[derive(Debug)]
pub enum ProcessOutcome {
    Processed(CandidateRecord),
    Failed(FailureRecord),
}

/// Runs the full fan-out for one candidate and assembles the record.
pub async fn process(
    extractor: &dyn Extractor,
    input: &ExtractionInput,
    mode: Mode,
) -> ProcessOutcome {
    // Phase 1: contact extraction, blocking.
    let contact = match phase_one_contact(extractor, input).await {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!(error = %e, "contact extraction unreachable, aborting candidate");
            return ProcessOutcome::Failed(FailureRecord::unsuccessful(&e));
        }
    };

    let email = match &contact.result {
        ExtractionResult::Contact(c) => c.email().to_string(),
        _ => String::new(),
    };
    let phase_two_input = input.with_email(&email);
    debug!(
        email_resolved = !email.is_empty(),
        "phase 1 complete, dispatching phase 2"
    );

    // Phase 2: the remaining kinds, concurrently. A slow sibling stalls the
    // join but a failed one only contributes its fallback.
    let (
        name,
        score,
        summary,
        custom_scores,
        other_comments,
        functional,
        technical,
        education,
        projects,
        company,
        yoe,
        location,
        overview,
        designation,
    ) = tokio::join!(
        invoke_with_retry(extractor, ExtractionKind::Name, &phase_two_input),
        invoke_with_retry(extractor, ExtractionKind::Score, &phase_two_input),
        invoke_with_retry(extractor, ExtractionKind::Summary, &phase_two_input),
        invoke_with_retry(extractor, ExtractionKind::CustomScores, &phase_two_input),
        invoke_with_retry(extractor, ExtractionKind::OtherComments, &phase_two_input),
        invoke_with_retry(
            extractor,
            ExtractionKind::FunctionalConstituent,
            &phase_two_input
        ),
        invoke_with_retry(
            extractor,
            ExtractionKind::TechnicalConstituent,
            &phase_two_input
        ),
        invoke_with_retry(extractor, ExtractionKind::Education, &phase_two_input),
        invoke_with_retry(extractor, ExtractionKind::Projects, &phase_two_input),
        invoke_with_retry(extractor, ExtractionKind::Company, &phase_two_input),
        invoke_with_retry(
            extractor,
            ExtractionKind::YearsOfExperience,
            &phase_two_input
        ),
        invoke_with_retry(extractor, ExtractionKind::Location, &phase_two_input),
        invoke_with_retry(
            extractor,
            ExtractionKind::RecruiterOverview,
            &phase_two_input
        ),
        invoke_with_retry(extractor, ExtractionKind::Designation, &phase_two_input),
    );

    let outcomes = vec![
        contact,
        name,
        score,
        summary,
        custom_scores,
        other_comments,
        functional,
        technical,
        education,
        projects,
        company,
        yoe,
        location,
        overview,
        designation,
    ];

    ProcessOutcome::Processed(assemble(input, mode, &outcomes))
}

/// Phase-1 contact extraction. Schema failures retry up to the shared budget
/// and then fall back; a transport failure propagates so the orchestrator can
/// abort the whole candidate.
async fn phase_one_contact(
    extractor: &dyn Extractor,
    input: &ExtractionInput,
) -> Result<RetryOutcome, ExtractorError> {
    let kind = ExtractionKind::Contact;
    for attempt in 1..=MAX_ATTEMPTS {
        let raw = extractor.invoke(kind, input).await?;
        match kind.validate(&raw) {
            Ok(result) => {
                return Ok(RetryOutcome {
                    kind,
                    succeeded: true,
                    result,
                    attempts_used: attempt,
                });
            }
            Err(e) => {
                debug!(attempt, error = %e, "contact payload failed validation, retrying");
            }
        }
    }

    Ok(RetryOutcome {
        kind,
        succeeded: false,
        result: kind.fallback(),
        attempts_used: MAX_ATTEMPTS,
    })
}
