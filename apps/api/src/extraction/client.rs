//! Transport to the extraction service.
//!
//! ARCHITECTURAL RULE: no other module may talk to the extraction service
//! directly. Every extraction call goes through the `Extractor` trait so the
//! orchestrator and its tests can swap the transport.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use super::{ExtractionInput, ExtractionKind};

const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum ExtractorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("extraction service returned {status} for {endpoint}: {message}")]
    Api {
        endpoint: &'static str,
        status: u16,
        message: String,
    },
}

/// One opaque extraction operation invocation. Implementations return the raw
/// JSON payload; schema validation happens in the retry wrapper.
#[async_trait]
pub trait Extractor: Send + Sync {
    async fn invoke(
        &self,
        kind: ExtractionKind,
        input: &ExtractionInput,
    ) -> Result<Value, ExtractorError>;
}

/// Wire body of `POST /<operationName>` on the extraction service.
#[derive(Debug, Serialize)]
struct ExtractionRequestBody<'a> {
    #[serde(rename = "resumeText")]
    resume_text: &'a str,
    #[serde(rename = "jobRole", skip_serializing_if = "Option::is_none")]
    job_role: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email_id: Option<&'a str>,
}

/// Production transport: posts to `<base_url>/<operationName>`.
#[derive(Clone)]
pub struct HttpExtractor {
    client: Client,
    base_url: String,
}

impl HttpExtractor {
    pub fn new(base_url: String) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Extractor for HttpExtractor {
    async fn invoke(
        &self,
        kind: ExtractionKind,
        input: &ExtractionInput,
    ) -> Result<Value, ExtractorError> {
        let endpoint = kind.endpoint();
        let body = ExtractionRequestBody {
            resume_text: &input.resume_text,
            job_role: input.job_role.as_deref(),
            email_id: input.email_id.as_deref(),
        };

        let response = self
            .client
            .post(format!("{}/{endpoint}", self.base_url))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ExtractorError::Api {
                endpoint,
                status: status.as_u16(),
                message,
            });
        }

        let payload: Value = response.json().await?;
        debug!(endpoint, "extraction response received");
        Ok(payload)
    }
}
