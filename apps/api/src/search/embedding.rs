//! Embedding client used for semantic re-ranking.
//!
//! ARCHITECTURAL RULE: all embedding calls go through the `Embedder` trait so
//! the ranking code and its tests never touch the provider API directly.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const EMBEDDINGS_API_URL: &str = "https://api.openai.com/v1/embeddings";
/// Hardcoded to prevent accidental drift between stored and query embeddings.
pub const EMBEDDING_MODEL: &str = "text-embedding-3-small";

#[derive(Debug, Error)]
pub enum EmbedError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("embedding count mismatch: asked for {expected}, got {actual}")]
    CountMismatch { expected: usize, actual: usize },
}

#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embeds each text, preserving input order.
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError>;
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingDatum>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingDatum {
    index: usize,
    embedding: Vec<f32>,
}

/// Production embedder backed by the OpenAI embeddings API.
#[derive(Clone)]
pub struct HttpEmbedder {
    client: Client,
    api_key: String,
}

impl HttpEmbedder {
    pub fn new(api_key: String) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()?;
        Ok(Self { client, api_key })
    }
}

#[async_trait]
impl Embedder for HttpEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError> {
        let response = self
            .client
            .post(EMBEDDINGS_API_URL)
            .bearer_auth(&self.api_key)
            .json(&EmbeddingRequest {
                model: EMBEDDING_MODEL,
                input: texts,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(EmbedError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let mut payload: EmbeddingResponse = response.json().await?;
        if payload.data.len() != texts.len() {
            return Err(EmbedError::CountMismatch {
                expected: texts.len(),
                actual: payload.data.len(),
            });
        }

        // The API is documented to preserve order, but index is authoritative.
        payload.data.sort_by_key(|d| d.index);
        debug!(count = payload.data.len(), "embeddings received");
        Ok(payload.data.into_iter().map(|d| d.embedding).collect())
    }
}

/// Cosine similarity between two vectors. Zero-norm or mismatched inputs
/// score 0.0 rather than poisoning the ranking.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
