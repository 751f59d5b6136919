//! Result ranking: semantic re-rank against a job description when one is
//! supplied, otherwise overall resume score.

use std::cmp::Reverse;

use crate::errors::AppError;
use crate::models::candidate::CandidateRecord;
use crate::search::embedding::{cosine_similarity, Embedder};

/// Re-ranks candidates by cosine similarity between the job description
/// embedding and each candidate's recruiter-overview embedding. Returns the
/// top `limit`, descending; ties keep their original relative order.
pub async fn rank_by_description(
    embedder: &dyn Embedder,
    job_description: &str,
    records: Vec<CandidateRecord>,
    limit: usize,
) -> Result<Vec<CandidateRecord>, AppError> {
    let mut texts = Vec::with_capacity(records.len() + 1);
    texts.push(job_description.to_string());
    texts.extend(records.iter().map(CandidateRecord::overview_text));

    let embeddings = embedder
        .embed(&texts)
        .await
        .map_err(|e| AppError::Embedding(e.to_string()))?;
    let (description_vec, candidate_vecs) = embeddings
        .split_first()
        .ok_or_else(|| AppError::Embedding("empty embedding response".to_string()))?;

    let mut scored: Vec<(f32, CandidateRecord)> = candidate_vecs
        .iter()
        .zip(records)
        .map(|(vec, record)| (cosine_similarity(description_vec, vec), record))
        .collect();
    // Stable sort: equal similarities preserve query order.
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

    Ok(scored
        .into_iter()
        .take(limit)
        .map(|(_, record)| record)
        .collect())
}

/// Default ordering when no job description is supplied: overall resume
/// score, descending, stable.
pub fn rank_by_score(mut records: Vec<CandidateRecord>) -> Vec<CandidateRecord> {
    records.sort_by_key(|r| Reverse(r.overall_score()));
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::embedding::EmbedError;
    use async_trait::async_trait;
    use chrono::Utc;
    use serde_json::json;
    use std::collections::HashMap;

    /// Maps each known text to a fixed unit vector.
    struct StubEmbedder {
        vectors: HashMap<String, Vec<f32>>,
    }

    #[async_trait]
    impl Embedder for StubEmbedder {
        async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError> {
            Ok(texts
                .iter()
                .map(|t| self.vectors.get(t).cloned().unwrap_or(vec![0.0, 0.0]))
                .collect())
        }
    }

    fn record(email: &str, overview: &str, score: i64) -> CandidateRecord {
        CandidateRecord {
            candidate_id: format!("Candidate-{email}"),
            name: email.to_string(),
            job_role: "SWE".to_string(),
            resume_raw_text: "text".to_string(),
            email_id: email.to_string(),
            mobile_number: String::new(),
            years_of_experience: 0.0,
            relevant_years_of_experience: 0.0,
            summary_overview: String::new(),
            score_resume: json!({"score": score, "items": []}),
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
            get_recruiters_overview: json!({"overview": [overview]}),
            get_designation: json!({}),
            mode: "adhoc".to_string(),
            created_at: Utc::now(),
        }
    }

    /// Unit vector at a known cosine to the x-axis.
    fn at_cosine(c: f32) -> Vec<f32> {
        vec![c, (1.0 - c * c).sqrt()]
    }

    #[tokio::test]
    async fn test_rerank_returns_top_limit_by_similarity() {
        let jd = "Senior data engineer with streaming experience".to_string();
        let mut vectors = HashMap::new();
        vectors.insert(jd.clone(), vec![1.0, 0.0]);
        vectors.insert("a".to_string(), at_cosine(0.9));
        vectors.insert("b".to_string(), at_cosine(0.4));
        vectors.insert("c".to_string(), at_cosine(0.7));
        let embedder = StubEmbedder { vectors };

        let records = vec![
            record("a@ex.com", "a", 10),
            record("b@ex.com", "b", 99),
            record("c@ex.com", "c", 50),
        ];
        let ranked = rank_by_description(&embedder, &jd, records, 2).await.unwrap();

        let emails: Vec<&str> = ranked.iter().map(|r| r.email_id.as_str()).collect();
        assert_eq!(emails, vec!["a@ex.com", "c@ex.com"]);
    }

    #[tokio::test]
    async fn test_rerank_ties_keep_original_order() {
        let jd = "jd".to_string();
        let mut vectors = HashMap::new();
        vectors.insert(jd.clone(), vec![1.0, 0.0]);
        vectors.insert("same".to_string(), at_cosine(0.5));
        let embedder = StubEmbedder { vectors };

        let records = vec![
            record("first@ex.com", "same", 0),
            record("second@ex.com", "same", 0),
        ];
        let ranked = rank_by_description(&embedder, &jd, records, 10).await.unwrap();
        assert_eq!(ranked[0].email_id, "first@ex.com");
        assert_eq!(ranked[1].email_id, "second@ex.com");
    }

    #[test]
    fn test_score_ordering_is_descending_and_stable() {
        let records = vec![
            record("low@ex.com", "", 20),
            record("high@ex.com", "", 90),
            record("tie-a@ex.com", "", 50),
            record("tie-b@ex.com", "", 50),
        ];
        let ranked = rank_by_score(records);
        let emails: Vec<&str> = ranked.iter().map(|r| r.email_id.as_str()).collect();
        assert_eq!(
            emails,
            vec!["high@ex.com", "tie-a@ex.com", "tie-b@ex.com", "low@ex.com"]
        );
    }
}
