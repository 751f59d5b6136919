//! Parameterized filter-predicate construction.
//!
//! Every user-supplied value is pushed as a bind parameter; only the
//! configured table name is spliced into the statement text.

use sqlx::{Postgres, QueryBuilder};

use crate::errors::AppError;

/// Conjunctive filter over stored candidates.
#[derive(Debug, Clone, Default)]
pub struct SearchPredicate {
    /// OR-combined case-insensitive substring matches over the resume text,
    /// wrapped in one AND term.
    pub keywords: Vec<String>,
    /// Case-insensitive equality on job role.
    pub job_role: Option<String>,
    /// Inclusive band on years of experience.
    pub experience_band: Option<(f64, f64)>,
    /// When set, order by recency and cap rows in the query itself.
    pub recent_limit: Option<i64>,
}

/// Parses the human experience-range string `"<min> and <max> Years"` into an
/// inclusive numeric band. Malformed input is a fatal validation error, never
/// silently ignored.
pub fn parse_experience_range(raw: &str) -> Result<(f64, f64), AppError> {
    let malformed = || {
        AppError::Validation(format!(
            "experienceFilter must look like '<min> and <max> Years', got '{raw}'"
        ))
    };

    let cleaned = raw
        .trim()
        .trim_end_matches("Years")
        .trim_end_matches("years")
        .trim();
    let (min_part, max_part) = cleaned.split_once(" and ").ok_or_else(malformed)?;
    let min: f64 = min_part.trim().parse().map_err(|_| malformed())?;
    let max: f64 = max_part.trim().parse().map_err(|_| malformed())?;
    if min > max {
        return Err(malformed());
    }
    Ok((min, max))
}

/// Escapes LIKE wildcards in a keyword so it matches literally.
fn escape_like(keyword: &str) -> String {
    keyword
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

pub fn build_search_query(
    table: &str,
    predicate: &SearchPredicate,
) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new(format!("SELECT * FROM {table} WHERE 1=1"));

    let keywords: Vec<&String> = predicate
        .keywords
        .iter()
        .filter(|k| !k.trim().is_empty())
        .collect();
    if !keywords.is_empty() {
        query.push(" AND (");
        let mut clause = query.separated(" OR ");
        for keyword in keywords {
            clause.push("resume_raw_text ILIKE ");
            clause.push_bind_unseparated(format!("%{}%", escape_like(keyword.trim())));
        }
        query.push(")");
    }

    if let Some(role) = &predicate.job_role {
        query.push(" AND LOWER(job_role) = LOWER(");
        query.push_bind(role.clone());
        query.push(")");
    }

    if let Some((min, max)) = predicate.experience_band {
        query.push(" AND years_of_experience >= ");
        query.push_bind(min);
        query.push(" AND years_of_experience <= ");
        query.push_bind(max);
    }

    if let Some(limit) = predicate.recent_limit {
        query.push(" ORDER BY created_at DESC LIMIT ");
        query.push_bind(limit);
    }

    query
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_experience_range() {
        assert_eq!(parse_experience_range("2 and 7 Years").unwrap(), (2.0, 7.0));
        assert_eq!(
            parse_experience_range("  1.5 and 3 Years ").unwrap(),
            (1.5, 3.0)
        );
    }

    #[test]
    fn test_inclusive_band_semantics() {
        let (min, max) = parse_experience_range("2 and 7 Years").unwrap();
        let years = [1.5, 4.0, 6.2];
        let matched: Vec<f64> = years
            .iter()
            .copied()
            .filter(|y| *y >= min && *y <= max)
            .collect();
        assert_eq!(matched, vec![4.0, 6.2]);
    }

    #[test]
    fn test_malformed_experience_range_is_fatal() {
        for raw in ["abc and Years", "2 to 7 Years", "", "7 and 2 Years"] {
            let err = parse_experience_range(raw).unwrap_err();
            assert!(matches!(err, AppError::Validation(_)), "input: {raw}");
        }
    }

    #[test]
    fn test_keywords_become_bound_or_terms() {
        let predicate = SearchPredicate {
            keywords: vec!["rust".to_string(), "kafka".to_string()],
            ..Default::default()
        };
        let query = build_search_query("resume_store", &predicate);
        let sql = query.sql();
        assert!(sql.contains("(resume_raw_text ILIKE $1 OR resume_raw_text ILIKE $2)"));
        // The keyword text itself never lands in the statement.
        assert!(!sql.contains("rust"));
        assert!(!sql.contains("kafka"));
    }

    #[test]
    fn test_full_predicate_shape() {
        let predicate = SearchPredicate {
            keywords: vec!["sql".to_string()],
            job_role: Some("Data Engineer".to_string()),
            experience_band: Some((2.0, 7.0)),
            recent_limit: Some(5),
        };
        let query = build_search_query("resume_store", &predicate);
        let sql = query.sql();
        assert!(sql.contains("LOWER(job_role) = LOWER($2)"));
        assert!(sql.contains("years_of_experience >= $3"));
        assert!(sql.contains("years_of_experience <= $4"));
        assert!(sql.ends_with("ORDER BY created_at DESC LIMIT $5"));
    }

    #[test]
    fn test_no_filters_selects_everything() {
        let query = build_search_query("resume_store", &SearchPredicate::default());
        assert_eq!(query.sql(), "SELECT * FROM resume_store WHERE 1=1");
    }

    #[test]
    fn test_like_wildcards_match_literally() {
        assert_eq!(escape_like("100%_rust\\"), "100\\%\\_rust\\\\");
    }
}
