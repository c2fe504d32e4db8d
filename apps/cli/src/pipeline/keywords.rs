//! Stage 1 — ATS keyword extraction.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::PipelineError;
use crate::llm_client::TextGenerator;
use crate::pipeline::prompts::KEYWORD_STAGE;

/// Categorized ATS keywords extracted from a job description.
///
/// All six categories are required in the backend's reply; a category the
/// posting does not mention is an empty list, not an absent key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeywordSet {
    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub qualifications: Vec<String>,
    pub tools_technologies: Vec<String>,
    pub certifications: Vec<String>,
    pub industry_terms: Vec<String>,
}

impl KeywordSet {
    pub fn total(&self) -> usize {
        self.technical_skills.len()
            + self.soft_skills.len()
            + self.qualifications.len()
            + self.tools_technologies.len()
            + self.certifications.len()
            + self.industry_terms.len()
    }
}

/// Runs the keyword-extraction stage against `job_description`.
pub async fn extract_keywords(
    backend: &dyn TextGenerator,
    job_description: &str,
) -> Result<KeywordSet, PipelineError> {
    let keywords: KeywordSet = KEYWORD_STAGE
        .invoke_json(
            backend,
            &[("job_description", job_description)],
            |_: &KeywordSet| Ok(()),
        )
        .await?;

    info!("extracted {} ATS keywords", keywords.total());
    Ok(keywords)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{PipelineError, StageName};
    use crate::pipeline::stage::test_support::CannedBackend;

    fn full_reply() -> String {
        serde_json::json!({
            "technical_skills": ["Rust", "PostgreSQL"],
            "soft_skills": ["communication"],
            "qualifications": ["5+ years backend"],
            "tools_technologies": ["Kafka"],
            "certifications": [],
            "industry_terms": ["fintech"]
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_extract_keywords_parses_all_categories() {
        let backend = CannedBackend::single(full_reply());
        let keywords = extract_keywords(&backend, "posting").await.unwrap();
        assert_eq!(keywords.technical_skills, vec!["Rust", "PostgreSQL"]);
        assert!(keywords.certifications.is_empty());
        assert_eq!(keywords.total(), 6);
    }

    #[tokio::test]
    async fn test_all_categories_empty_is_valid() {
        let backend = CannedBackend::single(
            serde_json::json!({
                "technical_skills": [],
                "soft_skills": [],
                "qualifications": [],
                "tools_technologies": [],
                "certifications": [],
                "industry_terms": []
            })
            .to_string(),
        );
        let keywords = extract_keywords(&backend, "posting").await.unwrap();
        assert_eq!(keywords.total(), 0);
    }

    #[test]
    fn test_serialized_category_names() {
        let keywords: KeywordSet = serde_json::from_str(&full_reply()).unwrap();
        let value = serde_json::to_value(&keywords).unwrap();
        let mut names: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                "certifications",
                "industry_terms",
                "qualifications",
                "soft_skills",
                "technical_skills",
                "tools_technologies",
            ]
        );
    }

    #[tokio::test]
    async fn test_absent_category_is_malformed() {
        let backend = CannedBackend::single(
            serde_json::json!({
                "technical_skills": ["Rust"],
                "soft_skills": [],
                "qualifications": [],
                "tools_technologies": [],
                "certifications": []
            })
            .to_string(),
        );
        let err = extract_keywords(&backend, "posting").await.unwrap_err();
        match err {
            PipelineError::MalformedResponse { stage, .. } => {
                assert_eq!(stage, StageName::KeywordExtraction);
            }
            other => panic!("expected MalformedResponse, got {other:?}"),
        }
    }
}
