//! Stage 3 — resume tailoring.

use tracing::info;

use crate::errors::PipelineError;
use crate::llm_client::TextGenerator;
use crate::pipeline::match_score::MatchAnalysis;
use crate::pipeline::prompts::TAILORING_STAGE;
use crate::pipeline::keywords::KeywordSet;

/// The rewritten resume, as the markdown dialect the renderer understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TailoredResume(pub String);

impl TailoredResume {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Runs the tailoring stage. Free-text output; the only validation is that
/// the reply is non-empty.
pub async fn tailor_resume(
    backend: &dyn TextGenerator,
    job_description: &str,
    resume_text: &str,
    keywords: &KeywordSet,
    analysis: &MatchAnalysis,
) -> Result<TailoredResume, PipelineError> {
    let keywords_json = serde_json::to_string_pretty(keywords)
        .map_err(|e| PipelineError::SourceRead(format!("keyword serialization: {e}")))?;
    let analysis_json = serde_json::to_string_pretty(analysis)
        .map_err(|e| PipelineError::SourceRead(format!("analysis serialization: {e}")))?;

    let text = TAILORING_STAGE
        .invoke_text(
            backend,
            &[
                ("job_description", job_description),
                ("keywords", &keywords_json),
                ("match_analysis", &analysis_json),
                ("resume", resume_text),
            ],
        )
        .await?;

    info!("tailored resume generated ({} lines)", text.lines().count());
    Ok(TailoredResume(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use crate::pipeline::stage::test_support::CannedBackend;

    fn fixtures() -> (KeywordSet, MatchAnalysis) {
        (
            KeywordSet {
                technical_skills: vec!["Rust".to_string()],
                soft_skills: vec![],
                certifications: vec![],
                qualifications: vec![],
                tools_technologies: vec![],
                industry_terms: vec![],
            },
            MatchAnalysis {
                overall_match_percentage: 60,
                category_scores: BTreeMap::new(),
                strengths: vec![],
                gaps: vec!["no Kubernetes".to_string()],
                recommendation: "apply".to_string(),
            },
        )
    }

    #[tokio::test]
    async fn test_tailor_returns_markdown_verbatim() {
        let (keywords, analysis) = fixtures();
        let backend = CannedBackend::single("# Jane Doe\n\n## Summary\n\nRust engineer.");
        let tailored = tailor_resume(&backend, "jd", "resume", &keywords, &analysis)
            .await
            .unwrap();
        assert_eq!(tailored.as_str(), "# Jane Doe\n\n## Summary\n\nRust engineer.");
    }

    #[tokio::test]
    async fn test_empty_reply_is_malformed() {
        let (keywords, analysis) = fixtures();
        let backend = CannedBackend::single("");
        let result = tailor_resume(&backend, "jd", "resume", &keywords, &analysis).await;
        assert!(matches!(
            result,
            Err(PipelineError::MalformedResponse { .. })
        ));
    }
}
