//! Stage 2 — ATS match scoring.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::PipelineError;
use crate::llm_client::TextGenerator;
use crate::pipeline::keywords::KeywordSet;
use crate::pipeline::prompts::MATCH_STAGE;

/// Scored alignment between a resume and a job description.
///
/// Scores are integers in 0..=100; any score outside that range (including
/// each per-category score) fails validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchAnalysis {
    pub overall_match_percentage: u8,
    pub category_scores: BTreeMap<String, u8>,
    pub strengths: Vec<String>,
    pub gaps: Vec<String>,
    pub recommendation: String,
}

impl MatchAnalysis {
    fn validate(&self) -> Result<(), String> {
        if self.overall_match_percentage > 100 {
            return Err(format!(
                "overall_match_percentage {} is out of range 0-100",
                self.overall_match_percentage
            ));
        }
        for (category, score) in &self.category_scores {
            if *score > 100 {
                return Err(format!(
                    "category_scores.{category} = {score} is out of range 0-100"
                ));
            }
        }
        Ok(())
    }
}

/// Runs the match-scoring stage over the job description, the extracted
/// keywords and the original resume text.
pub async fn score_match(
    backend: &dyn TextGenerator,
    job_description: &str,
    resume_text: &str,
    keywords: &KeywordSet,
) -> Result<MatchAnalysis, PipelineError> {
    let keywords_json = serde_json::to_string_pretty(keywords)
        .map_err(|e| PipelineError::SourceRead(format!("keyword serialization: {e}")))?;

    let analysis: MatchAnalysis = MATCH_STAGE
        .invoke_json(
            backend,
            &[
                ("job_description", job_description),
                ("keywords", &keywords_json),
                ("resume", resume_text),
            ],
            MatchAnalysis::validate,
        )
        .await?;

    info!(
        "match scored: {}% overall, {} gaps identified",
        analysis.overall_match_percentage,
        analysis.gaps.len()
    );
    Ok(analysis)
}
