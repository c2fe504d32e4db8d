//! Stage 4 — candidacy evaluation from a recruiter's point of view.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::PipelineError;
use crate::llm_client::TextGenerator;
use crate::pipeline::match_score::MatchAnalysis;
use crate::pipeline::prompts::EVALUATION_STAGE;
use crate::pipeline::tailoring::TailoredResume;

/// How likely a recruiter is to move the candidate forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Likelihood {
    High,
    Medium,
    Low,
}

/// Preparedness rating for one interview dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Readiness {
    Strong,
    Moderate,
    Weak,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewReadiness {
    pub technical_prep: Readiness,
    pub behavioral_prep: Readiness,
    pub cultural_fit: Readiness,
}

/// A recruiter-style assessment of the tailored resume against the job.
///
/// The list fields default to empty when the backend omits them; the score,
/// both enums blocks, `salary_leverage` and `recruiter_notes` are required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidacyEvaluation {
    pub candidacy_score: u8,
    pub likelihood_to_proceed: Likelihood,
    pub interview_readiness: InterviewReadiness,
    #[serde(default)]
    pub competitive_advantages: Vec<String>,
    #[serde(default)]
    pub potential_concerns: Vec<String>,
    #[serde(default)]
    pub key_talking_points: Vec<String>,
    #[serde(default)]
    pub interview_prep_focus: Vec<String>,
    pub salary_leverage: String,
    pub recruiter_notes: String,
}

impl CandidacyEvaluation {
    fn validate(&self) -> Result<(), String> {
        if self.candidacy_score > 100 {
            return Err(format!(
                "candidacy_score {} is out of range 0-100",
                self.candidacy_score
            ));
        }
        Ok(())
    }
}

/// Runs the candidacy-evaluation stage.
pub async fn evaluate_candidacy(
    backend: &dyn TextGenerator,
    job_description: &str,
    tailored: &TailoredResume,
    analysis: &MatchAnalysis,
) -> Result<CandidacyEvaluation, PipelineError> {
    let analysis_json = serde_json::to_string_pretty(analysis)
        .map_err(|e| PipelineError::SourceRead(format!("analysis serialization: {e}")))?;

    let evaluation: CandidacyEvaluation = EVALUATION_STAGE
        .invoke_json(
            backend,
            &[
                ("job_description", job_description),
                ("match_analysis", &analysis_json),
                ("tailored_resume", tailored.as_str()),
            ],
            CandidacyEvaluation::validate,
        )
        .await?;

    info!(
        "candidacy evaluated: score {}, likelihood {:?}",
        evaluation.candidacy_score, evaluation.likelihood_to_proceed
    );
    Ok(evaluation)
}
