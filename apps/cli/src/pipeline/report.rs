//! Run-report persistence.
//!
//! The analysis report is written after stage 2 so it survives later stage
//! failures, then the recruiter evaluation is merged in after stage 4 via a
//! read-modify-write that preserves every existing field.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::PipelineError;
use crate::pipeline::evaluation::CandidacyEvaluation;
use crate::pipeline::keywords::KeywordSet;
use crate::pipeline::match_score::MatchAnalysis;

/// The JSON analysis report written alongside the tailored resume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// The posting URL, or "Manual input" when the job description came
    /// from stdin.
    pub job_url: String,
    pub timestamp: String,
    pub keywords: KeywordSet,
    pub match_analysis: MatchAnalysis,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recruiter_evaluation: Option<CandidacyEvaluation>,
}

/// Writes the report as pretty-printed JSON.
pub fn write_report(path: &Path, report: &RunReport) -> Result<(), PipelineError> {
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| PipelineError::persistence(path, e))?;
    std::fs::write(path, json).map_err(|e| PipelineError::persistence(path, e))
}

/// Merges the recruiter evaluation into an already-written report.
///
/// Reads the file back as a generic JSON object and inserts the
/// `recruiter_evaluation` key, so fields written earlier are never dropped.
pub fn attach_evaluation(
    path: &Path,
    evaluation: &CandidacyEvaluation,
) -> Result<(), PipelineError> {
    let text = std::fs::read_to_string(path).map_err(|e| PipelineError::persistence(path, e))?;
    let mut value: Value =
        serde_json::from_str(&text).map_err(|e| PipelineError::persistence(path, e))?;

    let object = value
        .as_object_mut()
        .ok_or_else(|| PipelineError::persistence(path, "report is not a JSON object"))?;
    object.insert(
        "recruiter_evaluation".to_string(),
        serde_json::to_value(evaluation).map_err(|e| PipelineError::persistence(path, e))?,
    );

    let json = serde_json::to_string_pretty(&value)
        .map_err(|e| PipelineError::persistence(path, e))?;
    std::fs::write(path, json).map_err(|e| PipelineError::persistence(path, e))
}
