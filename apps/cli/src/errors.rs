use std::path::PathBuf;

use thiserror::Error;

use crate::llm_client::LlmError;

/// Identifies which pipeline stage produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageName {
    KeywordExtraction,
    MatchScoring,
    ResumeTailoring,
    CandidacyEvaluation,
}

impl std::fmt::Display for StageName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StageName::KeywordExtraction => "keyword extraction",
            StageName::MatchScoring => "match scoring",
            StageName::ResumeTailoring => "resume tailoring",
            StageName::CandidacyEvaluation => "candidacy evaluation",
        };
        f.write_str(name)
    }
}

/// Pipeline-level error type.
///
/// Every core operation either returns a fully-validated artifact or fails
/// with one of these kinds. The run halts at the first failure; artifacts
/// already written by completed stages stay on disk.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Missing required credential or invalid configuration. Fatal before
    /// any run starts.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Resume file missing/unreadable, or job URL fetch failure. Aborts
    /// before the pipeline starts.
    #[error("source read error: {0}")]
    SourceRead(String),

    /// A stage's output failed shape, range, or enum validation. Carries the
    /// raw backend text for diagnostics. No automatic retry at this layer.
    #[error("{stage} returned a malformed response: {reason}")]
    MalformedResponse {
        stage: StageName,
        reason: String,
        raw: String,
    },

    /// Failure writing (or re-reading for merge) an output artifact.
    #[error("failed to persist {}: {reason}", path.display())]
    Persistence { path: PathBuf, reason: String },

    /// Transport-level backend failure (HTTP error, rate-limit exhaustion,
    /// empty content). Treated as a normal stage failure.
    #[error("LLM error: {0}")]
    Backend(#[from] LlmError),

    /// The rendering backend rejected the generated document.
    #[error("render error: {0}")]
    Render(String),
}

impl PipelineError {
    pub fn persistence(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        PipelineError::Persistence {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
