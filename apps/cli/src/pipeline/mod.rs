//! The four-stage tailoring pipeline and its orchestrator.
//!
//! Stage order is fixed: keyword extraction → match scoring → resume
//! tailoring → candidacy evaluation. Each stage consumes validated
//! artifacts from earlier stages and makes exactly one backend call.

pub mod evaluation;
pub mod keywords;
pub mod match_score;
pub mod prompts;
pub mod report;
pub mod runner;
pub mod stage;
pub mod tailoring;

pub use evaluation::{evaluate_candidacy, CandidacyEvaluation, InterviewReadiness, Likelihood, Readiness};
pub use keywords::{extract_keywords, KeywordSet};
pub use match_score::{score_match, MatchAnalysis};
pub use report::{attach_evaluation, write_report, RunReport};
pub use runner::{Pipeline, RunOutput};
pub use tailoring::{tailor_resume, TailoredResume};
