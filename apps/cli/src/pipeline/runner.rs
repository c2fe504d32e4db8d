//! Pipeline orchestrator.
//!
//! Runs the four stages in order, persisting artifacts as soon as they are
//! final: the analysis report after stage 2, the markdown resume after
//! stage 3, the evaluation merge and the PDF after stage 4. A failing
//! stage halts the run; artifacts already on disk stay there.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Local;
use tracing::info;

use crate::cache::ResumeCache;
use crate::errors::PipelineError;
use crate::llm_client::TextGenerator;
use crate::loader::load_resume;
use crate::pipeline::evaluation::{evaluate_candidacy, CandidacyEvaluation};
use crate::pipeline::keywords::extract_keywords;
use crate::pipeline::match_score::{score_match, MatchAnalysis};
use crate::pipeline::report::{attach_evaluation, write_report, RunReport};
use crate::pipeline::tailoring::tailor_resume;
use crate::render::{parse_blocks, render_pdf, StyleConfig};

/// Paths and artifacts produced by a completed run.
#[derive(Debug)]
pub struct RunOutput {
    pub pdf_path: PathBuf,
    pub markdown_path: PathBuf,
    pub report_path: PathBuf,
    pub match_analysis: MatchAnalysis,
    pub evaluation: CandidacyEvaluation,
}

/// The tailoring pipeline: a generation backend, a resume cache, and an
/// output directory. One `run` call per job application.
pub struct Pipeline {
    backend: Arc<dyn TextGenerator>,
    cache: ResumeCache,
    out_dir: PathBuf,
}

impl Pipeline {
    pub fn new(backend: Arc<dyn TextGenerator>, out_dir: PathBuf) -> Self {
        Self {
            backend,
            cache: ResumeCache::new(),
            out_dir,
        }
    }

    /// Runs the full pipeline for one job description.
    ///
    /// `job_source` is recorded in the report: the posting URL, or
    /// "Manual input" for pasted descriptions.
    pub async fn run(
        &mut self,
        job_description: &str,
        resume_path: &std::path::Path,
        job_source: &str,
    ) -> Result<RunOutput, PipelineError> {
        let resume = load_resume(resume_path, &mut self.cache)?;
        let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();

        let report_path = self.out_dir.join(format!("resume_analysis_{timestamp}.json"));
        let markdown_path = self.out_dir.join(format!("tailored_resume_{timestamp}.md"));
        let pdf_path = self.out_dir.join(format!("tailored_resume_{timestamp}.pdf"));

        info!("stage 1/4: keyword extraction");
        let keywords = extract_keywords(self.backend.as_ref(), job_description).await?;

        info!("stage 2/4: match scoring");
        let analysis =
            score_match(self.backend.as_ref(), job_description, &resume.text, &keywords).await?;

        let report = RunReport {
            job_url: job_source.to_string(),
            timestamp: timestamp.clone(),
            keywords: keywords.clone(),
            match_analysis: analysis.clone(),
            recruiter_evaluation: None,
        };
        write_report(&report_path, &report)?;
        info!("analysis report written: {}", report_path.display());

        info!("stage 3/4: resume tailoring");
        let tailored = tailor_resume(
            self.backend.as_ref(),
            job_description,
            &resume.text,
            &keywords,
            &analysis,
        )
        .await?;
        std::fs::write(&markdown_path, tailored.as_str())
            .map_err(|e| PipelineError::persistence(&markdown_path, e))?;
        info!("tailored resume written: {}", markdown_path.display());

        info!("stage 4/4: candidacy evaluation");
        let evaluation =
            evaluate_candidacy(self.backend.as_ref(), job_description, &tailored, &analysis)
                .await?;
        attach_evaluation(&report_path, &evaluation)?;

        let blocks = parse_blocks(tailored.as_str());
        let pdf = render_pdf(&blocks, &StyleConfig::default())?;
        std::fs::write(&pdf_path, pdf).map_err(|e| PipelineError::persistence(&pdf_path, e))?;
        info!("PDF written: {}", pdf_path.display());

        Ok(RunOutput {
            pdf_path,
            markdown_path,
            report_path,
            match_analysis: analysis,
            evaluation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use async_trait::async_trait;
    use serde_json::Value;

    use crate::llm_client::{LlmError, TextGenerator};

    /// Canned backend keyed by which stage's system prompt is asking.
    struct StagedBackend {
        evaluation_reply: Option<String>,
    }

    impl StagedBackend {
        fn keywords_reply() -> String {
            serde_json::json!({
                "technical_skills": ["Rust", "Tokio"],
                "soft_skills": ["mentoring"],
                "certifications": [],
                "qualifications": ["5+ years"],
                "tools_technologies": ["Kubernetes"],
                "industry_terms": ["SaaS"]
            })
            .to_string()
        }

        fn analysis_reply() -> String {
            serde_json::json!({
                "overall_match_percentage": 78,
                "category_scores": {"technical_skills": 85},
                "strengths": ["async Rust depth"],
                "gaps": ["no SaaS background"],
                "recommendation": "tailor and apply"
            })
            .to_string()
        }

        fn evaluation_reply() -> String {
            serde_json::json!({
                "candidacy_score": 81,
                "likelihood_to_proceed": "High",
                "interview_readiness": {
                    "technical_prep": "Strong",
                    "behavioral_prep": "Moderate",
                    "cultural_fit": "Strong"
                },
                "competitive_advantages": ["deep systems experience"],
                "potential_concerns": [],
                "key_talking_points": ["pipeline rewrite project"],
                "interview_prep_focus": ["SaaS metrics vocabulary"],
                "salary_leverage": "solid",
                "recruiter_notes": "advance to screen"
            })
            .to_string()
        }
    }

    #[async_trait]
    impl TextGenerator for StagedBackend {
        async fn generate(&self, system: &str, _prompt: &str) -> Result<String, LlmError> {
            if system.contains("extract the keywords") {
                Ok(Self::keywords_reply())
            } else if system.contains("match analyst") {
                Ok(Self::analysis_reply())
            } else if system.contains("resume writer") {
                Ok("# Jane Doe\n\n## Summary\n\n**Rust** engineer.\n\n- built things".to_string())
            } else if system.contains("recruiter") {
                self.evaluation_reply
                    .clone()
                    .ok_or(LlmError::EmptyContent)
            } else {
                Err(LlmError::EmptyContent)
            }
        }
    }

    fn resume_file(dir: &std::path::Path) -> PathBuf {
        let path = dir.join("resume.txt");
        fs::write(&path, "Jane Doe\nRust engineer, ten years.").unwrap();
        path
    }

    #[tokio::test]
    async fn test_full_run_writes_all_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let resume = resume_file(dir.path());

        let backend = Arc::new(StagedBackend {
            evaluation_reply: Some(StagedBackend::evaluation_reply()),
        });
        let mut pipeline = Pipeline::new(backend, dir.path().to_path_buf());
        let output = pipeline
            .run("We need a Rust engineer.", &resume, "https://example.com/jobs/1")
            .await
            .unwrap();

        assert!(output.report_path.exists());
        assert!(output.markdown_path.exists());
        assert!(output.pdf_path.exists());

        let markdown = fs::read_to_string(&output.markdown_path).unwrap();
        assert!(markdown.starts_with("# Jane Doe"));

        let pdf = fs::read(&output.pdf_path).unwrap();
        assert!(pdf.starts_with(b"%PDF"));

        let report: Value =
            serde_json::from_str(&fs::read_to_string(&output.report_path).unwrap()).unwrap();
        assert_eq!(report["job_url"], "https://example.com/jobs/1");
        assert_eq!(report["match_analysis"]["overall_match_percentage"], 78);
        assert_eq!(report["recruiter_evaluation"]["candidacy_score"], 81);

        assert_eq!(output.match_analysis.overall_match_percentage, 78);
        assert_eq!(output.evaluation.candidacy_score, 81);
    }

    #[tokio::test]
    async fn test_stage4_failure_keeps_earlier_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let resume = resume_file(dir.path());

        let backend = Arc::new(StagedBackend {
            evaluation_reply: None,
        });
        let mut pipeline = Pipeline::new(backend, dir.path().to_path_buf());
        let result = pipeline
            .run("We need a Rust engineer.", &resume, "Manual input")
            .await;
        assert!(result.is_err());

        // Report and markdown from stages 2 and 3 survive the failure.
        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert!(names.iter().any(|n| n.starts_with("resume_analysis_")));
        assert!(names.iter().any(|n| n.starts_with("tailored_resume_") && n.ends_with(".md")));
        assert!(!names.iter().any(|n| n.ends_with(".pdf")));

        // The report has no evaluation attached.
        let report_name = names
            .iter()
            .find(|n| n.starts_with("resume_analysis_"))
            .unwrap();
        let report: Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join(report_name)).unwrap())
                .unwrap();
        assert!(report.get("recruiter_evaluation").is_none());
    }

    #[tokio::test]
    async fn test_missing_resume_fails_before_any_backend_call() {
        let dir = tempfile::tempdir().unwrap();
        let backend = Arc::new(StagedBackend {
            evaluation_reply: Some(StagedBackend::evaluation_reply()),
        });
        let mut pipeline = Pipeline::new(backend, dir.path().to_path_buf());

        let result = pipeline
            .run("jd", &dir.path().join("missing.txt"), "Manual input")
            .await;
        assert!(matches!(result, Err(PipelineError::SourceRead(_))));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
