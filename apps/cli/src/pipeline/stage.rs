//! Stage plumbing shared by the four pipeline stages.
//!
//! A stage is a system prompt plus a user-prompt template with `{slot}`
//! placeholders. JSON stages parse and validate the backend's reply;
//! failures surface as `MalformedResponse` carrying the raw text.

use serde::de::DeserializeOwned;

use crate::errors::{PipelineError, StageName};
use crate::llm_client::{strip_json_fences, TextGenerator};

/// A single pipeline stage definition.
pub struct PromptStage {
    pub name: StageName,
    pub system: &'static str,
    pub template: &'static str,
}

impl PromptStage {
    /// Fills the template's `{slot}` placeholders.
    pub fn render(&self, slots: &[(&str, &str)]) -> String {
        let mut prompt = self.template.to_string();
        for (slot, value) in slots {
            prompt = prompt.replace(&format!("{{{slot}}}"), value);
        }
        prompt
    }

    /// Makes one backend call and parses the reply as JSON into `T`,
    /// then runs `validate` on the parsed value.
    ///
    /// Both a parse failure and a validation failure become
    /// `MalformedResponse` with the raw backend text attached. No retry
    /// happens here.
    pub async fn invoke_json<T: DeserializeOwned>(
        &self,
        backend: &dyn TextGenerator,
        slots: &[(&str, &str)],
        validate: impl Fn(&T) -> Result<(), String>,
    ) -> Result<T, PipelineError> {
        let prompt = self.render(slots);
        let raw = backend.generate(self.system, &prompt).await?;
        let json = strip_json_fences(&raw);

        let value: T =
            serde_json::from_str(json).map_err(|e| PipelineError::MalformedResponse {
                stage: self.name,
                reason: format!("invalid JSON: {e}"),
                raw: raw.clone(),
            })?;

        validate(&value).map_err(|reason| PipelineError::MalformedResponse {
            stage: self.name,
            reason,
            raw: raw.clone(),
        })?;

        Ok(value)
    }

    /// Makes one backend call and returns the reply as free text.
    /// An empty or whitespace-only reply is malformed.
    pub async fn invoke_text(
        &self,
        backend: &dyn TextGenerator,
        slots: &[(&str, &str)],
    ) -> Result<String, PipelineError> {
        let prompt = self.render(slots);
        let raw = backend.generate(self.system, &prompt).await?;

        if raw.trim().is_empty() {
            return Err(PipelineError::MalformedResponse {
                stage: self.name,
                reason: "empty response".to_string(),
                raw,
            });
        }

        Ok(raw)
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::CannedBackend;
    use super::*;
    use serde::Deserialize;

    const STAGE: PromptStage = PromptStage {
        name: StageName::MatchScoring,
        system: "You are a test stage.",
        template: "Job:\n{job_description}\n\nResume:\n{resume}",
    };

    #[derive(Debug, Deserialize)]
    struct Reply {
        score: u8,
    }

    #[test]
    fn test_render_fills_all_slots() {
        let prompt = STAGE.render(&[
            ("job_description", "Rust engineer"),
            ("resume", "ten years of systems work"),
        ]);
        assert_eq!(prompt, "Job:\nRust engineer\n\nResume:\nten years of systems work");
    }

    #[tokio::test]
    async fn test_invoke_json_parses_fenced_reply() {
        let backend = CannedBackend::single("```json\n{\"score\": 85}\n```");
        let reply: Reply = STAGE
            .invoke_json(&backend, &[], |_| Ok(()))
            .await
            .unwrap();
        assert_eq!(reply.score, 85);
    }

    #[tokio::test]
    async fn test_invoke_json_invalid_json_carries_raw_text() {
        let backend = CannedBackend::single("I cannot produce JSON today.");
        let err = STAGE
            .invoke_json::<Reply>(&backend, &[], |_| Ok(()))
            .await
            .unwrap_err();
        match err {
            PipelineError::MalformedResponse { stage, raw, .. } => {
                assert_eq!(stage, StageName::MatchScoring);
                assert_eq!(raw, "I cannot produce JSON today.");
            }
            other => panic!("expected MalformedResponse, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invoke_json_validation_failure_is_malformed() {
        let backend = CannedBackend::single("{\"score\": 200}");
        let err = STAGE
            .invoke_json::<Reply>(&backend, &[], |r| {
                if r.score > 100 {
                    Err("score out of range".to_string())
                } else {
                    Ok(())
                }
            })
            .await
            .unwrap_err();
        match err {
            PipelineError::MalformedResponse { reason, raw, .. } => {
                assert_eq!(reason, "score out of range");
                assert_eq!(raw, "{\"score\": 200}");
            }
            other => panic!("expected MalformedResponse, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invoke_text_rejects_whitespace_reply() {
        let backend = CannedBackend::single("   \n\t  ");
        let err = STAGE.invoke_text(&backend, &[]).await.unwrap_err();
        assert!(matches!(err, PipelineError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn test_invoke_text_returns_reply_verbatim() {
        let backend = CannedBackend::single("# Tailored Resume\n\ncontent");
        let text = STAGE.invoke_text(&backend, &[]).await.unwrap();
        assert_eq!(text, "# Tailored Resume\n\ncontent");
    }
}
