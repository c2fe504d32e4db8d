//! Prompt definitions for the four pipeline stages.
//!
//! Each JSON stage spells out its exact output schema in the system prompt
//! and forbids prose around the JSON object. Slots are filled by
//! `PromptStage::render`.

use crate::errors::StageName;
use crate::pipeline::stage::PromptStage;

pub const KEYWORD_STAGE: PromptStage = PromptStage {
    name: StageName::KeywordExtraction,
    system: "\
You are an expert ATS (Applicant Tracking System) analyst. You extract the \
keywords and requirements a screening system would look for in a job \
description.

Respond with ONLY a JSON object in exactly this shape, no prose before or \
after it:
{
  \"technical_skills\": [\"...\"],
  \"soft_skills\": [\"...\"],
  \"qualifications\": [\"...\"],
  \"tools_technologies\": [\"...\"],
  \"certifications\": [\"...\"],
  \"industry_terms\": [\"...\"]
}

All six keys must be present. Use an empty array for any category the job \
description does not mention.",
    template: "\
Analyze this job description and extract the ATS keywords:

{job_description}",
};

pub const MATCH_STAGE: PromptStage = PromptStage {
    name: StageName::MatchScoring,
    system: "\
You are an expert ATS match analyst. You compare a resume against a job \
description and its extracted keywords, and score how well they align.

Respond with ONLY a JSON object in exactly this shape, no prose before or \
after it:
{
  \"overall_match_percentage\": 0-100,
  \"category_scores\": {\"technical_skills\": 0-100, \"experience\": 0-100, ...},
  \"strengths\": [\"...\"],
  \"gaps\": [\"...\"],
  \"recommendation\": \"...\"
}

All scores are integers between 0 and 100. Be honest: a weak match should \
score low.",
    template: "\
Job description:
{job_description}

Extracted ATS keywords:
{keywords}

Resume:
{resume}

Score how well this resume matches the job.",
};

pub const TAILORING_STAGE: PromptStage = PromptStage {
    name: StageName::ResumeTailoring,
    system: "\
You are an expert resume writer. You rewrite a resume so it targets a \
specific job, truthfully emphasizing the most relevant experience and \
naturally incorporating the job's ATS keywords. Never invent experience \
the candidate does not have.

Respond with ONLY the rewritten resume in markdown, no commentary. Use this \
structure:
- '# ' for the candidate's name
- '## ' for section headings (Summary, Experience, Skills, Education)
- '### ' for job titles, with the company after ' - '
- '- ' for bullet points
- '*...*' for date ranges on their own line
- '**...**' to bold key terms inside a line",
    template: "\
Job description:
{job_description}

ATS keywords to incorporate:
{keywords}

Match analysis (address the gaps where truthful):
{match_analysis}

Original resume:
{resume}

Rewrite the resume for this job.",
};

pub const EVALUATION_STAGE: PromptStage = PromptStage {
    name: StageName::CandidacyEvaluation,
    system: "\
You are a senior technical recruiter with fifteen years of experience \
placing engineers. You evaluate a tailored resume against a job description \
the way a recruiter screening candidates would.

Respond with ONLY a JSON object in exactly this shape, no prose before or \
after it:
{
  \"candidacy_score\": 0-100,
  \"likelihood_to_proceed\": \"High\" | \"Medium\" | \"Low\",
  \"interview_readiness\": {
    \"technical_prep\": \"Strong\" | \"Moderate\" | \"Weak\",
    \"behavioral_prep\": \"Strong\" | \"Moderate\" | \"Weak\",
    \"cultural_fit\": \"Strong\" | \"Moderate\" | \"Weak\"
  },
  \"competitive_advantages\": [\"...\"],
  \"potential_concerns\": [\"...\"],
  \"key_talking_points\": [\"...\"],
  \"interview_prep_focus\": [\"...\"],
  \"salary_leverage\": \"...\",
  \"recruiter_notes\": \"...\"
}

Use exactly the enum spellings shown. candidacy_score is an integer between \
0 and 100.",
    template: "\
Job description:
{job_description}

ATS match analysis:
{match_analysis}

Tailored resume:
{tailored_resume}

Evaluate this candidacy.",
};
