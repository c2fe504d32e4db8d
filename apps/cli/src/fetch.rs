//! Job description fetching — pulls a posting from a URL and reduces the
//! page to plain text.
//!
//! Strips chrome elements, tries a fixed priority list of content-area
//! selectors, falls back to the full body, collapses whitespace into
//! newline-joined chunks, and truncates to a hard character limit so the
//! prompt stays within rate limits.

use ego_tree::NodeRef;
use scraper::{Html, Node, Selector};
use tracing::info;

use crate::errors::PipelineError;

/// Hard cap on the extracted job description length, in characters.
pub const MAX_JOB_DESCRIPTION_CHARS: usize = 20_000;

const FETCH_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Content-area selectors, tried in priority order before falling back to
/// the page body.
const CONTENT_SELECTORS: &[&str] = &[
    "div.job-description, section.job-description",
    "div.jobdescription, section.jobdescription",
    "div#job-description, section#job-description",
    "div.description, section.description",
    r#"div[role="main"], section[role="main"]"#,
];

/// Elements whose entire subtree is discarded.
const STRIPPED_TAGS: &[&str] = &["script", "style", "nav", "footer", "header", "noscript"];

/// Fetches a job posting and returns its extracted plain text.
pub async fn fetch_job_description(url: &str) -> Result<String, PipelineError> {
    info!("fetching job description from {url}");

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(FETCH_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| PipelineError::SourceRead(format!("{url}: {e}")))?;

    let body = client
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| PipelineError::SourceRead(format!("{url}: {e}")))?
        .text()
        .await
        .map_err(|e| PipelineError::SourceRead(format!("{url}: {e}")))?;

    let text = extract_job_text(&body);
    info!("fetched job description ({} characters)", text.chars().count());
    Ok(text)
}

/// Pure HTML-to-text extraction. Separated from the HTTP call so it can be
/// tested against static fixtures.
pub fn extract_job_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let mut raw = String::new();
    let content = CONTENT_SELECTORS.iter().find_map(|css| {
        let selector = Selector::parse(css).ok()?;
        document.select(&selector).next()
    });

    match content {
        Some(element) => collect_text(*element, &mut raw),
        None => {
            let body = Selector::parse("body").ok().and_then(|selector| {
                document.select(&selector).next()
            });
            match body {
                Some(element) => collect_text(*element, &mut raw),
                None => collect_text(*document.root_element(), &mut raw),
            }
        }
    }

    truncate_chars(&normalize_whitespace(&raw), MAX_JOB_DESCRIPTION_CHARS)
}

/// Recursively gathers text, skipping the subtrees of stripped elements.
fn collect_text(node: NodeRef<'_, Node>, out: &mut String) {
    for child in node.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => {
                if !STRIPPED_TAGS.contains(&element.name()) {
                    collect_text(child, out);
                }
            }
            _ => {}
        }
    }
}

/// Collapses whitespace: each line is trimmed and split on double spaces,
/// and the non-empty chunks are rejoined with single newlines.
fn normalize_whitespace(text: &str) -> String {
    text.lines()
        .flat_map(|line| line.trim().split("  "))
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        text.chars().take(max).collect()
    }
}
