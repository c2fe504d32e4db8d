//! Resume loading — plain text or PDF, with cache-backed extraction.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::cache::ResumeCache;
use crate::errors::PipelineError;

/// A loaded resume: source path plus extracted plain text.
/// Created once per run; immutable afterwards.
#[derive(Debug, Clone)]
pub struct ResumeDocument {
    pub path: PathBuf,
    pub text: String,
}

/// Loads the resume at `path`, consulting the cache first.
///
/// `.pdf` files go through `pdf-extract` (page texts concatenated,
/// newline-joined); anything else is read as plain text. On a cache miss
/// the extracted text is cached under the file's current signature.
pub fn load_resume(path: &Path, cache: &mut ResumeCache) -> Result<ResumeDocument, PipelineError> {
    let cached = cache
        .get(path)
        .map_err(|e| source_read(path, &e))?
        .map(str::to_string);

    if let Some(text) = cached {
        info!("resume loaded from cache: {}", path.display());
        return Ok(ResumeDocument {
            path: path.to_path_buf(),
            text,
        });
    }

    let is_pdf = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);

    let text = if is_pdf {
        pdf_extract::extract_text(path)
            .map_err(|e| source_read(path, &e))?
            .trim()
            .to_string()
    } else {
        std::fs::read_to_string(path).map_err(|e| source_read(path, &e))?
    };

    cache
        .set(path, text.clone())
        .map_err(|e| source_read(path, &e))?;
    info!("resume parsed and cached: {}", path.display());

    Ok(ResumeDocument {
        path: path.to_path_buf(),
        text,
    })
}

fn source_read(path: &Path, err: &dyn std::fmt::Display) -> PipelineError {
    PipelineError::SourceRead(format!("{}: {err}", path.display()))
}
