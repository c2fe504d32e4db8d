//! PDF compilation of classified resume blocks.

use tracing::info;

use crate::errors::PipelineError;
use crate::render::markup::{document_markup, StyleConfig};
use crate::render::world::DocumentWorld;
use crate::render::Block;

/// Compiles `blocks` into PDF bytes under the given style.
pub fn render_pdf(blocks: &[Block], style: &StyleConfig) -> Result<Vec<u8>, PipelineError> {
    let markup = document_markup(blocks, style);
    let world = DocumentWorld::new(markup);

    let compiled = typst::compile(&world);
    let document = compiled.output.map_err(|diagnostics| {
        let messages = diagnostics
            .iter()
            .map(|d| d.message.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        PipelineError::Render(messages)
    })?;

    let pdf = typst_pdf::pdf(&document, &typst_pdf::PdfOptions::default()).map_err(
        |diagnostics| {
            let messages = diagnostics
                .iter()
                .map(|d| d.message.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            PipelineError::Render(messages)
        },
    )?;

    info!("rendered {} pages of PDF output", document.pages.len());
    Ok(pdf)
}
