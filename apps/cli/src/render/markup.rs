//! Block-to-typst translation.
//!
//! Produces typst source for the classified blocks under a fixed resume
//! style: US letter, 0.75in margins, 10pt body, centered 16pt name line.

use crate::render::{Block, Span};

/// Layout constants for the rendered resume.
#[derive(Debug, Clone)]
pub struct StyleConfig {
    pub paper: &'static str,
    pub margin_in: f64,
    pub body_size_pt: f64,
    pub h1_size_pt: f64,
    pub h2_size_pt: f64,
    pub h3_size_pt: f64,
    pub bullet_indent_pt: f64,
    pub spacer_in: f64,
}

impl Default for StyleConfig {
    fn default() -> Self {
        StyleConfig {
            paper: "us-letter",
            margin_in: 0.75,
            body_size_pt: 10.0,
            h1_size_pt: 16.0,
            h2_size_pt: 14.0,
            h3_size_pt: 12.0,
            bullet_indent_pt: 10.0,
            spacer_in: 0.1,
        }
    }
}

/// Renders the full typst document source for `blocks`.
pub fn document_markup(blocks: &[Block], style: &StyleConfig) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "#set page(paper: \"{}\", margin: {}in)\n#set text(size: {}pt)\n\n",
        style.paper, style.margin_in, style.body_size_pt
    ));

    for block in blocks {
        match block {
            Block::Spacer => {
                out.push_str(&format!("#v({}in)\n", style.spacer_in));
            }
            Block::Heading1(spans) => {
                out.push_str(&format!(
                    "#align(center)[#block(below: 12pt)[#text(size: {}pt, weight: \"bold\")[{}]]]\n",
                    style.h1_size_pt,
                    spans_markup(spans)
                ));
            }
            Block::Heading2(spans) => {
                out.push_str(&format!(
                    "#block(below: 10pt)[#text(size: {}pt, weight: \"bold\")[{}]]\n",
                    style.h2_size_pt,
                    spans_markup(spans)
                ));
            }
            Block::Heading3(spans) => {
                out.push_str(&format!(
                    "#block(below: 8pt)[#text(size: {}pt, weight: \"bold\")[{}]]\n",
                    style.h3_size_pt,
                    spans_markup(spans)
                ));
            }
            Block::Bullet(spans) => {
                out.push_str(&format!(
                    "#pad(left: {}pt)[• {}]\n",
                    style.bullet_indent_pt,
                    spans_markup(spans)
                ));
            }
            Block::Italic(spans) => {
                out.push_str(&format!("#emph[{}]\n", spans_markup(spans)));
            }
            Block::Paragraph(spans) => {
                out.push_str(&format!("#par[{}]\n", spans_markup(spans)));
            }
        }
    }

    out
}

fn spans_markup(spans: &[Span]) -> String {
    spans
        .iter()
        .map(|span| {
            if span.bold {
                format!("#strong[{}]", escape(&span.text))
            } else {
                escape(&span.text)
            }
        })
        .collect()
}

/// Escapes characters that typst markup would otherwise interpret.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '#' | '*' | '_' | '`' | '$' | '<' | '>' | '@' | '~' | '=' | '+' | '-'
            | '/' | '[' | ']' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}
