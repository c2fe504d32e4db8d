//! Document rendering — markdown-dialect classification and PDF output.
//!
//! `parse_blocks` turns the tailored resume's markdown dialect into typed
//! blocks; `markup` maps blocks to typst source; `pdf` compiles it.
//! Classification is pure and deterministic; pagination and font metrics
//! belong to the typst backend.

pub mod markup;
pub mod pdf;
pub mod world;

pub use markup::StyleConfig;
pub use pdf::render_pdf;

/// A run of text within a line, with bold styling resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub bold: bool,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Span {
            text: text.into(),
            bold: false,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Span {
            text: text.into(),
            bold: true,
        }
    }
}

/// One classified line of the tailored resume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// A blank line: vertical space in the output.
    Spacer,
    Heading1(Vec<Span>),
    Heading2(Vec<Span>),
    Heading3(Vec<Span>),
    Bullet(Vec<Span>),
    /// A line opening with a single `*`, rendered italic. Only the leading
    /// marker is consumed; a trailing `*` stays in the text.
    Italic(Vec<Span>),
    Paragraph(Vec<Span>),
}

/// Classifies each line of `text` into exactly one block.
///
/// Lines are trimmed first; prefixes are checked in order, first match
/// wins. The same input always yields the same blocks.
pub fn parse_blocks(text: &str) -> Vec<Block> {
    text.lines()
        .map(|line| {
            let line = line.trim();
            if line.is_empty() {
                Block::Spacer
            } else if let Some(rest) = line.strip_prefix("### ") {
                Block::Heading3(bold_spans(rest))
            } else if let Some(rest) = line.strip_prefix("## ") {
                Block::Heading2(bold_spans(rest))
            } else if let Some(rest) = line.strip_prefix("# ") {
                Block::Heading1(bold_spans(rest))
            } else if let Some(rest) = line.strip_prefix("- ") {
                Block::Bullet(bold_spans(rest))
            } else if let Some(rest) = line.strip_prefix("• ") {
                Block::Bullet(bold_spans(rest))
            } else if line.starts_with('*') && !line.starts_with("**") {
                Block::Italic(bold_spans(&line[1..]))
            } else {
                Block::Paragraph(bold_spans(line))
            }
        })
        .collect()
}

/// Splits a line into plain and bold spans.
///
/// A bold span is `**` followed by one or more non-`*` characters followed
/// by `**`. Markers that do not complete a span are kept as literal text.
pub fn bold_spans(text: &str) -> Vec<Span> {
    let chars: Vec<char> = text.chars().collect();
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == '*' && i + 1 < chars.len() && chars[i + 1] == '*' {
            // Candidate bold span: content is non-'*' chars after the opener.
            let start = i + 2;
            let mut end = start;
            while end < chars.len() && chars[end] != '*' {
                end += 1;
            }
            let closes = end > start
                && chars.get(end) == Some(&'*')
                && chars.get(end + 1) == Some(&'*');
            if closes {
                if !plain.is_empty() {
                    spans.push(Span::plain(std::mem::take(&mut plain)));
                }
                spans.push(Span::bold(chars[start..end].iter().collect::<String>()));
                i = end + 2;
                continue;
            }
        }
        plain.push(chars[i]);
        i += 1;
    }

    if !plain.is_empty() {
        spans.push(Span::plain(plain));
    }
    spans
}
