//! Machine-readable output for the `check` and `blocks` commands.

use serde::Serialize;
use sitemark_core::{Block, BlockKind};

#[derive(Debug, Serialize)]
pub struct CheckReport<'a> {
    pub path: &'a str,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorReport>,
}

#[derive(Debug, Serialize)]
pub struct ErrorReport {
    pub kind: &'static str,
    pub message: String,
    pub line: Option<usize>,
}

impl From<&sitemark_core::Error> for ErrorReport {
    fn from(err: &sitemark_core::Error) -> Self {
        Self {
            kind: err.kind().as_str(),
            message: err.to_string(),
            line: err.line(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SpanReport {
    pub start: u32,
    pub end: u32,
}

#[derive(Debug, Serialize)]
pub struct BlockReport<'a> {
    pub index: usize,
    pub line: usize,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    pub span: SpanReport,
    /// First line of the block text.
    pub preview: &'a str,
}

impl<'a> BlockReport<'a> {
    pub fn new(index: usize, block: &Block<'a>) -> Self {
        let kind = block.kind();
        let level = match kind {
            BlockKind::Heading(level) => Some(level),
            _ => None,
        };
        Self {
            index,
            line: block.line,
            kind: kind.name(),
            level,
            span: SpanReport {
                start: block.span.start,
                end: block.span.end,
            },
            preview: block.text.lines().next().unwrap_or_default(),
        }
    }
}
