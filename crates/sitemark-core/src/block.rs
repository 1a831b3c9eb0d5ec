//! Block segmentation and classification.
//!
//! A document is cut into blocks at blank lines (lines holding nothing but
//! spaces or tabs; any number of them act as one separator). Each block is
//! trimmed and classified by inspecting its line prefixes.

use std::fmt;

use crate::lexer::Lexer;
use crate::span::Span;

/// Opening and closing marker of a code block.
pub const CODE_FENCE: &str = "```";

/// Structural category of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// `#` to `######` followed by a space; carries the level.
    Heading(u8),
    /// First and last line open with a code fence.
    Code,
    /// Every line starts with `>`.
    Quote,
    /// Every line starts with `* `, or every line starts with `- `.
    UnorderedList,
    /// Lines start with `1. `, `2. `, ... in sequence.
    OrderedList,
    Paragraph,
}

impl BlockKind {
    /// Short lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            BlockKind::Heading(_) => "heading",
            BlockKind::Code => "code",
            BlockKind::Quote => "quote",
            BlockKind::UnorderedList => "unordered_list",
            BlockKind::OrderedList => "ordered_list",
            BlockKind::Paragraph => "paragraph",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockKind::Heading(level) => write!(f, "heading (level {})", level),
            other => f.write_str(other.name()),
        }
    }
}

/// A trimmed block of a document with its location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block<'a> {
    /// Block text with surrounding whitespace removed.
    pub text: &'a str,
    /// Byte span of `text` in the document.
    pub span: Span,
    /// 1-based line on which the block starts.
    pub line: usize,
}

impl<'a> Block<'a> {
    #[inline]
    pub fn kind(&self) -> BlockKind {
        classify(self.text)
    }
}

/// Split a document into trimmed, non-empty block texts.
pub fn segment(document: &str) -> Vec<&str> {
    segment_blocks(document)
        .into_iter()
        .map(|block| block.text)
        .collect()
}

/// Split a document into trimmed, non-empty blocks with source locations.
pub fn segment_blocks(document: &str) -> Vec<Block<'_>> {
    let mut lexer = Lexer::new(document);
    let mut blocks = Vec::with_capacity(16);

    loop {
        lexer.skip_blank_lines();
        let Some(first) = lexer.next_line() else {
            break;
        };

        let mut span = first.span;
        while let Some(&line) = lexer.peek_line() {
            if line.is_blank() {
                break;
            }
            span = span.merge(line.span);
            lexer.next_line();
        }

        let raw = lexer.slice(span);
        let text = raw.trim();
        if text.is_empty() {
            continue;
        }

        let start = span.start + (raw.len() - raw.trim_start().len()) as u32;
        blocks.push(Block {
            text,
            span: Span::new(start, start + text.len() as u32),
            line: first.number,
        });
    }

    blocks
}

/// Classify a block by its line prefixes.
///
/// Total and pure: every input maps to exactly one kind, falling back to
/// [`BlockKind::Paragraph`].
pub fn classify(block: &str) -> BlockKind {
    if let Some(level) = heading_level(block) {
        return BlockKind::Heading(level);
    }

    let lines: Vec<&str> = block.lines().collect();
    let (Some(first), Some(last)) = (lines.first(), lines.last()) else {
        return BlockKind::Paragraph;
    };

    if lines.len() > 1 && first.starts_with(CODE_FENCE) && last.starts_with(CODE_FENCE) {
        return BlockKind::Code;
    }

    if lines.iter().all(|line| line.starts_with('>')) {
        return BlockKind::Quote;
    }

    if ["* ", "- "]
        .iter()
        .any(|marker| lines.iter().all(|line| line.starts_with(marker)))
    {
        return BlockKind::UnorderedList;
    }

    if lines
        .iter()
        .enumerate()
        .all(|(i, line)| strip_ordered_marker(line, i + 1).is_some())
    {
        return BlockKind::OrderedList;
    }

    BlockKind::Paragraph
}

/// Number of leading `#` when followed by a space, for levels 1 to 6.
pub fn heading_level(text: &str) -> Option<u8> {
    let level = text.bytes().take_while(|&b| b == b'#').count();
    if (1..=6).contains(&level) && text.as_bytes().get(level) == Some(&b' ') {
        Some(level as u8)
    } else {
        None
    }
}

/// Strip an `<number>. ` marker, requiring exactly `number`.
pub(crate) fn strip_ordered_marker(line: &str, number: usize) -> Option<&str> {
    line.strip_prefix(number.to_string().as_str())?
        .strip_prefix(". ")
}
