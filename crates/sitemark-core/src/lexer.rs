//! Line-based lexer used by the block segmenter.
//!
//! The lexer splits a document into lines, borrowing each one directly
//! from the input. Newlines are located with `memchr` (SIMD on supported
//! platforms), and a trailing `\r` is dropped so CRLF documents segment
//! the same way as LF documents.

use crate::span::Span;
use memchr::memchr;

/// A single line from the input with its source location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// The line text (without trailing newline).
    pub text: &'a str,
    /// Byte span in the original input.
    pub span: Span,
    /// 1-based line number.
    pub number: usize,
}

impl<'a> Line<'a> {
    /// Check if this line contains only spaces and tabs.
    #[inline(always)]
    pub fn is_blank(&self) -> bool {
        self.text.bytes().all(|b| b == b' ' || b == b'\t')
    }

    /// Get the line text with leading/trailing whitespace removed.
    #[inline(always)]
    pub fn trimmed(&self) -> &'a str {
        self.text.trim()
    }
}

/// Line lexer with one line of lookahead.
pub struct Lexer<'a> {
    input: &'a str,
    bytes: &'a [u8],
    /// Current byte offset.
    offset: usize,
    /// Number of lines read so far.
    line: usize,
    peeked: Option<Line<'a>>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    #[inline]
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            offset: 0,
            line: 0,
            peeked: None,
        }
    }

    /// Peek at the next line without consuming it.
    ///
    /// Returns `None` if at end of input.
    #[inline]
    pub fn peek_line(&mut self) -> Option<&Line<'a>> {
        if self.peeked.is_none() {
            self.peeked = self.read_line();
        }
        self.peeked.as_ref()
    }

    /// Consume and return the next line.
    ///
    /// Returns `None` if at end of input.
    #[inline]
    pub fn next_line(&mut self) -> Option<Line<'a>> {
        if let Some(line) = self.peeked.take() {
            return Some(line);
        }
        self.read_line()
    }

    /// Skip over blank lines.
    #[inline]
    pub fn skip_blank_lines(&mut self) {
        while let Some(line) = self.peek_line() {
            if !line.is_blank() {
                break;
            }
            self.next_line();
        }
    }

    /// Get a slice of the input by span.
    ///
    /// Spans produced by this lexer always fall on line boundaries, which
    /// are ASCII, so slicing them never splits a character.
    #[inline]
    pub fn slice(&self, span: Span) -> &'a str {
        &self.input[span.start as usize..span.end as usize]
    }

    fn read_line(&mut self) -> Option<Line<'a>> {
        if self.offset >= self.bytes.len() {
            return None;
        }

        let start = self.offset;
        let end = match memchr(b'\n', &self.bytes[start..]) {
            Some(pos) => start + pos,
            None => self.bytes.len(),
        };

        // CRLF: drop the carriage return
        let text_end = if end > start && self.bytes[end - 1] == b'\r' {
            end - 1
        } else {
            end
        };

        self.offset = if end < self.bytes.len() { end + 1 } else { end };
        self.line += 1;

        Some(Line {
            text: &self.input[start..text_end],
            span: Span::new(start as u32, text_end as u32),
            number: self.line,
        })
    }
}
