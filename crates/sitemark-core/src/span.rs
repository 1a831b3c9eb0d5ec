//! Source location tracking for blocks.
//!
//! Every block produced by the segmenter carries a `Span` pointing back
//! into the document it was cut from, so errors can name the offending input.

/// A byte range in the source text.
///
/// Spans use byte offsets (not character offsets).
/// Both `start` and `end` are inclusive-exclusive: `[start, end)`.
///
/// # Example
///
/// ```rust
/// use sitemark_core::span::Span;
///
/// let span = Span::new(0, 10);
/// assert_eq!(span.len(), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Starting byte offset (inclusive).
    pub start: u32,
    /// Ending byte offset (exclusive).
    pub end: u32,
}

impl Span {
    /// Create a new span from byte offsets.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Get the length of this span in bytes.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Check if this span is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Merge two spans into one covering both.
    #[inline]
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Slice the text this span covers out of `source`.
    ///
    /// Returns `None` if the span is out of bounds or splits a character.
    #[inline]
    pub fn slice<'a>(&self, source: &'a str) -> Option<&'a str> {
        source.get(self.start as usize..self.end as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_covers_both() {
        let merged = Span::new(4, 8).merge(Span::new(0, 6));
        assert_eq!(merged, Span::new(0, 8));
    }

    #[test]
    fn test_inverted_span_is_empty() {
        let span = Span::new(5, 3);
        assert!(span.is_empty());
        assert_eq!(span.len(), 0);
    }

    #[test]
    fn test_slice() {
        let source = "hello world";
        assert_eq!(Span::new(6, 11).slice(source), Some("world"));
        assert_eq!(Span::new(6, 40).slice(source), None);
    }
}
