use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error kinds for categorizing conversion failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Leaf node without a value
    MissingValue,
    /// Container node without a tag
    MissingTag,
    /// Container node with zero children
    EmptyChildren,
    /// Odd number of bold/italic/code delimiters in one run
    UnterminatedDelimiter,
    /// Heading marker with no text after it
    InvalidHeading,
    /// Code block missing its opening or closing fence
    InvalidCodeBlock,
    /// Quote line without the `>` prefix
    InvalidQuoteBlock,
    /// Document has no level-one heading
    NoTitleFound,
    /// Document is empty
    EmptyInput,
}

impl ErrorKind {
    /// Stable snake_case name, suitable for machine-readable reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::MissingValue => "missing_value",
            ErrorKind::MissingTag => "missing_tag",
            ErrorKind::EmptyChildren => "empty_children",
            ErrorKind::UnterminatedDelimiter => "unterminated_delimiter",
            ErrorKind::InvalidHeading => "invalid_heading",
            ErrorKind::InvalidCodeBlock => "invalid_code_block",
            ErrorKind::InvalidQuoteBlock => "invalid_quote_block",
            ErrorKind::NoTitleFound => "no_title_found",
            ErrorKind::EmptyInput => "empty_input",
        }
    }
}

/// A conversion failure.
///
/// Failures are never recovered from: the document being converted is
/// abandoned and the error is handed back to the caller. Errors raised
/// while assembling a block are wrapped in [`Error::Block`] so the caller
/// can locate the offending input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("leaf node {} has no value", describe_tag(.tag))]
    MissingValue { tag: Option<String> },

    #[error("container node has no tag")]
    MissingTag,

    #[error("container node <{tag}> has no children")]
    EmptyChildren { tag: String },

    #[error("unterminated {delimiter:?} delimiter in {text:?}")]
    UnterminatedDelimiter {
        delimiter: &'static str,
        text: String,
    },

    #[error("heading has no text after its marker: {block:?}")]
    InvalidHeading { block: String },

    #[error("code block must start and end with a ``` fence")]
    InvalidCodeBlock,

    #[error("quote line {line} does not start with `>`")]
    InvalidQuoteBlock { line: usize },

    #[error("no level-one heading (`# title`) found")]
    NoTitleFound,

    #[error("document is empty")]
    EmptyInput,

    #[error("block {} (line {line}): {error}", .index + 1)]
    Block {
        /// 0-based position of the block in the document.
        index: usize,
        /// 1-based line on which the block starts.
        line: usize,
        error: Box<Error>,
    },
}

impl Error {
    /// The root cause category, looking through block context.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingValue { .. } => ErrorKind::MissingValue,
            Error::MissingTag => ErrorKind::MissingTag,
            Error::EmptyChildren { .. } => ErrorKind::EmptyChildren,
            Error::UnterminatedDelimiter { .. } => ErrorKind::UnterminatedDelimiter,
            Error::InvalidHeading { .. } => ErrorKind::InvalidHeading,
            Error::InvalidCodeBlock => ErrorKind::InvalidCodeBlock,
            Error::InvalidQuoteBlock { .. } => ErrorKind::InvalidQuoteBlock,
            Error::NoTitleFound => ErrorKind::NoTitleFound,
            Error::EmptyInput => ErrorKind::EmptyInput,
            Error::Block { error, .. } => error.kind(),
        }
    }

    /// The 1-based document line where the failure was located, if known.
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Block { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Attach block location to an error.
    pub(crate) fn in_block(self, index: usize, line: usize) -> Self {
        Error::Block {
            index,
            line,
            error: Box::new(self),
        }
    }
}

fn describe_tag(tag: &Option<String>) -> String {
    match tag {
        Some(tag) => format!("<{}>", tag),
        None => "(text)".to_string(),
    }
}
