//! Inline tokenizer.
//!
//! Turns a run of text into a flat, left-to-right sequence of typed
//! [`Inline`] spans. Every span borrows from the input; nothing is copied.
//!
//! Tokenizing is a fixed pipeline of splitting passes. Each pass only
//! looks at spans that are still [`Inline::Plain`] and passes everything
//! else through untouched:
//!
//! 1. images `![alt](url)`
//! 2. bold `**text**`
//! 3. italic `*text*`
//! 4. code `` `text` ``
//! 5. links `[text](url)`
//!
//! Images go first because their syntax contains a link. Bold goes before
//! italic so a single-`*` pass never sees half of a `**`. Emphasis is not
//! nested: in `**a *b* c**` the bold text is the literal `a *b* c`.

use std::sync::LazyLock;

use memchr::memmem;
use regex::Regex;
use tracing::trace;

use crate::error::{Error, Result};

/// Alt text is the run up to the first `]`; the url the run up to the first `)`.
static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").expect("valid image pattern"));

/// Link text is matched lazily but may itself contain brackets, so
/// `[[x]](url)` yields the text `[x]`.
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.*?)\]\(([^)]+)\)").expect("valid link pattern"));

/// A typed fragment of inline text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inline<'a> {
    Plain(&'a str),
    Bold(&'a str),
    Italic(&'a str),
    Code(&'a str),
    Link { text: &'a str, url: &'a str },
    Image { alt: &'a str, url: &'a str },
}

impl<'a> Inline<'a> {
    /// The visible text of the span (alt text for images).
    pub fn text(&self) -> &'a str {
        match *self {
            Inline::Plain(t) | Inline::Bold(t) | Inline::Italic(t) | Inline::Code(t) => t,
            Inline::Link { text, .. } => text,
            Inline::Image { alt, .. } => alt,
        }
    }
}

/// Tokenize a run of inline text.
///
/// Fails with [`Error::UnterminatedDelimiter`] when a run contains an odd
/// number of `**`, `*` or `` ` `` delimiters.
///
/// # Example
///
/// ```rust
/// use sitemark_core::inline::{tokenize, Inline};
///
/// let spans = tokenize("a **b** c").unwrap();
/// assert_eq!(spans, vec![Inline::Plain("a "), Inline::Bold("b"), Inline::Plain(" c")]);
/// ```
pub fn tokenize(text: &str) -> Result<Vec<Inline<'_>>> {
    if text.is_empty() {
        return Ok(Vec::new());
    }

    let inlines = vec![Inline::Plain(text)];
    let inlines = split_images(inlines);
    let inlines = split_delimiter(inlines, "**", Inline::Bold)?;
    let inlines = split_delimiter(inlines, "*", Inline::Italic)?;
    let inlines = split_delimiter(inlines, "`", Inline::Code)?;
    let inlines = split_links(inlines);

    trace!(spans = inlines.len(), "tokenized inline run");
    Ok(inlines)
}

/// Extract `![alt](url)` images from plain spans.
pub fn split_images(inlines: Vec<Inline<'_>>) -> Vec<Inline<'_>> {
    split_matches(inlines, &IMAGE_RE, |alt, url| Inline::Image { alt, url })
}

/// Extract `[text](url)` links from plain spans.
pub fn split_links(inlines: Vec<Inline<'_>>) -> Vec<Inline<'_>> {
    split_matches(inlines, &LINK_RE, |text, url| Inline::Link { text, url })
}

/// Split plain spans on a paired delimiter.
///
/// Parts alternate plain / delimited, starting with plain. Empty parts
/// are dropped.
pub fn split_delimiter<'a>(
    inlines: Vec<Inline<'a>>,
    delimiter: &'static str,
    wrap: fn(&'a str) -> Inline<'a>,
) -> Result<Vec<Inline<'a>>> {
    let finder = memmem::Finder::new(delimiter);
    let mut out = Vec::with_capacity(inlines.len());

    for inline in inlines {
        let run = match inline {
            Inline::Plain(run) => run,
            other => {
                out.push(other);
                continue;
            }
        };

        // Fast path: nothing to split
        if finder.find(run.as_bytes()).is_none() {
            out.push(inline);
            continue;
        }

        let parts: Vec<&'a str> = run.split(delimiter).collect();
        if parts.len() % 2 == 0 {
            return Err(Error::UnterminatedDelimiter {
                delimiter,
                text: run.to_string(),
            });
        }

        for (i, part) in parts.into_iter().enumerate() {
            if part.is_empty() {
                continue;
            }
            out.push(if i % 2 == 0 { Inline::Plain(part) } else { wrap(part) });
        }
    }

    Ok(out)
}

fn split_matches<'a>(
    inlines: Vec<Inline<'a>>,
    pattern: &Regex,
    make: impl Fn(&'a str, &'a str) -> Inline<'a>,
) -> Vec<Inline<'a>> {
    let mut out = Vec::with_capacity(inlines.len());

    for inline in inlines {
        let run = match inline {
            Inline::Plain(run) => run,
            other => {
                out.push(other);
                continue;
            }
        };

        let mut last = 0;
        for caps in pattern.captures_iter(run) {
            let (Some(whole), Some(text), Some(url)) = (caps.get(0), caps.get(1), caps.get(2))
            else {
                continue;
            };
            if whole.start() > last {
                out.push(Inline::Plain(&run[last..whole.start()]));
            }
            out.push(make(text.as_str(), url.as_str()));
            last = whole.end();
        }
        if last < run.len() {
            out.push(Inline::Plain(&run[last..]));
        }
    }

    out
}
