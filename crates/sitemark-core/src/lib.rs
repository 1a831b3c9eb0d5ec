//! # Sitemark Core
//!
//! Converts documents written in a small Markdown subset into an HTML
//! element tree for static site generation.
//!
//! Conversion is a two-stage pipeline. The document is first cut into
//! blocks at blank lines and each block is classified (heading, code,
//! quote, ordered list, unordered list, paragraph). Every block is then
//! turned into one element, running its inline text through the span
//! tokenizer (bold, italic, code, links, images). The block elements are
//! wrapped in a single `<div>`.
//!
//! ## Quick Start
//!
//! ```rust
//! use sitemark_core::{build, extract_title};
//!
//! let input = "# Hello World\n\nThis is a **paragraph**.";
//! let root = build(input).unwrap();
//!
//! assert_eq!(extract_title(input).unwrap(), "Hello World");
//! assert_eq!(
//!     root.to_markup().unwrap(),
//!     "<div><h1>Hello World</h1><p>This is a <b>paragraph</b>.</p></div>"
//! );
//! ```
//!
//! ## Errors
//!
//! Malformed markup is never passed through silently. An unclosed `**`
//! fails the whole document, and the error says which block it was in:
//!
//! ```rust
//! use sitemark_core::{build, ErrorKind};
//!
//! let err = build("# Title\n\nnot **closed").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::UnterminatedDelimiter);
//! assert_eq!(err.line(), Some(3));
//! ```
//!
//! All functions are pure; documents may be converted on as many threads
//! as the caller likes.

pub mod block;
pub mod document;
pub mod element;
pub mod error;
pub mod inline;
pub mod lexer;
pub mod render;
pub mod span;

pub use block::{classify, segment, Block, BlockKind};
pub use document::{build, extract_title, to_html};
pub use element::{Attributes, Element};
pub use error::{Error, ErrorKind, Result};
pub use inline::{tokenize, Inline};
