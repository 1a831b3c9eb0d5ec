//! Whole-document conversion.

use tracing::debug;

use crate::block::segment_blocks;
use crate::element::Element;
use crate::error::{Error, Result};
use crate::lexer::Lexer;
use crate::render::convert_block;

/// Tag of the element wrapping all blocks of a document.
pub const ROOT_TAG: &str = "div";

/// Convert a document into a `<div>` holding one element per block.
///
/// Each block element is validated as soon as it is built, so failures
/// carry the block's position ([`Error::Block`]) and the returned tree
/// always serializes. A document without any non-blank block fails with
/// [`Error::EmptyChildren`].
pub fn build(document: &str) -> Result<Element> {
    let blocks = segment_blocks(document);
    debug!(blocks = blocks.len(), "segmented document");

    if blocks.is_empty() {
        return Err(Error::EmptyChildren {
            tag: ROOT_TAG.to_string(),
        });
    }

    let children = blocks
        .iter()
        .enumerate()
        .map(|(index, block)| {
            let kind = block.kind();
            debug!(index, line = block.line, %kind, "converting block");
            convert_block(block.text, kind)
                .and_then(|element| element.validate().map(|()| element))
                .map_err(|e| e.in_block(index, block.line))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Element::container(ROOT_TAG, children))
}

/// Convert a document straight to HTML.
pub fn to_html(document: &str) -> Result<String> {
    build(document)?.to_markup()
}

/// Text of the first `# ` heading line.
///
/// Lines are inspected with surrounding whitespace removed; only a single
/// `#` counts, so `## Sub` is skipped.
pub fn extract_title(document: &str) -> Result<&str> {
    if document.is_empty() {
        return Err(Error::EmptyInput);
    }

    let mut lexer = Lexer::new(document);
    while let Some(line) = lexer.next_line() {
        if let Some(title) = line.trimmed().strip_prefix("# ") {
            return Ok(title.trim());
        }
    }

    Err(Error::NoTitleFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_extract_title() {
        assert_eq!(extract_title("# Hello").unwrap(), "Hello");
        assert_eq!(
            extract_title("intro\n## Sub\n   #   Spaced Title  \n# Later").unwrap(),
            "Spaced Title"
        );
    }

    #[test]
    fn test_extract_title_failures() {
        assert_eq!(extract_title("").unwrap_err(), Error::EmptyInput);
        assert_eq!(extract_title("## Only h2\ntext").unwrap_err(), Error::NoTitleFound);
        assert_eq!(extract_title("#NoSpace").unwrap_err(), Error::NoTitleFound);
    }

    #[test]
    fn test_build_wraps_blocks_in_div() {
        let html = to_html("# Title\n\nSome *text*.\n\n- a\n- b").unwrap();
        assert_eq!(
            html,
            "<div><h1>Title</h1><p>Some <i>text</i>.</p><ul><li>a</li><li>b</li></ul></div>"
        );
    }

    #[test]
    fn test_build_empty_document() {
        assert_eq!(
            build("\n\n  \n").unwrap_err(),
            Error::EmptyChildren {
                tag: "div".to_string()
            }
        );
    }

    #[test]
    fn test_build_reports_block_location() {
        let err = build("# Title\n\nfine\n\n\nbroken **bold").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnterminatedDelimiter);
        assert_eq!(err.line(), Some(6));
        assert!(matches!(err, Error::Block { index: 2, .. }));
    }

    #[test]
    fn test_build_rejects_block_without_content() {
        let err = build("text\n\n****").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyChildren);
        assert_eq!(err.line(), Some(3));
    }
}
