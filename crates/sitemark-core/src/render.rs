//! Block-to-element conversion.
//!
//! Each block kind has one conversion function producing exactly one
//! element. Inline content always goes through [`tokenize`] and every
//! resulting span becomes one child node:
//!
//! | span    | element                                  |
//! |---------|------------------------------------------|
//! | plain   | bare text                                |
//! | bold    | `<b>` around text                        |
//! | italic  | `<i>` around text                        |
//! | code    | `<code>` around text                     |
//! | link    | `<a href>` around text                   |
//! | image   | `<img src alt>` leaf with a single space |

use crate::block::{classify, heading_level, strip_ordered_marker, BlockKind, CODE_FENCE};
use crate::element::Element;
use crate::error::{Error, Result};
use crate::inline::{tokenize, Inline};

/// Convert one inline span to an element.
pub fn inline_to_element(inline: Inline<'_>) -> Element {
    match inline {
        Inline::Plain(text) => Element::text(text),
        Inline::Bold(text) => Element::container("b", vec![Element::text(text)]),
        Inline::Italic(text) => Element::container("i", vec![Element::text(text)]),
        Inline::Code(text) => Element::container("code", vec![Element::text(text)]),
        Inline::Link { text, url } => {
            Element::container("a", vec![Element::text(text)]).with_attribute("href", url)
        }
        // A leaf needs a value, so images carry a single space.
        Inline::Image { alt, url } => Element::leaf(Some("img"), " ")
            .with_attribute("src", url)
            .with_attribute("alt", alt),
    }
}

/// Tokenize a run of text and convert every span to an element.
pub fn text_to_children(text: &str) -> Result<Vec<Element>> {
    Ok(tokenize(text)?.into_iter().map(inline_to_element).collect())
}

/// Classify a block and convert it.
pub fn block_to_element(block: &str) -> Result<Element> {
    convert_block(block, classify(block))
}

/// Convert a block already known to be of `kind`.
pub fn convert_block(block: &str, kind: BlockKind) -> Result<Element> {
    match kind {
        BlockKind::Paragraph => paragraph_to_element(block),
        BlockKind::Heading(_) => heading_to_element(block),
        BlockKind::Code => code_to_element(block),
        BlockKind::Quote => quote_to_element(block),
        BlockKind::UnorderedList => unordered_list_to_element(block),
        BlockKind::OrderedList => ordered_list_to_element(block),
    }
}

/// `<p>`: lines joined with a single space.
pub fn paragraph_to_element(block: &str) -> Result<Element> {
    let text = join_lines(block.lines());
    Ok(Element::container("p", text_to_children(&text)?))
}

/// `<h1>` to `<h6>`.
pub fn heading_to_element(block: &str) -> Result<Element> {
    let invalid = || Error::InvalidHeading {
        block: block.to_string(),
    };
    let level = heading_level(block).ok_or_else(invalid)?;
    let marker = level as usize + 1;
    if marker >= block.len() {
        return Err(invalid());
    }

    let text = join_lines(block[marker..].lines());
    Ok(Element::container(
        format!("h{}", level),
        text_to_children(&text)?,
    ))
}

/// `<pre><code>`. The opening fence line and the closing fence are
/// dropped; the interior is still tokenized as inline text.
pub fn code_to_element(block: &str) -> Result<Element> {
    if block.len() < 2 * CODE_FENCE.len()
        || !block.starts_with(CODE_FENCE)
        || !block.ends_with(CODE_FENCE)
    {
        return Err(Error::InvalidCodeBlock);
    }

    let body = &block[..block.len() - CODE_FENCE.len()];
    let interior = match body.find('\n') {
        Some(newline) => &body[newline + 1..],
        None => return Err(Error::InvalidCodeBlock),
    };

    let code = Element::container("code", text_to_children(interior)?);
    Ok(Element::container("pre", vec![code]))
}

/// `<blockquote>`: one `>` and one following space stripped per line,
/// lines joined with a single space.
pub fn quote_to_element(block: &str) -> Result<Element> {
    let mut lines = Vec::new();
    for (i, line) in block.lines().enumerate() {
        let rest = line
            .strip_prefix('>')
            .ok_or(Error::InvalidQuoteBlock { line: i + 1 })?;
        lines.push(rest.strip_prefix(' ').unwrap_or(rest));
    }

    let text = join_lines(lines);
    Ok(Element::container("blockquote", text_to_children(&text)?))
}

/// `<ul>` with one `<li>` per line.
pub fn unordered_list_to_element(block: &str) -> Result<Element> {
    list_to_element("ul", block.lines().map(|line| {
        line.strip_prefix("* ")
            .or_else(|| line.strip_prefix("- "))
            .unwrap_or(line)
    }))
}

/// `<ol>` with one `<li>` per line.
pub fn ordered_list_to_element(block: &str) -> Result<Element> {
    list_to_element(
        "ol",
        block
            .lines()
            .enumerate()
            .map(|(i, line)| strip_ordered_marker(line, i + 1).unwrap_or(line)),
    )
}

fn list_to_element<'a>(tag: &str, items: impl Iterator<Item = &'a str>) -> Result<Element> {
    let items = items
        .map(|item| text_to_children(item).map(|children| Element::container("li", children)))
        .collect::<Result<Vec<_>>>()?;
    Ok(Element::container(tag, items))
}

fn join_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> String {
    lines.into_iter().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn markup(block: &str) -> String {
        block_to_element(block).unwrap().to_markup().unwrap()
    }

    #[test]
    fn test_inline_to_element() {
        assert_eq!(inline_to_element(Inline::Plain("Hello")), Element::text("Hello"));
        assert_eq!(
            inline_to_element(Inline::Bold("Bold")).to_markup().unwrap(),
            "<b>Bold</b>"
        );
        assert_eq!(
            inline_to_element(Inline::Code("print('hi')")).to_markup().unwrap(),
            "<code>print('hi')</code>"
        );
        let link = inline_to_element(Inline::Link {
            text: "Click here",
            url: "https://example.com",
        });
        assert_eq!(link.tag(), Some("a"));
        assert_eq!(link.attributes().get("href"), Some("https://example.com"));
    }

    #[test]
    fn test_image_element() {
        let img = inline_to_element(Inline::Image {
            alt: "alt",
            url: "u.png",
        });
        assert_eq!(img.value(), Some(" "));
        assert_eq!(img.to_markup().unwrap(), r#"<img src="u.png" alt="alt"> </img>"#);
    }

    #[test]
    fn test_paragraph() {
        assert_eq!(
            markup("This is **bolded** paragraph"),
            "<p>This is <b>bolded</b> paragraph</p>"
        );
        assert_eq!(
            markup("line one\nline _two_ with `code`"),
            "<p>line one line _two_ with <code>code</code></p>"
        );
    }

    #[test]
    fn test_headings() {
        assert_eq!(markup("# Title"), "<h1>Title</h1>");
        assert_eq!(markup("### *Sub* title"), "<h3><i>Sub</i> title</h3>");
        assert_eq!(markup("## two\nlines"), "<h2>two lines</h2>");
    }

    #[test]
    fn test_heading_without_text() {
        let err = heading_to_element("# ").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidHeading);
        let err = heading_to_element("#").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidHeading);
    }

    #[test]
    fn test_code_block() {
        assert_eq!(
            markup("```\nfn main() {}\n```"),
            "<pre><code>fn main() {}\n</code></pre>"
        );
        assert_eq!(
            markup("```rust\nlet x = 1;\n```"),
            "<pre><code>let x = 1;\n</code></pre>"
        );
    }

    #[test]
    fn test_code_block_interior_is_tokenized() {
        assert_eq!(
            markup("```\na **b**\n```"),
            "<pre><code>a <b>b</b>\n</code></pre>"
        );
    }

    #[test]
    fn test_code_block_without_fences() {
        assert_eq!(code_to_element("```\ncode").unwrap_err(), Error::InvalidCodeBlock);
        assert_eq!(code_to_element("code\n```").unwrap_err(), Error::InvalidCodeBlock);
        assert_eq!(code_to_element("```").unwrap_err(), Error::InvalidCodeBlock);
        assert_eq!(code_to_element("``````").unwrap_err(), Error::InvalidCodeBlock);
    }

    #[test]
    fn test_unordered_lists() {
        assert_eq!(markup("* a\n* b"), "<ul><li>a</li><li>b</li></ul>");
        assert_eq!(
            markup("- one\n- **two**"),
            "<ul><li>one</li><li><b>two</b></li></ul>"
        );
    }

    #[test]
    fn test_ordered_lists() {
        assert_eq!(markup("1. a\n2. b"), "<ol><li>a</li><li>b</li></ol>");
        let long: Vec<String> = (1..=11).map(|i| format!("{}. item{}", i, i)).collect();
        let html = markup(&long.join("\n"));
        assert!(html.ends_with("<li>item10</li><li>item11</li></ol>"));
    }

    #[test]
    fn test_quote() {
        assert_eq!(
            markup("> line one\n> line two"),
            "<blockquote>line one line two</blockquote>"
        );
        assert_eq!(
            markup(">tight\n>  spaced"),
            "<blockquote>tight  spaced</blockquote>"
        );
    }

    #[test]
    fn test_quote_line_without_marker() {
        assert_eq!(
            quote_to_element("> fine\nbroken").unwrap_err(),
            Error::InvalidQuoteBlock { line: 2 }
        );
    }

    #[test]
    fn test_unterminated_delimiter_propagates() {
        let err = block_to_element("* a **b").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnterminatedDelimiter);
    }
}
