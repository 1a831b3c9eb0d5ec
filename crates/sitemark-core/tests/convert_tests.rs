//! Integration tests for the conversion pipeline

use pretty_assertions::assert_eq;
use rstest::rstest;
use sitemark_core::block::segment_blocks;
use sitemark_core::render::block_to_element;
use sitemark_core::{
    build, classify, extract_title, segment, to_html, tokenize, BlockKind, Element, ErrorKind,
    Inline,
};

const PAGE: &str = "# Tolkien Fan Club

![JRR Tolkien sitting](/images/tolkien.png)

Here's the deal, **I like Tolkien**.

> \"I am in fact a Hobbit in all but size.\"
>
> -- J.R.R. Tolkien

## Blog posts

- [Why Glorfindel is More Impressive than Legolas](/blog/glorfindel)
- [Why Tom Bombadil Was a Mistake](/blog/tom)

1. The Hobbit
2. *The Lord of the Rings*
3. The `Silmarillion`

```
func main(){
    fmt.Println(\"Hello, World!\")
}
```
";

// ============================================================================
// Scenarios
// ============================================================================

#[rstest]
#[case("This is **bolded** paragraph", "<p>This is <b>bolded</b> paragraph</p>")]
#[case("* a\n* b", "<ul><li>a</li><li>b</li></ul>")]
#[case("- a\n- b", "<ul><li>a</li><li>b</li></ul>")]
#[case("1. a\n2. b", "<ol><li>a</li><li>b</li></ol>")]
#[case("> line one\n> line two", "<blockquote>line one line two</blockquote>")]
#[case("###### deep", "<h6>deep</h6>")]
#[case("[home](/)", r#"<p><a href="/">home</a></p>"#)]
#[case("![alt](u.png)", r#"<p><img src="u.png" alt="alt"> </img></p>"#)]
#[case("```\ncode here\n```", "<pre><code>code here\n</code></pre>")]
fn test_block_scenarios(#[case] input: &str, #[case] expected: &str) {
    let element = block_to_element(input).unwrap();
    assert_eq!(element.to_markup().unwrap(), expected);
}

#[test]
fn test_title_scenario() {
    assert_eq!(extract_title("# Hello").unwrap(), "Hello");
}

#[test]
fn test_image_tokenizes_to_single_span() {
    assert_eq!(
        tokenize("![alt](u.png)").unwrap(),
        vec![Inline::Image {
            alt: "alt",
            url: "u.png"
        }]
    );
}

#[test]
fn test_full_page() {
    let html = to_html(PAGE).unwrap();
    let expected = concat!(
        "<div>",
        "<h1>Tolkien Fan Club</h1>",
        r#"<p><img src="/images/tolkien.png" alt="JRR Tolkien sitting"> </img></p>"#,
        "<p>Here's the deal, <b>I like Tolkien</b>.</p>",
        "<blockquote>\"I am in fact a Hobbit in all but size.\"  -- J.R.R. Tolkien</blockquote>",
        "<h2>Blog posts</h2>",
        "<ul>",
        r#"<li><a href="/blog/glorfindel">Why Glorfindel is More Impressive than Legolas</a></li>"#,
        r#"<li><a href="/blog/tom">Why Tom Bombadil Was a Mistake</a></li>"#,
        "</ul>",
        "<ol><li>The Hobbit</li><li><i>The Lord of the Rings</i></li><li>The <code>Silmarillion</code></li></ol>",
        "<pre><code>func main(){\n    fmt.Println(\"Hello, World!\")\n}\n</code></pre>",
        "</div>",
    );
    assert_eq!(html, expected);
    assert_eq!(extract_title(PAGE).unwrap(), "Tolkien Fan Club");
}

#[test]
fn test_block_kinds_of_page() {
    let kinds: Vec<BlockKind> = segment(PAGE).into_iter().map(classify).collect();
    assert_eq!(
        kinds,
        vec![
            BlockKind::Heading(1),
            BlockKind::Paragraph,
            BlockKind::Paragraph,
            BlockKind::Quote,
            BlockKind::Heading(2),
            BlockKind::UnorderedList,
            BlockKind::OrderedList,
            BlockKind::Code,
        ]
    );
}

// ============================================================================
// Failures
// ============================================================================

#[rstest]
#[case("# Title\n\nunclosed **bold", ErrorKind::UnterminatedDelimiter, 3)]
#[case("# Title\n\n- item *one\n- two", ErrorKind::UnterminatedDelimiter, 3)]
#[case("intro\n\n```\ncode\n```trailing", ErrorKind::InvalidCodeBlock, 3)]
#[case("intro\n\n```\n```", ErrorKind::EmptyChildren, 3)]
#[case("a\n\nb\n\n- [](/nowhere)", ErrorKind::MissingValue, 5)]
fn test_build_failures(#[case] input: &str, #[case] kind: ErrorKind, #[case] line: usize) {
    let err = build(input).unwrap_err();
    assert_eq!(err.kind(), kind);
    assert_eq!(err.line(), Some(line));
}

#[test]
fn test_error_message_names_block() {
    let err = build("# Title\n\nunclosed `code").unwrap_err();
    assert_eq!(
        err.to_string(),
        "block 2 (line 3): unterminated \"`\" delimiter in \"unclosed `code\""
    );
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_segmentation_is_idempotent() {
    for doc in [PAGE, "a\n\n\n\nb", "  x  \n\n\n  \n\ny\nz\n", "", "single"] {
        let blocks = segment(doc);
        let rejoined = blocks.join("\n\n");
        assert_eq!(segment(&rejoined), blocks, "document: {:?}", doc);
    }
}

#[test]
fn test_plain_text_round_trips() {
    for text in [
        "hello",
        "a sentence with punctuation, (parens) and ] brackets.",
        "unicode: häagen-dazs 🦀",
        "  leading and trailing  ",
        "line\nbreak",
    ] {
        assert_eq!(tokenize(text).unwrap(), vec![Inline::Plain(text)]);
    }
}

#[test]
fn test_delimiter_balance_law() {
    for count in 0..8 {
        let text: String = (0..count).map(|i| format!("w{}**", i)).collect();
        let result = tokenize(&text);
        if count % 2 == 0 {
            assert!(result.is_ok(), "{} delimiters: {:?}", count, result);
        } else {
            assert_eq!(result.unwrap_err().kind(), ErrorKind::UnterminatedDelimiter);
        }
    }
}

#[test]
fn test_classification_is_total() {
    let inputs = [
        "", " ", "#", "# ", "#######", "```", "```\n", "\n```", ">", "> \n>", "* ", "-", "1.",
        "1. a\n2.", "0. zero", "\u{feff}", "\r\n\r\n",
    ];
    for input in inputs {
        let _ = classify(input);
    }
}

#[test]
fn test_markup_is_well_formed() {
    let root = build(PAGE).unwrap();
    let html = root.to_markup().unwrap();
    assert_balanced(&html);
    assert_eq!(count_elements(&root), html.matches("</").count());
}

#[test]
fn test_block_locations_point_into_source() {
    for block in segment_blocks(PAGE) {
        assert_eq!(block.span.slice(PAGE), Some(block.text));
        let first_line = PAGE.lines().nth(block.line - 1).unwrap();
        assert!(first_line.contains(block.text.lines().next().unwrap()));
    }
}

fn count_elements(element: &Element) -> usize {
    let own = usize::from(element.tag().is_some());
    own + element.children().iter().map(count_elements).sum::<usize>()
}

/// Check that every opening tag is closed in order.
fn assert_balanced(html: &str) {
    let mut stack: Vec<&str> = Vec::new();
    let mut rest = html;
    while let Some(start) = rest.find('<') {
        let end = start + rest[start..].find('>').expect("unclosed angle bracket");
        let tag = &rest[start + 1..end];
        if let Some(name) = tag.strip_prefix('/') {
            assert_eq!(stack.pop(), Some(name), "mismatched close in {}", html);
        } else {
            let name = tag.split_whitespace().next().unwrap_or(tag);
            stack.push(name);
        }
        rest = &rest[end + 1..];
    }
    assert!(stack.is_empty(), "unclosed tags {:?}", stack);
}
