use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

use crate::domain::document::{Block, BlockKind, Document};

use super::style::style_to_string;

pub const TITLE_TOKEN: &str = "{{title}}";
pub const CONTENT_TOKEN: &str = "{{content}}";
pub const SECTIONS_BEGIN_TOKEN: &str = "{{#each sections}}";
pub const SECTIONS_END_TOKEN: &str = "{{/each}}";

pub const DEFAULT_TITLE: &str = "Default Title";
pub const DEFAULT_CONTENT: &str = "Default Content";

const DIVIDER_HTML: &str = r#"<hr class="divider">"#;

// Non-greedy and dot-matches-newline: each begin token pairs with the
// nearest end token, and the span may cover several lines of skeleton.
static SECTIONS_SPAN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        "(?s){}.*?{}",
        regex::escape(SECTIONS_BEGIN_TOKEN),
        regex::escape(SECTIONS_END_TOKEN)
    ))
    .expect("sections span pattern is a valid regex")
});

/// Compile `document` into `skeleton`.
pub fn render_document(document: &Document, skeleton: &str) -> String {
    let title = non_empty_or(&document.title, DEFAULT_TITLE);
    let description = non_empty_or(&document.description, DEFAULT_CONTENT);

    let html = skeleton
        .replace(TITLE_TOKEN, title)
        .replace(CONTENT_TOKEN, description);

    let sections = document
        .blocks()
        .iter()
        .map(render_block)
        .collect::<Vec<_>>()
        .join("\n");

    SECTIONS_SPAN
        .replace_all(&html, NoExpand(&sections))
        .into_owned()
}

/// HTML fragment for a single block. Image and unsupported blocks have no
/// markup of their own and render as an empty fragment.
pub fn render_block(block: &Block) -> String {
    match block.kind() {
        BlockKind::Text => format!(
            r#"<div style="{}">{}</div>"#,
            style_to_string(&block.style),
            block.content
        ),
        BlockKind::Button => format!(
            r##"<a href="#" class="button" style="{}">{}</a>"##,
            style_to_string(&block.style),
            block.content
        ),
        BlockKind::Divider => DIVIDER_HTML.to_string(),
        BlockKind::Image | BlockKind::Unsupported => String::new(),
    }
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() { fallback } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::style::{COLOR, FONT_SIZE, StyleMap};

    const SKELETON: &str = "Hi {{title}}, {{content}} {{#each sections}}X{{/each}}";

    fn text_block(content: &str, style: StyleMap) -> Block {
        Block::restore("t".into(), BlockKind::Text, content.into(), style)
    }

    fn document(title: &str, description: &str, blocks: Vec<Block>) -> Document {
        Document::from_parts(title.into(), description.into(), None, blocks)
    }

    #[test]
    fn empty_document_removes_marker_span() {
        let html = render_document(&document("A", "B", Vec::new()), SKELETON);
        assert_eq!(html, "Hi A, B ");
    }

    #[test]
    fn empty_metadata_falls_back_to_defaults() {
        let html = render_document(&document("", "", Vec::new()), SKELETON);
        assert_eq!(html, "Hi Default Title, Default Content ");
    }

    #[test]
    fn text_block_carries_style_and_content() {
        let block = text_block("Hello", StyleMap::new().with(COLOR, "#fff"));
        let html = render_document(&document("A", "B", vec![block]), SKELETON);

        assert!(html.contains("color: #fff"));
        assert!(html.contains("Hello"));
        assert_eq!(html, r#"Hi A, B <div style="color: #fff">Hello</div>"#);
    }

    #[test]
    fn fragments_follow_block_order_and_kind() {
        let blocks = vec![
            text_block("first", StyleMap::new().with(FONT_SIZE, "16px")),
            Block::restore(
                "d".into(),
                BlockKind::Divider,
                "ignored".into(),
                StyleMap::new().with(COLOR, "red"),
            ),
            Block::restore("i".into(), BlockKind::Image, "a cat".into(), StyleMap::new()),
            Block::restore("b".into(), BlockKind::Button, "Go".into(), StyleMap::new()),
            Block::restore(
                "u".into(),
                BlockKind::Unsupported,
                "clip".into(),
                StyleMap::new().with(COLOR, "red"),
            ),
            text_block("last", StyleMap::new()),
        ];

        let html = render_document(&document("A", "B", blocks), "{{#each sections}}{{/each}}");

        assert_eq!(
            html,
            concat!(
                "<div style=\"font-size: 16px\">first</div>\n",
                "<hr class=\"divider\">\n",
                "\n",
                "<a href=\"#\" class=\"button\" style=\"\">Go</a>\n",
                "\n",
                "<div style=\"\">last</div>"
            )
        );
    }

    #[test]
    fn marker_span_may_cover_lines_and_repeat() {
        let skeleton = "<ul>{{#each sections}}\n  <li>{{this}}</li>\n{{/each}}</ul>|{{#each sections}}{{/each}}";
        let block = text_block("x", StyleMap::new());

        let html = render_document(&document("A", "B", vec![block]), skeleton);

        assert_eq!(html, r#"<ul><div style="">x</div></ul>|<div style="">x</div>"#);
    }

    #[test]
    fn missing_tokens_are_left_alone() {
        let skeleton = "<h1>static</h1><p>{{content}}</p>";
        let html = render_document(&document("A", "B", Vec::new()), skeleton);
        assert_eq!(html, "<h1>static</h1><p>B</p>");

        let unterminated = "{{title}} {{#each sections}}X";
        let html = render_document(&document("A", "B", Vec::new()), unterminated);
        assert_eq!(html, "A {{#each sections}}X");
    }

    #[test]
    fn block_html_is_inserted_literally() {
        let block = text_block("costs $1 and ${name} & <b>more</b>", StyleMap::new());
        let html = render_document(&document("A", "B", vec![block]), SKELETON);
        assert!(html.ends_with(r#"<div style="">costs $1 and ${name} & <b>more</b></div>"#));
    }

    #[test]
    fn render_is_deterministic() {
        let mut doc = Document::new();
        doc.add_block(BlockKind::Button);
        doc.add_block(BlockKind::Divider);

        let first = render_document(&doc, SKELETON);
        let second = render_document(&doc, SKELETON);
        assert_eq!(first, second);
    }
}
