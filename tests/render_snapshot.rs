use letterpress::application::render::render_document;
use letterpress::domain::document::{BlockKind, Direction, Document};
use letterpress::domain::style::TextAlign;

const SKELETON: &str = include_str!("../assets/layout.html");

fn newsletter() -> Document {
    let mut document = Document::new();
    document.title = "Spring Newsletter".to_string();

    let button = document.add_block(BlockKind::Button).id().to_string();
    document.set_block_content(1, "Read more");
    document.add_block(BlockKind::Text);
    document.add_block(BlockKind::Divider);
    document.add_block(BlockKind::Image);
    assert!(document.move_block(3, Direction::Up));
    assert!(document.move_block(4, Direction::Up));
    document.set_text_align(4, TextAlign::Center);
    document.increase_font_size(4);

    assert_eq!(document.block(1).map(|b| b.id()), Some(button.as_str()));
    document
}

#[test]
fn editor_document_sections_snapshot() {
    let sections = newsletter()
        .blocks()
        .iter()
        .map(letterpress::application::render::render_block)
        .collect::<Vec<_>>()
        .join("\n");

    insta::assert_snapshot!(sections, @r##"
    <div style="font-size: 16px; color: #273746; text-align: left; padding: 1rem">Hello there!</div>
    <a href="#" class="button" style="font-size: 16px; color: #000000; text-align: left; padding: 1rem; background-color: #f4f6f5; border-radius: 0.375rem">Read more</a>
    <hr class="divider">

    <div style="font-size: 18px; color: #000000; text-align: center; padding: 1rem">New text section</div>
    "##);
}

#[test]
fn bundled_layout_is_filled() {
    let html = render_document(&newsletter(), SKELETON);

    assert!(html.contains("<title>Spring Newsletter</title>"));
    assert!(html.contains("<h1>Spring Newsletter</h1>"));
    assert!(html.contains("<p>Welcome to our platform!</p>"));
    assert!(html.contains(r#"class="button""#));
    assert!(!html.contains("{{"));
    assert_eq!(render_document(&newsletter(), SKELETON), html);
}
