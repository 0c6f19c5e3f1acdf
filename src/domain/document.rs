//! The email template document and its ordered content blocks.

use std::collections::HashSet;

use uuid::Uuid;

use super::style::{
    BACKGROUND_COLOR, BORDER_RADIUS, COLOR, FONT_SIZE, FONT_SIZE_STEP_PX, PADDING, StyleMap,
    TEXT_ALIGN, TextAlign,
};

pub const DEFAULT_DOCUMENT_TITLE: &str = "Welcome Email";
pub const DEFAULT_DOCUMENT_DESCRIPTION: &str = "Welcome to our platform!";
const DEFAULT_GREETING: &str = "Hello there!";
const DEFAULT_GREETING_COLOR: &str = "#273746";
const DEFAULT_BLOCK_COLOR: &str = "#000000";
const BUTTON_BACKGROUND: &str = "#f4f6f5";
const BUTTON_RADIUS: &str = "0.375rem";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Text,
    Image,
    Button,
    Divider,
    /// A kind carried over from a payload this build cannot render.
    Unsupported,
}

impl BlockKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BlockKind::Text => "text",
            BlockKind::Image => "image",
            BlockKind::Button => "button",
            BlockKind::Divider => "divider",
            BlockKind::Unsupported => "unsupported",
        }
    }

    fn default_content(self) -> &'static str {
        match self {
            BlockKind::Text => "New text section",
            BlockKind::Button => "Click me",
            BlockKind::Image => "Image description",
            BlockKind::Divider | BlockKind::Unsupported => "",
        }
    }

    fn default_style(self) -> StyleMap {
        let style = StyleMap::new()
            .with(FONT_SIZE, "16px")
            .with(COLOR, DEFAULT_BLOCK_COLOR)
            .with(TEXT_ALIGN, TextAlign::Left.as_str())
            .with(PADDING, "1rem");

        match self {
            BlockKind::Button => style
                .with(BACKGROUND_COLOR, BUTTON_BACKGROUND)
                .with(BORDER_RADIUS, BUTTON_RADIUS),
            _ => style,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// One renderable unit of a document.
///
/// `kind` has no setter: a block keeps the kind it was created with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    id: String,
    kind: BlockKind,
    pub content: String,
    position: u32,
    pub style: StyleMap,
}

impl Block {
    fn fresh(kind: BlockKind, position: u32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            content: kind.default_content().to_string(),
            position,
            style: kind.default_style(),
        }
    }

    /// Rebuild a block from a stored snapshot. The position is assigned when
    /// the block is placed into a [`Document`].
    pub fn restore(id: String, kind: BlockKind, content: String, style: StyleMap) -> Self {
        Self {
            id,
            kind,
            content,
            position: 0,
            style,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    pub fn position(&self) -> u32 {
        self.position
    }
}

/// The template being edited: metadata plus blocks in render order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub title: String,
    pub description: String,
    /// Opaque logo handle (usually a `data:` URL); never inspected.
    pub logo: Option<String>,
    blocks: Vec<Block>,
}

impl Default for Document {
    /// A fresh editor document: one greeting text block.
    fn default() -> Self {
        let greeting = Block {
            content: DEFAULT_GREETING.to_string(),
            style: BlockKind::Text
                .default_style()
                .with(COLOR, DEFAULT_GREETING_COLOR),
            ..Block::fresh(BlockKind::Text, 0)
        };

        Self {
            title: DEFAULT_DOCUMENT_TITLE.to_string(),
            description: DEFAULT_DOCUMENT_DESCRIPTION.to_string(),
            logo: None,
            blocks: vec![greeting],
        }
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a document from already-decoded parts, in the given order.
    /// Blocks with an empty or repeated id get a fresh one.
    pub fn from_parts(
        title: String,
        description: String,
        logo: Option<String>,
        mut blocks: Vec<Block>,
    ) -> Self {
        let mut seen = HashSet::with_capacity(blocks.len());
        for block in &mut blocks {
            if block.id.is_empty() || !seen.insert(block.id.clone()) {
                block.id = Uuid::new_v4().to_string();
                seen.insert(block.id.clone());
            }
        }

        let mut document = Self {
            title,
            description,
            logo,
            blocks,
        };
        document.renumber();
        document
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn block(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    /// Append a block of `kind` with default content and style.
    pub fn add_block(&mut self, kind: BlockKind) -> &Block {
        let position = self.blocks.len() as u32;
        self.blocks.push(Block::fresh(kind, position));
        &self.blocks[self.blocks.len() - 1]
    }

    /// Swap the block at `index` with its neighbour. Returns `false` without
    /// touching the sequence when there is no neighbour in that direction.
    pub fn move_block(&mut self, index: usize, direction: Direction) -> bool {
        if index >= self.blocks.len() {
            return false;
        }

        let target = match direction {
            Direction::Up if index > 0 => index - 1,
            Direction::Down if index + 1 < self.blocks.len() => index + 1,
            _ => return false,
        };

        self.blocks.swap(index, target);
        self.renumber();
        true
    }

    /// Remove the block at `index`; out-of-range indices are ignored.
    pub fn remove_block(&mut self, index: usize) -> Option<Block> {
        if index >= self.blocks.len() {
            return None;
        }

        let removed = self.blocks.remove(index);
        self.renumber();
        Some(removed)
    }

    pub fn set_block_style(&mut self, index: usize, partial: &StyleMap) -> bool {
        self.with_block(index, |block| block.style.merge(partial))
    }

    pub fn set_block_content(&mut self, index: usize, text: impl Into<String>) -> bool {
        let text = text.into();
        self.with_block(index, |block| block.content = text)
    }

    pub fn set_text_align(&mut self, index: usize, align: TextAlign) -> bool {
        self.set_block_style(index, &StyleMap::new().with(TEXT_ALIGN, align.as_str()))
    }

    pub fn set_color(&mut self, index: usize, color: impl Into<String>) -> bool {
        self.set_block_style(index, &StyleMap::new().with(COLOR, color))
    }

    pub fn increase_font_size(&mut self, index: usize) -> bool {
        self.with_block(index, |block| block.style.adjust_font_size(FONT_SIZE_STEP_PX))
    }

    pub fn decrease_font_size(&mut self, index: usize) -> bool {
        self.with_block(index, |block| {
            block.style.adjust_font_size(-FONT_SIZE_STEP_PX)
        })
    }

    fn with_block(&mut self, index: usize, apply: impl FnOnce(&mut Block)) -> bool {
        match self.blocks.get_mut(index) {
            Some(block) => {
                apply(block);
                true
            }
            None => false,
        }
    }

    fn renumber(&mut self) {
        for (index, block) in self.blocks.iter_mut().enumerate() {
            block.position = index as u32;
        }
    }
}
