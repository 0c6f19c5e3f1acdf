//! Conversion between the typed document model and its JSON wire shape.
//!
//! Decoding is total: contents and style values are accepted as given, and
//! sections of unknown kind are kept as unsupported blocks. Non-string style
//! values, `null` included, are kept in their JSON text form.

use letterpress_api_types::{SectionPayload, SectionType, TemplatePayload};
use serde_json::{Map, Value};

use super::document::{Block, BlockKind, Document};
use super::style::StyleMap;

impl From<SectionType> for BlockKind {
    fn from(value: SectionType) -> Self {
        match value {
            SectionType::Text => BlockKind::Text,
            SectionType::Image => BlockKind::Image,
            SectionType::Button => BlockKind::Button,
            SectionType::Divider => BlockKind::Divider,
            SectionType::Unsupported => BlockKind::Unsupported,
        }
    }
}

impl From<BlockKind> for SectionType {
    fn from(value: BlockKind) -> Self {
        match value {
            BlockKind::Text => SectionType::Text,
            BlockKind::Image => SectionType::Image,
            BlockKind::Button => SectionType::Button,
            BlockKind::Divider => SectionType::Divider,
            BlockKind::Unsupported => SectionType::Unsupported,
        }
    }
}

impl Document {
    /// Build a document from a wire payload, keeping section order and
    /// renumbering positions from it.
    pub fn from_payload(payload: TemplatePayload) -> Self {
        let blocks = payload
            .sections
            .into_iter()
            .map(|section| {
                Block::restore(
                    section.id,
                    section.section_type.into(),
                    section.content,
                    style_from_json(section.styles),
                )
            })
            .collect();

        Document::from_parts(payload.title, payload.content, payload.logo_url, blocks)
    }

    pub fn to_payload(&self) -> TemplatePayload {
        TemplatePayload {
            title: self.title.clone(),
            content: self.description.clone(),
            logo_url: self.logo.clone(),
            sections: self
                .blocks()
                .iter()
                .map(|block| SectionPayload {
                    id: block.id().to_string(),
                    section_type: block.kind().into(),
                    content: block.content.clone(),
                    order: block.position(),
                    styles: style_to_json(&block.style),
                })
                .collect(),
        }
    }
}

fn style_from_json(styles: Map<String, Value>) -> StyleMap {
    styles
        .into_iter()
        .map(|(name, value)| match value {
            Value::String(text) => (name, text),
            other => (name, other.to_string()),
        })
        .collect()
}

fn style_to_json(style: &StyleMap) -> Map<String, Value> {
    style
        .iter()
        .map(|(name, value)| (name.to_string(), Value::String(value.to_string())))
        .collect()
}
