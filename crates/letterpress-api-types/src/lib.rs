//! Request and response shapes for the Letterpress HTTP API.
//!
//! Field names follow the browser editor's JSON (`content` for the
//! description, `sections` for blocks, `type`/`order`/`styles` on each
//! section). The model's own names are accepted as aliases when decoding.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionType {
    Text,
    Image,
    Button,
    Divider,
    /// Any kind this build does not know, including a missing `type`.
    #[default]
    #[serde(other)]
    Unsupported,
}

/// A full template document as sent by the editor.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplatePayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, alias = "description", deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, alias = "logo", skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default, alias = "blocks", deserialize_with = "null_as_default")]
    pub sections: Vec<SectionPayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(
        rename = "type",
        alias = "kind",
        default,
        deserialize_with = "null_as_default"
    )]
    pub section_type: SectionType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, alias = "position", deserialize_with = "null_as_default")]
    pub order: u32,
    /// Insertion order is preserved (`serde_json/preserve_order`).
    #[serde(default, alias = "style", deserialize_with = "null_as_default")]
    pub styles: Map<String, Value>,
}

/// A persisted template snapshot as listed by `GET /data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedTemplate {
    pub id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub saved_at: OffsetDateTime,
    #[serde(flatten)]
    pub template: TemplatePayload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub data: Vec<SavedTemplate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveResponse {
    pub id: Uuid,
    pub message: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_editor_json() {
        let raw = r##"{
            "title": "Welcome Email",
            "content": "Welcome to our platform!",
            "sections": [
                {
                    "id": "1",
                    "type": "button",
                    "content": "Click me",
                    "order": 0,
                    "styles": { "fontSize": "16px", "color": "#000000", "backgroundColor": "#f4f6f5" }
                }
            ]
        }"##;

        let payload: TemplatePayload = serde_json::from_str(raw).expect("valid payload");
        assert_eq!(payload.title, "Welcome Email");
        assert_eq!(payload.content, "Welcome to our platform!");
        assert_eq!(payload.logo_url, None);
        assert_eq!(payload.sections.len(), 1);

        let section = &payload.sections[0];
        assert_eq!(section.section_type, SectionType::Button);
        let keys: Vec<&str> = section.styles.keys().map(String::as_str).collect();
        assert_eq!(keys, ["fontSize", "color", "backgroundColor"]);
    }

    #[test]
    fn accepts_model_field_names_and_nulls() {
        let raw = r#"{
            "title": null,
            "description": "B",
            "logo": "data:image/png;base64,AAAA",
            "blocks": [{ "kind": "divider", "content": null, "style": null }]
        }"#;

        let payload: TemplatePayload = serde_json::from_str(raw).expect("valid payload");
        assert_eq!(payload.title, "");
        assert_eq!(payload.content, "B");
        assert_eq!(
            payload.logo_url.as_deref(),
            Some("data:image/png;base64,AAAA")
        );
        assert_eq!(payload.sections[0].section_type, SectionType::Divider);
        assert!(payload.sections[0].styles.is_empty());
    }

    #[test]
    fn unknown_or_missing_kinds_are_unsupported() {
        let raw = r#"{
            "sections": [
                { "type": "video" },
                { "content": "no kind", "order": null },
                { "type": "text", "content": "ok" }
            ]
        }"#;

        let payload: TemplatePayload = serde_json::from_str(raw).expect("valid payload");
        let kinds: Vec<SectionType> = payload.sections.iter().map(|s| s.section_type).collect();
        assert_eq!(
            kinds,
            [
                SectionType::Unsupported,
                SectionType::Unsupported,
                SectionType::Text
            ]
        );
        assert_eq!(payload.sections[1].order, 0);
        assert_eq!(payload.sections[2].content, "ok");
    }

    #[test]
    fn saved_template_flattens_document_fields() {
        let saved = SavedTemplate {
            id: Uuid::nil(),
            saved_at: time::macros::datetime!(2024-05-01 12:00 UTC),
            template: TemplatePayload {
                title: "A".to_string(),
                ..Default::default()
            },
        };

        let value = serde_json::to_value(&saved).expect("serializable");
        assert_eq!(value["title"], "A");
        assert_eq!(value["savedAt"], "2024-05-01T12:00:00Z");
        assert!(value.get("logoUrl").is_none());
    }
}
