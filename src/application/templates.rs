use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::application::error::AppError;
use crate::application::render::render_document;
use crate::application::repos::{LayoutSource, StoredTemplate, TemplatesRepo};
use crate::domain::document::Document;

/// Rendered export of a document, with the file name a browser download
/// would use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlExport {
    pub file_name: String,
    pub html: String,
}

/// Entry point for the collaborator-backed template operations.
#[derive(Clone)]
pub struct TemplateService {
    templates: Arc<dyn TemplatesRepo>,
    layout: Arc<dyn LayoutSource>,
}

impl TemplateService {
    pub fn new(templates: Arc<dyn TemplatesRepo>, layout: Arc<dyn LayoutSource>) -> Self {
        Self { templates, layout }
    }

    pub async fn layout_skeleton(&self) -> Result<String, AppError> {
        self.layout.fetch_layout_skeleton().await.map_err(|err| {
            warn!(
                target = "letterpress::templates",
                error = %err,
                "layout skeleton unavailable"
            );
            AppError::from(err)
        })
    }

    /// Persist a snapshot. Exactly one attempt; failures surface unchanged.
    pub async fn save(&self, document: &Document) -> Result<Uuid, AppError> {
        let id = self.templates.persist(document).await?;
        info!(
            target = "letterpress::templates",
            template_id = %id,
            blocks = document.len(),
            "template saved"
        );
        Ok(id)
    }

    pub async fn history(&self) -> Result<Vec<StoredTemplate>, AppError> {
        let history = self.templates.list_history().await?;
        Ok(history)
    }

    /// Fetch the layout and compile `document` into it.
    pub async fn render(&self, document: &Document) -> Result<String, AppError> {
        let skeleton = self.layout_skeleton().await?;
        Ok(render_document(document, &skeleton))
    }

    pub async fn export(&self, document: &Document) -> Result<HtmlExport, AppError> {
        let html = self.render(document).await?;
        Ok(HtmlExport {
            file_name: export_file_name(&document.title),
            html,
        })
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        self.templates.health_check().await?;
        Ok(())
    }
}

/// `Summer Sale  Promo` -> `summer-sale-promo.html`. Each whitespace run,
/// including leading and trailing ones, becomes a single `-`. Path
/// separators become `-` too, so the name never leaves its directory.
pub fn export_file_name(title: &str) -> String {
    let mut slug = String::with_capacity(title.len() + 5);
    let mut in_whitespace = false;
    for ch in title.to_lowercase().chars() {
        if ch == '/' || ch == '\\' {
            slug.push('-');
            in_whitespace = false;
        } else if ch.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
        } else {
            slug.push(ch);
            in_whitespace = false;
        }
    }
    slug.push_str(".html");
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_name_collapses_whitespace_runs() {
        assert_eq!(export_file_name("Welcome Email"), "welcome-email.html");
        assert_eq!(export_file_name("Summer  Sale\tPromo"), "summer-sale-promo.html");
        assert_eq!(export_file_name(" Hi "), "-hi-.html");
        assert_eq!(export_file_name(""), ".html");
    }

    #[test]
    fn export_name_stays_in_its_directory() {
        let name = export_file_name("../../etc/cron.d/x");
        assert_eq!(name, "..-..-etc-cron.d-x.html");
        assert_eq!(
            std::path::Path::new(&name).file_name(),
            Some(std::ffi::OsStr::new(&name))
        );

        assert_eq!(export_file_name(r"a\b"), "a-b.html");
    }
}
