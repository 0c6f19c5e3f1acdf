//! An editing session: the working document and the saved history it has
//! seen. A session is created when editing starts and dropped when it ends;
//! nothing about it lives in process-wide state.

use time::OffsetDateTime;
use tracing::debug;
use uuid::Uuid;

use crate::application::error::AppError;
use crate::application::repos::StoredTemplate;
use crate::application::templates::{HtmlExport, TemplateService};
use crate::domain::document::Document;

pub struct EditorSession {
    templates: TemplateService,
    document: Document,
    history: Vec<StoredTemplate>,
}

impl EditorSession {
    /// Begin editing a fresh default document.
    pub fn start(templates: TemplateService) -> Self {
        Self::with_document(templates, Document::new())
    }

    pub fn with_document(templates: TemplateService, document: Document) -> Self {
        Self {
            templates,
            document,
            history: Vec::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// An owned copy of the working document, safe to hand to render or
    /// persistence while editing continues.
    pub fn snapshot(&self) -> Document {
        self.document.clone()
    }

    pub fn history(&self) -> &[StoredTemplate] {
        &self.history
    }

    /// Reload the saved history. On failure the previous list is kept.
    pub async fn refresh_history(&mut self) -> Result<usize, AppError> {
        self.history = self.templates.history().await?;
        Ok(self.history.len())
    }

    /// Replace the working document wholesale with a saved snapshot.
    pub fn load_from_history(&mut self, index: usize) -> bool {
        match self.history.get(index) {
            Some(stored) => {
                debug!(
                    target = "letterpress::session",
                    template_id = %stored.id,
                    "loading saved template"
                );
                self.document = stored.document.clone();
                true
            }
            None => false,
        }
    }

    pub fn replace_document(&mut self, document: Document) {
        self.document = document;
    }

    /// Persist a snapshot of the working document. The history only records
    /// the snapshot once the store has returned its id.
    pub async fn save(&mut self) -> Result<Uuid, AppError> {
        let snapshot = self.snapshot();
        let id = self.templates.save(&snapshot).await?;
        self.history.push(StoredTemplate {
            id,
            saved_at: OffsetDateTime::now_utc(),
            document: snapshot,
        });
        Ok(id)
    }

    pub async fn export(&self) -> Result<HtmlExport, AppError> {
        let snapshot = self.snapshot();
        self.templates.export(&snapshot).await
    }

    /// End the session, handing back the working document.
    pub fn finish(self) -> Document {
        self.document
    }
}
