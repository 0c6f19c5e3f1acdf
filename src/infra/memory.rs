//! Process-local template store used when no database is configured.

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::application::repos::{RepoError, StoredTemplate, TemplatesRepo};
use crate::domain::document::Document;

/// Keeps every saved snapshot in insertion order. Contents are lost when the
/// process exits.
#[derive(Default)]
pub struct InMemoryTemplates {
    entries: RwLock<Vec<StoredTemplate>>,
}

impl InMemoryTemplates {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl TemplatesRepo for InMemoryTemplates {
    async fn persist(&self, document: &Document) -> Result<Uuid, RepoError> {
        let id = Uuid::new_v4();
        self.entries.write().await.push(StoredTemplate {
            id,
            saved_at: OffsetDateTime::now_utc(),
            document: document.clone(),
        });
        Ok(id)
    }

    async fn list_history(&self) -> Result<Vec<StoredTemplate>, RepoError> {
        Ok(self.entries.read().await.clone())
    }

    async fn health_check(&self) -> Result<(), RepoError> {
        Ok(())
    }
}
