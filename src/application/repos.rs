//! Collaborator traits describing persistence and layout adapters.

use async_trait::async_trait;
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::document::Document;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("stored template `{id}` could not be decoded: {message}")]
    Corrupt { id: Uuid, message: String },
    #[error("database timeout")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("layout skeleton `{path}` could not be read")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// A document snapshot as it was persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredTemplate {
    pub id: Uuid,
    pub saved_at: OffsetDateTime,
    pub document: Document,
}

#[async_trait]
pub trait TemplatesRepo: Send + Sync {
    /// Persist a snapshot and return its identifier.
    async fn persist(&self, document: &Document) -> Result<Uuid, RepoError>;

    /// Every persisted snapshot, oldest first.
    async fn list_history(&self) -> Result<Vec<StoredTemplate>, RepoError>;

    async fn health_check(&self) -> Result<(), RepoError>;
}

#[async_trait]
pub trait LayoutSource: Send + Sync {
    async fn fetch_layout_skeleton(&self) -> Result<String, LayoutError>;
}
