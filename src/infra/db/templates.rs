use async_trait::async_trait;
use letterpress_api_types::TemplatePayload;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    application::repos::{RepoError, StoredTemplate, TemplatesRepo},
    domain::document::Document,
};

use super::{PostgresRepositories, map_sqlx_error};

/// `payload` is read back as the stored JSON text so style keys keep the
/// order they were saved in.
#[derive(sqlx::FromRow)]
struct TemplateRow {
    id: Uuid,
    payload: String,
    saved_at: OffsetDateTime,
}

impl TryFrom<TemplateRow> for StoredTemplate {
    type Error = RepoError;

    fn try_from(row: TemplateRow) -> Result<Self, Self::Error> {
        let payload: TemplatePayload =
            serde_json::from_str(&row.payload).map_err(|err| RepoError::Corrupt {
                id: row.id,
                message: err.to_string(),
            })?;

        Ok(Self {
            id: row.id,
            saved_at: row.saved_at,
            document: Document::from_payload(payload),
        })
    }
}

#[async_trait]
impl TemplatesRepo for PostgresRepositories {
    async fn persist(&self, document: &Document) -> Result<Uuid, RepoError> {
        let payload = serde_json::to_string(&document.to_payload())
            .map_err(RepoError::from_persistence)?;

        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO templates (id, payload)
            VALUES ($1, $2::json)
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(payload)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(id)
    }

    async fn list_history(&self) -> Result<Vec<StoredTemplate>, RepoError> {
        let rows = sqlx::query_as::<_, TemplateRow>(
            r#"
            SELECT id, payload::text AS payload, saved_at
            FROM templates
            ORDER BY saved_at, id
            "#,
        )
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        rows.into_iter().map(StoredTemplate::try_from).collect()
    }

    async fn health_check(&self) -> Result<(), RepoError> {
        self.ping().await.map_err(map_sqlx_error)
    }
}
