//! PostgreSQL-backed metadata repository.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::info;

use crate::error::MetadataError;
use crate::model::{DocType, DocumentRecord, NewDocument};
use crate::MetadataRepository;

type DocumentRow = (
    i64,            // id
    String,         // owner_key
    String,         // doc_type
    String,         // original_filename
    String,         // stored_filename
    String,         // content_type
    i64,            // size_bytes
    String,         // storage_path
    DateTime<Utc>,  // created_at
);

const SELECT_COLUMNS: &str = "id, owner_key, doc_type, original_filename, stored_filename, \
                              content_type, size_bytes, storage_path, created_at";

/// Document metadata rows in PostgreSQL.
pub struct PgMetadataRepository {
    pool: PgPool,
}

impl PgMetadataRepository {
    /// Connects and bootstraps the schema.
    pub async fn connect(database_url: &str) -> Result<Self, MetadataError> {
        let pool = PgPool::connect(database_url).await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                id BIGSERIAL PRIMARY KEY,
                owner_key VARCHAR(255) NOT NULL,
                doc_type VARCHAR(32) NOT NULL,
                original_filename VARCHAR(255) NOT NULL,
                stored_filename VARCHAR(255) NOT NULL,
                content_type VARCHAR(128) NOT NULL,
                size_bytes BIGINT NOT NULL,
                storage_path TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_documents_owner ON documents(owner_key)")
            .execute(&pool)
            .await?;

        info!("document metadata schema initialized");
        Ok(Self { pool })
    }

    fn from_row(row: DocumentRow) -> Result<DocumentRecord, MetadataError> {
        let (
            id,
            owner_key,
            doc_type,
            original_filename,
            stored_filename,
            content_type,
            size_bytes,
            storage_path,
            created_at,
        ) = row;
        let doc_type = doc_type
            .parse::<DocType>()
            .map_err(|_| MetadataError::UnknownDocType(doc_type))?;
        Ok(DocumentRecord {
            id,
            owner_key,
            doc_type,
            original_filename,
            stored_filename,
            content_type,
            size_bytes,
            storage_path: PathBuf::from(storage_path),
            created_at,
        })
    }
}

#[async_trait]
impl MetadataRepository for PgMetadataRepository {
    async fn save(&self, doc: NewDocument) -> Result<DocumentRecord, MetadataError> {
        let (id, created_at): (i64, DateTime<Utc>) = sqlx::query_as(
            "INSERT INTO documents (owner_key, doc_type, original_filename, stored_filename, \
             content_type, size_bytes, storage_path) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING id, created_at",
        )
        .bind(&doc.owner_key)
        .bind(doc.doc_type.as_str())
        .bind(&doc.original_filename)
        .bind(&doc.stored_filename)
        .bind(&doc.content_type)
        .bind(doc.size_bytes)
        .bind(doc.storage_path.to_string_lossy().as_ref())
        .fetch_one(&self.pool)
        .await?;

        Ok(DocumentRecord {
            id,
            owner_key: doc.owner_key,
            doc_type: doc.doc_type,
            original_filename: doc.original_filename,
            stored_filename: doc.stored_filename,
            content_type: doc.content_type,
            size_bytes: doc.size_bytes,
            storage_path: doc.storage_path,
            created_at,
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<DocumentRecord>, MetadataError> {
        let row: Option<DocumentRow> = sqlx::query_as(&format!(
            "SELECT {} FROM documents WHERE id = $1",
            SELECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Self::from_row).transpose()
    }

    async fn find_all_by_owner(
        &self,
        owner_key: &str,
    ) -> Result<Vec<DocumentRecord>, MetadataError> {
        let rows: Vec<DocumentRow> = sqlx::query_as(&format!(
            "SELECT {} FROM documents WHERE owner_key = $1",
            SELECT_COLUMNS
        ))
        .bind(owner_key)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Self::from_row).collect()
    }

    async fn count_by_owner(&self, owner_key: &str) -> Result<i64, MetadataError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM documents WHERE owner_key = $1")
                .bind(owner_key)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    async fn delete(&self, id: i64) -> Result<(), MetadataError> {
        sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_all(&self, ids: &[i64]) -> Result<(), MetadataError> {
        sqlx::query("DELETE FROM documents WHERE id = ANY($1)")
            .bind(ids.to_vec())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
