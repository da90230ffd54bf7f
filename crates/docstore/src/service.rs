//! Orchestrates validation, path planning, blob I/O, metadata persistence
//! and the cleanup sweep behind the caller-facing operations.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::config::StoreConfig;
use crate::error::DocStoreError;
use crate::model::{DocType, DocumentRecord, NewDocument, UploadPayload};
use crate::{cleanup, paths, validator, BlobStore, MetadataRepository};

/// The document service. Each document moves Absent -> Stored -> Absent;
/// there are no intermediate or versioned states.
pub struct DocumentService {
    config: StoreConfig,
    blobs: Arc<dyn BlobStore>,
    metadata: Arc<dyn MetadataRepository>,
}

impl DocumentService {
    pub fn new(
        config: StoreConfig,
        blobs: Arc<dyn BlobStore>,
        metadata: Arc<dyn MetadataRepository>,
    ) -> Self {
        DocumentService {
            config,
            blobs,
            metadata,
        }
    }

    /// Validates, writes the blob, then persists the metadata row.
    ///
    /// Write-then-persist is deliberate: if the persist fails after the write
    /// succeeded, the blob is left behind as an orphan (logged, unlinked to
    /// any row), which is preferred over a row pointing at a missing file.
    pub async fn upload(
        &self,
        owner_key: &str,
        doc_type: DocType,
        payload: UploadPayload,
    ) -> Result<DocumentRecord, DocStoreError> {
        let limits = self.config.limits(doc_type.family());
        let count = self.metadata.count_by_owner(owner_key).await?;
        let verdict = validator::check_upload(owner_key, doc_type, &payload, count, limits);
        if let Some(err) = verdict.into_error(owner_key) {
            warn!(
                owner_key,
                doc_type = %doc_type,
                filename = ?payload.filename,
                "upload rejected: {}",
                err
            );
            return Err(err);
        }

        // The validator has rejected missing and blank names already.
        let original_filename = payload.filename.as_deref().unwrap_or("unnamed");
        let content_type = payload.content_type.as_deref().unwrap_or_default();

        let planned = paths::plan(self.config.root(), owner_key, doc_type, original_filename)?;
        let written = self.blobs.write(&planned.full_path, &payload.content).await?;

        let record = self
            .metadata
            .save(NewDocument {
                owner_key: owner_key.to_string(),
                doc_type,
                original_filename: original_filename.to_string(),
                stored_filename: planned.stored_filename,
                content_type: content_type.to_string(),
                size_bytes: written as i64,
                storage_path: planned.full_path.clone(),
            })
            .await
            .map_err(|e| {
                error!(
                    path = ?planned.full_path,
                    "metadata persist failed after blob write, orphan file left behind: {}",
                    e
                );
                e
            })?;

        info!(id = record.id, owner_key, doc_type = %doc_type, "document stored");
        Ok(record)
    }

    /// Returns the metadata row for `id`.
    pub async fn get(&self, id: i64) -> Result<DocumentRecord, DocStoreError> {
        self.metadata
            .find_by_id(id)
            .await?
            .ok_or(DocStoreError::DocumentNotFound(id))
    }

    /// All documents of one owner; order is not significant.
    pub async fn list(&self, owner_key: &str) -> Result<Vec<DocumentRecord>, DocStoreError> {
        Ok(self.metadata.find_all_by_owner(owner_key).await?)
    }

    /// Resolves the record, then reads the blob. A record whose file is gone
    /// yields [`DocStoreError::BlobMissing`], distinguishable from a missing
    /// record.
    pub async fn download(&self, id: i64) -> Result<(DocumentRecord, Vec<u8>), DocStoreError> {
        let record = self.get(id).await?;
        let content = self.blobs.read(&record.storage_path).await?.ok_or_else(|| {
            DocStoreError::BlobMissing {
                id,
                path: record.storage_path.clone(),
            }
        })?;
        Ok((record, content))
    }

    /// Deletes the blob, then the row, then sweeps now-empty ancestors.
    ///
    /// File-before-row ordering means a crash mid-operation leaves at worst a
    /// dangling row referencing a deleted file, which a later reconciliation
    /// pass can recover.
    pub async fn delete(&self, id: i64) -> Result<(), DocStoreError> {
        let record = self.get(id).await?;
        self.blobs.delete(&record.storage_path).await?;
        self.metadata.delete(record.id).await?;
        if let Some(parent) = record.storage_path.parent() {
            cleanup::sweep_empty_dirs(self.blobs.as_ref(), self.config.root(), parent).await;
        }
        info!(id, owner_key = %record.owner_key, "document deleted");
        Ok(())
    }

    /// Deletes every document of an owner: all blobs, then the rows as one
    /// batch, then a sweep of each emptied directory.
    pub async fn delete_all_by_owner(&self, owner_key: &str) -> Result<(), DocStoreError> {
        let records = self.metadata.find_all_by_owner(owner_key).await?;
        if records.is_empty() {
            return Err(DocStoreError::OwnerNotFound(owner_key.to_string()));
        }

        for record in &records {
            self.blobs.delete(&record.storage_path).await?;
        }

        let ids: Vec<i64> = records.iter().map(|r| r.id).collect();
        self.metadata.delete_all(&ids).await?;

        let mut parents: Vec<PathBuf> = records
            .iter()
            .filter_map(|r| r.storage_path.parent().map(|p| p.to_path_buf()))
            .collect();
        parents.sort();
        parents.dedup();
        for parent in parents {
            cleanup::sweep_empty_dirs(self.blobs.as_ref(), self.config.root(), &parent).await;
        }

        info!(owner_key, count = records.len(), "all documents deleted for owner");
        Ok(())
    }
}
