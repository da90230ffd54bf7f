//! Error taxonomy for the document store.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by document store operations.
#[derive(Debug, Error)]
pub enum DocStoreError {
    /// Upload rejected before any side effect. Carries every violation,
    /// in check order, so the caller sees all of them at once.
    #[error("Upload rejected: {}", .0.join(", "))]
    Validation(Vec<String>),

    /// Owner is already at the configured document limit.
    #[error("Owner {owner_key} already has {count} documents (limit {limit})")]
    QuotaExceeded {
        owner_key: String,
        count: i64,
        limit: u32,
    },

    /// No metadata row with this id.
    #[error("Document {0} not found")]
    DocumentNotFound(i64),

    /// Owner has zero documents.
    #[error("No documents found for owner {0}")]
    OwnerNotFound(String),

    /// Metadata row exists but the blob is gone. Kept distinct from
    /// [`DocStoreError::DocumentNotFound`] for diagnostics.
    #[error("No file at {path:?} for document {id}")]
    BlobMissing { id: i64, path: PathBuf },

    /// A planned destination resolved outside the storage root. Owner keys
    /// and filenames are attacker-influenced, so this fails closed.
    #[error("Storage path {path:?} escapes the configured root")]
    PathEscapesRoot { path: PathBuf },

    /// Filesystem failure. Carries the path for diagnostics, never content.
    #[error("I/O failure at {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Metadata(#[from] MetadataError),
}

impl DocStoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DocStoreError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors from the metadata repository.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// A stored `doc_type` column no longer maps to the closed enumeration.
    #[error("unknown doc_type {0:?} in metadata row")]
    UnknownDocType(String),
}
