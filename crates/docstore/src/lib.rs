//! Document storage core.
//!
//! Binds binary blobs persisted on the filesystem to metadata rows persisted
//! in a database. Blobs live under a single configured root at
//! `root/{owner}/{doctype}/{uuid}_{name}`; metadata rows reference them by
//! absolute path. There is no cross-store transaction: uploads write the blob
//! first and persist the row second, deletes remove the blob first and the
//! row second, so a mid-operation failure leaves either an orphan file or a
//! dangling row, never an ambiguous state.

pub mod cleanup;
pub mod config;
pub mod database;
pub mod error;
pub mod filesystem;
pub mod memory;
pub mod model;
pub mod paths;
pub mod service;
pub mod validator;

use std::path::{Path, PathBuf};

use async_trait::async_trait;

pub use config::{FamilyLimits, StoreConfig};
pub use database::PgMetadataRepository;
pub use error::{DocStoreError, MetadataError};
pub use filesystem::FsBlobStore;
pub use memory::InMemoryRepository;
pub use model::{DocType, DocumentFamily, DocumentRecord, NewDocument, UploadPayload};
pub use service::DocumentService;

/// Filesystem access for blob payloads. The directory operations exist for
/// the cleanup sweep.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Writes `content` to `path`, creating missing parent directories and
    /// overwriting an existing file. Returns the number of bytes written.
    async fn write(&self, path: &Path, content: &[u8]) -> Result<u64, DocStoreError>;

    /// Reads the blob at `path`; `None` if there is no file there.
    async fn read(&self, path: &Path) -> Result<Option<Vec<u8>>, DocStoreError>;

    /// Removes the file at `path`. Succeeds silently if it is already gone.
    async fn delete(&self, path: &Path) -> Result<(), DocStoreError>;

    /// Lists the entries of `dir`.
    async fn list_dir(&self, dir: &Path) -> Result<Vec<PathBuf>, DocStoreError>;

    /// Removes `dir`; fails if it is not empty.
    async fn remove_dir(&self, dir: &Path) -> Result<(), DocStoreError>;
}

/// Metadata persistence contract consumed by the orchestrator.
/// Implementations: [`PgMetadataRepository`] (PostgreSQL) and
/// [`InMemoryRepository`] (tests, database-less development).
#[async_trait]
pub trait MetadataRepository: Send + Sync {
    /// Persists a new row and returns it with `id` and `created_at` assigned.
    async fn save(&self, doc: NewDocument) -> Result<DocumentRecord, MetadataError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<DocumentRecord>, MetadataError>;

    /// All rows for an owner; order is not significant.
    async fn find_all_by_owner(&self, owner_key: &str)
        -> Result<Vec<DocumentRecord>, MetadataError>;

    async fn count_by_owner(&self, owner_key: &str) -> Result<i64, MetadataError>;

    async fn delete(&self, id: i64) -> Result<(), MetadataError>;

    /// Removes a batch of rows in one logical unit.
    async fn delete_all(&self, ids: &[i64]) -> Result<(), MetadataError>;
}
