//! Filesystem-backed blob store.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::DocStoreError;
use crate::BlobStore;

/// Blob store over the local filesystem. Stateless; every operation takes an
/// absolute path produced by the path planner or loaded from a metadata row.
#[derive(Debug, Default)]
pub struct FsBlobStore;

impl FsBlobStore {
    pub fn new() -> Self {
        FsBlobStore
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn write(&self, path: &Path, content: &[u8]) -> Result<u64, DocStoreError> {
        if let Some(parent) = path.parent() {
            // create_dir_all tolerates concurrent creation of the same tree.
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| DocStoreError::io(parent, e))?;
        }
        tokio::fs::write(path, content)
            .await
            .map_err(|e| DocStoreError::io(path, e))?;
        Ok(content.len() as u64)
    }

    async fn read(&self, path: &Path) -> Result<Option<Vec<u8>>, DocStoreError> {
        match tokio::fs::read(path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DocStoreError::io(path, e)),
        }
    }

    async fn delete(&self, path: &Path) -> Result<(), DocStoreError> {
        match tokio::fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DocStoreError::io(path, e)),
        }
    }

    async fn list_dir(&self, dir: &Path) -> Result<Vec<PathBuf>, DocStoreError> {
        let mut entries = tokio::fs::read_dir(dir)
            .await
            .map_err(|e| DocStoreError::io(dir, e))?;
        let mut paths = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| DocStoreError::io(dir, e))?
        {
            paths.push(entry.path());
        }
        Ok(paths)
    }

    async fn remove_dir(&self, dir: &Path) -> Result<(), DocStoreError> {
        tokio::fs::remove_dir(dir)
            .await
            .map_err(|e| DocStoreError::io(dir, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn write_creates_parents_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/c.bin");
        let store = FsBlobStore::new();

        let written = store.write(&path, b"payload").await.unwrap();
        assert_eq!(written, 7);
        assert_eq!(store.read(&path).await.unwrap(), Some(b"payload".to_vec()));
    }

    #[tokio::test]
    async fn write_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.bin");
        let store = FsBlobStore::new();

        store.write(&path, b"first").await.unwrap();
        store.write(&path, b"second").await.unwrap();
        assert_eq!(store.read(&path).await.unwrap(), Some(b"second".to_vec()));
    }

    #[tokio::test]
    async fn read_of_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsBlobStore::new();
        let got = store.read(&dir.path().join("gone.bin")).await.unwrap();
        assert_eq!(got, None);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.bin");
        let store = FsBlobStore::new();

        store.write(&path, b"x").await.unwrap();
        store.delete(&path).await.unwrap();
        store.delete(&path).await.unwrap();
        assert_eq!(store.read(&path).await.unwrap(), None);
    }

    #[tokio::test]
    async fn remove_dir_refuses_non_empty_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub/doc.bin");
        let store = FsBlobStore::new();

        store.write(&path, b"x").await.unwrap();
        let sub = dir.path().join("sub");
        assert!(store.remove_dir(&sub).await.is_err());
        assert_eq!(store.list_dir(&sub).await.unwrap().len(), 1);

        store.delete(&path).await.unwrap();
        store.remove_dir(&sub).await.unwrap();
        assert!(!sub.exists());
    }
}
