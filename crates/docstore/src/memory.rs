//! In-memory metadata repository for tests and database-less development.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::error::MetadataError;
use crate::model::{DocumentRecord, NewDocument};
use crate::MetadataRepository;

/// Keeps rows in a mutex-guarded vector and assigns sequential ids.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    rows: Mutex<Vec<DocumentRecord>>,
    next_id: AtomicI64,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        InMemoryRepository::default()
    }
}

#[async_trait]
impl MetadataRepository for InMemoryRepository {
    async fn save(&self, doc: NewDocument) -> Result<DocumentRecord, MetadataError> {
        let record = DocumentRecord {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            owner_key: doc.owner_key,
            doc_type: doc.doc_type,
            original_filename: doc.original_filename,
            stored_filename: doc.stored_filename,
            content_type: doc.content_type,
            size_bytes: doc.size_bytes,
            storage_path: doc.storage_path,
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<DocumentRecord>, MetadataError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn find_all_by_owner(
        &self,
        owner_key: &str,
    ) -> Result<Vec<DocumentRecord>, MetadataError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.owner_key == owner_key)
            .cloned()
            .collect())
    }

    async fn count_by_owner(&self, owner_key: &str) -> Result<i64, MetadataError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.owner_key == owner_key)
            .count() as i64)
    }

    async fn delete(&self, id: i64) -> Result<(), MetadataError> {
        self.rows.lock().unwrap().retain(|r| r.id != id);
        Ok(())
    }

    async fn delete_all(&self, ids: &[i64]) -> Result<(), MetadataError> {
        self.rows.lock().unwrap().retain(|r| !ids.contains(&r.id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DocType;
    use std::path::PathBuf;

    fn new_doc(owner: &str, name: &str) -> NewDocument {
        NewDocument {
            owner_key: owner.to_string(),
            doc_type: DocType::Cv,
            original_filename: name.to_string(),
            stored_filename: format!("uuid_{}", name),
            content_type: "application/pdf".to_string(),
            size_bytes: 3,
            storage_path: PathBuf::from(format!("/tmp/{}/{}", owner, name)),
        }
    }

    #[tokio::test]
    async fn save_assigns_increasing_ids() {
        let repo = InMemoryRepository::new();
        let a = repo.save(new_doc("a@b.com", "one.pdf")).await.unwrap();
        let b = repo.save(new_doc("a@b.com", "two.pdf")).await.unwrap();
        assert!(b.id > a.id);
        assert_eq!(repo.count_by_owner("a@b.com").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn owner_partitioning_and_batch_delete() {
        let repo = InMemoryRepository::new();
        let a = repo.save(new_doc("a@b.com", "one.pdf")).await.unwrap();
        let b = repo.save(new_doc("a@b.com", "two.pdf")).await.unwrap();
        repo.save(new_doc("c@d.com", "three.pdf")).await.unwrap();

        repo.delete_all(&[a.id, b.id]).await.unwrap();
        assert_eq!(repo.count_by_owner("a@b.com").await.unwrap(), 0);
        assert_eq!(repo.count_by_owner("c@d.com").await.unwrap(), 1);
        assert_eq!(repo.find_by_id(a.id).await.unwrap(), None);
    }
}
