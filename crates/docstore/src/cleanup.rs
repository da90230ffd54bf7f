//! Best-effort removal of directories left empty by a deletion.

use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::DocStoreError;
use crate::BlobStore;

/// Walks upward from `start` toward (but never including) `root`, removing
/// each directory level that is empty and stopping at the first non-empty
/// one.
///
/// Both paths are expected to be absolute and normalized; the walk refuses to
/// step outside `root`. Any failure, such as a concurrent upload creating a
/// sibling entry between the listing and the removal, is logged and
/// swallowed. The sweep must never fail the deletion that triggered it.
pub async fn sweep_empty_dirs(blobs: &dyn BlobStore, root: &Path, start: &Path) {
    let mut current = start.to_path_buf();
    while current != root && current.starts_with(root) {
        match blobs.list_dir(&current).await {
            Ok(entries) if !entries.is_empty() => return,
            Ok(_) => {
                if let Err(e) = blobs.remove_dir(&current).await {
                    warn!(dir = ?current, error = %e, "cleanup sweep could not remove directory");
                    return;
                }
                debug!(dir = ?current, "removed empty directory");
            }
            // Already gone, nothing to sweep.
            Err(DocStoreError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => return,
            Err(e) => {
                warn!(dir = ?current, error = %e, "cleanup sweep stopped");
                return;
            }
        }
        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => return,
        }
    }
}
