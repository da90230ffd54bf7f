//! Destination planning for uploaded blobs.
//!
//! Layout: `root/{normalized_owner_key}/{doctype}/{uuid4}_{sanitized_name}`.
//! The stored filename is UUID-prefixed so two uploads with the same original
//! name never collide. Owner keys and filenames are attacker-influenced, so
//! the planned path is normalized and asserted to stay inside the root in
//! addition to the character whitelisting.

use std::path::{Component, Path, PathBuf};

use uuid::Uuid;

use crate::error::DocStoreError;
use crate::model::DocType;

/// Planned destination for a single upload.
#[derive(Debug, Clone)]
pub struct PlannedPath {
    /// Directory the blob will live in (`root/owner/doctype`).
    pub directory: PathBuf,
    /// Globally unique stored filename.
    pub stored_filename: String,
    /// `directory` joined with `stored_filename`.
    pub full_path: PathBuf,
}

/// Turns an owner key into a filesystem-safe, lower-cased path segment.
/// `@` and `.` become literal markers so email owners stay readable on disk.
pub fn normalize_owner_key(owner_key: &str) -> String {
    let marked = owner_key.replace('@', "_at_").replace('.', "_dot_");
    marked
        .chars()
        .map(|c| if is_safe_char(c) { c } else { '_' })
        .collect::<String>()
        .to_lowercase()
}

/// Replaces every character outside `[a-zA-Z0-9._-]` with `_`.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| if is_safe_char(c) || c == '.' { c } else { '_' })
        .collect()
}

fn is_safe_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.'
}

/// Computes the destination for an upload and asserts containment.
///
/// `root` must already be absolute and normalized (see
/// [`crate::config::StoreConfig::new`]). The destination does not exist yet,
/// so it is normalized lexically rather than through the filesystem.
pub fn plan(
    root: &Path,
    owner_key: &str,
    doc_type: DocType,
    original_filename: &str,
) -> Result<PlannedPath, DocStoreError> {
    let directory = normalize_lexically(
        &root
            .join(normalize_owner_key(owner_key))
            .join(doc_type.subdir()),
    );
    if !directory.starts_with(root) || directory == root {
        return Err(DocStoreError::PathEscapesRoot { path: directory });
    }

    let stored_filename = format!(
        "{}_{}",
        Uuid::new_v4(),
        sanitize_filename(original_filename).to_lowercase()
    );
    let full_path = directory.join(&stored_filename);

    Ok(PlannedPath {
        directory,
        stored_filename,
        full_path,
    })
}

/// Resolves `.` and `..` components without touching the filesystem.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_owner_key_is_normalized() {
        assert_eq!(normalize_owner_key("A@B.com"), "a_at_b_dot_com");
        assert_eq!(normalize_owner_key("jane.doe@corp.io"), "jane_dot_doe_at_corp_dot_io");
    }

    #[test]
    fn hostile_owner_key_characters_are_replaced() {
        assert_eq!(normalize_owner_key("a/b\\c d"), "a_b_c_d");
    }

    #[test]
    fn filename_is_sanitized_but_keeps_dots() {
        assert_eq!(sanitize_filename("my resume (final).pdf"), "my_resume__final_.pdf");
        assert_eq!(sanitize_filename("Straße.pdf"), "Stra_e.pdf");
    }

    #[test]
    fn plan_places_blob_under_owner_and_type() {
        let root = Path::new("/srv/docs");
        let planned = plan(root, "a@b.com", DocType::Cv, "resume.pdf").unwrap();
        assert_eq!(planned.directory, Path::new("/srv/docs/a_at_b_dot_com/cv"));
        assert!(planned.stored_filename.ends_with("_resume.pdf"));
        assert_eq!(
            planned.full_path,
            planned.directory.join(&planned.stored_filename)
        );
        // uuid4 prefix: 36 chars plus the separator
        assert_eq!(planned.stored_filename.len(), 36 + 1 + "resume.pdf".len());
    }

    #[test]
    fn two_plans_for_the_same_name_never_collide() {
        let root = Path::new("/srv/docs");
        let a = plan(root, "a@b.com", DocType::Cv, "resume.pdf").unwrap();
        let b = plan(root, "a@b.com", DocType::Cv, "resume.pdf").unwrap();
        assert_ne!(a.stored_filename, b.stored_filename);
    }

    #[test]
    fn normalization_cannot_escape_the_root() {
        // Separators and dots in the owner key are neutralized before the
        // join, and the containment assert backs that up.
        let root = Path::new("/srv/docs");
        let planned = plan(root, "../../etc", DocType::Cv, "x.pdf").unwrap();
        assert!(planned.full_path.starts_with(root));
    }

    #[test]
    fn lexical_normalization_resolves_parent_components() {
        assert_eq!(
            normalize_lexically(Path::new("/srv/docs/a/../b/./c")),
            PathBuf::from("/srv/docs/b/c")
        );
        // Escaping the prefix is visible to the containment check.
        assert_eq!(
            normalize_lexically(Path::new("/srv/docs/../../x")),
            PathBuf::from("/x")
        );
    }
}
