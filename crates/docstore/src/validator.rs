//! Upload admissibility checks.
//!
//! Every check is evaluated (not short-circuited) so that all violations are
//! reported together. Nothing here touches the filesystem or the database.

use crate::config::FamilyLimits;
use crate::error::DocStoreError;
use crate::model::{DocType, DocumentFamily, UploadPayload};

const MIB: i64 = 1024 * 1024;

/// Outcome of running every admissibility check for one upload.
#[derive(Debug)]
pub struct Verdict {
    violations: Vec<String>,
    /// Set when the owner is at the quota: (current count, limit).
    quota: Option<(i64, u32)>,
}

impl Verdict {
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty() && self.quota.is_none()
    }

    /// Converts the verdict into the error the orchestrator should return.
    ///
    /// A quota breach that is the *only* violation becomes
    /// [`DocStoreError::QuotaExceeded`]; any other violation yields
    /// [`DocStoreError::Validation`] carrying the full ordered list,
    /// quota message included.
    pub fn into_error(self, owner_key: &str) -> Option<DocStoreError> {
        let Verdict { mut violations, quota } = self;
        if violations.is_empty() {
            return quota.map(|(count, limit)| DocStoreError::QuotaExceeded {
                owner_key: owner_key.to_string(),
                count,
                limit,
            });
        }
        if let Some((_, limit)) = quota {
            violations.push(format!("Document limit reached ({})", limit));
        }
        Some(DocStoreError::Validation(violations))
    }
}

/// Runs every admissibility check for an upload.
///
/// `owner_doc_count` is the owner's current document count as observed by the
/// caller; the quota check is not serialized against concurrent uploads, so
/// the quota may be exceeded by a small bounded margin under contention.
pub fn check_upload(
    owner_key: &str,
    doc_type: DocType,
    payload: &UploadPayload,
    owner_doc_count: i64,
    limits: &FamilyLimits,
) -> Verdict {
    let mut violations = Vec::new();

    if owner_key.trim().is_empty() {
        violations.push("Owner key is required".to_string());
    } else {
        match doc_type.family() {
            DocumentFamily::Candidate => {
                if !owner_key.contains('@') {
                    violations.push("Invalid email format".to_string());
                }
            }
            DocumentFamily::Vehicle => {
                if !owner_key.chars().all(|c| c.is_ascii_digit()) {
                    violations.push("Owner key must be a numeric vehicle id".to_string());
                }
            }
        }
    }

    if payload.content.is_empty() {
        violations.push("File is empty".to_string());
    }

    if payload.content.len() as i64 > limits.max_size_bytes {
        violations.push(format!(
            "File size exceeds {}MB",
            limits.max_size_bytes / MIB
        ));
    }

    let type_allowed = payload
        .content_type
        .as_deref()
        .is_some_and(|t| limits.allowed_content_types.contains(&t));
    if !type_allowed {
        violations.push(format!(
            "File type not allowed. Allowed: {}",
            limits.allowed_content_types.join(", ")
        ));
    }

    match payload.filename.as_deref() {
        None => violations.push("Filename is required".to_string()),
        Some(name) if name.trim().is_empty() => {
            violations.push("Filename is required".to_string())
        }
        Some(name) if name.contains("..") => {
            violations.push("Filename must not contain '..'".to_string())
        }
        Some(_) => {}
    }

    let quota = match limits.max_docs_per_owner {
        Some(limit) if owner_doc_count >= i64::from(limit) => Some((owner_doc_count, limit)),
        _ => None,
    };

    Verdict { violations, quota }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(filename: &str, content_type: &str, content: &[u8]) -> UploadPayload {
        UploadPayload {
            filename: Some(filename.to_string()),
            content_type: Some(content_type.to_string()),
            content: content.to_vec(),
        }
    }

    fn limits() -> FamilyLimits {
        FamilyLimits::candidate_defaults()
    }

    #[test]
    fn valid_upload_passes() {
        let verdict = check_upload(
            "a@b.com",
            DocType::Cv,
            &payload("resume.pdf", "application/pdf", b"pdf bytes"),
            0,
            &limits(),
        );
        assert!(verdict.is_ok());
        assert!(verdict.into_error("a@b.com").is_none());
    }

    #[test]
    fn all_violations_are_collected_in_order() {
        let upload = UploadPayload {
            filename: None,
            content_type: Some("text/plain".to_string()),
            content: Vec::new(),
        };
        let verdict = check_upload("", DocType::Cv, &upload, 0, &limits());
        match verdict.into_error("") {
            Some(DocStoreError::Validation(violations)) => {
                assert_eq!(violations[0], "Owner key is required");
                assert_eq!(violations[1], "File is empty");
                assert!(violations[2].starts_with("File type not allowed"));
                assert_eq!(violations[3], "Filename is required");
            }
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn email_shape_is_enforced_for_candidate_family() {
        let verdict = check_upload(
            "not-an-email",
            DocType::Cv,
            &payload("resume.pdf", "application/pdf", b"x"),
            0,
            &limits(),
        );
        match verdict.into_error("not-an-email") {
            Some(DocStoreError::Validation(violations)) => {
                assert_eq!(violations, vec!["Invalid email format".to_string()]);
            }
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn numeric_shape_is_enforced_for_vehicle_family() {
        let verdict = check_upload(
            "car-7",
            DocType::Photo,
            &payload("front.png", "image/png", b"x"),
            0,
            &FamilyLimits::vehicle_defaults(),
        );
        assert!(!verdict.is_ok());

        let verdict = check_upload(
            "42",
            DocType::Photo,
            &payload("front.png", "image/png", b"x"),
            0,
            &FamilyLimits::vehicle_defaults(),
        );
        assert!(verdict.is_ok());
    }

    #[test]
    fn oversized_file_is_rejected() {
        let mut tight = limits();
        tight.max_size_bytes = 4;
        let verdict = check_upload(
            "a@b.com",
            DocType::Cv,
            &payload("resume.pdf", "application/pdf", b"12345"),
            0,
            &tight,
        );
        match verdict.into_error("a@b.com") {
            Some(DocStoreError::Validation(violations)) => {
                assert!(violations[0].starts_with("File size exceeds"));
            }
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn webp_is_allowed_for_vehicles_only() {
        let upload = payload("side.webp", "image/webp", b"x");
        assert!(!check_upload("a@b.com", DocType::Cv, &upload, 0, &limits()).is_ok());
        assert!(check_upload("9", DocType::Photo, &upload, 0, &FamilyLimits::vehicle_defaults()).is_ok());
    }

    #[test]
    fn traversal_filename_is_rejected() {
        let verdict = check_upload(
            "a@b.com",
            DocType::Cv,
            &payload("../../etc/passwd.pdf", "application/pdf", b"x"),
            0,
            &limits(),
        );
        match verdict.into_error("a@b.com") {
            Some(DocStoreError::Validation(violations)) => {
                assert_eq!(violations, vec!["Filename must not contain '..'".to_string()]);
            }
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn quota_alone_becomes_quota_exceeded() {
        let verdict = check_upload(
            "a@b.com",
            DocType::Cv,
            &payload("resume.pdf", "application/pdf", b"x"),
            10,
            &limits(),
        );
        match verdict.into_error("a@b.com") {
            Some(DocStoreError::QuotaExceeded { count, limit, .. }) => {
                assert_eq!(count, 10);
                assert_eq!(limit, 10);
            }
            other => panic!("expected QuotaExceeded, got {:?}", other),
        }
    }

    #[test]
    fn quota_with_other_violations_stays_a_validation_error() {
        let verdict = check_upload(
            "a@b.com",
            DocType::Cv,
            &payload("resume.pdf", "text/plain", b"x"),
            10,
            &limits(),
        );
        match verdict.into_error("a@b.com") {
            Some(DocStoreError::Validation(violations)) => {
                assert_eq!(violations.len(), 2);
                assert!(violations[1].starts_with("Document limit reached"));
            }
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn vehicle_family_has_no_quota() {
        let verdict = check_upload(
            "42",
            DocType::Photo,
            &payload("front.png", "image/png", b"x"),
            1_000,
            &FamilyLimits::vehicle_defaults(),
        );
        assert!(verdict.is_ok());
    }
}
