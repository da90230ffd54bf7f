//! Store configuration, built once at startup and passed into the service.

use std::path::{Path, PathBuf};

use crate::model::DocumentFamily;

/// Content types accepted for candidate documents.
pub const CANDIDATE_ALLOWED_TYPES: &[&str] = &["application/pdf", "image/jpeg", "image/png"];

/// Content types accepted for vehicle documents.
pub const VEHICLE_ALLOWED_TYPES: &[&str] =
    &["application/pdf", "image/jpeg", "image/png", "image/webp"];

const MIB: i64 = 1024 * 1024;

/// Upload limits for one document family.
#[derive(Debug, Clone)]
pub struct FamilyLimits {
    pub max_size_bytes: i64,
    /// Per-owner document quota; `None` means the family has no quota.
    pub max_docs_per_owner: Option<u32>,
    pub allowed_content_types: &'static [&'static str],
}

impl FamilyLimits {
    pub fn candidate_defaults() -> Self {
        FamilyLimits {
            max_size_bytes: 5 * MIB,
            max_docs_per_owner: Some(10),
            allowed_content_types: CANDIDATE_ALLOWED_TYPES,
        }
    }

    pub fn vehicle_defaults() -> Self {
        FamilyLimits {
            max_size_bytes: 15 * MIB,
            max_docs_per_owner: None,
            allowed_content_types: VEHICLE_ALLOWED_TYPES,
        }
    }
}

/// Immutable store configuration. The root is canonicalized at construction
/// so later containment checks compare against a resolved path.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    root: PathBuf,
    candidate: FamilyLimits,
    vehicle: FamilyLimits,
}

impl StoreConfig {
    /// Creates the storage root if missing and resolves it to an absolute,
    /// normalized form.
    pub fn new(root: impl AsRef<Path>) -> std::io::Result<Self> {
        std::fs::create_dir_all(root.as_ref())?;
        let root = std::fs::canonicalize(root.as_ref())?;
        Ok(StoreConfig {
            root,
            candidate: FamilyLimits::candidate_defaults(),
            vehicle: FamilyLimits::vehicle_defaults(),
        })
    }

    pub fn with_candidate_limits(mut self, limits: FamilyLimits) -> Self {
        self.candidate = limits;
        self
    }

    pub fn with_vehicle_limits(mut self, limits: FamilyLimits) -> Self {
        self.vehicle = limits;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn limits(&self, family: DocumentFamily) -> &FamilyLimits {
        match family {
            DocumentFamily::Candidate => &self.candidate,
            DocumentFamily::Vehicle => &self.vehicle,
        }
    }
}
