//! Document metadata model.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Owner family a document type belongs to. The family selects the
/// allowed content types, size limit, quota and owner-key shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFamily {
    /// Email-keyed owners (job candidates).
    Candidate,
    /// Numeric-id-keyed owners (vehicles in the inventory).
    Vehicle,
}

/// Closed enumeration of document types across both families.
/// The type also names the storage subdirectory for its documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocType {
    // Candidate documents
    Cv,
    CoverLetter,
    Certificate,
    Portfolio,
    Recommendation,
    // Vehicle documents
    Registration,
    Insurance,
    Inspection,
    Invoice,
    Photo,
}

impl DocType {
    pub fn family(self) -> DocumentFamily {
        match self {
            DocType::Cv
            | DocType::CoverLetter
            | DocType::Certificate
            | DocType::Portfolio
            | DocType::Recommendation => DocumentFamily::Candidate,
            DocType::Registration
            | DocType::Insurance
            | DocType::Inspection
            | DocType::Invoice
            | DocType::Photo => DocumentFamily::Vehicle,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DocType::Cv => "CV",
            DocType::CoverLetter => "COVER_LETTER",
            DocType::Certificate => "CERTIFICATE",
            DocType::Portfolio => "PORTFOLIO",
            DocType::Recommendation => "RECOMMENDATION",
            DocType::Registration => "REGISTRATION",
            DocType::Insurance => "INSURANCE",
            DocType::Inspection => "INSPECTION",
            DocType::Invoice => "INVOICE",
            DocType::Photo => "PHOTO",
        }
    }

    /// Storage subdirectory for this document type.
    pub fn subdir(self) -> &'static str {
        match self {
            DocType::Cv => "cv",
            DocType::CoverLetter => "cover_letter",
            DocType::Certificate => "certificate",
            DocType::Portfolio => "portfolio",
            DocType::Recommendation => "recommendation",
            DocType::Registration => "registration",
            DocType::Insurance => "insurance",
            DocType::Inspection => "inspection",
            DocType::Invoice => "invoice",
            DocType::Photo => "photo",
        }
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CV" => Ok(DocType::Cv),
            "COVER_LETTER" => Ok(DocType::CoverLetter),
            "CERTIFICATE" => Ok(DocType::Certificate),
            "PORTFOLIO" => Ok(DocType::Portfolio),
            "RECOMMENDATION" => Ok(DocType::Recommendation),
            "REGISTRATION" => Ok(DocType::Registration),
            "INSURANCE" => Ok(DocType::Insurance),
            "INSPECTION" => Ok(DocType::Inspection),
            "INVOICE" => Ok(DocType::Invoice),
            "PHOTO" => Ok(DocType::Photo),
            other => Err(format!("Unknown document type: {}", other)),
        }
    }
}

/// A persisted document metadata row. Immutable after creation; only
/// creation and deletion change state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: i64,
    pub owner_key: String,
    pub doc_type: DocType,
    pub original_filename: String,
    pub stored_filename: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub storage_path: PathBuf,
    pub created_at: DateTime<Utc>,
}

/// Metadata for a document whose blob has been written but not yet
/// persisted. The repository assigns `id` and `created_at`.
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub owner_key: String,
    pub doc_type: DocType,
    pub original_filename: String,
    pub stored_filename: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub storage_path: PathBuf,
}

/// An incoming upload as received from the transport layer.
#[derive(Debug, Clone)]
pub struct UploadPayload {
    /// Original filename as declared by the client, if any.
    pub filename: Option<String>,
    /// Declared MIME type, if any.
    pub content_type: Option<String>,
    /// The file bytes.
    pub content: Vec<u8>,
}
