use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};
use actix_web::{post, web, HttpResponse, Result as ActixResult};
use docstore::{DocType, UploadPayload};
use tracing::{error, info};

use crate::handlers::error::ApiError;
use crate::state::AppState;

/// Multipart form for a document upload
#[derive(MultipartForm)]
pub struct UploadForm {
    /// The file being uploaded. The limit only bounds buffering; the exact
    /// per-family size check runs in the document service and sits below it.
    #[multipart(limit = "16MB")]
    pub file: TempFile,

    /// Owner key: candidate email or numeric vehicle id
    pub owner_key: Text<String>,

    /// Document type, e.g. CV or REGISTRATION
    pub doc_type: Text<String>,
}

/// Handle document upload (multipart/form-data)
#[post("/api/documents")]
pub async fn upload(
    form: MultipartForm<UploadForm>,
    state: web::Data<AppState>,
) -> ActixResult<HttpResponse> {
    let UploadForm {
        file,
        owner_key,
        doc_type,
    } = form.into_inner();
    let owner_key = owner_key.into_inner();
    let doc_type_raw = doc_type.into_inner();

    // Debug formatter (?) escapes control characters in attacker-supplied strings
    info!(
        owner_key = ?owner_key,
        doc_type = ?doc_type_raw,
        filename = ?file.file_name,
        "POST /api/documents - request received"
    );

    let doc_type: DocType = doc_type_raw
        .parse()
        .map_err(actix_web::error::ErrorBadRequest)?;

    // The multipart layer has already spooled the payload to a temp file.
    let content = std::fs::read(file.file.path()).map_err(|e| {
        error!("failed to read spooled upload: {}", e);
        actix_web::error::ErrorInternalServerError("Failed to read uploaded file")
    })?;

    let payload = UploadPayload {
        filename: file.file_name.clone(),
        content_type: file
            .content_type
            .as_ref()
            .map(|m| m.essence_str().to_string()),
        content,
    };

    let record = state
        .documents
        .upload(&owner_key, doc_type, payload)
        .await
        .map_err(ApiError::from)?;

    info!(
        id = record.id,
        owner_key = ?record.owner_key,
        "POST /api/documents - document stored"
    );

    Ok(HttpResponse::Created().json(record))
}
