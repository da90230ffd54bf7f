use actix_web::http::header;
use actix_web::{get, web, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::handlers::error::ApiError;
use crate::state::AppState;

/// Download a document's bytes with the original filename as attachment
#[get("/api/documents/{id}/download")]
pub async fn download(
    path: web::Path<i64>,
    state: web::Data<AppState>,
) -> ActixResult<HttpResponse> {
    let id = path.into_inner();

    let (record, content) = state.documents.download(id).await.map_err(ApiError::from)?;

    info!(
        id,
        filename = ?record.original_filename,
        size = content.len(),
        "GET /api/documents/{{id}}/download"
    );

    // Sanitized on upload, but quotes and control characters would break the
    // header, so strip them regardless.
    let attachment_name: String = record
        .original_filename
        .chars()
        .filter(|c| !c.is_control() && *c != '"')
        .collect();

    Ok(HttpResponse::Ok()
        .content_type("application/octet-stream")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", attachment_name),
        ))
        .body(content))
}
