use actix_web::{delete, web, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::handlers::error::ApiError;
use crate::handlers::OwnerQuery;
use crate::state::AppState;

/// Delete a single document: blob, metadata row, then empty-directory sweep
#[delete("/api/documents/{id}")]
pub async fn delete(path: web::Path<i64>, state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let id = path.into_inner();
    state.documents.delete(id).await.map_err(ApiError::from)?;
    info!(id, "DELETE /api/documents/{{id}} - document deleted");
    Ok(HttpResponse::NoContent().finish())
}

/// Delete every document of an owner
#[delete("/api/documents")]
pub async fn delete_all(
    query: web::Query<OwnerQuery>,
    state: web::Data<AppState>,
) -> ActixResult<HttpResponse> {
    let owner_key = query.into_inner().owner_key;
    state
        .documents
        .delete_all_by_owner(&owner_key)
        .await
        .map_err(ApiError::from)?;
    info!(owner_key = ?owner_key, "DELETE /api/documents - all owner documents deleted");
    Ok(HttpResponse::NoContent().finish())
}
