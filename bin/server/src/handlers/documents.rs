use actix_web::{get, web, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::handlers::error::ApiError;
use crate::handlers::OwnerQuery;
use crate::state::AppState;

/// List all documents of an owner
#[get("/api/documents")]
pub async fn list(
    query: web::Query<OwnerQuery>,
    state: web::Data<AppState>,
) -> ActixResult<HttpResponse> {
    let owner_key = query.into_inner().owner_key;
    let records = state
        .documents
        .list(&owner_key)
        .await
        .map_err(ApiError::from)?;

    info!(owner_key = ?owner_key, count = records.len(), "GET /api/documents");
    Ok(HttpResponse::Ok().json(records))
}

/// Fetch a single document's metadata
#[get("/api/documents/{id}")]
pub async fn get(path: web::Path<i64>, state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let id = path.into_inner();
    let record = state.documents.get(id).await.map_err(ApiError::from)?;
    Ok(HttpResponse::Ok().json(record))
}
