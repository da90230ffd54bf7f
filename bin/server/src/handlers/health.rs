use actix_web::{get, HttpResponse, Result as ActixResult};
use serde::Serialize;

/// Response from the health check endpoint
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Health check endpoint
#[get("/health")]
pub async fn health() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
    }))
}
