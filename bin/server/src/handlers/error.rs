use std::fmt;

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use docstore::DocStoreError;
use serde::Serialize;
use tracing::error;

/// Body returned for rejected uploads: every violation, in check order.
#[derive(Debug, Serialize)]
pub struct ValidationErrorResponse {
    pub errors: Vec<String>,
}

/// Maps the core error taxonomy onto HTTP responses.
#[derive(Debug)]
pub struct ApiError(pub DocStoreError);

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<DocStoreError> for ApiError {
    fn from(e: DocStoreError) -> Self {
        ApiError(e)
    }
}

impl actix_web::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            DocStoreError::Validation(_) | DocStoreError::PathEscapesRoot { .. } => {
                StatusCode::BAD_REQUEST
            }
            DocStoreError::QuotaExceeded { .. } => StatusCode::CONFLICT,
            DocStoreError::DocumentNotFound(_)
            | DocStoreError::OwnerNotFound(_)
            | DocStoreError::BlobMissing { .. } => StatusCode::NOT_FOUND,
            DocStoreError::Io { .. } | DocStoreError::Metadata(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        match &self.0 {
            DocStoreError::Validation(errors) => {
                HttpResponse::BadRequest().json(ValidationErrorResponse {
                    errors: errors.clone(),
                })
            }
            DocStoreError::PathEscapesRoot { .. } => {
                HttpResponse::BadRequest().body("Invalid owner key or filename")
            }
            e @ (DocStoreError::Io { .. } | DocStoreError::Metadata(_)) => {
                // Path context stays in the server log, not in the response.
                error!("storage failure: {}", DisplayChain(e));
                HttpResponse::InternalServerError().body("Internal storage failure")
            }
            e => HttpResponse::build(self.status_code()).body(e.to_string()),
        }
    }
}

/// Renders an error with its source chain for the log.
struct DisplayChain<'a>(&'a DocStoreError);

impl fmt::Display for DisplayChain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)?;
        let mut source = std::error::Error::source(self.0);
        while let Some(cause) = source {
            write!(f, ": {}", cause)?;
            source = cause.source();
        }
        Ok(())
    }
}
