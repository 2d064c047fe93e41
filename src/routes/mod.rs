// Route exports
pub mod matches;
pub mod records;

use actix_web::{error, http::StatusCode, web, HttpRequest, HttpResponse};
use std::sync::Arc;

use crate::config::MatchingSettings;
use crate::core::Matcher;
use crate::models::ErrorResponse;
use crate::services::{DataStore, MatchCache, StoreError};

/// Largest accepted JSON body, sized for whole-dataset imports
const JSON_LIMIT_BYTES: usize = 4 * 1024 * 1024;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DataStore>,
    pub cache: Arc<MatchCache>,
    pub matcher: Matcher,
    pub matching: MatchingSettings,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(JSON_LIMIT_BYTES)
            .error_handler(handle_json_payload_error),
    )
    .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
    .service(
        web::scope("/api/v1")
            .configure(matches::configure)
            .configure(records::configure),
    );
}

/// Extractor error rendered with the shared [`ErrorResponse`] envelope
#[derive(Debug)]
pub struct JsonError(pub ErrorResponse);

impl JsonError {
    fn bad_request(error: &str, message: String) -> Self {
        Self(ErrorResponse {
            error: error.to_string(),
            message,
            status_code: StatusCode::BAD_REQUEST.as_u16(),
        })
    }
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.0.error, self.0.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(&self.0)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError::bad_request("invalid_json", format!("Invalid JSON: {}", err)).into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Query error on {}: {}", req.path(), err);
    JsonError::bad_request("invalid_query", format!("Invalid query: {}", err)).into()
}

pub(crate) fn error_response(status: StatusCode, error: &str, message: String) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: status.as_u16(),
    })
}

pub(crate) fn validation_error(errors: validator::ValidationErrors) -> HttpResponse {
    error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string())
}

pub(crate) fn store_error(err: StoreError) -> HttpResponse {
    match &err {
        StoreError::NotFound(_) => error_response(StatusCode::NOT_FOUND, "Not found", err.to_string()),
        StoreError::DuplicateId(_) => error_response(StatusCode::CONFLICT, "Duplicate id", err.to_string()),
        StoreError::InvalidRecord(_) => {
            error_response(StatusCode::BAD_REQUEST, "Invalid record", err.to_string())
        }
        StoreError::Io(_) | StoreError::Serialization(_) => {
            tracing::error!("Storage failure: {}", err);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Storage failure", err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{body::to_bytes, ResponseError};

    #[actix_web::test]
    async fn test_extractor_errors_use_error_envelope() {
        let err = JsonError::bad_request("invalid_query", "Invalid query: missing field".to_string());
        let response = err.error_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body()).await.unwrap();
        let envelope: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(envelope.error, "invalid_query");
        assert_eq!(envelope.status_code, 400);
    }

    #[actix_web::test]
    async fn test_store_errors_map_to_status() {
        let response = store_error(StoreError::DuplicateId("tutor 1".to_string()));
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = to_bytes(response.into_body()).await.unwrap();
        let envelope: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(envelope.error, "Duplicate id");
        assert_eq!(envelope.status_code, 409);
    }
}
