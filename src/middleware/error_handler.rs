use actix_web::{
    error::{JsonPayloadError, QueryPayloadError},
    HttpRequest,
};

use crate::core::AppError;

/// Render malformed JSON bodies in the standard error envelope
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    log_error(req, &err);
    AppError::validation(format!("Invalid request body: {}", err)).into()
}

/// Render malformed or missing query parameters in the standard error envelope
pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    log_error(req, &err);
    AppError::validation(format!("Invalid query string: {}", err)).into()
}

pub fn log_error(req: &HttpRequest, err: &dyn std::fmt::Display) {
    tracing::warn!(
        method = %req.method(),
        path = %req.path(),
        error = %err,
        "Rejected malformed request"
    );
}
