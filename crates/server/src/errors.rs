use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::{ApiResponse, FieldError};
use service::errors::ServiceError;
use tracing::error;
use validator::ValidationErrors;

pub const VALIDATION_FAILED: &str = "Validation failed";

/// Error rendered as the standard `{success: false, message, errors?}` envelope.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub message: String,
    pub errors: Option<Vec<FieldError>>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into(), errors: None }
    }

    /// 422 with per-field details.
    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self { status: StatusCode::UNPROCESSABLE_ENTITY, message: VALIDATION_FAILED.into(), errors: Some(errors) }
    }

    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        Self::validation(vec![FieldError::new(field, message)])
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ApiResponse::failure(self.message, self.errors))).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        let code = e.code();
        match e {
            ServiceError::NotFound(msg) => JsonApiError::new(StatusCode::NOT_FOUND, msg),
            ServiceError::Conflict(msg) => JsonApiError::new(StatusCode::CONFLICT, msg),
            ServiceError::BadRequest(msg) => JsonApiError::new(StatusCode::BAD_REQUEST, msg),
            ServiceError::Validation(msg) => JsonApiError::invalid_field("body", msg),
            ServiceError::Model(e) => JsonApiError::invalid_field("body", e.to_string()),
            ServiceError::Db(msg) => {
                error!(error = %msg, code, "database error");
                JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

/// Flatten validator output into `{field, message}` pairs sorted by field.
///
/// Struct-level checks report the offending field through the error code.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter().map(move |e| {
                let name = if field == "__all__" { e.code.to_string() } else { field.clone() };
                let message = e.message.as_ref().map(|m| m.to_string()).unwrap_or_else(|| format!("{name} is invalid"));
                FieldError::new(name, message)
            })
        })
        .collect();
    out.sort_by(|a, b| a.field.cmp(&b.field));
    out
}
