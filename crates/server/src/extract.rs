//! Request extractors that reject with the JSON error envelope.

use axum::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::errors::{field_errors, JsonApiError};

/// JSON body that has been deserialized and validated.
///
/// Malformed JSON is a 400; a body of the wrong shape or failing validation is a 422.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = JsonApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(json_rejection)?;
        value.validate().map_err(|e| JsonApiError::validation(field_errors(&e)))?;
        Ok(Self(value))
    }
}

fn json_rejection(rejection: JsonRejection) -> JsonApiError {
    match rejection {
        JsonRejection::JsonDataError(e) => JsonApiError::invalid_field("body", e.body_text()),
        JsonRejection::JsonSyntaxError(_) => JsonApiError::new(StatusCode::BAD_REQUEST, "Malformed JSON body"),
        other => JsonApiError::new(other.status(), other.body_text()),
    }
}

/// Positive integer `:id` path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityId(pub i32);

#[async_trait]
impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = JsonApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| JsonApiError::new(e.status(), e.body_text()))?;
        match raw.trim().parse::<i32>() {
            Ok(id) if id > 0 => Ok(EntityId(id)),
            _ => Err(JsonApiError::invalid_field("id", "id must be a positive integer")),
        }
    }
}
