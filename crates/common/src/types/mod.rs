use serde::{Deserialize, Serialize};

use crate::pagination::PageMeta;

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
    pub timestamp: String,
}

/// One offending input field in a 422 response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into() }
    }
}

/// Response envelope shared by every API endpoint.
///
/// `data`, `meta` and `errors` are omitted from the JSON when absent.
#[derive(Serialize, Deserialize, Debug)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self { success: true, message: message.into(), data: Some(data), meta: None, errors: None }
    }

    pub fn paged(data: T, meta: PageMeta, message: impl Into<String>) -> Self {
        Self { success: true, message: message.into(), data: Some(data), meta: Some(meta), errors: None }
    }
}

impl ApiResponse<()> {
    pub fn failure(message: impl Into<String>, errors: Option<Vec<FieldError>>) -> Self {
        Self { success: false, message: message.into(), data: None, meta: None, errors }
    }
}
