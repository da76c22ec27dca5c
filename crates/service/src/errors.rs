use thiserror::Error;

/// Raised when a unique index rejects a write.
pub const DUPLICATE_ENTRY: &str = "Duplicate entry: a record with that value already exists";
/// Raised when the category an item points at vanished between validation and write.
pub const MISSING_CATEGORY: &str = "Referenced category no longer exists";

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    /// `Category with id '5' not found`
    pub fn not_found(entity: &str, id: i32) -> Self {
        Self::NotFound(format!("{entity} with id '{id}' not found"))
    }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) | ServiceError::Model(_) => 1001,
            ServiceError::Conflict(_) => 1002,
            ServiceError::NotFound(_) => 1003,
            ServiceError::BadRequest(_) => 1004,
            ServiceError::Db(_) => 1200,
        }
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(e: validator::ValidationErrors) -> Self {
        ServiceError::Validation(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity_and_id() {
        let e = ServiceError::not_found("Menu item", 42);
        assert_eq!(e.to_string(), "Menu item with id '42' not found");
        assert_eq!(e.code(), 1003);
    }

    #[test]
    fn model_errors_convert() {
        let e: ServiceError = models::errors::ModelError::Validation("price must be a positive number".into()).into();
        assert!(matches!(e, ServiceError::Model(_)));
        assert_eq!(e.code(), 1001);
    }

    #[test]
    fn codes_separate_kinds() {
        assert_eq!(ServiceError::Conflict(DUPLICATE_ENTRY.into()).code(), 1002);
        assert_eq!(ServiceError::BadRequest("guard".into()).code(), 1004);
        assert_eq!(ServiceError::Db("connection reset".into()).code(), 1200);
    }
}
