use async_trait::async_trait;
use models::category;

use super::domain::{CategoryPatch, NewCategory};
use crate::errors::ServiceError;

/// Data access for categories. No business rules live here.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All categories ordered by `display_order`, then `name`.
    async fn list(&self) -> Result<Vec<category::Model>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<category::Model>, ServiceError>;
    /// Case-sensitive exact match.
    async fn find_by_name(&self, name: &str) -> Result<Option<category::Model>, ServiceError>;
    /// A category items may attach to: it exists and `is_active` is set.
    async fn find_active_by_id(&self, id: i32) -> Result<Option<category::Model>, ServiceError>;
    async fn create(&self, input: &NewCategory) -> Result<category::Model, ServiceError>;
    /// `None` when the row does not exist.
    async fn update(&self, id: i32, patch: &CategoryPatch) -> Result<Option<category::Model>, ServiceError>;
    /// Counts linked items, then unassigns them and deletes the row, all atomically.
    ///
    /// Without `force` a category with linked items is left untouched.
    async fn delete(&self, id: i32, force: bool) -> Result<DeleteResult, ServiceError>;
}

/// What [`CategoryRepository::delete`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeleteResult {
    Missing,
    /// Items still reference the category and `force` was off; nothing changed.
    Blocked { linked: u64 },
    Deleted { unassigned: u64 },
}
