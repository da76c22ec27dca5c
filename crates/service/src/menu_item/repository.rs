use async_trait::async_trait;
use models::menu_item::{self, Availability, MenuItemView};

use super::domain::{MenuItemPatch, MenuItemQuery, NewMenuItem};
use crate::errors::ServiceError;

/// Data access for menu items. No business rules live here; category
/// checks belong to the service.
#[async_trait]
pub trait MenuItemRepository: Send + Sync {
    /// One page of joined rows plus the total for the same filter and snapshot.
    async fn list(&self, query: &MenuItemQuery) -> Result<(Vec<MenuItemView>, u64), ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<MenuItemView>, ServiceError>;
    /// Items whose `category_id` equals `category_id`, ordered by name.
    async fn list_by_category(&self, category_id: i32) -> Result<Vec<menu_item::Model>, ServiceError>;
    async fn create(&self, input: &NewMenuItem) -> Result<menu_item::Model, ServiceError>;
    /// `None` when the row does not exist.
    async fn update(&self, id: i32, patch: &MenuItemPatch) -> Result<Option<menu_item::Model>, ServiceError>;
    /// Writes `availability` (and `updated_at`) only.
    async fn set_availability(&self, id: i32, availability: Availability) -> Result<Option<menu_item::Model>, ServiceError>;
    /// Writes `category_id` (and `updated_at`) only.
    async fn assign_category(&self, id: i32, category_id: Option<i32>) -> Result<Option<menu_item::Model>, ServiceError>;
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}
