use std::sync::Arc;

use models::{category, menu_item};
use tracing::{debug, info, instrument};
use validator::Validate;

use super::domain::{CategoryPatch, DeleteOutcome, NewCategory};
use super::repository::{CategoryRepository, DeleteResult};
use crate::errors::ServiceError;
use crate::menu_item::repository::MenuItemRepository;

/// Category business rules: unique names and the guarded delete.
pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
    items: Arc<dyn MenuItemRepository>,
}

impl CategoryService {
    pub fn new(categories: Arc<dyn CategoryRepository>, items: Arc<dyn MenuItemRepository>) -> Self {
        Self { categories, items }
    }

    /// All categories, active or not, ordered by `display_order` then `name`.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<category::Model>, ServiceError> {
        self.categories.list().await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<category::Model, ServiceError> {
        self.categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Category", id))
    }

    /// Create a category; names are unique (case-sensitive) across all categories.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::category::{domain::NewCategory, CategoryService};
    /// use service::storage::MemoryStore;
    /// let store = Arc::new(MemoryStore::new());
    /// let svc = CategoryService::new(store.clone(), store);
    /// let input = NewCategory { name: "Desserts".into(), description: None, display_order: None };
    /// let cat = tokio_test::block_on(svc.create(input.clone())).unwrap();
    /// assert_eq!(cat.display_order, 0);
    /// assert!(tokio_test::block_on(svc.create(input)).is_err());
    /// ```
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: NewCategory) -> Result<category::Model, ServiceError> {
        input.validate()?;
        if self.categories.find_by_name(&input.name).await?.is_some() {
            return Err(name_conflict(&input.name));
        }
        let created = self.categories.create(&input).await?;
        info!(category_id = created.id, name = %created.name, "category_created");
        Ok(created)
    }

    /// Apply the supplied fields; an empty patch returns the row untouched.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: i32, patch: CategoryPatch) -> Result<category::Model, ServiceError> {
        patch.validate()?;
        let existing = self.get(id).await?;
        if patch.is_empty() {
            debug!("empty patch");
            return Ok(existing);
        }
        if let Some(name) = &patch.name {
            if let Some(other) = self.categories.find_by_name(name).await? {
                if other.id != id {
                    return Err(name_conflict(name));
                }
            }
        }
        let updated = self
            .categories
            .update(id, &patch)
            .await?
            .ok_or_else(|| ServiceError::not_found("Category", id))?;
        info!(category_id = id, "category_updated");
        Ok(updated)
    }

    /// Guarded delete: refuses while items reference the category unless `force` is set.
    ///
    /// Forced deletes leave the items in place with `category_id` cleared.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32, force: bool) -> Result<DeleteOutcome, ServiceError> {
        match self.categories.delete(id, force).await? {
            DeleteResult::Missing => Err(ServiceError::not_found("Category", id)),
            DeleteResult::Blocked { linked } => Err(ServiceError::BadRequest(format!(
                "Category has {linked} linked menu item(s). Pass force=true to unassign items and delete, or reassign items first."
            ))),
            DeleteResult::Deleted { unassigned } => {
                info!(category_id = id, unassigned_items = unassigned, force, "category_deleted");
                Ok(DeleteOutcome { deleted: true, unassigned_items: unassigned })
            }
        }
    }

    /// Items currently in the category, ordered by name.
    #[instrument(skip(self))]
    pub async fn items(&self, id: i32) -> Result<Vec<menu_item::Model>, ServiceError> {
        self.get(id).await?;
        self.items.list_by_category(id).await
    }
}

fn name_conflict(name: &str) -> ServiceError {
    ServiceError::Conflict(format!("Category with name '{name}' already exists"))
}
