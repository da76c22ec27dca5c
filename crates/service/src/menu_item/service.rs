use std::sync::Arc;

use common::pagination::{Page, PageMeta};
use models::menu_item::{self, Availability, MenuItemView};
use tracing::{debug, info, instrument};
use validator::Validate;

use super::domain::{MenuItemPatch, MenuItemQuery, NewMenuItem};
use super::repository::MenuItemRepository;
use crate::category::repository::CategoryRepository;
use crate::errors::ServiceError;

/// Menu item business rules: items attach only to existing, active categories.
pub struct MenuItemService {
    items: Arc<dyn MenuItemRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl MenuItemService {
    pub fn new(items: Arc<dyn MenuItemRepository>, categories: Arc<dyn CategoryRepository>) -> Self {
        Self { items, categories }
    }

    /// Filtered page of items joined with their category name, ordered by name.
    ///
    /// `limit` is clamped into [1, 100] and `page` to at least 1.
    #[instrument(skip(self))]
    pub async fn list(&self, query: MenuItemQuery) -> Result<Page<MenuItemView>, ServiceError> {
        let query = MenuItemQuery { pagination: query.pagination.clamped(), ..query };
        let (data, total) = self.items.list(&query).await?;
        let meta = PageMeta::new(total, query.pagination.page, query.pagination.per_page);
        Ok(Page { data, meta })
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<MenuItemView, ServiceError> {
        self.items
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Menu item", id))
    }

    /// Create an item; a non-null `category_id` must name an active category.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use rust_decimal::Decimal;
    /// use service::menu_item::{domain::NewMenuItem, MenuItemService};
    /// use service::storage::MemoryStore;
    /// let store = Arc::new(MemoryStore::new());
    /// let svc = MenuItemService::new(store.clone(), store);
    /// let input = NewMenuItem { name: "Cake".into(), description: None, price: Decimal::new(18000, 2), availability: None, category_id: None };
    /// let item = tokio_test::block_on(svc.create(input)).unwrap();
    /// assert_eq!(item.price.to_string(), "180.00");
    /// assert_eq!(item.category_name, None);
    /// ```
    #[instrument(skip(self, input), fields(name = %input.name, category_id = ?input.category_id))]
    pub async fn create(&self, input: NewMenuItem) -> Result<MenuItemView, ServiceError> {
        input.validate()?;
        let input = NewMenuItem { price: menu_item::normalize_price(input.price)?, ..input };
        if let Some(category_id) = input.category_id {
            self.ensure_attachable(category_id).await?;
        }
        let created = self.items.create(&input).await?;
        info!(menu_item_id = created.id, category_id = ?created.category_id, "menu_item_created");
        self.get(created.id).await
    }

    /// Apply the supplied fields. A `category_id` key with a non-null value is
    /// revalidated; `null` unassigns without a lookup.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: i32, patch: MenuItemPatch) -> Result<MenuItemView, ServiceError> {
        patch.validate()?;
        let existing = self.get(id).await?;
        if patch.is_empty() {
            debug!("empty patch");
            return Ok(existing);
        }
        let patch = match patch.price {
            Some(price) => MenuItemPatch { price: Some(menu_item::normalize_price(price)?), ..patch },
            None => patch,
        };
        if let Some(Some(category_id)) = patch.category_id {
            self.ensure_attachable(category_id).await?;
        }
        self.items
            .update(id, &patch)
            .await?
            .ok_or_else(|| ServiceError::not_found("Menu item", id))?;
        info!(menu_item_id = id, "menu_item_updated");
        self.get(id).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if !self.items.delete(id).await? {
            return Err(ServiceError::not_found("Menu item", id));
        }
        info!(menu_item_id = id, "menu_item_deleted");
        Ok(())
    }

    /// Set `availability` and nothing else.
    #[instrument(skip(self))]
    pub async fn toggle_availability(&self, id: i32, availability: Availability) -> Result<MenuItemView, ServiceError> {
        self.items
            .set_availability(id, availability)
            .await?
            .ok_or_else(|| ServiceError::not_found("Menu item", id))?;
        info!(menu_item_id = id, %availability, "menu_item_availability_changed");
        self.get(id).await
    }

    /// Move an item to another active category, or detach it with `None`.
    #[instrument(skip(self))]
    pub async fn assign_category(&self, id: i32, category_id: Option<i32>) -> Result<MenuItemView, ServiceError> {
        self.get(id).await?;
        if let Some(category_id) = category_id {
            self.ensure_attachable(category_id).await?;
        }
        self.items
            .assign_category(id, category_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Menu item", id))?;
        info!(menu_item_id = id, category_id = ?category_id, "menu_item_category_assigned");
        self.get(id).await
    }

    /// Inactive categories are treated as absent for attachment.
    async fn ensure_attachable(&self, category_id: i32) -> Result<(), ServiceError> {
        match self.categories.find_active_by_id(category_id).await? {
            Some(_) => Ok(()),
            None => Err(ServiceError::not_found("Category", category_id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::domain::{CategoryPatch, NewCategory};
    use crate::category::repository::DeleteResult;
    use crate::category::CategoryService;
    use crate::menu_item::domain::CategoryFilter;
    use crate::storage::MemoryStore;
    use async_trait::async_trait;
    use common::pagination::Pagination;
    use models::category;
    use rust_decimal::Decimal;

    struct Fixture {
        items: MenuItemService,
        categories: CategoryService,
    }

    fn setup() -> Fixture {
        let store = Arc::new(MemoryStore::new());
        Fixture {
            items: MenuItemService::new(store.clone(), store.clone()),
            categories: CategoryService::new(store.clone(), store),
        }
    }

    fn new_item(name: &str, category_id: Option<i32>) -> NewMenuItem {
        NewMenuItem { name: name.into(), description: None, price: Decimal::new(18000, 2), availability: None, category_id }
    }

    async fn add_category(fx: &Fixture, name: &str) -> category::Model {
        fx.categories
            .create(NewCategory { name: name.into(), description: None, display_order: None })
            .await
            .unwrap()
    }

    /// Category lookups panic: proves a code path never validates the category.
    struct NoLookup(MemoryStore);

    #[async_trait]
    impl CategoryRepository for NoLookup {
        async fn list(&self) -> Result<Vec<category::Model>, ServiceError> {
            CategoryRepository::list(&self.0).await
        }
        async fn find_by_id(&self, id: i32) -> Result<Option<category::Model>, ServiceError> {
            CategoryRepository::find_by_id(&self.0, id).await
        }
        async fn find_by_name(&self, name: &str) -> Result<Option<category::Model>, ServiceError> {
            self.0.find_by_name(name).await
        }
        async fn find_active_by_id(&self, _id: i32) -> Result<Option<category::Model>, ServiceError> {
            panic!("category lookup must be skipped")
        }
        async fn create(&self, input: &NewCategory) -> Result<category::Model, ServiceError> {
            CategoryRepository::create(&self.0, input).await
        }
        async fn update(&self, id: i32, patch: &CategoryPatch) -> Result<Option<category::Model>, ServiceError> {
            CategoryRepository::update(&self.0, id, patch).await
        }
        async fn delete(&self, id: i32, force: bool) -> Result<DeleteResult, ServiceError> {
            CategoryRepository::delete(&self.0, id, force).await
        }
    }

    #[tokio::test]
    async fn create_joins_category_name() {
        let fx = setup();
        let desserts = add_category(&fx, "Desserts").await;
        let cake = fx.items.create(new_item("Cake", Some(desserts.id))).await.unwrap();
        assert_eq!(cake.category_name.as_deref(), Some("Desserts"));
        assert_eq!(cake.availability, Availability::Available);
        assert_eq!(cake.price, Decimal::new(18000, 2));
    }

    #[tokio::test]
    async fn create_rounds_price_to_cents() {
        let fx = setup();
        let input = NewMenuItem { price: Decimal::new(12345, 3), ..new_item("Tea", None) };
        let tea = fx.items.create(input).await.unwrap();
        assert_eq!(tea.price.to_string(), "12.35");
    }

    #[tokio::test]
    async fn inactive_or_missing_category_is_not_found() {
        let fx = setup();
        let cat = add_category(&fx, "Retired").await;
        fx.categories
            .update(cat.id, CategoryPatch { is_active: Some(false), ..Default::default() })
            .await
            .unwrap();

        let err = fx.items.create(new_item("Old", Some(cat.id))).await.unwrap_err();
        assert_eq!(err.to_string(), format!("Category with id '{}' not found", cat.id));
        assert!(matches!(fx.items.create(new_item("Lost", Some(999))).await, Err(ServiceError::NotFound(_))));

        let item = fx.items.create(new_item("Loose", None)).await.unwrap();
        assert!(matches!(fx.items.assign_category(item.id, Some(cat.id)).await, Err(ServiceError::NotFound(_))));
        let patch = MenuItemPatch { category_id: Some(Some(cat.id)), ..Default::default() };
        assert!(matches!(fx.items.update(item.id, patch).await, Err(ServiceError::NotFound(_))));
        assert_eq!(fx.items.get(item.id).await.unwrap().category_id, None);
    }

    #[tokio::test]
    async fn assign_null_skips_category_lookup() {
        let store = MemoryStore::new();
        let guarded = Arc::new(NoLookup(store.clone()));
        let svc = MenuItemService::new(Arc::new(store.clone()), guarded);
        let cat = CategoryRepository::create(&store, &NewCategory { name: "Temp".into(), description: None, display_order: None })
            .await
            .unwrap();
        let item = MenuItemRepository::create(&store, &new_item("Soup", Some(cat.id))).await.unwrap();

        let view = svc.assign_category(item.id, None).await.unwrap();
        assert_eq!(view.category_id, None);
        assert_eq!(view.category_name, None);

        let patch = MenuItemPatch { category_id: Some(None), name: Some("Broth".into()), ..Default::default() };
        let view = svc.update(item.id, patch).await.unwrap();
        assert_eq!(view.name, "Broth");
        assert!(svc.create(new_item("Bread", None)).await.is_ok());
    }

    #[tokio::test]
    async fn assign_moves_between_categories() {
        let fx = setup();
        let a = add_category(&fx, "Lunch").await;
        let b = add_category(&fx, "Dinner").await;
        let item = fx.items.create(new_item("Steak", Some(a.id))).await.unwrap();
        let moved = fx.items.assign_category(item.id, Some(b.id)).await.unwrap();
        assert_eq!(moved.category_id, Some(b.id));
        assert_eq!(moved.category_name.as_deref(), Some("Dinner"));
        assert!(matches!(fx.items.assign_category(404, None).await, Err(ServiceError::NotFound(ref m)) if m == "Menu item with id '404' not found"));
    }

    #[tokio::test]
    async fn toggle_changes_only_availability() {
        let fx = setup();
        let cat = add_category(&fx, "Drinks").await;
        let input = NewMenuItem { description: Some("Fresh".into()), ..new_item("Juice", Some(cat.id)) };
        let before = fx.items.create(input).await.unwrap();
        let after = fx.items.toggle_availability(before.id, Availability::Unavailable).await.unwrap();
        assert_eq!(after.availability, Availability::Unavailable);
        assert_eq!(after.name, before.name);
        assert_eq!(after.description, before.description);
        assert_eq!(after.price, before.price);
        assert_eq!(after.category_id, before.category_id);
        assert_eq!(after.category_name, before.category_name);
        assert_eq!(after.created_at, before.created_at);
        assert!(fx.items.toggle_availability(999, Availability::Available).await.is_err());
    }

    #[tokio::test]
    async fn update_changes_only_supplied_fields() {
        let fx = setup();
        let before = fx.items.create(new_item("Wrap", None)).await.unwrap();
        let patch = MenuItemPatch { price: Some(Decimal::new(250, 0)), ..Default::default() };
        let after = fx.items.update(before.id, patch).await.unwrap();
        assert_eq!(after.price, Decimal::new(25000, 2));
        assert_eq!(after.name, "Wrap");
        assert_eq!(after.availability, before.availability);
        assert!(matches!(fx.items.update(77, MenuItemPatch::default()).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_removes_row() {
        let fx = setup();
        let item = fx.items.create(new_item("Gone", None)).await.unwrap();
        fx.items.delete(item.id).await.unwrap();
        assert!(matches!(fx.items.get(item.id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(fx.items.delete(item.id).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn list_filters_and_paginates() {
        let fx = setup();
        let cat = add_category(&fx, "Mains").await;
        for i in 0..5 {
            fx.items.create(new_item(&format!("Main {i}"), Some(cat.id))).await.unwrap();
        }
        let loose = fx.items.create(new_item("Loose", None)).await.unwrap();
        fx.items.toggle_availability(loose.id, Availability::Unavailable).await.unwrap();

        let page = fx
            .items
            .list(MenuItemQuery { pagination: Pagination { page: 2, per_page: 2 }, ..Default::default() })
            .await
            .unwrap();
        assert_eq!(page.meta.total, 6);
        assert_eq!(page.meta.total_pages, 3);
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.data[0].name, "Main 1");

        let uncategorized = fx
            .items
            .list(MenuItemQuery { category: CategoryFilter::Uncategorized, ..Default::default() })
            .await
            .unwrap();
        assert_eq!(uncategorized.data.len(), 1);
        assert_eq!(uncategorized.data[0].id, loose.id);

        let available = fx
            .items
            .list(MenuItemQuery {
                category: CategoryFilter::Category(cat.id),
                availability: Some(Availability::Available),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(available.meta.total, 5);
    }

    #[tokio::test]
    async fn list_clamps_pagination() {
        let fx = setup();
        for i in 0..3 {
            fx.items.create(new_item(&format!("Item {i}"), None)).await.unwrap();
        }
        for (page, per_page) in [(0, 0), (1, 1000), (9, 2)] {
            let out = fx
                .items
                .list(MenuItemQuery { pagination: Pagination { page, per_page }, ..Default::default() })
                .await
                .unwrap();
            assert!(out.meta.limit >= 1 && out.meta.limit <= 100);
            assert!(out.meta.page >= 1);
            assert!(out.data.len() as u64 <= out.meta.limit);
            assert_eq!(out.meta.total_pages, out.meta.total.div_ceil(out.meta.limit));
        }
        for page in [1_000_000_000_000_000_000, u64::MAX] {
            let out = fx
                .items
                .list(MenuItemQuery { pagination: Pagination { page, per_page: 100 }, ..Default::default() })
                .await
                .unwrap();
            assert!(out.data.is_empty());
            assert_eq!(out.meta.total, 3);
            assert_eq!(out.meta.page, page);
            assert_eq!(out.meta.total_pages, 1);
        }
    }

    #[tokio::test]
    async fn desserts_scenario() {
        let fx = setup();
        let desserts = add_category(&fx, "Desserts").await;
        let cake = fx.items.create(new_item("Cake", Some(desserts.id))).await.unwrap();
        assert_eq!(cake.category_name.as_deref(), Some("Desserts"));

        let cake = fx.items.assign_category(cake.id, None).await.unwrap();
        assert_eq!(cake.category_id, None);
        assert_eq!(cake.category_name, None);

        let outcome = fx.categories.delete(desserts.id, false).await.unwrap();
        assert!(outcome.deleted);
        assert_eq!(outcome.unassigned_items, 0);
    }

    #[tokio::test]
    async fn mains_scenario() {
        let fx = setup();
        let mains = add_category(&fx, "Mains").await;
        let a = fx.items.create(new_item("Curry", Some(mains.id))).await.unwrap();
        let b = fx.items.create(new_item("Risotto", Some(mains.id))).await.unwrap();

        let err = fx.categories.delete(mains.id, false).await.unwrap_err();
        assert!(matches!(err, ServiceError::BadRequest(ref m) if m.contains('2')));

        let outcome = fx.categories.delete(mains.id, true).await.unwrap();
        assert_eq!(outcome.unassigned_items, 2);
        for id in [a.id, b.id] {
            let item = fx.items.get(id).await.unwrap();
            assert_eq!(item.category_id, None);
            assert_eq!(item.category_name, None);
        }
    }
}
