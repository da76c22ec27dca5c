use std::sync::Arc;

use service::category::repository::CategoryRepository;
use service::menu_item::repository::MenuItemRepository;
use service::{CategoryService, MenuItemService};

/// Shared handler state: the two services over one injected store.
#[derive(Clone)]
pub struct AppState {
    pub categories: Arc<CategoryService>,
    pub menu_items: Arc<MenuItemService>,
}

impl AppState {
    pub fn new(categories: Arc<dyn CategoryRepository>, items: Arc<dyn MenuItemRepository>) -> Self {
        Self {
            categories: Arc::new(CategoryService::new(categories.clone(), items.clone())),
            menu_items: Arc::new(MenuItemService::new(items, categories)),
        }
    }

    /// Both repositories served by one store (SeaORM or in-memory).
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: CategoryRepository + MenuItemRepository + 'static,
    {
        Self::new(store.clone(), store)
    }
}
