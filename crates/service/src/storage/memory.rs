use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use models::category;
use models::menu_item::{self, Availability, MenuItemView};
use sea_orm::prelude::DateTimeWithTimeZone;
use tokio::sync::RwLock;

use crate::category::domain::{CategoryPatch, NewCategory};
use crate::category::repository::{CategoryRepository, DeleteResult};
use crate::errors::{ServiceError, DUPLICATE_ENTRY, MISSING_CATEGORY};
use crate::menu_item::domain::{CategoryFilter, MenuItemPatch, MenuItemQuery, NewMenuItem};
use crate::menu_item::repository::MenuItemRepository;

#[derive(Default)]
struct Tables {
    categories: BTreeMap<i32, category::Model>,
    items: BTreeMap<i32, menu_item::Model>,
    next_category_id: i32,
    next_item_id: i32,
}

impl Tables {
    fn view(&self, item: &menu_item::Model) -> MenuItemView {
        let cat = item.category_id.and_then(|id| self.categories.get(&id)).cloned();
        MenuItemView::from_parts(item.clone(), cat)
    }

    fn name_taken(&self, name: &str, except: Option<i32>) -> bool {
        self.categories.values().any(|c| c.name == name && Some(c.id) != except)
    }

    fn check_reference(&self, category_id: Option<i32>) -> Result<(), ServiceError> {
        match category_id {
            Some(id) if !self.categories.contains_key(&id) => Err(ServiceError::Conflict(MISSING_CATEGORY.into())),
            _ => Ok(()),
        }
    }
}

/// In-memory store with the same contract as [`SeaOrmStore`](super::SeaOrmStore).
///
/// Used by tests, doc examples and local runs without a database.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Tables>>,
}

fn now() -> DateTimeWithTimeZone {
    Utc::now().into()
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CategoryRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<category::Model>, ServiceError> {
        let t = self.inner.read().await;
        let mut out: Vec<_> = t.categories.values().cloned().collect();
        out.sort_by(|a, b| a.display_order.cmp(&b.display_order).then_with(|| a.name.cmp(&b.name)));
        Ok(out)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<category::Model>, ServiceError> {
        Ok(self.inner.read().await.categories.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<category::Model>, ServiceError> {
        let t = self.inner.read().await;
        Ok(t.categories.values().find(|c| c.name == name).cloned())
    }

    async fn find_active_by_id(&self, id: i32) -> Result<Option<category::Model>, ServiceError> {
        let t = self.inner.read().await;
        Ok(t.categories.get(&id).filter(|c| c.is_active).cloned())
    }

    async fn create(&self, input: &NewCategory) -> Result<category::Model, ServiceError> {
        let mut t = self.inner.write().await;
        if t.name_taken(&input.name, None) {
            return Err(ServiceError::Conflict(DUPLICATE_ENTRY.into()));
        }
        t.next_category_id += 1;
        let ts = now();
        let model = category::Model {
            id: t.next_category_id,
            name: input.name.clone(),
            description: input.description.clone(),
            display_order: input.display_order.unwrap_or(0),
            is_active: true,
            created_at: ts,
            updated_at: ts,
        };
        t.categories.insert(model.id, model.clone());
        Ok(model)
    }

    async fn update(&self, id: i32, patch: &CategoryPatch) -> Result<Option<category::Model>, ServiceError> {
        let mut t = self.inner.write().await;
        if let Some(name) = &patch.name {
            if t.name_taken(name, Some(id)) {
                return Err(ServiceError::Conflict(DUPLICATE_ENTRY.into()));
            }
        }
        let Some(c) = t.categories.get_mut(&id) else { return Ok(None) };
        if let Some(name) = &patch.name {
            c.name = name.clone();
        }
        if let Some(description) = &patch.description {
            c.description = description.clone();
        }
        if let Some(order) = patch.display_order {
            c.display_order = order;
        }
        if let Some(active) = patch.is_active {
            c.is_active = active;
        }
        c.updated_at = now();
        Ok(Some(c.clone()))
    }

    async fn delete(&self, id: i32, force: bool) -> Result<DeleteResult, ServiceError> {
        let mut t = self.inner.write().await;
        if !t.categories.contains_key(&id) {
            return Ok(DeleteResult::Missing);
        }
        let linked = t.items.values().filter(|i| i.category_id == Some(id)).count() as u64;
        if linked > 0 && !force {
            return Ok(DeleteResult::Blocked { linked });
        }
        t.categories.remove(&id);
        let ts = now();
        for item in t.items.values_mut().filter(|i| i.category_id == Some(id)) {
            item.category_id = None;
            item.updated_at = ts;
        }
        Ok(DeleteResult::Deleted { unassigned: linked })
    }
}

#[async_trait]
impl MenuItemRepository for MemoryStore {
    async fn list(&self, query: &MenuItemQuery) -> Result<(Vec<MenuItemView>, u64), ServiceError> {
        let (page_idx, per_page) = query.pagination.normalize();
        let t = self.inner.read().await;
        let mut matching: Vec<&menu_item::Model> = t
            .items
            .values()
            .filter(|i| match query.category {
                CategoryFilter::Any => true,
                CategoryFilter::Uncategorized => i.category_id.is_none(),
                CategoryFilter::Category(id) => i.category_id == Some(id),
            })
            .filter(|i| query.availability.map_or(true, |a| i.availability == a))
            .collect();
        matching.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        let total = matching.len() as u64;
        let page = matching
            .into_iter()
            .skip(usize::try_from(page_idx.saturating_mul(per_page)).unwrap_or(usize::MAX))
            .take(per_page as usize)
            .map(|i| t.view(i))
            .collect();
        Ok((page, total))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<MenuItemView>, ServiceError> {
        let t = self.inner.read().await;
        Ok(t.items.get(&id).map(|i| t.view(i)))
    }

    async fn list_by_category(&self, category_id: i32) -> Result<Vec<menu_item::Model>, ServiceError> {
        let t = self.inner.read().await;
        let mut out: Vec<_> = t.items.values().filter(|i| i.category_id == Some(category_id)).cloned().collect();
        out.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(out)
    }

    async fn create(&self, input: &NewMenuItem) -> Result<menu_item::Model, ServiceError> {
        let mut t = self.inner.write().await;
        t.check_reference(input.category_id)?;
        t.next_item_id += 1;
        let ts = now();
        let model = menu_item::Model {
            id: t.next_item_id,
            name: input.name.clone(),
            description: input.description.clone(),
            price: input.price,
            availability: input.availability.unwrap_or_default(),
            category_id: input.category_id,
            created_at: ts,
            updated_at: ts,
        };
        t.items.insert(model.id, model.clone());
        Ok(model)
    }

    async fn update(&self, id: i32, patch: &MenuItemPatch) -> Result<Option<menu_item::Model>, ServiceError> {
        let mut t = self.inner.write().await;
        if let Some(category_id) = patch.category_id {
            t.check_reference(category_id)?;
        }
        let Some(item) = t.items.get_mut(&id) else { return Ok(None) };
        if let Some(name) = &patch.name {
            item.name = name.clone();
        }
        if let Some(description) = &patch.description {
            item.description = description.clone();
        }
        if let Some(price) = patch.price {
            item.price = price;
        }
        if let Some(availability) = patch.availability {
            item.availability = availability;
        }
        if let Some(category_id) = patch.category_id {
            item.category_id = category_id;
        }
        item.updated_at = now();
        Ok(Some(item.clone()))
    }

    async fn set_availability(&self, id: i32, availability: Availability) -> Result<Option<menu_item::Model>, ServiceError> {
        let mut t = self.inner.write().await;
        let Some(item) = t.items.get_mut(&id) else { return Ok(None) };
        item.availability = availability;
        item.updated_at = now();
        Ok(Some(item.clone()))
    }

    async fn assign_category(&self, id: i32, category_id: Option<i32>) -> Result<Option<menu_item::Model>, ServiceError> {
        let mut t = self.inner.write().await;
        t.check_reference(category_id)?;
        let Some(item) = t.items.get_mut(&id) else { return Ok(None) };
        item.category_id = category_id;
        item.updated_at = now();
        Ok(Some(item.clone()))
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(self.inner.write().await.items.remove(&id).is_some())
    }
}
