use async_trait::async_trait;
use chrono::Utc;
use models::category;
use models::menu_item::{self, Availability, MenuItemView};
use sea_orm::sea_query::Expr;
use sea_orm::{
    AccessMode, ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IsolationLevel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, SqlErr, TransactionTrait,
};

use crate::category::domain::{CategoryPatch, NewCategory};
use crate::category::repository::{CategoryRepository, DeleteResult};
use crate::errors::{ServiceError, DUPLICATE_ENTRY, MISSING_CATEGORY};
use crate::menu_item::domain::{CategoryFilter, MenuItemPatch, MenuItemQuery, NewMenuItem};
use crate::menu_item::repository::MenuItemRepository;

/// SeaORM-backed store for both repositories, sharing one connection pool.
pub struct SeaOrmStore {
    pub db: DatabaseConnection,
}

impl SeaOrmStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Classify a store error; constraint violations never leak as raw database errors.
pub(crate) fn db_err(e: DbErr) -> ServiceError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => ServiceError::Conflict(DUPLICATE_ENTRY.into()),
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => ServiceError::Conflict(MISSING_CATEGORY.into()),
        _ => ServiceError::Db(e.to_string()),
    }
}

#[async_trait]
impl CategoryRepository for SeaOrmStore {
    async fn list(&self) -> Result<Vec<category::Model>, ServiceError> {
        category::Entity::find()
            .order_by_asc(category::Column::DisplayOrder)
            .order_by_asc(category::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<category::Model>, ServiceError> {
        category::Entity::find_by_id(id).one(&self.db).await.map_err(db_err)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<category::Model>, ServiceError> {
        category::Entity::find()
            .filter(category::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(db_err)
    }

    async fn find_active_by_id(&self, id: i32) -> Result<Option<category::Model>, ServiceError> {
        category::Entity::find_by_id(id)
            .filter(category::Column::IsActive.eq(true))
            .one(&self.db)
            .await
            .map_err(db_err)
    }

    async fn create(&self, input: &NewCategory) -> Result<category::Model, ServiceError> {
        let now = Utc::now().into();
        let am = category::ActiveModel {
            name: Set(input.name.clone()),
            description: Set(input.description.clone()),
            display_order: Set(input.display_order.unwrap_or(0)),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        am.insert(&self.db).await.map_err(db_err)
    }

    async fn update(&self, id: i32, patch: &CategoryPatch) -> Result<Option<category::Model>, ServiceError> {
        let Some(existing) = category::Entity::find_by_id(id).one(&self.db).await.map_err(db_err)? else {
            return Ok(None);
        };
        let mut am: category::ActiveModel = existing.into();
        if let Some(name) = &patch.name {
            am.name = Set(name.clone());
        }
        if let Some(description) = &patch.description {
            am.description = Set(description.clone());
        }
        if let Some(order) = patch.display_order {
            am.display_order = Set(order);
        }
        if let Some(active) = patch.is_active {
            am.is_active = Set(active);
        }
        am.updated_at = Set(Utc::now().into());
        am.update(&self.db).await.map(Some).map_err(db_err)
    }

    async fn delete(&self, id: i32, force: bool) -> Result<DeleteResult, ServiceError> {
        let txn = self.db.begin().await.map_err(db_err)?;
        // FOR UPDATE conflicts with the FK check of item writes, so no item can attach
        // to this category until the transaction ends
        let locked = category::Entity::find_by_id(id).lock_exclusive().one(&txn).await.map_err(db_err)?;
        if locked.is_none() {
            txn.rollback().await.map_err(db_err)?;
            return Ok(DeleteResult::Missing);
        }
        let linked = menu_item::Entity::find()
            .filter(menu_item::Column::CategoryId.eq(id))
            .count(&txn)
            .await
            .map_err(db_err)?;
        if linked > 0 && !force {
            txn.rollback().await.map_err(db_err)?;
            return Ok(DeleteResult::Blocked { linked });
        }
        // same effect as the FK's ON DELETE SET NULL, but explicit and with updated_at
        let now: sea_orm::prelude::DateTimeWithTimeZone = Utc::now().into();
        let unassigned = menu_item::Entity::update_many()
            .col_expr(menu_item::Column::CategoryId, Expr::value(Option::<i32>::None))
            .col_expr(menu_item::Column::UpdatedAt, Expr::value(now))
            .filter(menu_item::Column::CategoryId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_err)?
            .rows_affected;
        category::Entity::delete_by_id(id).exec(&txn).await.map_err(db_err)?;
        txn.commit().await.map_err(db_err)?;
        Ok(DeleteResult::Deleted { unassigned })
    }
}

#[async_trait]
impl MenuItemRepository for SeaOrmStore {
    async fn list(&self, query: &MenuItemQuery) -> Result<(Vec<MenuItemView>, u64), ServiceError> {
        let (page_idx, per_page) = query.pagination.normalize();

        let mut select = menu_item::Entity::find();
        select = match query.category {
            CategoryFilter::Any => select,
            CategoryFilter::Uncategorized => select.filter(menu_item::Column::CategoryId.is_null()),
            CategoryFilter::Category(id) => select.filter(menu_item::Column::CategoryId.eq(id)),
        };
        if let Some(availability) = query.availability {
            select = select.filter(menu_item::Column::Availability.eq(availability));
        }

        // count and page must observe one snapshot
        let txn = self
            .db
            .begin_with_config(Some(IsolationLevel::RepeatableRead), Some(AccessMode::ReadOnly))
            .await
            .map_err(db_err)?;
        let paginator = select
            .order_by_asc(menu_item::Column::Name)
            .order_by_asc(menu_item::Column::Id)
            .find_also_related(category::Entity)
            .paginate(&txn, per_page);
        let total = paginator.num_items().await.map_err(db_err)?;
        let rows = paginator.fetch_page(page_idx).await.map_err(db_err)?;
        txn.commit().await.map_err(db_err)?;

        let views = rows.into_iter().map(|(item, cat)| MenuItemView::from_parts(item, cat)).collect();
        Ok((views, total))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<MenuItemView>, ServiceError> {
        let row = menu_item::Entity::find_by_id(id)
            .find_also_related(category::Entity)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(row.map(|(item, cat)| MenuItemView::from_parts(item, cat)))
    }

    async fn list_by_category(&self, category_id: i32) -> Result<Vec<menu_item::Model>, ServiceError> {
        menu_item::Entity::find()
            .filter(menu_item::Column::CategoryId.eq(category_id))
            .order_by_asc(menu_item::Column::Name)
            .order_by_asc(menu_item::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    async fn create(&self, input: &NewMenuItem) -> Result<menu_item::Model, ServiceError> {
        let now = Utc::now().into();
        let am = menu_item::ActiveModel {
            name: Set(input.name.clone()),
            description: Set(input.description.clone()),
            price: Set(input.price),
            availability: Set(input.availability.unwrap_or_default()),
            category_id: Set(input.category_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        am.insert(&self.db).await.map_err(db_err)
    }

    async fn update(&self, id: i32, patch: &MenuItemPatch) -> Result<Option<menu_item::Model>, ServiceError> {
        let Some(existing) = menu_item::Entity::find_by_id(id).one(&self.db).await.map_err(db_err)? else {
            return Ok(None);
        };
        let mut am: menu_item::ActiveModel = existing.into();
        if let Some(name) = &patch.name {
            am.name = Set(name.clone());
        }
        if let Some(description) = &patch.description {
            am.description = Set(description.clone());
        }
        if let Some(price) = patch.price {
            am.price = Set(price);
        }
        if let Some(availability) = patch.availability {
            am.availability = Set(availability);
        }
        if let Some(category_id) = patch.category_id {
            am.category_id = Set(category_id);
        }
        am.updated_at = Set(Utc::now().into());
        am.update(&self.db).await.map(Some).map_err(db_err)
    }

    async fn set_availability(&self, id: i32, availability: Availability) -> Result<Option<menu_item::Model>, ServiceError> {
        let Some(existing) = menu_item::Entity::find_by_id(id).one(&self.db).await.map_err(db_err)? else {
            return Ok(None);
        };
        let mut am: menu_item::ActiveModel = existing.into();
        am.availability = Set(availability);
        am.updated_at = Set(Utc::now().into());
        am.update(&self.db).await.map(Some).map_err(db_err)
    }

    async fn assign_category(&self, id: i32, category_id: Option<i32>) -> Result<Option<menu_item::Model>, ServiceError> {
        let Some(existing) = menu_item::Entity::find_by_id(id).one(&self.db).await.map_err(db_err)? else {
            return Ok(None);
        };
        let mut am: menu_item::ActiveModel = existing.into();
        am.category_id = Set(category_id);
        am.updated_at = Set(Utc::now().into());
        am.update(&self.db).await.map(Some).map_err(db_err)
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let res = menu_item::Entity::delete_by_id(id).exec(&self.db).await.map_err(db_err)?;
        Ok(res.rows_affected > 0)
    }
}
