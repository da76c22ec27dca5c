//! Migrator registering the menu schema in dependency order.
//! `categories` must exist before `menu_items` references it.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_categories;
mod m20240101_000002_create_menu_items;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_categories::Migration),
            Box::new(m20240101_000002_create_menu_items::Migration),
        ]
    }

    // Applied migration names are recorded in `schema_migrations`
    fn migration_table_name() -> DynIden {
        Alias::new("schema_migrations").into_iden()
    }
}
