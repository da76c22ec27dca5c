//! Demo menu used for local development (`menu-service seed`).

use chrono::Utc;
use models::{category, menu_item};
use models::menu_item::Availability;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, TransactionTrait};
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::storage::seaorm::db_err;

struct SeedCategory {
    name: &'static str,
    description: &'static str,
    display_order: i16,
}

struct SeedItem {
    name: &'static str,
    description: &'static str,
    /// price in cents
    cents: i64,
    availability: Availability,
    category: &'static str,
}

const CATEGORIES: &[SeedCategory] = &[
    SeedCategory { name: "Appetizers", description: "Starters and small plates to begin your meal", display_order: 1 },
    SeedCategory { name: "Main Courses", description: "Hearty main dishes", display_order: 2 },
    SeedCategory { name: "Desserts", description: "Sweet treats to end your meal", display_order: 3 },
    SeedCategory { name: "Beverages", description: "Hot and cold drinks", display_order: 4 },
];

const ITEMS: &[SeedItem] = &[
    SeedItem { name: "Garlic Breadsticks", description: "Freshly baked breadsticks with garlic butter", cents: 20000, availability: Availability::Available, category: "Appetizers" },
    SeedItem { name: "Bruschetta", description: "Toasted bread topped with tomato, basil and olive oil", cents: 15000, availability: Availability::Available, category: "Appetizers" },
    SeedItem { name: "Chicken Wings (6 Pcs)", description: "Crispy wings tossed in spicy sauce", cents: 25000, availability: Availability::Unavailable, category: "Appetizers" },
    SeedItem { name: "Margherita Pizza", description: "Classic pizza with tomato sauce, mozzarella and basil", cents: 25000, availability: Availability::Available, category: "Main Courses" },
    SeedItem { name: "Paneer Tikka Masala", description: "Grilled paneer in a rich spiced tomato gravy", cents: 22000, availability: Availability::Available, category: "Main Courses" },
    SeedItem { name: "Veggie Burger", description: "Grilled vegetable patty with lettuce and tomato", cents: 23000, availability: Availability::Available, category: "Main Courses" },
    SeedItem { name: "Chocolate Lava Cake", description: "Warm chocolate cake with a molten center", cents: 18000, availability: Availability::Available, category: "Desserts" },
];

/// Rows inserted by a seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub categories_created: usize,
    pub items_created: usize,
}

/// Insert the demo menu in one transaction. Existing category and item names are skipped.
#[instrument(skip(db))]
pub async fn seed_demo_menu(db: &DatabaseConnection) -> Result<SeedReport, ServiceError> {
    let txn = db.begin().await.map_err(db_err)?;
    let mut report = SeedReport::default();
    let now: sea_orm::prelude::DateTimeWithTimeZone = Utc::now().into();

    for c in CATEGORIES {
        let exists = category::Entity::find()
            .filter(category::Column::Name.eq(c.name))
            .one(&txn)
            .await
            .map_err(db_err)?;
        if exists.is_some() {
            continue;
        }
        category::ActiveModel {
            name: Set(c.name.to_string()),
            description: Set(Some(c.description.to_string())),
            display_order: Set(c.display_order),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(db_err)?;
        report.categories_created += 1;
    }

    for i in ITEMS {
        let exists = menu_item::Entity::find()
            .filter(menu_item::Column::Name.eq(i.name))
            .one(&txn)
            .await
            .map_err(db_err)?;
        if exists.is_some() {
            continue;
        }
        let category_id = category::Entity::find()
            .filter(category::Column::Name.eq(i.category))
            .one(&txn)
            .await
            .map_err(db_err)?
            .map(|c| c.id);
        menu_item::ActiveModel {
            name: Set(i.name.to_string()),
            description: Set(Some(i.description.to_string())),
            price: Set(Decimal::new(i.cents, 2)),
            availability: Set(i.availability),
            category_id: Set(category_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(db_err)?;
        report.items_created += 1;
    }

    txn.commit().await.map_err(db_err)?;
    info!(categories = report.categories_created, items = report.items_created, "demo_menu_seeded");
    Ok(report)
}
