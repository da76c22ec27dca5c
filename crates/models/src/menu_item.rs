use std::{fmt, str::FromStr};

use rust_decimal::{Decimal, RoundingStrategy};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{category, errors};

pub const NAME_MAX_LEN: u64 = 150;
pub const DESCRIPTION_MAX_LEN: u64 = 1000;
/// Prices are NUMERIC(10,2).
pub const PRICE_SCALE: u32 = 2;

/// Largest value a NUMERIC(10,2) column holds.
pub fn max_price() -> Decimal {
    Decimal::new(99_999_999_99, PRICE_SCALE)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, Default)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    #[default]
    #[sea_orm(string_value = "available")]
    Available,
    #[sea_orm(string_value = "unavailable")]
    Unavailable,
}

impl Availability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::Available => "available",
            Availability::Unavailable => "unavailable",
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Availability {
    type Err = errors::ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Availability::Available),
            "unavailable" => Ok(Availability::Unavailable),
            _ => Err(errors::ModelError::Validation("availability must be one of [available, unavailable]".into())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "menu_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,
    pub availability: Availability,
    pub category_id: Option<i32>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Category,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Category => Entity::belongs_to(category::Entity)
                .from(Column::CategoryId)
                .to(category::Column::Id)
                .on_delete(ForeignKeyAction::SetNull)
                .on_update(ForeignKeyAction::Cascade)
                .into(),
        }
    }
}

impl Related<category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Menu item joined with its category's name (`None` when uncategorized).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItemView {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub availability: Availability,
    pub category_id: Option<i32>,
    pub category_name: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl MenuItemView {
    pub fn from_parts(item: Model, category: Option<category::Model>) -> Self {
        // a dangling join never labels the item
        let category_name = category
            .filter(|c| Some(c.id) == item.category_id)
            .map(|c| c.name);
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            price: item.price,
            availability: item.availability,
            category_id: item.category_id,
            category_name,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

/// Round to cents and check the price is strictly positive and fits NUMERIC(10,2).
pub fn normalize_price(price: Decimal) -> Result<Decimal, errors::ModelError> {
    let mut rounded = price.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero);
    // keep two fraction digits in the text form, e.g. 250 -> 250.00
    rounded.rescale(PRICE_SCALE);
    if rounded <= Decimal::ZERO {
        return Err(errors::ModelError::Validation("price must be a positive number".into()));
    }
    if rounded > max_price() {
        return Err(errors::ModelError::Validation(format!("price must be at most {}", max_price())));
    }
    Ok(rounded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn item(category_id: Option<i32>) -> Model {
        let now = Utc::now().into();
        Model {
            id: 7,
            name: "Cake".into(),
            description: None,
            price: Decimal::new(18000, 2),
            availability: Availability::Available,
            category_id,
            created_at: now,
            updated_at: now,
        }
    }

    fn desserts() -> category::Model {
        let now = Utc::now().into();
        category::Model {
            id: 3,
            name: "Desserts".into(),
            description: None,
            display_order: 0,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn availability_round_trips_through_text() {
        assert_eq!("available".parse::<Availability>().unwrap(), Availability::Available);
        assert_eq!(Availability::Unavailable.to_string(), "unavailable");
        assert!("Available".parse::<Availability>().is_err());
        assert_eq!(serde_json::to_value(Availability::Unavailable).unwrap(), "unavailable");
    }

    #[test]
    fn view_carries_category_name() {
        let view = MenuItemView::from_parts(item(Some(3)), Some(desserts()));
        assert_eq!(view.category_name.as_deref(), Some("Desserts"));
        let view = MenuItemView::from_parts(item(None), None);
        assert_eq!(view.category_name, None);
    }

    #[test]
    fn view_ignores_mismatched_category() {
        let view = MenuItemView::from_parts(item(Some(99)), Some(desserts()));
        assert_eq!(view.category_name, None);
    }

    #[test]
    fn price_is_rounded_to_cents() {
        let p = normalize_price(Decimal::new(12345, 3)).unwrap();
        assert_eq!(p, Decimal::new(1235, 2));
        assert_eq!(normalize_price(Decimal::new(250, 0)).unwrap().to_string(), "250.00");
        assert!(normalize_price(Decimal::ZERO).is_err());
        assert!(normalize_price(Decimal::new(-1, 0)).is_err());
        assert!(normalize_price(Decimal::new(1, 3)).is_err());
        assert!(normalize_price(Decimal::new(100_000_000, 0)).is_err());
    }

    #[test]
    fn price_serializes_as_exact_string() {
        let json = serde_json::to_value(item(None)).unwrap();
        assert_eq!(json["price"], "180.00");
    }
}
