use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::menu_item;

pub const NAME_MAX_LEN: u64 = 100;
pub const DESCRIPTION_MAX_LEN: u64 = 500;
pub const DISPLAY_ORDER_MAX: i16 = 9999;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub display_order: i16,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    MenuItem,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::MenuItem => Entity::has_many(menu_item::Entity).into(),
        }
    }
}

impl Related<menu_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MenuItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
