use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String, pub timestamp: String }

#[derive(ToSchema)]
pub struct FieldErrorDoc { pub field: String, pub message: String }

/// Failure envelope
#[derive(ToSchema)]
pub struct ErrorDoc { pub success: bool, pub message: String, pub errors: Option<Vec<FieldErrorDoc>> }

#[derive(ToSchema)]
pub struct CategoryDoc {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub display_order: i16,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(ToSchema)]
pub struct NewCategoryDoc { pub name: String, pub description: Option<String>, pub display_order: Option<i16> }

#[derive(ToSchema)]
pub struct CategoryPatchDoc {
    pub name: Option<String>,
    pub description: Option<String>,
    pub display_order: Option<i16>,
    pub is_active: Option<bool>,
}

#[derive(ToSchema)]
pub struct DeleteOutcomeDoc { pub deleted: bool, pub unassigned_items: u64 }

#[derive(ToSchema)]
pub struct MenuItemDoc {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    /// Decimal string with two fraction digits, e.g. `"180.00"`
    pub price: String,
    /// `available` | `unavailable`
    pub availability: String,
    pub category_id: Option<i32>,
    pub category_name: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(ToSchema)]
pub struct NewMenuItemDoc {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub availability: Option<String>,
    pub category_id: Option<i32>,
}

#[derive(ToSchema)]
pub struct MenuItemPatchDoc {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub availability: Option<String>,
    /// `null` unassigns
    pub category_id: Option<i32>,
}

#[derive(ToSchema)]
pub struct AvailabilityUpdateDoc { pub availability: String }

#[derive(ToSchema)]
pub struct CategoryAssignmentDoc {
    /// Required key; `null` unassigns
    pub category_id: Option<i32>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::categories::list,
        crate::routes::categories::get,
        crate::routes::categories::items,
        crate::routes::categories::create,
        crate::routes::categories::update,
        crate::routes::categories::delete,
        crate::routes::menu_items::list,
        crate::routes::menu_items::get,
        crate::routes::menu_items::create,
        crate::routes::menu_items::update,
        crate::routes::menu_items::update_availability,
        crate::routes::menu_items::assign_category,
        crate::routes::menu_items::delete,
    ),
    components(
        schemas(
            HealthResponse,
            FieldErrorDoc,
            ErrorDoc,
            CategoryDoc,
            NewCategoryDoc,
            CategoryPatchDoc,
            DeleteOutcomeDoc,
            MenuItemDoc,
            NewMenuItemDoc,
            MenuItemPatchDoc,
            AvailabilityUpdateDoc,
            CategoryAssignmentDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "categories"),
        (name = "menu-items")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let paths = doc["paths"].as_object().unwrap();
        for p in [
            "/health",
            "/categories",
            "/categories/{id}",
            "/categories/{id}/items",
            "/menu-items",
            "/menu-items/{id}",
            "/menu-items/{id}/availability",
            "/menu-items/{id}/category",
        ] {
            assert!(paths.contains_key(p), "missing {p}");
        }
    }
}
