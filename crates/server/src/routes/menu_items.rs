use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use common::pagination::Pagination;
use common::types::{ApiResponse, FieldError};
use models::menu_item::{Availability, MenuItemView};
use serde::Deserialize;
use service::menu_item::domain::{
    AvailabilityUpdate, CategoryAssignment, CategoryFilter, MenuItemPatch, MenuItemQuery, NewMenuItem,
};

use crate::errors::JsonApiError;
use crate::extract::{EntityId, ValidatedJson};
use crate::state::AppState;

/// Raw listing query; every value arrives as text and is parsed in [`ListParams::parse`].
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Positive integer, or the literal `null` for uncategorized items.
    pub category_id: Option<String>,
    /// `available` or `unavailable`.
    pub availability: Option<String>,
    /// 1-based page, clamped to >= 1.
    pub page: Option<String>,
    /// Page size, clamped into [1, 100].
    pub limit: Option<String>,
}

fn parse_int(raw: Option<&str>, field: &str, errors: &mut Vec<FieldError>) -> Option<u64> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
    match raw.parse::<i64>() {
        // out-of-range values are clamped later, not rejected
        Ok(n) => Some(n.max(0) as u64),
        Err(_) => {
            errors.push(FieldError::new(field, format!("{field} must be an integer")));
            None
        }
    }
}

impl ListParams {
    pub fn parse(&self) -> Result<MenuItemQuery, JsonApiError> {
        let mut errors = Vec::new();

        let category = match self.category_id.as_deref().map(str::trim) {
            None | Some("") => CategoryFilter::Any,
            Some("null") => CategoryFilter::Uncategorized,
            Some(raw) => match raw.parse::<i32>() {
                Ok(id) if id > 0 => CategoryFilter::Category(id),
                _ => {
                    errors.push(FieldError::new("category_id", "category_id must be a positive integer or null"));
                    CategoryFilter::Any
                }
            },
        };

        let availability = match self.availability.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => match raw.parse::<Availability>() {
                Ok(a) => Some(a),
                Err(_) => {
                    errors.push(FieldError::new("availability", "availability must be one of [available, unavailable]"));
                    None
                }
            },
        };

        let page = parse_int(self.page.as_deref(), "page", &mut errors);
        let limit = parse_int(self.limit.as_deref(), "limit", &mut errors);

        if !errors.is_empty() {
            return Err(JsonApiError::validation(errors));
        }
        Ok(MenuItemQuery { category, availability, pagination: Pagination::from_parts(page, limit) })
    }
}

#[utoipa::path(
    get, path = "/menu-items", tag = "menu-items",
    params(ListParams),
    responses(
        (status = 200, description = "Page of items with meta {total, page, limit, total_pages}"),
        (status = 422, description = "Validation failed", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ApiResponse<Vec<MenuItemView>>>, JsonApiError> {
    let query = params.parse()?;
    let page = state.menu_items.list(query).await?;
    Ok(Json(ApiResponse::paged(page.data, page.meta, "Menu items retrieved successfully")))
}

#[utoipa::path(
    get, path = "/menu-items/{id}", tag = "menu-items",
    params(("id" = i32, Path, description = "Menu item ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::MenuItemDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(State(state): State<AppState>, EntityId(id): EntityId) -> Result<Json<ApiResponse<MenuItemView>>, JsonApiError> {
    let item = state.menu_items.get(id).await?;
    Ok(Json(ApiResponse::ok(item, "Success")))
}

#[utoipa::path(
    post, path = "/menu-items", tag = "menu-items",
    request_body = crate::openapi::NewMenuItemDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::MenuItemDoc),
        (status = 404, description = "Category missing or inactive", body = crate::openapi::ErrorDoc),
        (status = 422, description = "Validation failed", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<NewMenuItem>,
) -> Result<(StatusCode, Json<ApiResponse<MenuItemView>>), JsonApiError> {
    let item = state.menu_items.create(input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(item, "Menu item created successfully"))))
}

#[utoipa::path(
    patch, path = "/menu-items/{id}", tag = "menu-items",
    params(("id" = i32, Path, description = "Menu item ID")),
    request_body = crate::openapi::MenuItemPatchDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::MenuItemDoc),
        (status = 404, description = "Item, or category being set, not found", body = crate::openapi::ErrorDoc),
        (status = 422, description = "Validation failed", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    ValidatedJson(patch): ValidatedJson<MenuItemPatch>,
) -> Result<Json<ApiResponse<MenuItemView>>, JsonApiError> {
    if patch.is_empty() {
        return Err(JsonApiError::invalid_field("body", "At least one field must be provided"));
    }
    let item = state.menu_items.update(id, patch).await?;
    Ok(Json(ApiResponse::ok(item, "Menu item updated successfully")))
}

#[utoipa::path(
    patch, path = "/menu-items/{id}/availability", tag = "menu-items",
    params(("id" = i32, Path, description = "Menu item ID")),
    request_body = crate::openapi::AvailabilityUpdateDoc,
    responses(
        (status = 200, description = "Availability changed, nothing else", body = crate::openapi::MenuItemDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update_availability(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    ValidatedJson(body): ValidatedJson<AvailabilityUpdate>,
) -> Result<Json<ApiResponse<MenuItemView>>, JsonApiError> {
    let item = state.menu_items.toggle_availability(id, body.availability).await?;
    Ok(Json(ApiResponse::ok(item, "Availability updated")))
}

#[utoipa::path(
    patch, path = "/menu-items/{id}/category", tag = "menu-items",
    params(("id" = i32, Path, description = "Menu item ID")),
    request_body = crate::openapi::CategoryAssignmentDoc,
    responses(
        (status = 200, description = "Assigned, or unassigned with null", body = crate::openapi::MenuItemDoc),
        (status = 404, description = "Item not found, or category missing or inactive", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn assign_category(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    ValidatedJson(body): ValidatedJson<CategoryAssignment>,
) -> Result<Json<ApiResponse<MenuItemView>>, JsonApiError> {
    let item = state.menu_items.assign_category(id, body.category_id).await?;
    Ok(Json(ApiResponse::ok(item, "Category assigned successfully")))
}

#[utoipa::path(
    delete, path = "/menu-items/{id}", tag = "menu-items",
    params(("id" = i32, Path, description = "Menu item ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(State(state): State<AppState>, EntityId(id): EntityId) -> Result<StatusCode, JsonApiError> {
    state.menu_items.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(category_id: Option<&str>, page: Option<&str>, limit: Option<&str>) -> ListParams {
        ListParams {
            category_id: category_id.map(String::from),
            availability: None,
            page: page.map(String::from),
            limit: limit.map(String::from),
        }
    }

    #[test]
    fn null_literal_selects_uncategorized() {
        let q = params(Some("null"), None, None).parse().unwrap();
        assert_eq!(q.category, CategoryFilter::Uncategorized);
        let q = params(None, None, None).parse().unwrap();
        assert_eq!(q.category, CategoryFilter::Any);
        assert_eq!(q.pagination, Pagination::default());
    }

    #[test]
    fn out_of_range_paging_is_passed_through_for_clamping() {
        let q = params(None, Some("-4"), Some("500")).parse().unwrap();
        assert_eq!(q.pagination.clamped(), Pagination { page: 1, per_page: 100 });
    }

    #[test]
    fn bad_values_are_reported_per_field() {
        let p = ListParams { availability: Some("gone".into()), ..params(Some("abc"), Some("two"), None) };
        let err = p.parse().unwrap_err();
        let fields: Vec<_> = err.errors.unwrap().into_iter().map(|f| f.field).collect();
        assert_eq!(fields, ["category_id", "availability", "page"]);
    }
}
