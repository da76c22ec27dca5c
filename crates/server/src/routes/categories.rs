use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use common::types::ApiResponse;
use models::{category, menu_item};
use serde::Deserialize;
use service::category::domain::{CategoryPatch, DeleteOutcome, NewCategory};

use crate::errors::JsonApiError;
use crate::extract::{EntityId, ValidatedJson};
use crate::state::AppState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeleteParams {
    /// Only the literal `true` unassigns linked items and deletes.
    pub force: Option<String>,
}

impl DeleteParams {
    fn force(&self) -> bool {
        self.force.as_deref() == Some("true")
    }
}

#[utoipa::path(
    get, path = "/categories", tag = "categories",
    responses((status = 200, description = "All categories ordered by display_order, name"))
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<category::Model>>>, JsonApiError> {
    let list = state.categories.list().await?;
    Ok(Json(ApiResponse::ok(list, "Categories retrieved successfully")))
}

#[utoipa::path(
    get, path = "/categories/{id}", tag = "categories",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::CategoryDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(State(state): State<AppState>, EntityId(id): EntityId) -> Result<Json<ApiResponse<category::Model>>, JsonApiError> {
    let cat = state.categories.get(id).await?;
    Ok(Json(ApiResponse::ok(cat, "Success")))
}

#[utoipa::path(
    get, path = "/categories/{id}/items", tag = "categories",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Items in the category ordered by name"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn items(State(state): State<AppState>, EntityId(id): EntityId) -> Result<Json<ApiResponse<Vec<menu_item::Model>>>, JsonApiError> {
    let items = state.categories.items(id).await?;
    Ok(Json(ApiResponse::ok(items, "Category items retrieved")))
}

#[utoipa::path(
    post, path = "/categories", tag = "categories",
    request_body = crate::openapi::NewCategoryDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::CategoryDoc),
        (status = 409, description = "Name already exists", body = crate::openapi::ErrorDoc),
        (status = 422, description = "Validation failed", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<NewCategory>,
) -> Result<(StatusCode, Json<ApiResponse<category::Model>>), JsonApiError> {
    let cat = state.categories.create(input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(cat, "Category created successfully"))))
}

#[utoipa::path(
    patch, path = "/categories/{id}", tag = "categories",
    params(("id" = i32, Path, description = "Category ID")),
    request_body = crate::openapi::CategoryPatchDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::CategoryDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc),
        (status = 409, description = "Name already exists", body = crate::openapi::ErrorDoc),
        (status = 422, description = "Validation failed", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    ValidatedJson(patch): ValidatedJson<CategoryPatch>,
) -> Result<Json<ApiResponse<category::Model>>, JsonApiError> {
    if patch.is_empty() {
        return Err(JsonApiError::invalid_field("body", "At least one field must be provided"));
    }
    let cat = state.categories.update(id, patch).await?;
    Ok(Json(ApiResponse::ok(cat, "Category updated successfully")))
}

#[utoipa::path(
    delete, path = "/categories/{id}", tag = "categories",
    params(("id" = i32, Path, description = "Category ID"), DeleteParams),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::DeleteOutcomeDoc),
        (status = 400, description = "Category still has items and force is not set", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    Query(params): Query<DeleteParams>,
) -> Result<Json<ApiResponse<DeleteOutcome>>, JsonApiError> {
    let outcome = state.categories.delete(id, params.force()).await?;
    Ok(Json(ApiResponse::ok(outcome, "Category deleted successfully")))
}
