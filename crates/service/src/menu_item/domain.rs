use common::pagination::Pagination;
use models::menu_item::{self, Availability, DESCRIPTION_MAX_LEN, NAME_MAX_LEN};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::trim;

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    menu_item::normalize_price(*price)
        .map(|_| ())
        .map_err(|_| field_error("price", "price must be a positive amount of at most 99999999.99"))
}

/// Menu item creation input
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewMenuItem {
    #[serde(deserialize_with = "trim::string")]
    #[validate(length(min = 1, max = NAME_MAX_LEN, message = "name must be between 1 and 150 characters"))]
    pub name: String,
    #[serde(default, deserialize_with = "trim::option")]
    #[validate(length(max = DESCRIPTION_MAX_LEN, message = "description must be at most 1000 characters"))]
    pub description: Option<String>,
    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,
    #[serde(default)]
    pub availability: Option<Availability>,
    #[serde(default)]
    #[validate(range(min = 1, message = "category_id must be a positive integer"))]
    pub category_id: Option<i32>,
}

fn field_error(field: &'static str, message: &'static str) -> ValidationError {
    // schema-level errors carry the offending field in `code`
    let mut err = ValidationError::new(field);
    err.message = Some(message.into());
    err
}

fn validate_patch(patch: &MenuItemPatch) -> Result<(), ValidationError> {
    if let Some(Some(d)) = &patch.description {
        if d.chars().count() as u64 > DESCRIPTION_MAX_LEN {
            return Err(field_error("description", "description must be at most 1000 characters"));
        }
    }
    match patch.category_id {
        Some(Some(id)) if id < 1 => Err(field_error("category_id", "category_id must be a positive integer")),
        _ => Ok(()),
    }
}

/// Partial menu item update; only supplied fields change.
///
/// `description` and `category_id` are tri-state: absent leaves the column
/// alone, `null` clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_patch"))]
pub struct MenuItemPatch {
    #[serde(default, deserialize_with = "trim::option")]
    #[validate(length(min = 1, max = NAME_MAX_LEN, message = "name must be between 1 and 150 characters"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "trim::double_option", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    #[validate(custom(function = "validate_price"))]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub availability: Option<Availability>,
    #[serde(default, with = "::serde_with::rust::double_option", skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Option<i32>>,
}

impl MenuItemPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.availability.is_none()
            && self.category_id.is_none()
    }
}

/// Body of the availability toggle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
pub struct AvailabilityUpdate {
    pub availability: Availability,
}

/// Body of the category assignment. The key is required; `null` unassigns.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
pub struct CategoryAssignment {
    #[serde(deserialize_with = "Option::deserialize")]
    #[validate(range(min = 1, message = "category_id must be a positive integer"))]
    pub category_id: Option<i32>,
}

/// Which items a listing covers with respect to their category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    Any,
    /// Only items whose `category_id` is null.
    Uncategorized,
    Category(i32),
}

impl From<Option<Option<i32>>> for CategoryFilter {
    fn from(v: Option<Option<i32>>) -> Self {
        match v {
            None => CategoryFilter::Any,
            Some(None) => CategoryFilter::Uncategorized,
            Some(Some(id)) => CategoryFilter::Category(id),
        }
    }
}

/// Listing filter plus pagination, as handed to the repository.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuItemQuery {
    pub category: CategoryFilter,
    pub availability: Option<Availability>,
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_id_is_tri_state() {
        let absent: MenuItemPatch = serde_json::from_str(r#"{"name":"Soup"}"#).unwrap();
        assert_eq!(absent.category_id, None);
        let null: MenuItemPatch = serde_json::from_str(r#"{"category_id":null}"#).unwrap();
        assert_eq!(null.category_id, Some(None));
        let set: MenuItemPatch = serde_json::from_str(r#"{"category_id":3}"#).unwrap();
        assert_eq!(set.category_id, Some(Some(3)));
        let bad: MenuItemPatch = serde_json::from_str(r#"{"category_id":-1}"#).unwrap();
        assert!(bad.validate().is_err());
        assert!(null.validate().is_ok());
    }

    #[test]
    fn assignment_requires_the_key() {
        assert!(serde_json::from_str::<CategoryAssignment>("{}").is_err());
        let a: CategoryAssignment = serde_json::from_str(r#"{"category_id":null}"#).unwrap();
        assert_eq!(a.category_id, None);
        let a: CategoryAssignment = serde_json::from_str(r#"{"category_id":0}"#).unwrap();
        assert!(a.validate().is_err());
    }

    #[test]
    fn price_must_be_positive() {
        let input: NewMenuItem = serde_json::from_str(r#"{"name":"Cake","price":0}"#).unwrap();
        assert!(input.validate().is_err());
        let input: NewMenuItem = serde_json::from_str(r#"{"name":"Cake","price":180.0}"#).unwrap();
        assert!(input.validate().is_ok());
        assert_eq!(input.price, Decimal::new(180, 0));
        let patch = MenuItemPatch { price: Some(Decimal::new(-5, 0)), ..Default::default() };
        assert!(patch.validate().is_err());
    }

    #[test]
    fn unknown_availability_is_rejected() {
        assert!(serde_json::from_str::<AvailabilityUpdate>(r#"{"availability":"sold_out"}"#).is_err());
        let u: AvailabilityUpdate = serde_json::from_str(r#"{"availability":"unavailable"}"#).unwrap();
        assert_eq!(u.availability, Availability::Unavailable);
    }

    #[test]
    fn filter_from_tri_state() {
        assert_eq!(CategoryFilter::from(None), CategoryFilter::Any);
        assert_eq!(CategoryFilter::from(Some(None)), CategoryFilter::Uncategorized);
        assert_eq!(CategoryFilter::from(Some(Some(2))), CategoryFilter::Category(2));
    }
}
