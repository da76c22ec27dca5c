use models::category::{DESCRIPTION_MAX_LEN, DISPLAY_ORDER_MAX, NAME_MAX_LEN};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::trim;

/// Category creation input
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewCategory {
    #[serde(deserialize_with = "trim::string")]
    #[validate(length(min = 1, max = NAME_MAX_LEN, message = "name must be between 1 and 100 characters"))]
    pub name: String,
    #[serde(default, deserialize_with = "trim::option")]
    #[validate(length(max = DESCRIPTION_MAX_LEN, message = "description must be at most 500 characters"))]
    pub description: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0, max = DISPLAY_ORDER_MAX, message = "display_order must be between 0 and 9999"))]
    pub display_order: Option<i16>,
}

fn validate_patch(patch: &CategoryPatch) -> Result<(), ValidationError> {
    match &patch.description {
        Some(Some(d)) if d.chars().count() as u64 > DESCRIPTION_MAX_LEN => {
            // schema-level errors carry the offending field in `code`
            let mut err = ValidationError::new("description");
            err.message = Some("description must be at most 500 characters".into());
            Err(err)
        }
        _ => Ok(()),
    }
}

/// Partial category update; only supplied fields change.
///
/// `description` is tri-state: absent leaves it alone, `null` clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_patch"))]
pub struct CategoryPatch {
    #[serde(default, deserialize_with = "trim::option")]
    #[validate(length(min = 1, max = NAME_MAX_LEN, message = "name must be between 1 and 100 characters"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "trim::double_option", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    #[validate(range(min = 0, max = DISPLAY_ORDER_MAX, message = "display_order must be between 0 and 9999"))]
    pub display_order: Option<i16>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl CategoryPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.display_order.is_none() && self.is_active.is_none()
    }
}

/// Result of a (possibly forced) category delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteOutcome {
    pub deleted: bool,
    /// Items that referenced the category right before deletion.
    pub unassigned_items: u64,
}
