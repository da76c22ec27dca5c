//! Service layer holding the menu business rules on top of `models`.
//! - Repositories (`category::repository`, `menu_item::repository`) are pure data access.
//! - Services own uniqueness, the guarded category delete and category attach checks.
//! - `storage` provides the SeaORM and in-memory repository implementations.

pub mod errors;
pub mod category;
pub mod menu_item;
pub mod storage;
pub mod seed;
mod trim;
#[cfg(test)]
pub mod test_support;

pub use category::CategoryService;
pub use errors::ServiceError;
pub use menu_item::MenuItemService;
