//! Storage backends for the service layer
//!
//! Both backends implement [`CategoryRepository`](crate::category::repository::CategoryRepository)
//! and [`MenuItemRepository`](crate::menu_item::repository::MenuItemRepository) with the same
//! contract: unique category names, `ON DELETE SET NULL` for item categories,
//! and joined category names on reads.

pub mod memory;
pub mod seaorm;

pub use memory::MemoryStore;
pub use seaorm::SeaOrmStore;
