//! Categories: domain inputs, repository contract and the business service.

pub mod domain;
pub mod repository;
pub mod service;

pub use service::CategoryService;
