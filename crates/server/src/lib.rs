//! HTTP surface of the menu service: routing, extraction and validation,
//! error mapping, OpenAPI document and server startup.

pub mod errors;
pub mod extract;
pub mod openapi;
pub mod routes;
pub mod startup;
pub mod state;

pub use startup::run;
pub use state::AppState;
