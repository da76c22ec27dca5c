//! Shared building blocks for the menu service crates.
//!
//! - `types`: the JSON response envelope every endpoint speaks.
//! - `pagination`: page/limit normalization and page metadata.
//! - `utils::logging`: tracing subscriber bootstrap.

pub mod types;
pub mod utils;
pub mod pagination;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok", timestamp: "2024-01-01T00:00:00Z".into() };
        assert_eq!(h.status, "ok");
    }
}
