//! Pagination utilities shared by the service and HTTP layers
//!
//! Provides a simple `Pagination` struct to normalize inputs and the
//! `PageMeta` block returned next to every paginated list.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PER_PAGE: u64 = 20;
pub const MAX_PER_PAGE: u64 = 100;
const MAX_OFFSET: u64 = i64::MAX as u64;

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page index
    pub page: u64,
    /// items per page
    pub per_page: u64,
}

impl Pagination {
    /// Build from optional caller input, falling back to page 1 / 20 per page.
    pub fn from_parts(page: Option<u64>, per_page: Option<u64>) -> Self {
        Self { page: page.unwrap_or(1), per_page: per_page.unwrap_or(DEFAULT_PER_PAGE) }
    }

    /// Clamp page to >= 1 and per_page into [1, 100].
    pub fn clamped(self) -> Self {
        Self { page: self.page.max(1), per_page: self.per_page.clamp(1, MAX_PER_PAGE) }
    }

    /// Clamp and convert to a zero-based page index plus page size.
    ///
    /// The index is capped so `index * per_page` fits an `i64` SQL offset; such
    /// pages are empty anyway.
    pub fn normalize(self) -> (u64, u64) {
        let c = self.clamped();
        let max_idx = MAX_OFFSET / c.per_page;
        ((c.page - 1).min(max_idx), c.per_page)
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 1, per_page: DEFAULT_PER_PAGE } }
}

/// Page metadata; `total_pages == ceil(total / limit)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

impl PageMeta {
    pub fn new(total: u64, page: u64, limit: u64) -> Self {
        let limit = limit.max(1);
        Self { total, page, limit, total_pages: total.div_ceil(limit) }
    }
}

/// A page of rows together with its metadata.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_clamps_zero_to_defaults() {
        let (idx, per) = Pagination { page: 0, per_page: 0 }.normalize();
        assert_eq!(idx, 0);
        assert_eq!(per, 1);
    }

    #[test]
    fn normalize_clamps_upper_bound() {
        let (idx, per) = Pagination { page: 5, per_page: 1000 }.normalize();
        assert_eq!(idx, 4);
        assert_eq!(per, 100);
    }

    #[test]
    fn normalize_keeps_offset_in_sql_range() {
        for per_page in [1, 20, 100] {
            let (idx, per) = Pagination { page: u64::MAX, per_page }.normalize();
            assert!(idx.checked_mul(per).is_some_and(|off| off <= i64::MAX as u64));
        }
        let (idx, _) = Pagination { page: 1_000_000_000_000_000_000, per_page: 100 }.normalize();
        assert_eq!(idx, i64::MAX as u64 / 100);
    }

    #[test]
    fn default_values_are_sane() {
        let d = Pagination::default();
        assert_eq!(d.page, 1);
        assert_eq!(d.per_page, 20);
        assert_eq!(Pagination::from_parts(None, None), d);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(PageMeta::new(0, 1, 20).total_pages, 0);
        assert_eq!(PageMeta::new(20, 1, 20).total_pages, 1);
        assert_eq!(PageMeta::new(21, 1, 20).total_pages, 2);
        assert_eq!(PageMeta::new(7, 1, 1).total_pages, 7);
    }
}
