//! Pagination utilities for tangshi-dv

use serde::{Deserialize, Serialize};

/// Page size for all list endpoints.
pub const PAGE_SIZE: i64 = 6;

/// Pagination metadata calculated from total results
#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    /// Current page number (1-indexed)
    pub page: i64,
    /// Total number of pages
    pub total_pages: i64,
    /// Offset for SQL LIMIT/OFFSET query
    pub offset: i64,
}

/// Calculate pagination metadata from total results and requested page.
///
/// Ensures page is within valid bounds [1, total_pages].
pub fn calculate_pagination(total_results: i64, requested_page: i64) -> Pagination {
    let total_pages = (total_results + PAGE_SIZE - 1) / PAGE_SIZE;
    let page = requested_page.max(1).min(total_pages.max(1));
    let offset = (page - 1) * PAGE_SIZE;

    Pagination {
        page,
        total_pages,
        offset,
    }
}

/// Common query parameter for paged endpoints.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    pub page: i64,
}

fn default_page() -> i64 {
    1
}

/// Envelope for paged list responses.
#[derive(Debug, Serialize)]
pub struct Paged<T> {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub data: Vec<T>,
}

impl<T> Paged<T> {
    pub fn new(pagination: Pagination, total: i64, data: Vec<T>) -> Self {
        Self {
            page: pagination.page,
            page_size: PAGE_SIZE,
            total,
            data,
        }
    }
}
