//! Pagination query-string extractor.

use serde::Deserialize;

use dropspace_core::types::pagination::PageRequest;

/// Pagination parameters accepted on list endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationParams {
    /// Page number (1-based).
    pub page: Option<u64>,
    /// Items per page.
    pub page_size: Option<u64>,
}

impl PaginationParams {
    /// Converts the raw parameters into a clamped [`PageRequest`].
    pub fn into_page_request(self) -> PageRequest {
        let defaults = PageRequest::default();
        PageRequest::new(
            self.page.unwrap_or(defaults.page),
            self.page_size.unwrap_or(defaults.page_size),
        )
    }
}
