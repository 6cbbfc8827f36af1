use serde::Deserialize;

const DEFAULT_PER_PAGE: u64 = 10;
const MAX_PER_PAGE: u64 = 100;

/// Pagination query parameters shared by list endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationParam {
    /// Zero-indexed page number.
    pub page: Option<u64>,
    /// Items per page.
    pub entries: Option<u64>,
}

impl PaginationParam {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(0)
    }

    pub fn per_page(&self) -> u64 {
        self.entries.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE)
    }
}
