//! Pagination types for list views.

use serde::{Deserialize, Serialize};

/// Default page size.
const DEFAULT_PAGE_SIZE: u64 = 15;
/// Maximum page size.
const MAX_PAGE_SIZE: u64 = 100;

/// Requested page of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-based). Out-of-range values are clamped on use.
    #[serde(default = "default_page")]
    pub page: u64,
    /// Number of items per page.
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

impl PageRequest {
    /// Create a new page request with the size clamped to `1..=MAX_PAGE_SIZE`.
    pub fn new(page: u64, page_size: u64) -> Self {
        Self::with_max(page, page_size, MAX_PAGE_SIZE)
    }

    /// Create a page request with a caller-supplied size ceiling.
    pub fn with_max(page: u64, page_size: u64, max_page_size: u64) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.clamp(1, max_page_size.max(1)),
        }
    }

    /// Number of items skipped before this page.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1) * self.page_size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of a list plus the totals needed to render a pager.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Current page number (1-based), after clamping.
    pub page: u64,
    /// Number of items per page.
    pub page_size: u64,
    /// Total number of items across all pages.
    pub total_items: u64,
    /// Total number of pages, never less than 1.
    pub total_pages: u64,
    /// Whether there is a next page.
    pub has_next: bool,
    /// Whether there is a previous page.
    pub has_previous: bool,
}

impl<T> PageResponse<T> {
    /// Number of pages needed for `total_items`; an empty list still has one page.
    pub fn page_count(total_items: u64, page_size: u64) -> u64 {
        let page_size = page_size.max(1);
        if total_items == 0 {
            1
        } else {
            total_items.div_ceil(page_size)
        }
    }
}

/// Cut one page out of an already filtered list.
///
/// The requested page is clamped to `[1, total_pages]`; an out-of-range
/// request yields the nearest valid page rather than an error.
pub fn paginate<T>(list: Vec<T>, request: PageRequest) -> PageResponse<T> {
    let page_size = request.page_size.max(1);
    let total_items = list.len() as u64;
    let total_pages = PageResponse::<T>::page_count(total_items, page_size);
    let page = request.page.clamp(1, total_pages);
    let offset = ((page - 1) * page_size) as usize;

    let items: Vec<T> = list
        .into_iter()
        .skip(offset)
        .take(page_size as usize)
        .collect();

    PageResponse {
        items,
        page,
        page_size,
        total_items,
        total_pages,
        has_next: page < total_pages,
        has_previous: page > 1,
    }
}

fn default_page() -> u64 {
    1
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}
