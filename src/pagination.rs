//! This module defines the common functionality for paging the expense history.

/// The config for pagination
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The maximum expenses to display per page when not specified in a request.
    pub default_page_size: u64,
    /// The maximum number of pages to show in the pagination indicator.
    pub max_pages: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 20,
            max_pages: 5,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum PaginationIndicator {
    Page(u64),
    CurrPage(u64),
    Ellipsis,
    NextButton(u64),
    BackButton(u64),
}

/// Build the row of pagination controls for the expense history table.
///
/// At most `max_pages` numbered pages are shown, centered on `curr_page`
/// where possible. Pages cut off by the window are represented by the first
/// or last page plus an ellipsis.
pub fn create_pagination_indicators(
    curr_page: u64,
    page_count: u64,
    max_pages: u64,
) -> Vec<PaginationIndicator> {
    let (window_start, window_end) = page_window(curr_page, page_count, max_pages);

    let mut indicators = Vec::new();

    if curr_page > 1 {
        indicators.push(PaginationIndicator::BackButton(curr_page - 1));
    }

    if window_start > 1 {
        indicators.push(PaginationIndicator::Page(1));
        indicators.push(PaginationIndicator::Ellipsis);
    }

    for page in window_start..=window_end {
        if page == curr_page {
            indicators.push(PaginationIndicator::CurrPage(page));
        } else {
            indicators.push(PaginationIndicator::Page(page));
        }
    }

    if window_end < page_count {
        indicators.push(PaginationIndicator::Ellipsis);
        indicators.push(PaginationIndicator::Page(page_count));
    }

    if curr_page < page_count {
        indicators.push(PaginationIndicator::NextButton(curr_page + 1));
    }

    indicators
}

/// The inclusive range of page numbers to display, centered on `curr_page`
/// and clamped to `1..=page_count`.
fn page_window(curr_page: u64, page_count: u64, max_pages: u64) -> (u64, u64) {
    if page_count <= max_pages {
        return (1, page_count);
    }

    let start = curr_page.saturating_sub(max_pages / 2).max(1);
    let end = start + max_pages - 1;

    if end > page_count {
        (page_count - max_pages + 1, page_count)
    } else {
        (start, end)
    }
}
