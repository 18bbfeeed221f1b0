//! Pagination service for list pages.

use serde::Serialize;

/// Splits item lists into fixed-size pages.
#[derive(Debug, Clone)]
pub struct Paginator {
    per_page: usize,
}

/// One page of items plus the totals needed to render pager links.
#[derive(Debug, Clone, Serialize)]
pub struct Pagination<T> {
    pub items: Vec<T>,
    pub current_page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub page_count: usize,
}

impl Paginator {
    /// `per_page` below 1 is raised to 1.
    pub fn new(per_page: usize) -> Self {
        Self {
            per_page: per_page.max(1),
        }
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Returns page `page` (1-based) of `items`.
    ///
    /// A page past the end has no items but still reports the totals.
    pub fn paginate<T>(&self, items: Vec<T>, page: usize) -> Pagination<T> {
        let page = page.max(1);
        let total_items = items.len();
        let page_count = total_items.div_ceil(self.per_page).max(1);
        let offset = (page - 1).saturating_mul(self.per_page);

        let items = items
            .into_iter()
            .skip(offset)
            .take(self.per_page)
            .collect();

        Pagination {
            items,
            current_page: page,
            per_page: self.per_page,
            total_items,
            page_count,
        }
    }
}

impl<T> Pagination<T> {
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.page_count
    }

    /// Maps the page items, keeping the totals.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Pagination<U> {
        Pagination {
            items: self.items.into_iter().map(f).collect(),
            current_page: self.current_page,
            per_page: self.per_page,
            total_items: self.total_items,
            page_count: self.page_count,
        }
    }
}

/// Parses the `page` query parameter. Missing, invalid or zero means 1.
pub fn parse_page(raw: Option<&str>) -> usize {
    raw.and_then(|p| p.trim().parse::<usize>().ok())
        .filter(|p| *p >= 1)
        .unwrap_or(1)
}
