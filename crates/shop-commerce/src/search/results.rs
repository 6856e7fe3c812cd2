//! Search results and pagination.

use serde::{Deserialize, Serialize};

/// Default page size of the shop grid.
pub const DEFAULT_PER_PAGE: usize = 12;

/// Pagination info.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: usize,
    /// Items per page.
    pub per_page: usize,
    /// Total number of items.
    pub total: usize,
    /// Total number of pages.
    pub total_pages: usize,
    /// Whether there's a next page.
    pub has_next: bool,
    /// Whether there's a previous page.
    pub has_prev: bool,
}

impl Pagination {
    /// Create pagination info.
    ///
    /// `per_page` is at least 1 and `page` is clamped into `1..=total_pages`.
    pub fn new(page: usize, per_page: usize, total: usize) -> Self {
        let per_page = per_page.max(1);
        let total_pages = if total == 0 {
            1
        } else {
            total.div_ceil(per_page)
        };
        let page = page.clamp(1, total_pages);

        Self {
            page,
            per_page,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Index of the first item on this page.
    pub fn offset(&self) -> usize {
        (self.page - 1) * self.per_page
    }

    /// Get page numbers for display (e.g., [3, 4, 5, 6, 7]).
    pub fn page_numbers(&self, max_visible: usize) -> Vec<usize> {
        if self.total_pages <= max_visible {
            return (1..=self.total_pages).collect();
        }

        let half = max_visible / 2;
        let start = self.page.saturating_sub(half).max(1);
        let end = (start + max_visible - 1).min(self.total_pages);
        let start = (end + 1).saturating_sub(max_visible).max(1);

        (start..=end).collect()
    }

    /// Check if on first page.
    pub fn is_first(&self) -> bool {
        self.page == 1
    }

    /// Check if on last page.
    pub fn is_last(&self) -> bool {
        self.page >= self.total_pages
    }

    /// Get start item number (1-indexed).
    pub fn start_item(&self) -> usize {
        if self.total == 0 {
            0
        } else {
            self.offset() + 1
        }
    }

    /// Get end item number.
    pub fn end_item(&self) -> usize {
        (self.page * self.per_page).min(self.total)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, DEFAULT_PER_PAGE, 0)
    }
}

/// Slice one page out of a full result sequence.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> SearchResults<T> {
    let pagination = Pagination::new(page, per_page, items.len());
    let start = pagination.offset().min(items.len());
    let end = pagination.end_item().max(start);
    SearchResults::new(items[start..end].to_vec(), pagination)
}

/// One page of results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults<T> {
    /// The result items.
    pub items: Vec<T>,
    /// Pagination info.
    pub pagination: Pagination,
}

impl<T> SearchResults<T> {
    /// Create new search results.
    pub fn new(items: Vec<T>, pagination: Pagination) -> Self {
        Self { items, pagination }
    }

    /// Create empty results.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            pagination: Pagination::default(),
        }
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get number of items in this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl<T> Default for SearchResults<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// A facet for filtering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Facet {
    /// Facet name (e.g., "Categories").
    pub name: String,
    /// Field this facet filters on.
    pub field: String,
    /// Facet values.
    pub values: Vec<FacetValue>,
}

impl Facet {
    /// Create a new terms facet.
    pub fn terms(name: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field: field.into(),
            values: Vec::new(),
        }
    }

    /// Add a value to the facet.
    pub fn add_value(&mut self, value: impl Into<String>, count: usize, selected: bool) {
        self.values.push(FacetValue {
            value: value.into(),
            count,
            selected,
        });
    }

    /// Look up a value's entry.
    pub fn value(&self, value: &str) -> Option<&FacetValue> {
        self.values.iter().find(|v| v.value == value)
    }
}

/// A single facet value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FacetValue {
    /// The value.
    pub value: String,
    /// Number of items with this value.
    pub count: usize,
    /// Whether currently selected.
    pub selected: bool,
}
