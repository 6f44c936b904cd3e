//! Client-side filter state
//!
//! Mirrors the filter settings that drive the list query. Every
//! change except page navigation resets the page to 1.

use crate::query::{CategoryFilter, FilterSpec, SortKey, StatusFilter};

#[derive(Debug, Clone, Default)]
pub struct FilterState {
    spec: FilterSpec,
}

impl FilterState {
    pub fn new(page_size: usize) -> Self {
        Self {
            spec: FilterSpec {
                page_size,
                ..FilterSpec::default()
            },
        }
    }

    pub fn spec(&self) -> &FilterSpec {
        &self.spec
    }

    pub fn set_status(&mut self, status: StatusFilter) {
        self.spec.status = status;
        self.spec.page = 1;
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.spec.category = category;
        self.spec.page = 1;
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.spec.sort = sort;
        self.spec.page = 1;
    }

    /// Apply search text once the debounce window has elapsed
    pub fn commit_search(&mut self, text: &str) {
        self.spec.search = text.trim().to_string();
        self.spec.page = 1;
    }

    /// Move forward if another page exists
    pub fn next_page(&mut self, total_pages: usize) -> bool {
        if self.spec.page < total_pages {
            self.spec.page += 1;
            true
        } else {
            false
        }
    }

    /// Move back unless already on the first page
    pub fn prev_page(&mut self) -> bool {
        if self.spec.page > 1 {
            self.spec.page -= 1;
            true
        } else {
            false
        }
    }

    /// Restore defaults; the page size is kept
    pub fn reset(&mut self) {
        self.spec = FilterSpec {
            page_size: self.spec.page_size,
            ..FilterSpec::default()
        };
    }
}
