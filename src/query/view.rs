//! Listing view state.
//!
//! Holds the inputs a viewer edits (search text, filters, sort order, page)
//! and enforces that editing any input other than the page sends the viewer
//! back to page 1.

use crate::types::{TicketPriority, TicketStatus};

use super::{DEFAULT_PAGE_SIZE, ListQuery, Selection, SortOrder};

/// Maximum number of page links shown by the pager.
pub const PAGE_WINDOW: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    query: ListQuery,
}

impl Default for ListView {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ListView {
    pub fn new(page_size: usize) -> Self {
        Self {
            query: ListQuery {
                page_size,
                ..ListQuery::default()
            },
        }
    }

    /// The query to feed into the pipeline.
    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn page(&self) -> usize {
        self.query.page
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if self.query.text != text {
            self.query.text = text;
            self.query.page = 1;
        }
    }

    pub fn set_status(&mut self, status: Selection<TicketStatus>) {
        if self.query.status != status {
            self.query.status = status;
            self.query.page = 1;
        }
    }

    pub fn set_priority(&mut self, priority: Selection<TicketPriority>) {
        if self.query.priority != priority {
            self.query.priority = priority;
            self.query.page = 1;
        }
    }

    pub fn set_sort(&mut self, sort: SortOrder) {
        if self.query.sort != sort {
            self.query.sort = sort;
            self.query.page = 1;
        }
    }

    /// Jump to a page, clamped to `1..=total_pages`.
    pub fn set_page(&mut self, page: usize, total_pages: usize) {
        self.query.page = page.clamp(1, total_pages.max(1));
    }

    pub fn next_page(&mut self, total_pages: usize) {
        self.set_page(self.query.page + 1, total_pages);
    }

    pub fn prev_page(&mut self) {
        self.query.page = self.query.page.saturating_sub(1).max(1);
    }

    /// Back to defaults: no search, all statuses and priorities, newest
    /// first, page 1. Page size is kept.
    pub fn reset(&mut self) {
        *self = Self::new(self.query.page_size);
    }

    /// Page numbers for the pager: at most five, kept centered on the
    /// current page where possible.
    pub fn page_window(&self, total_pages: usize) -> Vec<usize> {
        let shown = total_pages.min(PAGE_WINDOW);
        if shown == 0 {
            return Vec::new();
        }

        let current = self.query.page.clamp(1, total_pages);
        let start = if total_pages <= PAGE_WINDOW || current <= 3 {
            1
        } else if current + 2 >= total_pages {
            total_pages - (PAGE_WINDOW - 1)
        } else {
            current - 2
        };

        (start..start + shown).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on_page(page: usize) -> ListView {
        let mut view = ListView::default();
        view.set_page(page, 10);
        view
    }

    #[test]
    fn test_every_input_change_resets_page() {
        let mut view = on_page(4);
        view.set_text("vpn");
        assert_eq!(view.page(), 1);

        let mut view = on_page(4);
        view.set_status(Selection::Only(TicketStatus::Open));
        assert_eq!(view.page(), 1);

        let mut view = on_page(4);
        view.set_priority(Selection::Only(TicketPriority::High));
        assert_eq!(view.page(), 1);

        let mut view = on_page(4);
        view.set_sort(SortOrder::Priority);
        assert_eq!(view.page(), 1);
    }

    #[test]
    fn test_setting_same_value_keeps_page() {
        let mut view = on_page(3);
        view.set_sort(SortOrder::Newest);
        view.set_status(Selection::All);
        view.set_text("");
        assert_eq!(view.page(), 3);
    }

    #[test]
    fn test_page_navigation_is_clamped() {
        let mut view = ListView::default();
        view.prev_page();
        assert_eq!(view.page(), 1);

        view.next_page(2);
        view.next_page(2);
        view.next_page(2);
        assert_eq!(view.page(), 2);

        view.set_page(0, 2);
        assert_eq!(view.page(), 1);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut view = ListView::new(4);
        view.set_text("printer");
        view.set_sort(SortOrder::Oldest);
        view.set_page(2, 5);

        view.reset();

        assert_eq!(view, ListView::new(4));
        assert_eq!(view.query().page_size, 4);
    }

    #[test]
    fn test_page_window() {
        assert!(ListView::default().page_window(0).is_empty());
        assert_eq!(ListView::default().page_window(3), vec![1, 2, 3]);
        assert_eq!(on_page(2).page_window(10), vec![1, 2, 3, 4, 5]);
        assert_eq!(on_page(6).page_window(10), vec![4, 5, 6, 7, 8]);
        assert_eq!(on_page(9).page_window(10), vec![6, 7, 8, 9, 10]);
    }
}
