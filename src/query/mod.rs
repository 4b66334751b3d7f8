//! Ticket listing pipeline.
//!
//! A listing is produced by a fixed sequence of steps over an in-memory
//! ticket list: text search, status filter, priority filter, sort, then
//! pagination. Search and filters must narrow before sorting, and sorting
//! must happen before the page slice is taken.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::HelpdeskError;
use crate::types::{Ticket, TicketPriority, TicketStatus, UserId};

pub mod sort;
pub mod view;

pub use sort::{SortOrder, sort_by_newest, sort_by_oldest, sort_by_priority, sort_tickets_by};
pub use view::ListView;

/// Number of tickets per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// A filter choice that is either the `all` sentinel or one exact value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Selection<T> {
    pub fn accepts(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(target) => target == value,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => write!(f, "all"),
            Selection::Only(value) => fmt::Display::fmt(value, f),
        }
    }
}

impl<T: FromStr<Err = HelpdeskError>> FromStr for Selection<T> {
    type Err = HelpdeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            Ok(Selection::All)
        } else {
            s.parse().map(Selection::Only)
        }
    }
}

/// Trait for ticket filters
pub trait TicketFilter: Send + Sync {
    fn matches(&self, ticket: &Ticket) -> bool;
}

/// Case-insensitive substring search over title and description.
/// An empty needle matches everything.
pub struct TextFilter {
    needle: String,
}

impl TextFilter {
    pub fn new(text: &str) -> Self {
        Self {
            needle: text.to_lowercase(),
        }
    }
}

impl TicketFilter for TextFilter {
    fn matches(&self, ticket: &Ticket) -> bool {
        self.needle.is_empty()
            || ticket.title.to_lowercase().contains(&self.needle)
            || ticket.description.to_lowercase().contains(&self.needle)
    }
}

/// Filter tickets by status
pub struct StatusFilter {
    selection: Selection<TicketStatus>,
}

impl StatusFilter {
    pub fn new(selection: Selection<TicketStatus>) -> Self {
        Self { selection }
    }
}

impl TicketFilter for StatusFilter {
    fn matches(&self, ticket: &Ticket) -> bool {
        self.selection.accepts(&ticket.status)
    }
}

/// Filter tickets by priority
pub struct PriorityFilter {
    selection: Selection<TicketPriority>,
}

impl PriorityFilter {
    pub fn new(selection: Selection<TicketPriority>) -> Self {
        Self { selection }
    }
}

impl TicketFilter for PriorityFilter {
    fn matches(&self, ticket: &Ticket) -> bool {
        self.selection.accepts(&ticket.priority)
    }
}

/// Restrict to tickets opened by one user (what a `user`-role viewer sees)
pub struct CreatorFilter {
    creator: UserId,
}

impl CreatorFilter {
    pub fn new(creator: UserId) -> Self {
        Self { creator }
    }
}

impl TicketFilter for CreatorFilter {
    fn matches(&self, ticket: &Ticket) -> bool {
        ticket.created_by == self.creator
    }
}

/// The user-facing listing inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub text: String,
    pub status: Selection<TicketStatus>,
    pub priority: Selection<TicketPriority>,
    pub sort: SortOrder,
    /// 1-based page index
    pub page: usize,
    pub page_size: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            text: String::new(),
            status: Selection::All,
            priority: Selection::All,
            sort: SortOrder::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ListQuery {
    /// Run the full search → filter → sort → paginate pipeline.
    pub fn apply(&self, tickets: Vec<Ticket>) -> Page {
        TicketQueryBuilder::from_list_query(self)
            .build()
            .apply(tickets)
    }
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub items: Vec<Ticket>,
    /// The page actually shown, after clamping
    pub page: usize,
    pub total_pages: usize,
    /// Number of tickets that survived search and filters
    pub total_items: usize,
}

/// Slice one page out of an already filtered and sorted list.
///
/// The requested page is clamped into `1..=total_pages` so a filter that
/// shrinks the result set never leaves the viewer on an empty page. With no
/// results at all the page is 1 and `total_pages` is 0.
pub fn paginate(items: Vec<Ticket>, page: usize, page_size: usize) -> Page {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size);
    let page = page.clamp(1, total_pages.max(1));

    let items = items
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .collect();

    Page {
        items,
        page,
        total_pages,
        total_items,
    }
}

/// A built query configuration that can be applied to ticket data.
pub struct TicketQuery {
    filters: Vec<Box<dyn TicketFilter>>,
    sort: SortOrder,
    page: usize,
    page_size: usize,
}

impl TicketQuery {
    /// Apply this query: all filters (AND), then sort, then paginate.
    pub fn apply(&self, tickets: Vec<Ticket>) -> Page {
        let mut filtered: Vec<Ticket> = tickets
            .into_iter()
            .filter(|t| self.filters.iter().all(|f| f.matches(t)))
            .collect();

        sort::sort_tickets_by(&mut filtered, self.sort);

        paginate(filtered, self.page, self.page_size)
    }
}

/// Query builder for filtering, sorting and paging tickets
pub struct TicketQueryBuilder {
    filters: Vec<Box<dyn TicketFilter>>,
    sort: SortOrder,
    page: usize,
    page_size: usize,
}

impl TicketQueryBuilder {
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
            sort: SortOrder::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Builder preloaded with the listing steps in their required order.
    pub fn from_list_query(query: &ListQuery) -> Self {
        Self::new()
            .with_filter(Box::new(TextFilter::new(&query.text)))
            .with_filter(Box::new(StatusFilter::new(query.status)))
            .with_filter(Box::new(PriorityFilter::new(query.priority)))
            .with_sort(query.sort)
            .with_page(query.page, query.page_size)
    }

    /// Add a filter to the query (AND composition)
    pub fn with_filter(mut self, filter: Box<dyn TicketFilter>) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_page(mut self, page: usize, page_size: usize) -> Self {
        self.page = page;
        self.page_size = page_size;
        self
    }

    pub fn build(self) -> TicketQuery {
        TicketQuery {
            filters: self.filters,
            sort: self.sort,
            page: self.page,
            page_size: self.page_size,
        }
    }
}

impl Default for TicketQueryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
