//! Sort orders for ticket listings.
//!
//! All orders use a stable sort, so tickets with equal keys keep the order
//! they arrived in.

use serde::{Deserialize, Serialize};

use crate::error::HelpdeskError;
use crate::types::Ticket;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
    Priority,
}

impl SortOrder {
    /// All valid string representations of this enum.
    pub const ALL_STRINGS: &[&str] = &["newest", "oldest", "priority"];
}

enum_display_fromstr!(
    SortOrder,
    HelpdeskError::invalid_sort,
    {
        Newest => "newest",
        Oldest => "oldest",
        Priority => "priority",
    }
);

/// Sort tickets by creation time, newest first
pub fn sort_by_newest(tickets: &mut [Ticket]) {
    tickets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

/// Sort tickets by creation time, oldest first
pub fn sort_by_oldest(tickets: &mut [Ticket]) {
    tickets.sort_by(|a, b| a.created_at.cmp(&b.created_at));
}

/// Sort tickets by priority rank (urgent, high, medium, low)
pub fn sort_by_priority(tickets: &mut [Ticket]) {
    tickets.sort_by_key(|t| t.priority.rank());
}

/// Sort tickets by the specified order
pub fn sort_tickets_by(tickets: &mut [Ticket], order: SortOrder) {
    match order {
        SortOrder::Newest => sort_by_newest(tickets),
        SortOrder::Oldest => sort_by_oldest(tickets),
        SortOrder::Priority => sort_by_priority(tickets),
    }
}
