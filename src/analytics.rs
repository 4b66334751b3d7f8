//! Aggregate ticket counts for the stats view.

use serde::Serialize;

use crate::types::{Ticket, TicketPriority, TicketStatus};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub open: usize,
    pub in_progress: usize,
    pub resolved: usize,
    pub closed: usize,
}

impl StatusCounts {
    pub fn get(&self, status: TicketStatus) -> usize {
        match status {
            TicketStatus::Open => self.open,
            TicketStatus::InProgress => self.in_progress,
            TicketStatus::Resolved => self.resolved,
            TicketStatus::Closed => self.closed,
        }
    }

    fn bump(&mut self, status: TicketStatus) {
        match status {
            TicketStatus::Open => self.open += 1,
            TicketStatus::InProgress => self.in_progress += 1,
            TicketStatus::Resolved => self.resolved += 1,
            TicketStatus::Closed => self.closed += 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PriorityCounts {
    pub urgent: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl PriorityCounts {
    pub fn get(&self, priority: TicketPriority) -> usize {
        match priority {
            TicketPriority::Urgent => self.urgent,
            TicketPriority::High => self.high,
            TicketPriority::Medium => self.medium,
            TicketPriority::Low => self.low,
        }
    }

    fn bump(&mut self, priority: TicketPriority) {
        match priority {
            TicketPriority::Urgent => self.urgent += 1,
            TicketPriority::High => self.high += 1,
            TicketPriority::Medium => self.medium += 1,
            TicketPriority::Low => self.low += 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TicketStats {
    pub total: usize,
    pub by_status: StatusCounts,
    pub by_priority: PriorityCounts,
    pub sla_breached: usize,
}

impl TicketStats {
    pub fn from_tickets(tickets: &[Ticket]) -> Self {
        let mut stats = TicketStats {
            total: tickets.len(),
            ..Default::default()
        };
        for ticket in tickets {
            stats.by_status.bump(ticket.status);
            stats.by_priority.bump(ticket.priority);
            if ticket.is_sla_breached {
                stats.sla_breached += 1;
            }
        }
        stats
    }

    /// `count` as a rounded share of all tickets; 0 when there are none.
    pub fn percent_of_total(&self, count: usize) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (count as f64 / self.total as f64 * 100.0).round() as u32
    }

    /// Share of tickets not flagged as SLA breached.
    pub fn sla_compliance(&self) -> u32 {
        100 - self.percent_of_total(self.sla_breached)
    }
}
