//! Terminal formatting for tickets, comments, SLA indicators and stats.

use jiff::Timestamp;
use owo_colors::OwoColorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::analytics::TicketStats;
use crate::detail::CommentView;
use crate::sla::{SlaProgress, SlaTier};
use crate::types::{Ticket, TicketPriority, TicketStatus};
use crate::utils::truncate_string;

const SLA_BAR_WIDTH: usize = 10;
const TITLE_WIDTH: usize = 60;

pub fn format_status_colored(status: TicketStatus) -> String {
    let badge = format!("[{}]", status.label());
    match status {
        TicketStatus::Open => badge.yellow().to_string(),
        TicketStatus::InProgress => badge.cyan().to_string(),
        TicketStatus::Resolved => badge.green().to_string(),
        TicketStatus::Closed => badge.dimmed().to_string(),
    }
}

pub fn format_priority_colored(priority: TicketPriority) -> String {
    let text = priority.to_string();
    match priority {
        TicketPriority::Urgent => text.red().bold().to_string(),
        TicketPriority::High => text.red().to_string(),
        TicketPriority::Medium => text.yellow().to_string(),
        TicketPriority::Low => text.dimmed().to_string(),
    }
}

/// Uncolored progress bar, e.g. `[########--] 83%`.
pub fn sla_bar(progress: &SlaProgress) -> String {
    let pct = progress.rounded() as usize;
    let filled = (pct * SLA_BAR_WIDTH).div_ceil(100).min(SLA_BAR_WIDTH);
    format!(
        "[{}{}] {}%",
        "#".repeat(filled),
        "-".repeat(SLA_BAR_WIDTH - filled),
        pct
    )
}

/// SLA indicator for a ticket; empty for finished tickets.
pub fn format_sla(ticket: &Ticket, now: Timestamp) -> String {
    let Some(progress) = ticket.sla_progress(now) else {
        return String::new();
    };
    let text = format!("SLA {}", sla_bar(&progress));
    match progress.tier {
        SlaTier::Breached => format!("{} {}", text.red().bold(), "BREACHED".red().bold()),
        SlaTier::Critical => text.red().to_string(),
        SlaTier::Warning => text.yellow().to_string(),
        SlaTier::Normal => text.green().to_string(),
    }
}

/// Coarse "time ago" text.
pub fn format_age(then: Timestamp, now: Timestamp) -> String {
    let secs = now.duration_since(then).as_secs().max(0);
    let minutes = secs / 60;
    let hours = minutes / 60;
    let days = hours / 24;
    if minutes < 1 {
        "just now".to_string()
    } else if hours < 1 {
        format!("{minutes}m ago")
    } else if days < 1 {
        format!("{hours}h ago")
    } else {
        format!("{days}d ago")
    }
}

/// One listing line: id, priority, status, title and SLA indicator.
pub fn format_ticket_line(ticket: &Ticket, now: Timestamp) -> String {
    let sla = format_sla(ticket, now);
    let mut line = format!(
        "{} {} {} {}",
        format!("{:10}", ticket.id.as_str()).cyan(),
        format_priority_colored(ticket.priority),
        format_status_colored(ticket.status),
        truncate_string(&ticket.title, TITLE_WIDTH)
    );
    if !sla.is_empty() {
        line.push_str("  ");
        line.push_str(&sla);
    }
    line
}

pub fn format_comment(view: &CommentView, now: Timestamp) -> String {
    format!(
        "{} {}\n  {}",
        view.author_name.bold(),
        format_age(view.comment.created_at, now).dimmed(),
        view.comment.content.replace('\n', "\n  ")
    )
}

#[derive(Tabled)]
struct StatRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "Share")]
    share: String,
}

pub fn stats_table(stats: &TicketStats) -> String {
    let row = |metric: &str, count: usize| StatRow {
        metric: metric.to_string(),
        count,
        share: format!("{}%", stats.percent_of_total(count)),
    };

    let mut rows = vec![row("Total tickets", stats.total)];
    rows.extend(
        TicketStatus::ALL
            .iter()
            .map(|s| row(s.label(), stats.by_status.get(*s))),
    );
    rows.push(row("SLA breached", stats.sla_breached));
    rows.extend(
        TicketPriority::ALL
            .iter()
            .map(|p| row(&format!("{p} priority"), stats.by_priority.get(*p))),
    );

    let mut table = Table::new(rows);
    table.with(Style::modern());
    table.to_string()
}
