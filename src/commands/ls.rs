use jiff::Timestamp;
use owo_colors::OwoColorize;
use serde_json::json;

use super::{CommandOutput, open_desk, ticket_json};
use crate::display::format_ticket_line;
use crate::error::Result;
use crate::query::{ListView, Selection, SortOrder};
use crate::types::{TicketPriority, TicketStatus};

/// Listing inputs as given on the command line
#[derive(Debug, Clone, Default)]
pub struct LsOptions {
    pub text: Option<String>,
    pub status: Selection<TicketStatus>,
    pub priority: Selection<TicketPriority>,
    /// Falls back to the configured default sort
    pub sort: Option<SortOrder>,
    pub page: usize,
}

/// List tickets visible to the signed-in user, one page at a time
pub async fn cmd_ls(options: LsOptions, output_json: bool) -> Result<()> {
    let desk = open_desk().await?;

    let mut view = ListView::new(desk.config().page_size);
    view.set_sort(options.sort.unwrap_or(desk.config().default_sort));
    view.set_text(options.text.unwrap_or_default());
    view.set_status(options.status);
    view.set_priority(options.priority);

    // Out-of-range pages are clamped by the pipeline.
    let mut query = view.query().clone();
    query.page = options.page;

    let page = desk.list_tickets(&query).await?;
    view.set_page(page.page, page.total_pages);

    let now = Timestamp::now();
    let items: Vec<_> = page.items.iter().map(|t| ticket_json(t, now)).collect();
    let json_output = json!({
        "items": items,
        "page": page.page,
        "total_pages": page.total_pages,
        "total_items": page.total_items,
        "page_size": query.page_size,
    });

    let text_output = if page.items.is_empty() {
        "No tickets found".to_string()
    } else {
        let mut lines: Vec<String> = page
            .items
            .iter()
            .map(|t| format_ticket_line(t, now))
            .collect();
        if page.total_pages > 1 {
            let pager: Vec<String> = view
                .page_window(page.total_pages)
                .into_iter()
                .map(|n| {
                    if n == page.page {
                        format!("[{n}]").bold().to_string()
                    } else {
                        n.to_string()
                    }
                })
                .collect();
            lines.push(String::new());
            lines.push(format!(
                "Page {} of {} ({} tickets)  {}",
                page.page,
                page.total_pages,
                page.total_items,
                pager.join(" ").dimmed()
            ));
        }
        lines.join("\n")
    };

    CommandOutput::new(json_output)
        .with_text(text_output)
        .print(output_json)
}
