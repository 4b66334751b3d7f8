use jiff::Timestamp;
use owo_colors::OwoColorize;
use serde_json::json;

use super::{CommandOutput, open_desk, ticket_json};
use crate::display::{format_age, format_comment, format_priority_colored, format_sla, format_status_colored};
use crate::error::Result;
use crate::types::TicketId;

/// Display a ticket with its comments
pub async fn cmd_show(id: &str, output_json: bool) -> Result<()> {
    let desk = open_desk().await?;
    let detail = desk.ticket_detail(&TicketId::new_unchecked(id)).await?;
    let now = Timestamp::now();
    let ticket = &detail.ticket;
    let resolution_time = detail.resolution_time();

    let comments_json: Vec<_> = detail
        .comments
        .iter()
        .map(|c| {
            json!({
                "id": c.comment.id,
                "user_id": c.comment.user_id,
                "author_name": c.author_name,
                "content": c.comment.content,
                "created_at": c.comment.created_at.to_string(),
            })
        })
        .collect();

    let mut json_output = ticket_json(ticket, now);
    json_output["comments"] = json!(comments_json);
    json_output["resolution_time"] = json!(resolution_time);

    let text_output = {
        let mut output = format!(
            "{} {}\n{} {}  opened by {} {}",
            ticket.id.cyan(),
            ticket.title.bold(),
            format_status_colored(ticket.status),
            format_priority_colored(ticket.priority),
            ticket.created_by,
            format_age(ticket.created_at, now).dimmed(),
        );

        let sla = format_sla(ticket, now);
        if !sla.is_empty() {
            output.push_str(&format!("\n{sla}"));
        }
        if let Some(resolved) = &resolution_time {
            output.push_str(&format!("\n{} {}", "Resolved in".green(), resolved));
        }

        output.push_str(&format!("\n\n{}", ticket.description));

        output.push_str(&format!(
            "\n\n{}",
            format!("## Comments ({})", detail.comments.len()).bold()
        ));
        if detail.comments.is_empty() {
            output.push_str(&format!("\n{}", "No comments yet".dimmed()));
        }
        for comment in &detail.comments {
            output.push_str(&format!("\n{}", format_comment(comment, now)));
        }
        output
    };

    CommandOutput::new(json_output)
        .with_text(text_output)
        .print(output_json)
}
