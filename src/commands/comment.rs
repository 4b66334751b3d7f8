use owo_colors::OwoColorize;
use serde_json::json;

use super::{CommandOutput, open_desk};
use crate::error::Result;
use crate::types::TicketId;
use crate::utils::{is_stdin_tty, read_stdin};

/// Add a comment to a ticket. Text comes from the arguments, or stdin when
/// none are given and stdin is piped.
pub async fn cmd_comment(id: &str, text: Vec<String>, output_json: bool) -> Result<()> {
    let content = if !text.is_empty() {
        text.join(" ")
    } else if !is_stdin_tty() {
        read_stdin()?
    } else {
        String::new()
    };

    let desk = open_desk().await?;
    let comment = desk
        .add_comment(&TicketId::new_unchecked(id), &content)
        .await?;

    CommandOutput::new(json!({
        "id": comment.id,
        "ticket_id": comment.ticket_id,
        "user_id": comment.user_id,
        "content": comment.content,
        "created_at": comment.created_at.to_string(),
    }))
    .with_text(format!("Comment added to {}", comment.ticket_id.cyan()))
    .print(output_json)
}
