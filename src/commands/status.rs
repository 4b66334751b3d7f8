use jiff::Timestamp;
use owo_colors::OwoColorize;

use super::{CommandOutput, ticket_json};
use crate::desk::StatusUpdate;
use crate::display::format_status_colored;
use crate::error::Result;
use crate::types::{TicketId, TicketStatus};

/// Move a ticket to a new status (agents and admins)
pub async fn cmd_status(id: &str, status: TicketStatus, output_json: bool) -> Result<()> {
    let desk = super::open_desk().await?;
    let update = desk
        .update_status(&TicketId::new_unchecked(id), status)
        .await?;

    let ticket = update.ticket();
    let mut json_output = ticket_json(ticket, Timestamp::now());
    let text = match &update {
        StatusUpdate::Updated(_) => {
            json_output["changed"] = true.into();
            format!(
                "Updated {} -> {}",
                ticket.id.cyan(),
                format_status_colored(ticket.status)
            )
        }
        StatusUpdate::Unchanged(_) => {
            json_output["changed"] = false.into();
            format!(
                "{} is already {}",
                ticket.id.cyan(),
                format_status_colored(ticket.status)
            )
        }
    };

    CommandOutput::new(json_output)
        .with_text(text)
        .print(output_json)
}
