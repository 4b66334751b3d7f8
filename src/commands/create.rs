use jiff::Timestamp;
use owo_colors::OwoColorize;

use super::{CommandOutput, open_desk, ticket_json};
use crate::desk::NewTicket;
use crate::error::Result;
use crate::types::TicketPriority;
use crate::utils::{is_stdin_tty, read_stdin};

/// Options for creating a new ticket
pub struct CreateOptions {
    pub title: String,
    /// Read from stdin when absent and stdin is piped
    pub description: Option<String>,
    pub priority: TicketPriority,
}

/// Open a ticket as the signed-in user and print its id
pub async fn cmd_create(options: CreateOptions, output_json: bool) -> Result<()> {
    let description = match options.description {
        Some(d) => d,
        None if !is_stdin_tty() => read_stdin()?,
        None => String::new(),
    };

    let desk = open_desk().await?;
    let ticket = desk
        .create_ticket(NewTicket {
            title: options.title,
            description,
            priority: options.priority,
        })
        .await?;

    CommandOutput::new(ticket_json(&ticket, Timestamp::now()))
        .with_text(format!(
            "Created {} (SLA due {})",
            ticket.id.cyan(),
            ticket.sla_deadline.strftime("%Y-%m-%d %H:%M UTC")
        ))
        .print(output_json)
}
