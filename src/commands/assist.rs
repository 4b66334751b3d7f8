use serde_json::json;

use super::{CommandOutput, open_desk};
use crate::error::Result;
use crate::types::TicketId;

pub async fn cmd_summarize(id: &str, output_json: bool) -> Result<()> {
    let desk = open_desk().await?;
    let summary = desk.summarize(&TicketId::new_unchecked(id)).await?;

    CommandOutput::new(json!({ "ticket_id": id, "summary": summary }))
        .with_text(summary.clone())
        .print(output_json)
}

pub async fn cmd_suggest_reply(id: &str, output_json: bool) -> Result<()> {
    let desk = open_desk().await?;
    let reply = desk.suggest_reply(&TicketId::new_unchecked(id)).await?;

    CommandOutput::new(json!({ "ticket_id": id, "reply": reply }))
        .with_text(reply.clone())
        .print(output_json)
}
