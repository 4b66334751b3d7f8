mod assist;
mod auth;
mod comment;
mod config;
mod create;
mod ls;
mod role;
mod show;
mod stats;
mod status;

pub use assist::{cmd_suggest_reply, cmd_summarize};
pub use auth::{cmd_login, cmd_logout, cmd_whoami};
pub use comment::cmd_comment;
pub use config::{cmd_config_get, cmd_config_set, cmd_config_show};
pub use create::{CreateOptions, cmd_create};
pub use ls::{LsOptions, cmd_ls};
pub use role::cmd_role_grant;
pub use show::cmd_show;
pub use stats::cmd_stats;
pub use status::cmd_status;

use jiff::Timestamp;
use serde_json::{Value, json};

use crate::backend::Backend;
use crate::config::Config;
use crate::desk::Desk;
use crate::error::Result;
use crate::session;
use crate::types::Ticket;

/// Output of a command: a JSON value plus optional human text.
pub struct CommandOutput {
    json: Value,
    text: Option<String>,
}

impl CommandOutput {
    pub fn new(json: Value) -> Self {
        Self { json, text: None }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Print JSON when asked for it (or when there is no text form).
    pub fn print(self, output_json: bool) -> Result<()> {
        match self.text {
            Some(text) if !output_json => println!("{text}"),
            _ => println!("{}", serde_json::to_string_pretty(&self.json)?),
        }
        Ok(())
    }
}

/// Desk over the on-disk store, with the persisted session loaded.
pub(crate) async fn open_desk() -> Result<Desk> {
    let config = Config::load()?;
    let backend = Backend::from_disk();
    let session = session::global();
    session.init(backend.auth.as_ref()).await?;
    Ok(Desk::new(backend, session, config))
}

pub(crate) fn ticket_json(ticket: &Ticket, now: Timestamp) -> Value {
    let sla = ticket.sla_progress(now).map(|p| {
        json!({
            "percentage": p.rounded(),
            "tier": p.tier.to_string(),
        })
    });
    json!({
        "id": ticket.id,
        "title": ticket.title,
        "description": ticket.description,
        "status": ticket.status.to_string(),
        "priority": ticket.priority.to_string(),
        "created_at": ticket.created_at.to_string(),
        "sla_deadline": ticket.sla_deadline.to_string(),
        "is_sla_breached": ticket.is_sla_breached,
        "created_by": ticket.created_by,
        "assigned_to": ticket.assigned_to,
        "resolved_at": ticket.resolved_at.map(|t| t.to_string()),
        "sla": sla,
    })
}
