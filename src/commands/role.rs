use owo_colors::OwoColorize;
use serde_json::json;

use super::{CommandOutput, open_desk};
use crate::error::Result;
use crate::types::{Role, UserId};

/// Give `user` exactly one role, replacing whatever they had.
pub async fn cmd_role_grant(user: &str, role: Role, output_json: bool) -> Result<()> {
    let id = UserId::parse(user)?;
    let desk = open_desk().await?;
    desk.grant_role(&id, role).await?;

    CommandOutput::new(json!({
        "action": "role_grant",
        "user": id,
        "role": role.to_string(),
    }))
    .with_text(format!("{} is now {}", id.cyan(), role.to_string().bold()))
    .print(output_json)
}
