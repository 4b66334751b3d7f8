use owo_colors::OwoColorize;
use serde_json::json;

use super::{CommandOutput, open_desk};
use crate::error::Result;
use crate::types::UserId;

/// Sign in as `user`, recording `name` as the display name.
pub async fn cmd_login(user: &str, name: Option<String>, output_json: bool) -> Result<()> {
    let id = UserId::parse(user)?;
    let desk = open_desk().await?;
    let session = desk.login(id, name).await?;
    let role = desk.role_of(&session.user.id).await?;

    CommandOutput::new(json!({
        "action": "login",
        "user": session.user.id,
        "name": session.user.name,
        "role": role.to_string(),
    }))
    .with_text(format!(
        "Signed in as {} ({})",
        session.user.id.cyan(),
        role
    ))
    .print(output_json)
}

pub async fn cmd_logout(output_json: bool) -> Result<()> {
    let desk = open_desk().await?;
    let previous = desk.session().current_user();
    desk.logout().await?;

    let text = match &previous {
        Some(user) => format!("Signed out {}", user.id.cyan()),
        None => "Not signed in".to_string(),
    };
    CommandOutput::new(json!({
        "action": "logout",
        "user": previous.map(|u| u.id),
    }))
    .with_text(text)
    .print(output_json)
}

pub async fn cmd_whoami(output_json: bool) -> Result<()> {
    let desk = open_desk().await?;
    let Some(session) = desk.session().current() else {
        return CommandOutput::new(json!({ "user": null }))
            .with_text("Not signed in")
            .print(output_json);
    };
    let role = desk.role_of(&session.user.id).await?;

    CommandOutput::new(json!({
        "user": session.user.id,
        "name": session.user.name,
        "role": role.to_string(),
        "signed_in_at": session.signed_in_at.to_string(),
    }))
    .with_text(format!(
        "{} ({}) as {}",
        session.user.display_name().bold(),
        session.user.id.cyan(),
        role
    ))
    .print(output_json)
}
