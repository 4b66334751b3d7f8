use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::io;

use crate::commands::{
    CreateOptions, LsOptions, cmd_comment, cmd_config_get, cmd_config_set, cmd_config_show,
    cmd_create, cmd_login, cmd_logout, cmd_ls, cmd_role_grant, cmd_show, cmd_stats, cmd_status,
    cmd_suggest_reply, cmd_summarize, cmd_whoami,
};
use crate::error::Result;
use crate::query::{Selection, SortOrder};
use crate::types::{
    Role, TicketPriority, TicketStatus, VALID_PRIORITIES, VALID_ROLES, VALID_STATUSES,
};

#[derive(Parser)]
#[command(name = "helpdesk")]
#[command(about = "Plain-text help-desk ticketing with SLA tracking")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in (creates or updates your profile)
    Login {
        /// User id (letters, numbers, '-', '_' and '.')
        user: String,

        /// Display name shown on your comments
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Sign out
    Logout {
        #[arg(long)]
        json: bool,
    },

    /// Show the signed-in user and role
    Whoami {
        #[arg(long)]
        json: bool,
    },

    /// Manage roles
    Role {
        #[command(subcommand)]
        action: RoleAction,
    },

    /// Open a new ticket
    #[command(visible_alias = "c")]
    Create {
        /// Ticket title
        title: String,

        /// Description text (read from stdin when omitted and piped)
        #[arg(short, long)]
        description: Option<String>,

        /// Priority: low, medium, high, urgent (default: medium)
        #[arg(short, long, default_value = "medium", value_parser = parse_priority)]
        priority: TicketPriority,

        #[arg(long)]
        json: bool,
    },

    /// List tickets
    Ls {
        /// Search title and description (case-insensitive)
        #[arg(short = 'q', long = "query")]
        text: Option<String>,

        /// Status filter, or 'all'
        #[arg(long, default_value = "all", value_parser = parse_status_selection)]
        status: Selection<TicketStatus>,

        /// Priority filter, or 'all'
        #[arg(long, default_value = "all", value_parser = parse_priority_selection)]
        priority: Selection<TicketPriority>,

        /// Sort order: newest, oldest, priority (default: from config)
        #[arg(long, value_parser = parse_sort)]
        sort: Option<SortOrder>,

        /// Page to show, starting at 1
        #[arg(long, default_value_t = 1)]
        page: usize,

        #[arg(long)]
        json: bool,
    },

    /// Show a ticket with its comments
    #[command(visible_alias = "s")]
    Show {
        #[arg(value_parser = parse_ticket_id)]
        id: String,

        #[arg(long)]
        json: bool,
    },

    /// Comment on a ticket
    Comment {
        #[arg(value_parser = parse_ticket_id)]
        id: String,

        /// Comment text (read from stdin when omitted and piped)
        text: Vec<String>,

        #[arg(long)]
        json: bool,
    },

    /// Change a ticket's status (agents and admins)
    Status {
        #[arg(value_parser = parse_ticket_id)]
        id: String,

        /// New status: open, in_progress, resolved, closed
        #[arg(value_parser = parse_status)]
        status: TicketStatus,

        #[arg(long)]
        json: bool,
    },

    /// Draft a summary of a ticket (agents and admins)
    Summarize {
        #[arg(value_parser = parse_ticket_id)]
        id: String,

        #[arg(long)]
        json: bool,
    },

    /// Draft a reply to a ticket (agents and admins)
    SuggestReply {
        #[arg(value_parser = parse_ticket_id)]
        id: String,

        #[arg(long)]
        json: bool,
    },

    /// Ticket analytics (agents and admins)
    Stats {
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for [possible values: bash, zsh, fish, powershell, elvish]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum RoleAction {
    /// Set a user's role, replacing the previous one (admins; anyone while
    /// no admin exists)
    Grant {
        user: String,

        /// Role: user, agent, admin
        #[arg(value_parser = parse_role)]
        role: Role,

        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show all configuration values
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Print one configuration value
    Get {
        key: String,

        #[arg(long)]
        json: bool,
    },
    /// Set a configuration value
    Set {
        key: String,
        value: String,

        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    /// Execute the command, dispatching to the appropriate handler.
    pub async fn run(self) -> Result<()> {
        match self {
            Commands::Login { user, name, json } => cmd_login(&user, name, json).await,
            Commands::Logout { json } => cmd_logout(json).await,
            Commands::Whoami { json } => cmd_whoami(json).await,
            Commands::Role { action } => match action {
                RoleAction::Grant { user, role, json } => cmd_role_grant(&user, role, json).await,
            },
            Commands::Create {
                title,
                description,
                priority,
                json,
            } => {
                cmd_create(
                    CreateOptions {
                        title,
                        description,
                        priority,
                    },
                    json,
                )
                .await
            }
            Commands::Ls {
                text,
                status,
                priority,
                sort,
                page,
                json,
            } => {
                cmd_ls(
                    LsOptions {
                        text,
                        status,
                        priority,
                        sort,
                        page,
                    },
                    json,
                )
                .await
            }
            Commands::Show { id, json } => cmd_show(&id, json).await,
            Commands::Comment { id, text, json } => cmd_comment(&id, text, json).await,
            Commands::Status { id, status, json } => cmd_status(&id, status, json).await,
            Commands::Summarize { id, json } => cmd_summarize(&id, json).await,
            Commands::SuggestReply { id, json } => cmd_suggest_reply(&id, json).await,
            Commands::Stats { json } => cmd_stats(json).await,
            Commands::Config { action } => match action {
                ConfigAction::Show { json } => cmd_config_show(json),
                ConfigAction::Get { key, json } => cmd_config_get(&key, json),
                ConfigAction::Set { key, value, json } => cmd_config_set(&key, &value, json),
            },
            Commands::Completions { shell } => {
                generate_completions(shell);
                Ok(())
            }
        }
    }
}

fn parse_with_validation<T, F>(
    s: &str,
    parser: F,
    field_name: &str,
    valid_values: &[&str],
) -> std::result::Result<T, String>
where
    F: FnOnce(&str) -> std::result::Result<T, String>,
{
    parser(s).map_err(|_| {
        format!(
            "Invalid {}. Must be one of: {}",
            field_name,
            valid_values.join(", ")
        )
    })
}

fn parse_priority(s: &str) -> std::result::Result<TicketPriority, String> {
    parse_with_validation(
        s,
        |v| v.parse().map_err(|_| String::new()),
        "priority",
        VALID_PRIORITIES,
    )
}

fn parse_status(s: &str) -> std::result::Result<TicketStatus, String> {
    parse_with_validation(
        s,
        |v| v.parse().map_err(|_| String::new()),
        "status",
        VALID_STATUSES,
    )
}

fn parse_role(s: &str) -> std::result::Result<Role, String> {
    parse_with_validation(s, |v| v.parse().map_err(|_| String::new()), "role", VALID_ROLES)
}

fn parse_sort(s: &str) -> std::result::Result<SortOrder, String> {
    parse_with_validation(
        s,
        |v| v.parse().map_err(|_| String::new()),
        "sort",
        SortOrder::ALL_STRINGS,
    )
}

fn parse_status_selection(s: &str) -> std::result::Result<Selection<TicketStatus>, String> {
    parse_with_validation(
        s,
        |v| v.parse().map_err(|_| String::new()),
        "status",
        &[&["all"][..], VALID_STATUSES].concat(),
    )
}

fn parse_priority_selection(s: &str) -> std::result::Result<Selection<TicketPriority>, String> {
    parse_with_validation(
        s,
        |v| v.parse().map_err(|_| String::new()),
        "priority",
        &[&["all"][..], VALID_PRIORITIES].concat(),
    )
}

fn parse_ticket_id(s: &str) -> std::result::Result<String, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("ID cannot be empty".to_string());
    }

    if !s
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(
            "ID must contain only alphanumeric characters, hyphens, and underscores".to_string(),
        );
    }

    Ok(s.to_string())
}

pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "helpdesk", &mut io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_status_valid() {
        assert_eq!(parse_status("open").unwrap(), TicketStatus::Open);
        assert_eq!(parse_status("In_Progress").unwrap(), TicketStatus::InProgress);
        assert_eq!(parse_status("closed").unwrap(), TicketStatus::Closed);
    }

    #[test]
    fn test_parse_status_error_lists_values() {
        let err = parse_status("done").unwrap_err();
        assert!(err.contains("open, in_progress, resolved, closed"), "{err}");
    }

    #[test]
    fn test_parse_selections() {
        assert_eq!(parse_status_selection("ALL").unwrap(), Selection::All);
        assert_eq!(
            parse_priority_selection("urgent").unwrap(),
            Selection::Only(TicketPriority::Urgent)
        );
        let err = parse_priority_selection("p0").unwrap_err();
        assert!(err.contains("all, low"), "{err}");
    }

    #[test]
    fn test_parse_ticket_id() {
        assert_eq!(parse_ticket_id(" tkt-1a2b3c ").unwrap(), "tkt-1a2b3c");
        assert!(parse_ticket_id("").is_err());
        assert!(parse_ticket_id("../etc/passwd").is_err());
    }

    #[test]
    fn test_ls_defaults() {
        let cli = Cli::try_parse_from(["helpdesk", "ls"]).unwrap();
        let Commands::Ls {
            status,
            priority,
            sort,
            page,
            ..
        } = cli.command
        else {
            panic!("expected ls");
        };
        assert_eq!(status, Selection::All);
        assert_eq!(priority, Selection::All);
        assert_eq!(sort, None);
        assert_eq!(page, 1);
    }
}
