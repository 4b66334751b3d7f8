use std::fmt;
use std::ops::Deref;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::error::{HelpdeskError, Result};

/// Placeholder shown for comment authors without a resolvable profile.
pub const UNKNOWN_USER: &str = "Unknown User";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    #[default]
    Open,
    InProgress,
    Resolved,
    Closed,
}

enum_display_fromstr!(
    TicketStatus,
    HelpdeskError::invalid_status,
    {
        Open => "open",
        InProgress => "in_progress",
        Resolved => "resolved",
        Closed => "closed",
    }
);

impl TicketStatus {
    /// Resolved and closed tickets are finished: they carry a resolution
    /// timestamp and are exempt from SLA tracking.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TicketStatus::Resolved | TicketStatus::Closed)
    }

    /// Human label ("in progress" rather than "in_progress").
    pub fn label(&self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::InProgress => "in progress",
            TicketStatus::Resolved => "resolved",
            TicketStatus::Closed => "closed",
        }
    }

    pub const ALL: [TicketStatus; 4] = [
        TicketStatus::Open,
        TicketStatus::InProgress,
        TicketStatus::Resolved,
        TicketStatus::Closed,
    ];
}

pub const VALID_STATUSES: &[&str] = &["open", "in_progress", "resolved", "closed"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TicketPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

enum_display_fromstr!(
    TicketPriority,
    HelpdeskError::invalid_priority,
    {
        Low => "low",
        Medium => "medium",
        High => "high",
        Urgent => "urgent",
    }
);

impl TicketPriority {
    /// Sort rank: urgent first, low last.
    pub fn rank(&self) -> u8 {
        match self {
            TicketPriority::Urgent => 0,
            TicketPriority::High => 1,
            TicketPriority::Medium => 2,
            TicketPriority::Low => 3,
        }
    }

    pub const ALL: [TicketPriority; 4] = [
        TicketPriority::Urgent,
        TicketPriority::High,
        TicketPriority::Medium,
        TicketPriority::Low,
    ];
}

pub const VALID_PRIORITIES: &[&str] = &["low", "medium", "high", "urgent"];

/// Capability tier of an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Agent,
    Admin,
}

enum_display_fromstr!(
    Role,
    HelpdeskError::invalid_role,
    {
        User => "user",
        Agent => "agent",
        Admin => "admin",
    }
);

pub const VALID_ROLES: &[&str] = &["user", "agent", "admin"];

macro_rules! string_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a string without validation. Intended for ids that
            /// come back from a store that already validated them.
            pub fn new_unchecked(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(TicketId);
string_id!(CommentId);
string_id!(UserId);

impl UserId {
    /// Parse a user handle: non-empty, letters, digits, `-`, `_` and `.` only.
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(HelpdeskError::InvalidUserId(
                s.to_string(),
                "user id cannot be empty".to_string(),
            ));
        }
        if !trimmed
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.'))
        {
            return Err(HelpdeskError::InvalidUserId(
                s.to_string(),
                "use only letters, numbers, '-', '_' and '.'".to_string(),
            ));
        }
        Ok(UserId(trimmed.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub title: String,
    pub description: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub created_at: Timestamp,
    pub sla_deadline: Timestamp,
    #[serde(default)]
    pub is_sla_breached: bool,
    pub created_by: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<Timestamp>,
}

impl Ticket {
    /// SLA progress at `now`, or `None` for finished tickets.
    pub fn sla_progress(&self, now: Timestamp) -> Option<crate::sla::SlaProgress> {
        crate::sla::sla_progress(
            self.created_at,
            self.sla_deadline,
            now,
            self.status,
            self.is_sla_breached,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub ticket_id: TicketId,
    pub user_id: UserId,
    pub content: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: UserId,
    pub full_name: String,
}

/// An authenticated actor as reported by the auth collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl User {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("User")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_display() {
        for status in TicketStatus::ALL {
            assert_eq!(status.to_string().parse::<TicketStatus>().unwrap(), status);
        }
        assert_eq!(
            "IN_PROGRESS".parse::<TicketStatus>().unwrap(),
            TicketStatus::InProgress
        );
    }

    #[test]
    fn test_invalid_status_string_parse_fails() {
        assert!("in-progress".parse::<TicketStatus>().is_err());
        assert!("new".parse::<TicketStatus>().is_err());
        assert!("all".parse::<TicketStatus>().is_err());
        assert!("".parse::<TicketStatus>().is_err());
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!TicketStatus::Open.is_terminal());
        assert!(!TicketStatus::InProgress.is_terminal());
        assert!(TicketStatus::Resolved.is_terminal());
        assert!(TicketStatus::Closed.is_terminal());
    }

    #[test]
    fn test_priority_rank_order() {
        let mut ordered = vec![
            TicketPriority::Low,
            TicketPriority::Urgent,
            TicketPriority::Medium,
            TicketPriority::High,
        ];
        ordered.sort_by_key(|p| p.rank());
        assert_eq!(ordered, TicketPriority::ALL.to_vec());
    }

    #[test]
    fn test_priority_default_is_medium() {
        assert_eq!(TicketPriority::default(), TicketPriority::Medium);
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("Agent".parse::<Role>().unwrap(), Role::Agent);
        assert!(matches!(
            "owner".parse::<Role>(),
            Err(HelpdeskError::InvalidRole(_))
        ));
    }

    #[test]
    fn test_user_id_validation() {
        assert_eq!(UserId::parse(" alice.b ").unwrap().as_str(), "alice.b");
        assert!(UserId::parse("").is_err());
        assert!(UserId::parse("   ").is_err());
        assert!(UserId::parse("bob smith").is_err());
        assert!(UserId::parse("x/y").is_err());
    }

    #[test]
    fn test_status_serde_snake_case() {
        let json = serde_json::to_string(&TicketStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }
}
