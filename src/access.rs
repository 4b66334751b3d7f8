//! Role capability checks.
//!
//! Roles are a capability switch only: `user` opens tickets, `agent` and
//! `admin` work them.

use crate::error::{HelpdeskError, Result};
use crate::types::Role;

/// Something an actor may try to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    CreateTicket,
    UpdateStatus,
    UseAssistant,
    ViewAnalytics,
    ViewAllTickets,
    GrantRoles,
}

impl Capability {
    /// Phrase used in "not allowed to ..." messages.
    pub fn action(&self) -> &'static str {
        match self {
            Capability::CreateTicket => "create tickets",
            Capability::UpdateStatus => "update ticket status",
            Capability::UseAssistant => "use AI actions",
            Capability::ViewAnalytics => "view analytics",
            Capability::ViewAllTickets => "view all tickets",
            Capability::GrantRoles => "grant roles",
        }
    }
}

impl Role {
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Agent | Role::Admin)
    }

    pub fn can(&self, capability: Capability) -> bool {
        match capability {
            Capability::CreateTicket => *self == Role::User,
            Capability::UpdateStatus
            | Capability::UseAssistant
            | Capability::ViewAnalytics
            | Capability::ViewAllTickets => self.is_staff(),
            Capability::GrantRoles => *self == Role::Admin,
        }
    }

    /// `Ok` when the role holds the capability, `Forbidden` otherwise.
    pub fn require(&self, capability: Capability) -> Result<()> {
        if self.can(capability) {
            Ok(())
        } else {
            Err(HelpdeskError::Forbidden {
                role: self.to_string(),
                action: capability.action(),
            })
        }
    }
}
