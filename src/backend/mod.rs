//! Storage and identity collaborators.
//!
//! Everything the desk persists or authenticates goes through the traits in
//! this module. Two implementations ship with the crate:
//! - [`MemoryBackend`]: `DashMap`-backed, for tests and embedding
//! - [`FsBackend`]: plain-text files under the data root
//!
//! The traits are deliberately narrow request/response calls. Callers never
//! hold state across calls, so the store is the only arbiter of write order.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;

use crate::error::Result;
use crate::session::Session;
use crate::types::{
    Comment, Profile, Role, Ticket, TicketId, TicketPriority, TicketStatus, User, UserId,
};

pub mod document;
pub mod fs;
pub mod memory;

pub use fs::FsBackend;
pub use memory::MemoryBackend;

/// Fields supplied when a ticket is opened. The store assigns the id.
#[derive(Debug, Clone)]
pub struct NewTicketRecord {
    pub title: String,
    pub description: String,
    pub priority: TicketPriority,
    pub status: TicketStatus,
    pub created_by: UserId,
    pub created_at: Timestamp,
    pub sla_deadline: Timestamp,
}

impl NewTicketRecord {
    pub fn into_ticket(self, id: TicketId) -> Ticket {
        Ticket {
            id,
            title: self.title,
            description: self.description,
            status: self.status,
            priority: self.priority,
            created_at: self.created_at,
            sla_deadline: self.sla_deadline,
            is_sla_breached: false,
            created_by: self.created_by,
            assigned_to: None,
            resolved_at: None,
        }
    }
}

/// Partial update of a ticket. `None` leaves a field untouched; the nested
/// options set or clear optional fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TicketPatch {
    pub status: Option<TicketStatus>,
    pub resolved_at: Option<Option<Timestamp>>,
}

impl TicketPatch {
    pub fn is_empty(&self) -> bool {
        *self == TicketPatch::default()
    }

    pub fn apply_to(&self, ticket: &mut Ticket) {
        if let Some(status) = self.status {
            ticket.status = status;
        }
        if let Some(resolved_at) = self.resolved_at {
            ticket.resolved_at = resolved_at;
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub ticket_id: TicketId,
    pub user_id: UserId,
    pub content: String,
    pub created_at: Timestamp,
}

#[async_trait]
pub trait TicketStore: Send + Sync {
    async fn create(&self, record: NewTicketRecord) -> Result<Ticket>;

    async fn get(&self, id: &TicketId) -> Result<Option<Ticket>>;

    /// All tickets, newest first, optionally restricted to one creator.
    async fn list(&self, created_by: Option<&UserId>) -> Result<Vec<Ticket>>;

    /// Apply a patch and return the updated ticket.
    /// Fails with `TicketNotFound` when the id is unknown.
    async fn update(&self, id: &TicketId, patch: TicketPatch) -> Result<Ticket>;
}

#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn create(&self, comment: NewComment) -> Result<Comment>;

    /// Comments on one ticket, oldest first.
    async fn list(&self, ticket_id: &TicketId) -> Result<Vec<Comment>>;
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Profiles for the given ids. Unknown ids are simply absent.
    async fn list(&self, ids: &[UserId]) -> Result<Vec<Profile>>;

    async fn upsert(&self, profile: Profile) -> Result<()>;
}

/// Role storage holds exactly one role per user; `set` replaces.
#[async_trait]
pub trait RoleStore: Send + Sync {
    async fn get(&self, user: &UserId) -> Result<Option<Role>>;

    async fn set(&self, user: &UserId, role: Role) -> Result<()>;

    async fn any_with_role(&self, role: Role) -> Result<bool>;
}

/// Authentication collaborator: owns the persisted session.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn current_session(&self) -> Result<Option<Session>>;

    async fn sign_in(&self, user: User) -> Result<Session>;

    async fn sign_out(&self) -> Result<()>;
}

/// The full set of collaborators the desk talks to.
#[derive(Clone)]
pub struct Backend {
    pub tickets: Arc<dyn TicketStore>,
    pub comments: Arc<dyn CommentStore>,
    pub profiles: Arc<dyn ProfileStore>,
    pub roles: Arc<dyn RoleStore>,
    pub auth: Arc<dyn AuthProvider>,
}

impl Backend {
    /// Use one object for every collaborator.
    pub fn from_shared<B>(backend: Arc<B>) -> Self
    where
        B: TicketStore + CommentStore + ProfileStore + RoleStore + AuthProvider + 'static,
    {
        Self {
            tickets: backend.clone(),
            comments: backend.clone(),
            profiles: backend.clone(),
            roles: backend.clone(),
            auth: backend,
        }
    }

    pub fn memory() -> Self {
        Self::from_shared(Arc::new(MemoryBackend::new()))
    }

    /// File-backed collaborators rooted at the configured data directory.
    pub fn from_disk() -> Self {
        Self::from_shared(Arc::new(FsBackend::new(crate::paths::helpdesk_root())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::ToSpan;

    fn sample() -> Ticket {
        let now: Timestamp = "2024-02-02T10:00:00Z".parse().unwrap();
        NewTicketRecord {
            title: "Mouse broken".to_string(),
            description: "Left click sticks".to_string(),
            priority: TicketPriority::Low,
            status: TicketStatus::Open,
            created_by: UserId::new_unchecked("carol"),
            created_at: now,
            sla_deadline: now + 24.hours(),
        }
        .into_ticket(TicketId::new_unchecked("tkt-000001"))
    }

    #[test]
    fn test_empty_patch_changes_nothing() {
        let mut ticket = sample();
        let before = ticket.clone();
        let patch = TicketPatch::default();
        assert!(patch.is_empty());
        patch.apply_to(&mut ticket);
        assert_eq!(ticket, before);
    }

    #[test]
    fn test_patch_sets_and_clears_optionals() {
        let mut ticket = sample();
        let stamp: Timestamp = "2024-02-02T12:00:00Z".parse().unwrap();

        TicketPatch {
            status: Some(TicketStatus::Resolved),
            resolved_at: Some(Some(stamp)),
        }
        .apply_to(&mut ticket);
        assert_eq!(ticket.status, TicketStatus::Resolved);
        assert_eq!(ticket.resolved_at, Some(stamp));

        TicketPatch {
            resolved_at: Some(None),
            ..Default::default()
        }
        .apply_to(&mut ticket);
        assert_eq!(ticket.resolved_at, None);
        assert_eq!(ticket.status, TicketStatus::Resolved);
    }
}
