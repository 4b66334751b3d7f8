//! In-memory collaborators backed by `DashMap`.

use async_trait::async_trait;
use dashmap::DashMap;
use jiff::Timestamp;
use parking_lot::RwLock;

use super::{
    AuthProvider, CommentStore, NewComment, NewTicketRecord, ProfileStore, RoleStore, TicketPatch,
    TicketStore,
};
use crate::error::{HelpdeskError, Result};
use crate::session::Session;
use crate::types::{Comment, CommentId, Profile, Role, Ticket, TicketId, User, UserId};
use crate::utils::{generate_comment_id, generate_ticket_id};

#[derive(Default)]
pub struct MemoryBackend {
    tickets: DashMap<TicketId, Ticket>,
    comments: DashMap<TicketId, Vec<Comment>>,
    profiles: DashMap<UserId, Profile>,
    roles: DashMap<UserId, Role>,
    session: RwLock<Option<Session>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fully formed ticket, bypassing id assignment.
    pub fn insert_ticket(&self, ticket: Ticket) {
        self.tickets.insert(ticket.id.clone(), ticket);
    }

    fn unused_ticket_id(&self) -> TicketId {
        loop {
            let id = generate_ticket_id();
            if !self.tickets.contains_key(&id) {
                return id;
            }
        }
    }
}

#[async_trait]
impl TicketStore for MemoryBackend {
    async fn create(&self, record: NewTicketRecord) -> Result<Ticket> {
        let ticket = record.into_ticket(self.unused_ticket_id());
        self.tickets.insert(ticket.id.clone(), ticket.clone());
        Ok(ticket)
    }

    async fn get(&self, id: &TicketId) -> Result<Option<Ticket>> {
        Ok(self.tickets.get(id).map(|t| t.value().clone()))
    }

    async fn list(&self, created_by: Option<&UserId>) -> Result<Vec<Ticket>> {
        let mut tickets: Vec<Ticket> = self
            .tickets
            .iter()
            .filter(|entry| created_by.is_none_or(|creator| &entry.created_by == creator))
            .map(|entry| entry.value().clone())
            .collect();
        tickets.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(tickets)
    }

    async fn update(&self, id: &TicketId, patch: TicketPatch) -> Result<Ticket> {
        let mut entry = self
            .tickets
            .get_mut(id)
            .ok_or_else(|| HelpdeskError::TicketNotFound(id.to_string()))?;
        patch.apply_to(entry.value_mut());
        Ok(entry.value().clone())
    }
}

#[async_trait]
impl CommentStore for MemoryBackend {
    async fn create(&self, comment: NewComment) -> Result<Comment> {
        let comment = Comment {
            id: CommentId::new_unchecked(generate_comment_id()),
            ticket_id: comment.ticket_id,
            user_id: comment.user_id,
            content: comment.content,
            created_at: comment.created_at,
        };
        self.comments
            .entry(comment.ticket_id.clone())
            .or_default()
            .push(comment.clone());
        Ok(comment)
    }

    async fn list(&self, ticket_id: &TicketId) -> Result<Vec<Comment>> {
        let mut comments = self
            .comments
            .get(ticket_id)
            .map(|c| c.value().clone())
            .unwrap_or_default();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(comments)
    }
}

#[async_trait]
impl ProfileStore for MemoryBackend {
    async fn list(&self, ids: &[UserId]) -> Result<Vec<Profile>> {
        Ok(ids
            .iter()
            .filter_map(|id| self.profiles.get(id).map(|p| p.value().clone()))
            .collect())
    }

    async fn upsert(&self, profile: Profile) -> Result<()> {
        self.profiles.insert(profile.id.clone(), profile);
        Ok(())
    }
}

#[async_trait]
impl RoleStore for MemoryBackend {
    async fn get(&self, user: &UserId) -> Result<Option<Role>> {
        Ok(self.roles.get(user).map(|r| *r.value()))
    }

    async fn set(&self, user: &UserId, role: Role) -> Result<()> {
        self.roles.insert(user.clone(), role);
        Ok(())
    }

    async fn any_with_role(&self, role: Role) -> Result<bool> {
        Ok(self.roles.iter().any(|entry| *entry.value() == role))
    }
}

#[async_trait]
impl AuthProvider for MemoryBackend {
    async fn current_session(&self) -> Result<Option<Session>> {
        Ok(self.session.read().clone())
    }

    async fn sign_in(&self, user: User) -> Result<Session> {
        let session = Session {
            user,
            signed_in_at: Timestamp::now(),
        };
        *self.session.write() = Some(session.clone());
        Ok(session)
    }

    async fn sign_out(&self) -> Result<()> {
        *self.session.write() = None;
        Ok(())
    }
}
