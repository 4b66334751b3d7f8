//! The desk: every user-facing operation with its sign-in and role checks.

use std::sync::Arc;

use jiff::Timestamp;

use crate::access::Capability;
use crate::analytics::TicketStats;
use crate::assist::{Assistant, MockAssistant, TicketContext};
use crate::backend::{Backend, NewComment, NewTicketRecord};
use crate::config::Config;
use crate::detail::{StatusChange, TicketDetail, load_detail, plan_status_change};
use crate::error::{HelpdeskError, Result};
use crate::query::{CreatorFilter, ListQuery, Page, TicketQueryBuilder};
use crate::session::{Session, SessionState};
use crate::types::{
    Comment, Profile, Role, Ticket, TicketId, TicketPriority, TicketStatus, User, UserId,
};

/// Input for opening a ticket.
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub title: String,
    pub description: String,
    pub priority: TicketPriority,
}

/// Result of a status update.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusUpdate {
    Updated(Ticket),
    /// The ticket already had the requested status; nothing was written.
    Unchanged(Ticket),
}

impl StatusUpdate {
    pub fn ticket(&self) -> &Ticket {
        match self {
            StatusUpdate::Updated(t) | StatusUpdate::Unchanged(t) => t,
        }
    }
}

pub struct Desk {
    backend: Backend,
    session: Arc<SessionState>,
    config: Config,
    assistant: Arc<dyn Assistant>,
}

impl Desk {
    pub fn new(backend: Backend, session: Arc<SessionState>, config: Config) -> Self {
        let assistant = Arc::new(MockAssistant::new(config.assistant_delay()));
        Self {
            backend,
            session,
            config,
            assistant,
        }
    }

    pub fn with_assistant(mut self, assistant: Arc<dyn Assistant>) -> Self {
        self.assistant = assistant;
        self
    }

    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Sign in. A given display name replaces the user's profile name; without
    /// one, a profile named after the id is created only if none exists yet.
    pub async fn login(&self, id: UserId, name: Option<String>) -> Result<Session> {
        let name = name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        let full_name = match &name {
            Some(name) => Some(name.clone()),
            None => {
                let existing = self.backend.profiles.list(std::slice::from_ref(&id)).await?;
                existing.is_empty().then(|| id.to_string())
            }
        };
        if let Some(full_name) = full_name {
            self.backend
                .profiles
                .upsert(Profile {
                    id: id.clone(),
                    full_name,
                })
                .await?;
        }
        self.session
            .sign_in(self.backend.auth.as_ref(), User { id, name })
            .await
    }

    pub async fn logout(&self) -> Result<()> {
        self.session.sign_out(self.backend.auth.as_ref()).await
    }

    /// A user's role. Users without a role entry are plain `user`s.
    pub async fn role_of(&self, user: &UserId) -> Result<Role> {
        Ok(self.backend.roles.get(user).await?.unwrap_or_default())
    }

    /// The signed-in user and their role.
    pub async fn current_role(&self) -> Result<(User, Role)> {
        self.actor("check your role").await
    }

    pub async fn grant_role(&self, user: &UserId, role: Role) -> Result<()> {
        let (actor, actor_role) = self.actor("grant roles").await?;

        if !actor_role.can(Capability::GrantRoles) {
            if self.backend.roles.any_with_role(Role::Admin).await? {
                return actor_role.require(Capability::GrantRoles);
            }
            tracing::info!(actor = %actor.id, "no admin yet, allowing bootstrap grant");
        }

        self.backend.roles.set(user, role).await?;
        tracing::info!(actor = %actor.id, user = %user, role = %role, "role granted");
        Ok(())
    }

    pub async fn create_ticket(&self, input: NewTicket) -> Result<Ticket> {
        let (user, role) = self.actor("create tickets").await?;
        role.require(Capability::CreateTicket)?;

        let title = input.title.trim();
        if title.is_empty() {
            return Err(HelpdeskError::EmptyField("title"));
        }
        if title.contains(['\n', '\r']) {
            return Err(HelpdeskError::MultilineTitle);
        }
        let description = input.description.trim();
        if description.is_empty() {
            return Err(HelpdeskError::EmptyField("description"));
        }

        let created_at = Timestamp::now();
        let sla_deadline = created_at.checked_add(self.config.sla_window())?;

        let ticket = self
            .backend
            .tickets
            .create(NewTicketRecord {
                title: title.to_string(),
                description: description.to_string(),
                priority: input.priority,
                status: TicketStatus::Open,
                created_by: user.id,
                created_at,
                sla_deadline,
            })
            .await?;
        tracing::info!(ticket = %ticket.id, "ticket created");
        Ok(ticket)
    }

    pub async fn add_comment(&self, ticket_id: &TicketId, content: &str) -> Result<Comment> {
        let (user, role) = self.actor("comment").await?;
        let content = content.trim();
        if content.is_empty() {
            return Err(HelpdeskError::EmptyComment);
        }
        self.visible_ticket(&user, role, ticket_id).await?;

        self.backend
            .comments
            .create(NewComment {
                ticket_id: ticket_id.clone(),
                user_id: user.id,
                content: content.to_string(),
                created_at: Timestamp::now(),
            })
            .await
    }

    pub async fn update_status(
        &self,
        ticket_id: &TicketId,
        status: TicketStatus,
    ) -> Result<StatusUpdate> {
        let (_, role) = self.actor("update ticket status").await?;
        role.require(Capability::UpdateStatus)?;

        let ticket = self.get_ticket(ticket_id).await?;
        match plan_status_change(&ticket, status, Timestamp::now()) {
            StatusChange::NoChange => Ok(StatusUpdate::Unchanged(ticket)),
            StatusChange::Apply(patch) => {
                let updated = self.backend.tickets.update(ticket_id, patch).await?;
                tracing::info!(ticket = %ticket_id, from = %ticket.status, to = %status, "status changed");
                Ok(StatusUpdate::Updated(updated))
            }
        }
    }

    /// Tickets visible to the signed-in user, run through the listing
    /// pipeline. Plain users only see tickets they created.
    pub async fn list_tickets(&self, query: &ListQuery) -> Result<Page> {
        let (user, role) = self.actor("view tickets").await?;

        let mut builder = TicketQueryBuilder::from_list_query(query);
        let tickets = if role.can(Capability::ViewAllTickets) {
            self.backend.tickets.list(None).await?
        } else {
            builder = builder.with_filter(Box::new(CreatorFilter::new(user.id.clone())));
            self.backend.tickets.list(Some(&user.id)).await?
        };

        Ok(builder.build().apply(tickets))
    }

    pub async fn ticket_detail(&self, ticket_id: &TicketId) -> Result<TicketDetail> {
        let (user, role) = self.actor("view tickets").await?;
        self.visible_ticket(&user, role, ticket_id).await?;
        load_detail(&self.backend, ticket_id).await
    }

    pub async fn stats(&self) -> Result<TicketStats> {
        let (_, role) = self.actor("view analytics").await?;
        role.require(Capability::ViewAnalytics)?;
        let tickets = self.backend.tickets.list(None).await?;
        Ok(TicketStats::from_tickets(&tickets))
    }

    pub async fn summarize(&self, ticket_id: &TicketId) -> Result<String> {
        let context = self.assistant_context(ticket_id).await?;
        self.assistant.summarize(&context).await
    }

    pub async fn suggest_reply(&self, ticket_id: &TicketId) -> Result<String> {
        let context = self.assistant_context(ticket_id).await?;
        self.assistant.suggest_reply(&context).await
    }

    async fn assistant_context(&self, ticket_id: &TicketId) -> Result<TicketContext> {
        let (_, role) = self.actor("use AI actions").await?;
        role.require(Capability::UseAssistant)?;
        let detail = load_detail(&self.backend, ticket_id).await?;
        Ok(TicketContext::from(&detail))
    }

    async fn actor(&self, action: &'static str) -> Result<(User, Role)> {
        let user = self
            .session
            .current_user()
            .ok_or(HelpdeskError::AuthRequired(action))?;
        let role = self.role_of(&user.id).await?;
        Ok((user, role))
    }

    async fn get_ticket(&self, id: &TicketId) -> Result<Ticket> {
        self.backend
            .tickets
            .get(id)
            .await?
            .ok_or_else(|| HelpdeskError::TicketNotFound(id.to_string()))
    }

    /// Someone else's ticket looks the same as a missing one to a plain user.
    async fn visible_ticket(&self, user: &User, role: Role, id: &TicketId) -> Result<Ticket> {
        let ticket = self.get_ticket(id).await?;
        if !role.can(Capability::ViewAllTickets) && ticket.created_by != user.id {
            return Err(HelpdeskError::TicketNotFound(id.to_string()));
        }
        Ok(ticket)
    }
}
