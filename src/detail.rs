//! Ticket detail aggregation.
//!
//! Joins a ticket with its comments and each comment author's display name,
//! computes how long resolution took, and plans status transitions.

use std::collections::{HashMap, HashSet};
use std::future::Future;

use futures::future::{AbortHandle, Abortable};
use jiff::Timestamp;
use serde::Serialize;

use crate::backend::{Backend, TicketPatch};
use crate::error::{HelpdeskError, Result};
use crate::types::{Comment, Profile, Ticket, TicketId, TicketStatus, UNKNOWN_USER, UserId};

/// A comment with its author's display name resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentView {
    #[serde(flatten)]
    pub comment: Comment,
    pub author_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketDetail {
    pub ticket: Ticket,
    pub comments: Vec<CommentView>,
}

impl TicketDetail {
    /// "Resolved in ..." text, present only once a resolution time exists.
    pub fn resolution_time(&self) -> Option<String> {
        self.ticket
            .resolved_at
            .map(|resolved| format_resolution_duration(self.ticket.created_at, resolved))
    }
}

/// Fetch a ticket, its comments (oldest first) and the comment authors'
/// names.
///
/// A failed profile lookup does not fail the detail: every author then shows
/// as [`UNKNOWN_USER`].
pub async fn load_detail(backend: &Backend, id: &TicketId) -> Result<TicketDetail> {
    let ticket = backend
        .tickets
        .get(id)
        .await?
        .ok_or_else(|| HelpdeskError::TicketNotFound(id.to_string()))?;

    let comments = backend.comments.list(id).await?;

    let authors = distinct_authors(&comments);
    let profiles = if authors.is_empty() {
        Vec::new()
    } else {
        match backend.profiles.list(&authors).await {
            Ok(profiles) => profiles,
            Err(e) => {
                tracing::warn!("Profile lookup failed for ticket {}: {}", id, e);
                Vec::new()
            }
        }
    };

    Ok(TicketDetail {
        ticket,
        comments: attach_authors(comments, &profiles),
    })
}

/// Author ids in order of first appearance, without repeats.
pub fn distinct_authors(comments: &[Comment]) -> Vec<UserId> {
    let mut seen = HashSet::new();
    comments
        .iter()
        .filter(|c| seen.insert(&c.user_id))
        .map(|c| c.user_id.clone())
        .collect()
}

pub fn attach_authors(comments: Vec<Comment>, profiles: &[Profile]) -> Vec<CommentView> {
    let names: HashMap<&UserId, &str> = profiles
        .iter()
        .map(|p| (&p.id, p.full_name.as_str()))
        .collect();

    comments
        .into_iter()
        .map(|comment| {
            let author_name = names
                .get(&comment.user_id)
                .map(|name| name.to_string())
                .unwrap_or_else(|| UNKNOWN_USER.to_string());
            CommentView {
                comment,
                author_name,
            }
        })
        .collect()
}

/// `"{h}h {m}m"` when at least an hour passed, otherwise `"{m}m"`.
/// Partial minutes are dropped.
pub fn format_resolution_duration(created_at: Timestamp, resolved_at: Timestamp) -> String {
    let minutes = (resolved_at.duration_since(created_at).as_secs() / 60).max(0);
    let hours = minutes / 60;
    if hours > 0 {
        format!("{}h {}m", hours, minutes % 60)
    } else {
        format!("{minutes}m")
    }
}

/// Outcome of asking for a status change.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusChange {
    /// The ticket already has the requested status.
    NoChange,
    Apply(TicketPatch),
}

/// Work out the update for moving `ticket` to `new_status` at `now`.
///
/// Moving to resolved or closed stamps `resolved_at` in the same update.
/// Moving back to open or in progress clears a stale `resolved_at`.
pub fn plan_status_change(ticket: &Ticket, new_status: TicketStatus, now: Timestamp) -> StatusChange {
    if ticket.status == new_status {
        return StatusChange::NoChange;
    }

    let resolved_at = if new_status.is_terminal() {
        Some(Some(now))
    } else if ticket.resolved_at.is_some() {
        Some(None)
    } else {
        None
    };

    StatusChange::Apply(TicketPatch {
        status: Some(new_status),
        resolved_at,
        ..Default::default()
    })
}

/// Handle to a detail load started for a view that may close before it
/// finishes.
pub struct DetailHandle {
    abort: AbortHandle,
}

impl DetailHandle {
    /// The view went away; a load still in flight yields `None`.
    pub fn close(&self) {
        self.abort.abort();
    }

    pub fn is_closed(&self) -> bool {
        self.abort.is_aborted()
    }
}

/// Start a detail load tied to a [`DetailHandle`].
///
/// The returned future resolves to `Ok(None)` if the handle was closed
/// before the load completed.
pub fn open_detail(
    backend: Backend,
    id: TicketId,
) -> (DetailHandle, impl Future<Output = Result<Option<TicketDetail>>>) {
    let (abort, registration) = AbortHandle::new_pair();
    let load = Abortable::new(async move { load_detail(&backend, &id).await }, registration);

    let fut = async move {
        match load.await {
            Ok(result) => result.map(Some),
            Err(_aborted) => {
                tracing::debug!("detail view closed before load finished");
                Ok(None)
            }
        }
    };

    (DetailHandle { abort }, fut)
}
