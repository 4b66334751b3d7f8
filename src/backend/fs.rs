//! File-backed collaborators.
//!
//! Layout under the data root:
//! - `tickets/<id>.md`: one document per ticket (see [`super::document`])
//! - `comments/<ticket-id>.ndjson`: append-only comment log per ticket
//! - `profiles.yaml`, `roles.yaml`: maps keyed by user id
//! - `session.yaml`: the signed-in user, absent when signed out

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use jiff::Timestamp;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::fs as tokio_fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use super::document::{parse_ticket, render_ticket};
use super::{
    AuthProvider, CommentStore, NewComment, NewTicketRecord, ProfileStore, RoleStore, TicketPatch,
    TicketStore,
};
use crate::error::{HelpdeskError, Result};
use crate::session::Session;
use crate::types::{Comment, CommentId, Profile, Role, Ticket, TicketId, User, UserId};
use crate::utils::{generate_comment_id, generate_ticket_id};

pub struct FsBackend {
    root: PathBuf,
    /// Serializes read-modify-write cycles on the map files and ticket
    /// documents within this process.
    write_lock: Mutex<()>,
}

impl FsBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn tickets_dir(&self) -> PathBuf {
        self.root.join("tickets")
    }

    fn ticket_path(&self, id: &TicketId) -> PathBuf {
        self.tickets_dir().join(format!("{id}.md"))
    }

    fn comments_path(&self, id: &TicketId) -> PathBuf {
        self.root.join("comments").join(format!("{id}.ndjson"))
    }

    fn profiles_path(&self) -> PathBuf {
        self.root.join("profiles.yaml")
    }

    fn roles_path(&self) -> PathBuf {
        self.root.join("roles.yaml")
    }

    fn session_path(&self) -> PathBuf {
        self.root.join("session.yaml")
    }

    async fn read_ticket(&self, path: &Path) -> Result<Option<Ticket>> {
        match tokio_fs::read_to_string(path).await {
            Ok(content) => parse_ticket(&content).map(Some),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_context(e, "read ticket", path)),
        }
    }

    async fn write_ticket(&self, ticket: &Ticket) -> Result<()> {
        let path = self.ticket_path(&ticket.id);
        write_file(&path, render_ticket(ticket)?.as_bytes()).await
    }
}

fn io_context(e: std::io::Error, action: &str, path: &Path) -> HelpdeskError {
    HelpdeskError::Io(std::io::Error::new(
        e.kind(),
        format!("failed to {action} at {}: {e}", path.display()),
    ))
}

/// Write through a temporary sibling and rename, so readers never see a
/// half-written file.
async fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio_fs::create_dir_all(parent)
            .await
            .map_err(|e| io_context(e, "create directory", parent))?;
    }
    let tmp = path.with_extension("tmp");
    tokio_fs::write(&tmp, contents)
        .await
        .map_err(|e| io_context(e, "write", &tmp))?;
    tokio_fs::rename(&tmp, path)
        .await
        .map_err(|e| io_context(e, "replace", path))?;
    Ok(())
}

async fn read_yaml<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    match tokio_fs::read_to_string(path).await {
        Ok(content) if content.trim().is_empty() => Ok(T::default()),
        Ok(content) => Ok(serde_yaml_ng::from_str(&content)?),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(T::default()),
        Err(e) => Err(io_context(e, "read", path)),
    }
}

async fn write_yaml<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    write_file(path, serde_yaml_ng::to_string(value)?.as_bytes()).await
}

#[async_trait]
impl TicketStore for FsBackend {
    async fn create(&self, record: NewTicketRecord) -> Result<Ticket> {
        let _guard = self.write_lock.lock().await;

        let id = loop {
            let candidate = generate_ticket_id();
            if !tokio_fs::try_exists(self.ticket_path(&candidate)).await? {
                break candidate;
            }
        };

        let ticket = record.into_ticket(id);
        self.write_ticket(&ticket).await?;
        tracing::debug!(id = %ticket.id, "created ticket document");
        Ok(ticket)
    }

    async fn get(&self, id: &TicketId) -> Result<Option<Ticket>> {
        self.read_ticket(&self.ticket_path(id)).await
    }

    async fn list(&self, created_by: Option<&UserId>) -> Result<Vec<Ticket>> {
        let dir = self.tickets_dir();
        let mut entries = match tokio_fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_context(e, "list tickets", &dir)),
        };

        let mut tickets = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("md") {
                continue;
            }
            match self.read_ticket(&path).await {
                Ok(Some(ticket)) => {
                    if created_by.is_none_or(|creator| &ticket.created_by == creator) {
                        tickets.push(ticket);
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!("Skipping unreadable ticket {}: {}", path.display(), e);
                }
            }
        }

        tickets.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(tickets)
    }

    async fn update(&self, id: &TicketId, patch: TicketPatch) -> Result<Ticket> {
        let _guard = self.write_lock.lock().await;

        let mut ticket = self
            .read_ticket(&self.ticket_path(id))
            .await?
            .ok_or_else(|| HelpdeskError::TicketNotFound(id.to_string()))?;
        if patch.is_empty() {
            return Ok(ticket);
        }
        patch.apply_to(&mut ticket);
        self.write_ticket(&ticket).await?;
        Ok(ticket)
    }
}

#[async_trait]
impl CommentStore for FsBackend {
    async fn create(&self, comment: NewComment) -> Result<Comment> {
        let comment = Comment {
            id: CommentId::new_unchecked(generate_comment_id()),
            ticket_id: comment.ticket_id,
            user_id: comment.user_id,
            content: comment.content,
            created_at: comment.created_at,
        };

        let path = self.comments_path(&comment.ticket_id);
        if let Some(parent) = path.parent() {
            tokio_fs::create_dir_all(parent)
                .await
                .map_err(|e| io_context(e, "create directory", parent))?;
        }

        let mut line = serde_json::to_string(&comment)?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;
        let mut file = tokio_fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(|e| io_context(e, "open comment log", &path))?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        Ok(comment)
    }

    async fn list(&self, ticket_id: &TicketId) -> Result<Vec<Comment>> {
        let path = self.comments_path(ticket_id);
        let content = match tokio_fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_context(e, "read comment log", &path)),
        };

        let mut comments = Vec::new();
        for (line_no, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Comment>(line) {
                Ok(comment) => comments.push(comment),
                Err(e) => tracing::warn!(
                    "Skipping malformed comment at {}:{}: {}",
                    path.display(),
                    line_no + 1,
                    e
                ),
            }
        }

        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(comments)
    }
}

#[async_trait]
impl ProfileStore for FsBackend {
    async fn list(&self, ids: &[UserId]) -> Result<Vec<Profile>> {
        let names: BTreeMap<UserId, String> = read_yaml(&self.profiles_path()).await?;
        Ok(ids
            .iter()
            .filter_map(|id| {
                names.get(id).map(|full_name| Profile {
                    id: id.clone(),
                    full_name: full_name.clone(),
                })
            })
            .collect())
    }

    async fn upsert(&self, profile: Profile) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let path = self.profiles_path();
        let mut names: BTreeMap<UserId, String> = read_yaml(&path).await?;
        names.insert(profile.id, profile.full_name);
        write_yaml(&path, &names).await
    }
}

#[async_trait]
impl RoleStore for FsBackend {
    async fn get(&self, user: &UserId) -> Result<Option<Role>> {
        let roles: BTreeMap<UserId, Role> = read_yaml(&self.roles_path()).await?;
        Ok(roles.get(user).copied())
    }

    async fn set(&self, user: &UserId, role: Role) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let path = self.roles_path();
        let mut roles: BTreeMap<UserId, Role> = read_yaml(&path).await?;
        roles.insert(user.clone(), role);
        write_yaml(&path, &roles).await
    }

    async fn any_with_role(&self, role: Role) -> Result<bool> {
        let roles: BTreeMap<UserId, Role> = read_yaml(&self.roles_path()).await?;
        Ok(roles.values().any(|r| *r == role))
    }
}

#[async_trait]
impl AuthProvider for FsBackend {
    async fn current_session(&self) -> Result<Option<Session>> {
        read_yaml(&self.session_path()).await
    }

    async fn sign_in(&self, user: User) -> Result<Session> {
        let session = Session {
            user,
            signed_in_at: Timestamp::now(),
        };
        write_yaml(&self.session_path(), &Some(session.clone())).await?;
        Ok(session)
    }

    async fn sign_out(&self) -> Result<()> {
        let path = self.session_path();
        match tokio_fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_context(e, "remove session", &path)),
        }
    }
}
