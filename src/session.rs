//! Process-wide session state.
//!
//! The session is initialized once at startup from the auth collaborator,
//! changed only through [`SessionState::sign_in`] and
//! [`SessionState::sign_out`], and read everywhere else. Interested parties
//! can subscribe to changes through a `watch` channel.

use std::sync::Arc;

use jiff::Timestamp;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::backend::AuthProvider;
use crate::error::Result;
use crate::types::User;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: User,
    pub signed_in_at: Timestamp,
}

pub struct SessionState {
    current: RwLock<Option<Session>>,
    changes: watch::Sender<Option<Session>>,
}

static GLOBAL_SESSION: Lazy<Arc<SessionState>> = Lazy::new(|| Arc::new(SessionState::new()));

/// The session shared by the whole process.
pub fn global() -> Arc<SessionState> {
    GLOBAL_SESSION.clone()
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    pub fn new() -> Self {
        let (changes, _) = watch::channel(None);
        Self {
            current: RwLock::new(None),
            changes,
        }
    }

    /// Load whatever session the auth collaborator already holds.
    pub async fn init(&self, auth: &dyn AuthProvider) -> Result<Option<Session>> {
        let session = auth.current_session().await?;
        self.publish(session.clone());
        Ok(session)
    }

    pub async fn sign_in(&self, auth: &dyn AuthProvider, user: User) -> Result<Session> {
        let session = auth.sign_in(user).await?;
        tracing::info!(user = %session.user.id, "signed in");
        self.publish(Some(session.clone()));
        Ok(session)
    }

    pub async fn sign_out(&self, auth: &dyn AuthProvider) -> Result<()> {
        auth.sign_out().await?;
        if let Some(previous) = self.current() {
            tracing::info!(user = %previous.user.id, "signed out");
        }
        self.publish(None);
        Ok(())
    }

    pub fn current(&self) -> Option<Session> {
        self.current.read().clone()
    }

    pub fn current_user(&self) -> Option<User> {
        self.current.read().as_ref().map(|s| s.user.clone())
    }

    /// Receive every subsequent session change.
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.changes.subscribe()
    }

    fn publish(&self, session: Option<Session>) {
        *self.current.write() = session.clone();
        self.changes.send_replace(session);
    }
}
