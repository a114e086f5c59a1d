//! Per-user dispatch sessions

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{Mutex, RwLock};

use crate::services::NavigationStack;
use crate::types::{FlowKind, SessionState, SurfaceKind, UserId};

/// Draft of an input flow, alive between "form opened" and "confirmed".
///
/// Remembers the item that opened the form so its permission can be checked
/// again when the confirm arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAction {
    pub flow: FlowKind,
    pub menu_id: String,
    pub item_id: String,
    pub permission: Option<String>,
}

/// State the coordinator keeps for one user.
#[derive(Debug)]
pub struct Session {
    pub stack: NavigationStack,
    pub state: SessionState,
    pub surface: SurfaceKind,
    /// Tokens behind the buttons of the last rendered menu, by index
    pub buttons: Vec<String>,
    pub pending: Option<PendingAction>,
}

impl Session {
    #[must_use]
    pub fn new(surface: SurfaceKind) -> Self {
        Self {
            stack: NavigationStack::new(),
            state: SessionState::Closed,
            surface,
            buttons: Vec::new(),
            pending: None,
        }
    }

    /// Drop any open view and pending flow. History is kept until the next open.
    pub fn close(&mut self) {
        self.state = SessionState::Closed;
        self.pending = None;
        self.buttons.clear();
    }

    fn snapshot(&self, user: UserId) -> SessionSnapshot {
        SessionSnapshot {
            user,
            state: self.state.clone(),
            surface: self.surface,
            stack: self.stack.entries().to_vec(),
            pending_flow: self.pending.as_ref().map(|p| p.flow),
        }
    }
}

/// Read-only view of a session for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub user: UserId,
    pub state: SessionState,
    pub surface: SurfaceKind,
    pub stack: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_flow: Option<FlowKind>,
}

/// All live sessions, keyed by user.
///
/// The outer lock is only held to find or insert an entry; work on a session
/// happens under its own mutex, so different users never contend.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<UserId, Arc<Mutex<Session>>>>,
}

impl SessionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Session of a user, created on first use
    pub async fn entry(&self, user: UserId, surface: SurfaceKind) -> Arc<Mutex<Session>> {
        if let Some(session) = self.sessions.read().await.get(&user) {
            return Arc::clone(session);
        }
        let mut sessions = self.sessions.write().await;
        Arc::clone(
            sessions
                .entry(user)
                .or_insert_with(|| Arc::new(Mutex::new(Session::new(surface)))),
        )
    }

    pub async fn get(&self, user: &UserId) -> Option<Arc<Mutex<Session>>> {
        self.sessions.read().await.get(user).cloned()
    }

    /// Drop a user's session, returning whether one existed
    pub async fn remove(&self, user: &UserId) -> bool {
        self.sessions.write().await.remove(user).is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Snapshot of every session, ordered by user id
    pub async fn snapshot(&self) -> Vec<SessionSnapshot> {
        let entries: Vec<_> = self
            .sessions
            .read()
            .await
            .iter()
            .map(|(user, session)| (*user, Arc::clone(session)))
            .collect();

        let mut snapshots = Vec::with_capacity(entries.len());
        for (user, session) in entries {
            snapshots.push(session.lock().await.snapshot(user));
        }
        snapshots.sort_by_key(|s| s.user);
        snapshots
    }
}
