//! In-memory session store
//!
//! Sessions live for the lifetime of the process; nothing is persisted.
//! Each session is independently owned and there is no cross-session shared
//! state.

use std::collections::HashMap;

use tracing::{debug, warn};

use super::Session;

/// Holds every live session, keyed by session id.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<String, Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save or update a session.
    pub fn save(&mut self, session: Session) {
        debug!(id = %session.id, "session saved");
        self.sessions.insert(session.id.clone(), session);
    }

    /// Retrieve a session by id.
    pub fn get(&self, id: &str) -> Option<&Session> {
        let session = self.sessions.get(id);
        if session.is_none() {
            warn!(%id, "session not found");
        }
        session
    }

    /// Retrieve a session for mutation.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Session> {
        self.sessions.get_mut(id)
    }

    /// Remove a session. Returns it if it existed.
    pub fn remove(&mut self, id: &str) -> Option<Session> {
        let removed = self.sessions.remove(id);
        if removed.is_some() {
            debug!(%id, "session removed");
        }
        removed
    }

    /// All live session ids.
    pub fn ids(&self) -> Vec<&str> {
        self.sessions.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
