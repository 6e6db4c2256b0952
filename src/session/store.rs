use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};
use uuid::Uuid;

/// Identifier of a single client connection.
pub type ConnId = Uuid;

/// Code a freshly created session starts with.
pub const DEFAULT_CODE: &str = "// Start coding here...";

/// Language a freshly created session starts with.
pub const DEFAULT_LANGUAGE: &str = "javascript";

#[derive(Clone, Debug)]
pub struct Session {
    pub id: String,
    pub code: String,
    pub language: String,
    pub members: HashSet<ConnId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    fn new(id: &str) -> Self {
        let now = Utc::now();
        Self {
            id: id.to_string(),
            code: DEFAULT_CODE.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            members: HashSet::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// In-memory state of every session, keyed by session id.
///
/// Sessions are only ever created by [`SessionStore::get_or_create`] and are
/// kept for the lifetime of the store. Writes replace the previous value
/// outright, so the last write applied wins.
#[derive(Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Session>> {
        self.sessions.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Return the session for `id`, creating it with defaults if unseen.
    pub fn get_or_create(&self, id: &str) -> Session {
        let mut sessions = self.lock();
        sessions
            .entry(id.to_string())
            .or_insert_with(|| {
                info!("Creating session {}", id);
                Session::new(id)
            })
            .clone()
    }

    /// Overwrite the code of an existing session. Returns false, and does
    /// nothing, when the session does not exist.
    pub fn set_document(&self, id: &str, code: &str) -> bool {
        self.update(id, |session| session.code = code.to_string())
    }

    /// Overwrite the language of an existing session. Same contract as
    /// [`SessionStore::set_document`].
    pub fn set_language(&self, id: &str, language: &str) -> bool {
        self.update(id, |session| session.language = language.to_string())
    }

    fn update(&self, id: &str, apply: impl FnOnce(&mut Session)) -> bool {
        match self.lock().get_mut(id) {
            Some(session) => {
                apply(session);
                session.updated_at = Utc::now();
                true
            }
            None => {
                debug!("Ignoring update for unknown session {}", id);
                false
            }
        }
    }

    pub fn add_member(&self, id: &str, conn: ConnId) {
        if let Some(session) = self.lock().get_mut(id) {
            session.members.insert(conn);
        }
    }

    pub fn remove_member(&self, id: &str, conn: &ConnId) {
        if let Some(session) = self.lock().get_mut(id) {
            session.members.remove(conn);
        }
    }

    /// Remove `conn` from every session it joined and return those session ids.
    pub fn remove_member_everywhere(&self, conn: &ConnId) -> Vec<String> {
        self.lock()
            .values_mut()
            .filter_map(|session| session.members.remove(conn).then(|| session.id.clone()))
            .collect()
    }

    /// Read a session without creating it.
    pub fn get(&self, id: &str) -> Option<Session> {
        self.lock().get(id).cloned()
    }

    pub fn list(&self) -> Vec<Session> {
        let mut sessions: Vec<Session> = self.lock().values().cloned().collect();
        sessions.sort_by(|a, b| a.id.cmp(&b.id));
        sessions
    }

    pub fn session_count(&self) -> usize {
        self.lock().len()
    }

    /// Total memberships across all sessions.
    pub fn member_count(&self) -> usize {
        self.lock().values().map(|s| s.members.len()).sum()
    }
}
