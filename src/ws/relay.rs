use chrono::Utc;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

use super::router::GroupRouter;
use crate::models::{
    ClientEvent, CodeChangeMessage, InitSessionMessage, LanguageChangeMessage, PongMessage,
    ServerEvent,
};
use crate::session::{ConnId, SessionStore};

/// Routes client events to the session store and fans the results out.
///
/// Each event is handled to completion under `dispatch`, so a store write
/// and the broadcast that follows it are never interleaved with another
/// event. Peers therefore see updates in the same order the store applied
/// them.
pub struct Relay<R> {
    store: Arc<SessionStore>,
    router: Arc<R>,
    dispatch: Mutex<()>,
}

impl<R: GroupRouter> Relay<R> {
    pub fn new(store: Arc<SessionStore>, router: Arc<R>) -> Self {
        Self { store, router, dispatch: Mutex::new(()) }
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    pub fn router(&self) -> &Arc<R> {
        &self.router
    }

    /// Parse a raw text frame and handle it. Frames that are not a known
    /// event are dropped.
    pub fn handle_text(&self, conn: &ConnId, text: &str) {
        match serde_json::from_str::<ClientEvent>(text) {
            Ok(event) => self.handle_event(conn, event),
            Err(e) => warn!("Dropping malformed event from {}: {}", conn, e),
        }
    }

    pub fn handle_event(&self, conn: &ConnId, event: ClientEvent) {
        let _dispatch = self.dispatch.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        match event {
            ClientEvent::JoinSession(session_id) => self.join(conn, &session_id),
            ClientEvent::CodeChange(msg) => self.code_change(conn, msg),
            ClientEvent::LanguageChange(msg) => self.language_change(conn, msg),
            ClientEvent::Ping => self.ping(conn),
        }
    }

    fn join(&self, conn: &ConnId, session_id: &str) {
        let session = self.store.get_or_create(session_id);
        self.store.add_member(session_id, *conn);
        self.router.add_to_group(conn, session_id);

        let init = ServerEvent::InitSession(InitSessionMessage {
            code: session.code,
            language: session.language,
        });
        self.router.send_to(conn, &init);
        info!("Connection {} joined session {}", conn, session_id);
    }

    fn code_change(&self, conn: &ConnId, msg: CodeChangeMessage) {
        if !self.store.set_document(&msg.session_id, &msg.code) {
            return;
        }
        debug!("Code change in session {} from {} ({} bytes)", msg.session_id, conn, msg.code.len());
        self.router
            .broadcast_to_group(&msg.session_id, conn, &ServerEvent::CodeUpdate(msg.code));
    }

    fn language_change(&self, conn: &ConnId, msg: LanguageChangeMessage) {
        if !self.store.set_language(&msg.session_id, &msg.language) {
            return;
        }
        debug!("Language of session {} set to {} by {}", msg.session_id, msg.language, conn);
        self.router
            .broadcast_to_group(&msg.session_id, conn, &ServerEvent::LanguageUpdate(msg.language));
    }

    fn ping(&self, conn: &ConnId) {
        let pong = ServerEvent::Pong(PongMessage { date: Utc::now().to_rfc3339() });
        self.router.send_to(conn, &pong);
    }

    /// Remove a connection from every session it joined.
    pub fn disconnect(&self, conn: &ConnId) {
        let _dispatch = self.dispatch.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        for session_id in self.store.remove_member_everywhere(conn) {
            self.router.remove_from_group(conn, &session_id);
            debug!("Connection {} left session {}", conn, session_id);
        }
    }
}
