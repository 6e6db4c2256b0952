use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::session::SessionStore;
use crate::ws::{ConnectionRegistry, Relay};

/// Shared state handed to every route.
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<Relay<ConnectionRegistry>>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(store: Arc<SessionStore>) -> Self {
        let registry = Arc::new(ConnectionRegistry::new());
        Self {
            relay: Arc::new(Relay::new(store, registry)),
            started_at: Utc::now(),
        }
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        self.relay.store()
    }
}
