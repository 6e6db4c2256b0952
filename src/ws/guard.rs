use std::sync::Arc;
use tracing::info;

use super::{ConnectionRegistry, Relay};
use crate::session::ConnId;

/// Runs the disconnect cleanup for a connection when dropped, whichever
/// way the connection task ends.
pub struct ConnectionGuard {
    relay: Arc<Relay<ConnectionRegistry>>,
    conn: ConnId,
}

impl ConnectionGuard {
    pub fn new(relay: Arc<Relay<ConnectionRegistry>>, conn: ConnId) -> Self {
        Self { relay, conn }
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.relay.disconnect(&self.conn);
        self.relay.router().unregister(&self.conn);
        info!("Connection {} cleaned up", self.conn);
    }
}
