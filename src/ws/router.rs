use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, error, warn};

use crate::models::ServerEvent;
use crate::session::ConnId;

/// Frames a single connection may have queued before new ones are dropped.
pub const OUTBOX_CAPACITY: usize = 256;

/// Queue of serialized frames waiting to be written to one connection.
pub type Outbox = mpsc::Sender<String>;

/// Create an outbox and the receiving end drained by the connection's writer.
pub fn outbox() -> (Outbox, mpsc::Receiver<String>) {
    mpsc::channel(OUTBOX_CAPACITY)
}

/// Addressing for connections, individually or by session group.
pub trait GroupRouter: Send + Sync {
    fn add_to_group(&self, conn: &ConnId, group: &str);
    fn remove_from_group(&self, conn: &ConnId, group: &str);
    /// Deliver `event` to every member of `group` except `excluding`.
    fn broadcast_to_group(&self, group: &str, excluding: &ConnId, event: &ServerEvent);
    fn send_to(&self, conn: &ConnId, event: &ServerEvent);
}

#[derive(Default)]
struct RegistryInner {
    outboxes: HashMap<ConnId, Outbox>,
    groups: HashMap<String, HashSet<ConnId>>,
}

/// [`GroupRouter`] over per-connection mpsc outboxes.
///
/// Sending never waits on the peer: frames are queued and the connection's
/// writer task drains them in order. A connection whose queue is full misses
/// the frame.
#[derive(Default)]
pub struct ConnectionRegistry {
    inner: Mutex<RegistryInner>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, RegistryInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn register(&self, conn: ConnId, outbox: Outbox) {
        self.lock().outboxes.insert(conn, outbox);
    }

    /// Forget a connection and drop it from every group.
    pub fn unregister(&self, conn: &ConnId) {
        let mut inner = self.lock();
        inner.outboxes.remove(conn);
        inner.groups.retain(|_, members| {
            members.remove(conn);
            !members.is_empty()
        });
    }

    pub fn connection_count(&self) -> usize {
        self.lock().outboxes.len()
    }

    pub fn group_size(&self, group: &str) -> usize {
        self.lock().groups.get(group).map_or(0, HashSet::len)
    }
}

fn deliver(outbox: &Outbox, conn: &ConnId, text: String) {
    match outbox.try_send(text) {
        Ok(()) => {}
        Err(TrySendError::Full(_)) => warn!("Outbox of connection {} is full, dropping frame", conn),
        Err(TrySendError::Closed(_)) => debug!("Connection {} is gone", conn),
    }
}

fn encode(event: &ServerEvent) -> Option<String> {
    match serde_json::to_string(event) {
        Ok(text) => Some(text),
        Err(e) => {
            error!("Failed to serialize outbound event: {}", e);
            None
        }
    }
}

impl GroupRouter for ConnectionRegistry {
    fn add_to_group(&self, conn: &ConnId, group: &str) {
        self.lock().groups.entry(group.to_string()).or_default().insert(*conn);
    }

    fn remove_from_group(&self, conn: &ConnId, group: &str) {
        let mut inner = self.lock();
        if let Some(members) = inner.groups.get_mut(group) {
            members.remove(conn);
            if members.is_empty() {
                inner.groups.remove(group);
            }
        }
    }

    fn broadcast_to_group(&self, group: &str, excluding: &ConnId, event: &ServerEvent) {
        let Some(text) = encode(event) else { return };
        let inner = self.lock();
        let Some(members) = inner.groups.get(group) else { return };
        for member in members.iter().filter(|m| *m != excluding) {
            if let Some(outbox) = inner.outboxes.get(member) {
                deliver(outbox, member, text.clone());
            }
        }
    }

    fn send_to(&self, conn: &ConnId, event: &ServerEvent) {
        let Some(text) = encode(event) else { return };
        match self.lock().outboxes.get(conn) {
            Some(outbox) => deliver(outbox, conn, text),
            None => debug!("No outbox registered for connection {}", conn),
        }
    }
}
