pub mod guard;
pub mod handler;
pub mod relay;
pub mod router;

pub use handler::websocket_handler;
pub use relay::Relay;
pub use router::{outbox, ConnectionRegistry, GroupRouter, Outbox, OUTBOX_CAPACITY};
