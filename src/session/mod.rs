pub mod store;

pub use store::{ConnId, Session, SessionStore, DEFAULT_CODE, DEFAULT_LANGUAGE};
