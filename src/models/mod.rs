pub mod health;
pub mod diagnostics;
pub mod session;
pub mod error;
pub mod messages;

pub use health::*;
pub use diagnostics::*;
pub use session::*;
pub use error::*;
pub use messages::*;
