pub mod health;
pub mod diagnostics;
pub mod sessions;
pub mod fallback;

pub use health::*;
pub use diagnostics::*;
pub use sessions::*;
pub use fallback::*;
