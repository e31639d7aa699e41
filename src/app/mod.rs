//! App layer - the root dispatcher and the event loop that drives it
//!
//! The Root receives every message, decides how it is routed and returns
//! deferred commands; the App actor runs those commands and feeds results
//! back in as new messages.

pub mod actor;
pub mod commands;
pub mod root;

pub use actor::AppActor;
pub use root::{Region, Root};
