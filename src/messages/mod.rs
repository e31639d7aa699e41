//! Message types for the event loop.
//!
//! Every input, timer and network result becomes a `Msg`; every component
//! update answers with a `Cmd` describing deferred work for the loop to run.

pub mod cmd;
pub mod msg;
pub mod network;
pub mod ui_events;

pub use cmd::Cmd;
pub use msg::Msg;
pub use network::{NetworkCommand, NetworkResponse};
pub use ui_events::{KeyBinding, KeyBindings};
