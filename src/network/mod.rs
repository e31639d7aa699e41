//! Network layer - Request Lifecycle execution
//!
//! The Network actor receives fetch commands, runs them through a
//! `Transport` and sends back either a response or a failure.

pub mod actor;
pub mod client;

pub use actor::NetworkActor;
pub use client::{FetchError, Fetched, ReqwestTransport, Transport};
