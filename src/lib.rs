//! # gurl
//!
//! A terminal HTTP client. Type `METHOD URL` into the address bar, press
//! Enter, and inspect the response body and headers in the viewport.
//!
//! ## Features
//! - Address bar with method coloring
//! - Request headers and body editors
//! - Pretty-printed, highlighted JSON responses
//! - Command mode (`:q :w :e :r`) to jump between tabs
//! - Configurable key bindings and base URL
//!
//! ## Architecture
//! Elm-style components driven by actors over channels:
//! - App actor: one event loop feeding messages to the Root dispatcher
//! - Components: Address, Viewport and Status regions
//! - Network actor: runs Request Lifecycles on the Tokio runtime

pub mod app;
pub mod components;
pub mod config;
pub mod constants;
pub mod logging;
pub mod messages;
pub mod models;
pub mod network;
pub mod ui;

// Re-export commonly used types
pub use app::{AppActor, Region, Root};
pub use config::Config;
pub use messages::{Cmd, KeyBinding, KeyBindings, Msg, NetworkCommand, NetworkResponse};
pub use models::{Address, HeaderItem, HeaderSet, Mode, Response, Status, Tab};
pub use network::{NetworkActor, ReqwestTransport, Transport};
