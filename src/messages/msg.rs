//! Application messages - the single vocabulary shared by all components

use crossterm::event::KeyEvent;

use crate::models::{HeaderItem, HeaderSet, Mode, Response, Status, Tab};

/// Every message that can flow through the event loop
#[derive(Clone, Debug, PartialEq)]
pub enum Msg {
    // Terminal input
    Key(KeyEvent),
    Resize { width: u16, height: u16 },

    // Address bar asked for its content to be sent
    SubmitRequest,

    // Command mode
    FreeText(String),
    SelectTab(Tab),

    // Request lifecycle
    Response(Response),
    RequestFailed { id: u64, reason: String },

    // Status line
    Status(Status),
    ShortMessage(String),
    Mode(Mode),
    CommandInput(String),
    SpinnerTick(u64),

    // Headers tab
    HeaderItem(HeaderItem),
    RequestHeaders(HeaderSet),
}
