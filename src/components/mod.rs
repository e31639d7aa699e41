//! Visual regions. Each owns its state, reacts to messages and draws itself.
//!
//! Components never share state: anything one region needs from another
//! arrives as a `Msg`, and any deferred work leaves as a `Cmd`.

pub mod address;
pub mod status;
pub mod tabs;
pub mod viewport;

use ratatui::{layout::Rect, Frame};

use crate::messages::{Cmd, Msg};

pub use address::AddressBar;
pub use status::StatusBar;
pub use viewport::Viewport;

pub trait Component {
    /// React to a message, returning deferred work for the event loop
    fn update(&mut self, msg: &Msg) -> Cmd;

    /// Draw into `area`. `focused` is true for the region receiving keys.
    fn render(&self, frame: &mut Frame, area: Rect, focused: bool);
}
