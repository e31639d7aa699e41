//! The four viewport panes. Only the active one is drawn, but all of them
//! are kept sized so switching tabs never reflows.

pub mod headers;
pub mod request_body;
pub mod response;
pub mod response_headers;

pub use headers::HeadersPane;
pub use request_body::RequestBodyPane;
pub use response::ResponsePane;
pub use response_headers::ResponseHeadersPane;

use crossterm::event::KeyCode;

/// Vertical scroll offset clamped to the content that overflows the pane
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScrollState {
    offset: u16,
    content: u16,
    height: u16,
}

impl ScrollState {
    pub fn offset(&self) -> u16 {
        self.offset
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn max_offset(&self) -> u16 {
        self.content.saturating_sub(self.height)
    }

    pub fn set_height(&mut self, height: u16) {
        self.height = height;
        self.clamp();
    }

    pub fn set_content(&mut self, lines: usize) {
        self.content = u16::try_from(lines).unwrap_or(u16::MAX);
        self.clamp();
    }

    pub fn reset(&mut self) {
        self.offset = 0;
    }

    pub fn to_end(&mut self) {
        self.offset = self.max_offset();
    }

    /// Applies a scroll key, returning whether it was one
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        let page = self.height.max(1);
        match code {
            KeyCode::Up => self.offset = self.offset.saturating_sub(1),
            KeyCode::Down => self.offset = self.offset.saturating_add(1),
            KeyCode::PageUp => self.offset = self.offset.saturating_sub(page),
            KeyCode::PageDown => self.offset = self.offset.saturating_add(page),
            KeyCode::Home => self.offset = 0,
            KeyCode::End => self.offset = self.max_offset(),
            _ => return false,
        }
        self.clamp();
        true
    }

    fn clamp(&mut self) {
        self.offset = self.offset.min(self.max_offset());
    }
}
