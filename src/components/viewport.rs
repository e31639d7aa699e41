//! Viewport - tabbed request/response panes

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{prelude::*, widgets::*};

use crate::components::tabs::{HeadersPane, RequestBodyPane, ResponseHeadersPane, ResponsePane};
use crate::components::Component;
use crate::constants::VIEWPORT_CHROME;
use crate::messages::{Cmd, KeyBinding, KeyBindings, Msg};
use crate::models::{HeaderSet, Response, Tab};
use crate::ui;

#[derive(Debug)]
pub struct Viewport {
    active_tab: Tab,
    enabled: bool,
    height: u16,
    next_tab: KeyBinding,
    previous_tab: KeyBinding,

    /// Authoritative request headers; others only ever see snapshots
    headers: HeaderSet,

    headers_pane: HeadersPane,
    request_body_pane: RequestBodyPane,
    response_pane: ResponsePane,
    response_headers_pane: ResponseHeadersPane,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(&KeyBindings::default())
    }
}

impl Viewport {
    pub fn new(keys: &KeyBindings) -> Self {
        Viewport {
            active_tab: Tab::Headers,
            enabled: true,
            height: 0,
            next_tab: keys.next_tab,
            previous_tab: keys.previous_tab,
            headers: HeaderSet::new(),
            headers_pane: HeadersPane::default(),
            request_body_pane: RequestBodyPane::default(),
            response_pane: ResponsePane::default(),
            response_headers_pane: ResponseHeadersPane::default(),
        }
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn set_response_body(&mut self, body: impl Into<String>) {
        self.response_pane.set_body(body);
    }

    pub fn set_response(&mut self, response: &Response) {
        self.set_response_body(response.body.clone());

        let mut headers = Vec::with_capacity(response.headers.len() + 1);
        let status_line = match &response.reason {
            Some(reason) => format!("{} {}", response.status, reason),
            None => response.status.to_string(),
        };
        headers.push((String::from("Status"), status_line));
        headers.extend(response.headers.iter().cloned());
        self.response_headers_pane.set_headers(headers);
    }

    pub fn headers(&self) -> &HeaderSet {
        &self.headers
    }

    pub fn request_body(&self) -> &str {
        self.request_body_pane.body()
    }

    pub fn response_body(&self) -> &str {
        self.response_pane.body()
    }

    pub fn response_headers(&self) -> &[(String, String)] {
        self.response_headers_pane.headers()
    }

    /// Headers and body only accept edits while no request is outstanding
    fn accepts_input(&self, tab: Tab) -> bool {
        self.enabled || matches!(tab, Tab::Response | Tab::ResponseHeaders)
    }

    /// Bare printable bindings yield to panes that take text
    fn is_tab_key(&self, binding: &KeyBinding, key: &KeyEvent) -> bool {
        if !binding.matches(key) {
            return false;
        }
        let printable = matches!(key.code, KeyCode::Char(_))
            && !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
        let takes_text = self.enabled && matches!(self.active_tab, Tab::Headers | Tab::RequestBody);
        !(printable && takes_text)
    }

    fn active_pane(&mut self) -> &mut dyn Component {
        match self.active_tab {
            Tab::Headers => &mut self.headers_pane,
            Tab::RequestBody => &mut self.request_body_pane,
            Tab::Response => &mut self.response_pane,
            Tab::ResponseHeaders => &mut self.response_headers_pane,
        }
    }

    fn broadcast(&mut self, msg: &Msg) -> Cmd {
        Cmd::batch([
            self.headers_pane.update(msg),
            self.request_body_pane.update(msg),
            self.response_pane.update(msg),
            self.response_headers_pane.update(msg),
        ])
    }
}

impl Component for Viewport {
    fn update(&mut self, msg: &Msg) -> Cmd {
        match msg {
            Msg::Key(key) if self.is_tab_key(&self.next_tab, key) => {
                self.active_tab = self.active_tab.next();
                Cmd::None
            }
            Msg::Key(key) if self.is_tab_key(&self.previous_tab, key) => {
                self.active_tab = self.active_tab.prev();
                Cmd::None
            }
            Msg::Key(_) => {
                if !self.accepts_input(self.active_tab) {
                    tracing::debug!(tab = ?self.active_tab, "Viewport disabled, dropping key");
                    return Cmd::None;
                }
                self.active_pane().update(msg)
            }
            Msg::SelectTab(tab) => {
                self.active_tab = *tab;
                Cmd::None
            }
            Msg::Resize { width, height } => {
                self.height = *height;
                self.broadcast(&Msg::Resize {
                    width: *width,
                    height: height.saturating_sub(VIEWPORT_CHROME),
                })
            }
            Msg::HeaderItem(item) => {
                if !self.enabled {
                    tracing::debug!(key = %item.key, "Viewport disabled, dropping header");
                    return Cmd::None;
                }
                self.headers.set(item.clone());
                self.headers_pane.set_headers(self.headers.clone());
                Cmd::msg(Msg::RequestHeaders(self.headers.clone()))
            }
            Msg::SubmitRequest
            | Msg::FreeText(_)
            | Msg::Response(_)
            | Msg::RequestFailed { .. }
            | Msg::Status(_)
            | Msg::ShortMessage(_)
            | Msg::Mode(_)
            | Msg::CommandInput(_)
            | Msg::SpinnerTick(_)
            | Msg::RequestHeaders(_) => self.broadcast(msg),
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(area);

        frame.render_widget(ui::render_tabs(self.active_tab, self.enabled), chunks[0]);

        let busy = if self.enabled { "" } else { " [...]" };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(ui::border_style(focused))
            .title(format!(" {}{} ", self.active_tab.title(), busy));
        let inner = block.inner(chunks[1]);
        frame.render_widget(block, chunks[1]);

        let pane_focused = focused && self.accepts_input(self.active_tab);
        match self.active_tab {
            Tab::Headers => self.headers_pane.render(frame, inner, pane_focused),
            Tab::RequestBody => self.request_body_pane.render(frame, inner, pane_focused),
            Tab::Response => self.response_pane.render(frame, inner, pane_focused),
            Tab::ResponseHeaders => self.response_headers_pane.render(frame, inner, pane_focused),
        }
    }
}
