//! Root dispatcher - focus, command mode and request sequencing

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;

use crate::app::commands;
use crate::components::{AddressBar, Component, StatusBar, Viewport};
use crate::constants::COMMAND_MARKER;
use crate::messages::{Cmd, KeyBindings, Msg};
use crate::models::{FetchRequest, HeaderSet, Mode, Response, Status};

/// Top-level focusable areas, in switch order
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Region {
    #[default]
    Address,
    Viewport,
}

impl Region {
    pub const ALL: [Region; 2] = [Region::Address, Region::Viewport];

    pub fn index(&self) -> usize {
        match self {
            Region::Address => 0,
            Region::Viewport => 1,
        }
    }

    pub fn next(&self) -> Region {
        Region::ALL[(self.index() + 1) % Region::ALL.len()]
    }
}

pub struct Root {
    keys: KeyBindings,

    address: AddressBar,
    viewport: Viewport,
    status: StatusBar,

    active_region: Region,
    mode: Mode,
    command: String,

    /// Latest snapshot published by the viewport
    request_headers: HeaderSet,
    next_request_id: u64,
    pending_request: Option<u64>,
}

impl Default for Root {
    fn default() -> Self {
        Self::new(KeyBindings::default())
    }
}

impl Root {
    pub fn new(keys: KeyBindings) -> Self {
        let viewport = Viewport::new(&keys);
        Root {
            keys,
            address: AddressBar::new(),
            viewport,
            status: StatusBar::new(),
            active_region: Region::Address,
            mode: Mode::Normal,
            command: String::new(),
            request_headers: HeaderSet::new(),
            next_request_id: 1,
            pending_request: None,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = AddressBar::with_value(address);
        self
    }

    pub fn address(&self) -> &AddressBar {
        &self.address
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn status(&self) -> &StatusBar {
        &self.status
    }

    pub fn active_region(&self) -> Region {
        self.active_region
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn pending_request(&self) -> Option<u64> {
        self.pending_request
    }

    /// Single entry point for every message on the loop
    pub fn update(&mut self, msg: Msg) -> Cmd {
        match msg {
            Msg::Key(key) if self.mode == Mode::Command => self.handle_command_key(key),
            Msg::Key(key) if self.keys.region_switch.matches(&key) => {
                self.active_region = self.active_region.next();
                Cmd::None
            }
            Msg::Key(key) if self.keys.command_toggle.matches(&key) => {
                self.enter_command_mode();
                Cmd::None
            }
            Msg::Key(key) if self.keys.quit.matches(&key) => Cmd::Quit,
            Msg::Resize { width, height } => self.resize(width, height),
            Msg::FreeText(text) => match commands::dispatch(&text) {
                Some(msg) => self.viewport.update(&msg),
                None => {
                    tracing::debug!(command = %text, "Unrecognized command");
                    Cmd::None
                }
            },
            Msg::SelectTab(_) | Msg::HeaderItem(_) => self.viewport.update(&msg),
            Msg::RequestHeaders(headers) => {
                self.request_headers = headers;
                Cmd::None
            }
            Msg::SubmitRequest => self.submit_request(),
            Msg::Response(response) => self.finish_request(response),
            Msg::RequestFailed { id, reason } => self.fail_request(id, reason),
            Msg::Key(_)
            | Msg::Status(_)
            | Msg::ShortMessage(_)
            | Msg::Mode(_)
            | Msg::CommandInput(_)
            | Msg::SpinnerTick(_) => self.forward(msg),
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(self.address.height()),
                Constraint::Min(0),
                Constraint::Length(self.status.height()),
            ])
            .split(frame.area());

        self.address
            .render(frame, chunks[0], self.is_focused(Region::Address));
        self.viewport
            .render(frame, chunks[1], self.is_focused(Region::Viewport));
        self.status.render(frame, chunks[2], false);
    }

    fn is_focused(&self, region: Region) -> bool {
        self.mode == Mode::Normal && self.active_region == region
    }

    // ========================
    // Command mode
    // ========================

    fn enter_command_mode(&mut self) {
        tracing::debug!("Entering command mode");
        self.mode = Mode::Command;
        self.command.clear();
        self.status.update(&Msg::Mode(Mode::Command));
        self.mirror_command();
    }

    fn leave_command_mode(&mut self) {
        self.mode = Mode::Normal;
        self.command.clear();
        self.status.update(&Msg::Mode(Mode::Normal));
        self.status.update(&Msg::CommandInput(String::new()));
    }

    fn mirror_command(&mut self) {
        let entry = format!("{} {}", COMMAND_MARKER, self.command);
        self.status.update(&Msg::CommandInput(entry));
    }

    /// Keys while typing a command. Global bindings other than the toggle
    /// are suppressed here.
    fn handle_command_key(&mut self, key: KeyEvent) -> Cmd {
        if self.keys.command_toggle.matches(&key) {
            tracing::debug!("Command canceled");
            self.leave_command_mode();
            return Cmd::None;
        }

        match key.code {
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.command.push(c);
            }
            KeyCode::Backspace => {
                self.command.pop();
            }
            KeyCode::Enter => {
                let text = std::mem::take(&mut self.command);
                self.leave_command_mode();
                return Cmd::msg(Msg::FreeText(text));
            }
            _ => {}
        }

        self.mirror_command();
        Cmd::None
    }

    // ========================
    // Routing
    // ========================

    /// Unmatched messages go to the focused region and, for its ticks,
    /// always to the status line.
    fn forward(&mut self, msg: Msg) -> Cmd {
        let region_cmd = match self.active_region {
            Region::Address => self.address.update(&msg),
            Region::Viewport => self.viewport.update(&msg),
        };
        let status_cmd = self.status.update(&msg);
        Cmd::batch([region_cmd, status_cmd])
    }

    fn resize(&mut self, width: u16, height: u16) -> Cmd {
        let msg = Msg::Resize { width, height };
        self.status.update(&msg);
        self.address.update(&msg);

        let used = self.status.height() + self.address.height();
        self.viewport.update(&Msg::Resize {
            width,
            height: height.saturating_sub(used),
        })
    }

    // ========================
    // Request lifecycle
    // ========================

    fn submit_request(&mut self) -> Cmd {
        if !self.viewport.is_enabled() || self.pending_request.is_some() {
            tracing::debug!("Request already in flight, ignoring submit");
            return Cmd::None;
        }

        let address = match self.address.current_address() {
            Ok(address) => address,
            Err(e) => {
                tracing::warn!(error = %e, "Not sending request");
                return Cmd::None;
            }
        };

        let body = self.viewport.request_body();
        let body = (!body.trim().is_empty()).then(|| body.to_string());

        let id = self.next_request_id;
        self.next_request_id += 1;

        let status_cmd = self.status.update(&Msg::Status(Status::Processing));
        self.status.update(&Msg::ShortMessage(address.to_string()));
        self.viewport.set_enabled(false);
        self.pending_request = Some(id);

        tracing::info!(id, %address, headers = self.request_headers.len(), "Scheduling request");

        Cmd::batch([
            status_cmd,
            Cmd::Fetch {
                id,
                request: FetchRequest {
                    address,
                    headers: self.request_headers.clone(),
                    body,
                },
            },
        ])
    }

    /// Clears the outstanding request if `id` is it
    fn settle(&mut self, id: u64) -> bool {
        if self.pending_request != Some(id) {
            tracing::debug!(id, pending = ?self.pending_request, "Ignoring stale response");
            return false;
        }
        self.pending_request = None;
        true
    }

    fn finish_request(&mut self, response: Response) -> Cmd {
        if !self.settle(response.id) {
            return Cmd::None;
        }

        tracing::info!(id = response.id, status = response.status, time_ms = response.time_ms, "Request completed");

        self.viewport.set_response(&response);
        self.status.update(&Msg::ShortMessage(response.summary()));
        let status_cmd = self.status.update(&Msg::Status(Status::Idle));
        self.viewport.set_enabled(true);
        status_cmd
    }

    fn fail_request(&mut self, id: u64, reason: String) -> Cmd {
        if !self.settle(id) {
            return Cmd::None;
        }

        tracing::warn!(id, %reason, "Request failed");

        self.status.update(&Msg::ShortMessage(reason));
        let status_cmd = self.status.update(&Msg::Status(Status::Error));
        self.viewport.set_enabled(true);
        status_cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Address, HeaderItem, Tab};

    fn key(code: KeyCode) -> Msg {
        Msg::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(root: &mut Root, text: &str) {
        for c in text.chars() {
            assert_eq!(root.update(key(KeyCode::Char(c))), Cmd::None);
        }
    }

    /// Runs a command the way the event loop would, minus timers and network:
    /// posted messages are fed back, everything else is collected.
    fn settle_cmd(root: &mut Root, cmd: Cmd) -> Vec<Cmd> {
        let mut pending = cmd.flatten();
        let mut out = Vec::new();
        while !pending.is_empty() {
            match pending.remove(0) {
                Cmd::Msg(msg) => pending.extend(root.update(msg).flatten()),
                other => out.push(other),
            }
        }
        out
    }

    fn fetches(cmds: &[Cmd]) -> Vec<(u64, FetchRequest)> {
        cmds.iter()
            .filter_map(|c| match c {
                Cmd::Fetch { id, request } => Some((*id, request.clone())),
                _ => None,
            })
            .collect()
    }

    fn ticks(cmds: &[Cmd]) -> usize {
        cmds.iter().filter(|c| matches!(c, Cmd::Tick { .. })).count()
    }

    fn response(id: u64, body: &str) -> Response {
        Response {
            id,
            status: 200,
            reason: Some(String::from("OK")),
            headers: Vec::new(),
            body: body.to_string(),
            time_ms: 12,
        }
    }

    #[test]
    fn test_region_switch_wraps() {
        let mut root = Root::default();
        let back_tab = Msg::Key(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT));

        for expected in Region::ALL.iter().cycle().skip(1).take(Region::ALL.len() * 2) {
            root.update(back_tab.clone());
            assert_eq!(root.active_region(), *expected);
        }
        assert_eq!(root.active_region(), Region::Address);
    }

    #[test]
    fn test_command_mode_toggle_is_idempotent() {
        let mut root = Root::default();
        root.update(key(KeyCode::Esc));
        assert_eq!(root.mode(), Mode::Command);
        assert_eq!(root.status().command_entry(), "> ");
        assert_eq!(root.status().mode(), Mode::Command);

        type_text(&mut root, "abc");
        assert_eq!(root.command(), "abc");
        assert_eq!(root.status().command_entry(), "> abc");

        root.update(key(KeyCode::Esc));
        assert_eq!(root.mode(), Mode::Normal);
        assert_eq!(root.command(), "");
        assert_eq!(root.status().command_entry(), "");
        assert_eq!(root.status().mode(), Mode::Normal);

        // Nothing typed in command mode reached the address bar
        assert_eq!(root.address().value(), "");
    }

    #[test]
    fn test_backspace_on_empty_command_is_noop() {
        let mut root = Root::default();
        root.update(key(KeyCode::Esc));
        assert_eq!(root.update(key(KeyCode::Backspace)), Cmd::None);
        assert_eq!(root.command(), "");
        type_text(&mut root, "ab");
        root.update(key(KeyCode::Backspace));
        assert_eq!(root.command(), "a");
    }

    #[test]
    fn test_command_mode_suppresses_globals() {
        let mut root = Root::default();
        root.update(key(KeyCode::Esc));

        let quit = Msg::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(root.update(quit), Cmd::None);

        let back_tab = Msg::Key(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT));
        root.update(back_tab);
        assert_eq!(root.active_region(), Region::Address);
        assert_eq!(root.mode(), Mode::Command);
    }

    #[test]
    fn test_quit_in_normal_mode() {
        let mut root = Root::default();
        let quit = Msg::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(root.update(quit), Cmd::Quit);
    }

    #[test]
    fn test_submitted_command_selects_tab() {
        let mut root = Root::default();
        root.update(key(KeyCode::Esc));
        type_text(&mut root, ":e");

        let cmd = root.update(key(KeyCode::Enter));
        assert_eq!(cmd, Cmd::Msg(Msg::FreeText(String::from(":e"))));
        assert_eq!(root.mode(), Mode::Normal);
        assert_eq!(root.command(), "");

        settle_cmd(&mut root, cmd);
        assert_eq!(root.viewport().active_tab(), Tab::Response);

        // Unknown commands change nothing
        root.update(key(KeyCode::Esc));
        type_text(&mut root, ":zz");
        let cmd = root.update(key(KeyCode::Enter));
        settle_cmd(&mut root, cmd);
        assert_eq!(root.viewport().active_tab(), Tab::Response);
    }

    #[test]
    fn test_keys_follow_focus() {
        let mut root = Root::default();
        type_text(&mut root, "/a");
        assert_eq!(root.address().value(), "/a");

        root.update(Msg::Key(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT)));
        root.update(Msg::SelectTab(Tab::RequestBody));
        type_text(&mut root, "xy");
        assert_eq!(root.address().value(), "/a");
        assert_eq!(root.viewport().request_body(), "xy");
    }

    #[test]
    fn test_resize_splits_height() {
        let mut root = Root::default();
        root.update(Msg::Resize {
            width: 100,
            height: 30,
        });
        assert_eq!(root.status().width(), 100);
        assert_eq!(root.viewport().height(), 26);
    }

    #[test]
    fn test_request_sequencing() {
        let mut root = Root::default().with_address("post /shops");

        let cmd = root.update(Msg::SubmitRequest);
        let leaves = cmd.flatten();

        // Status first (its spinner tick), then the lifecycle
        assert!(matches!(leaves[0], Cmd::Tick { .. }));
        assert!(matches!(leaves[1], Cmd::Fetch { .. }));
        assert_eq!(leaves.len(), 2);

        let scheduled = fetches(&leaves);
        assert_eq!(scheduled.len(), 1);
        let (id, request) = &scheduled[0];
        assert_eq!(
            request.address,
            Address {
                method: String::from("POST"),
                url: String::from("/shops"),
            }
        );
        assert_eq!(root.status().status(), Status::Processing);
        assert!(!root.viewport().is_enabled());

        // A second submit while outstanding schedules nothing
        assert_eq!(root.update(Msg::SubmitRequest), Cmd::None);

        let cmd = root.update(Msg::Response(response(*id, "[]")));
        assert_eq!(cmd, Cmd::None);
        assert_eq!(root.status().status(), Status::Idle);
        assert!(root.viewport().is_enabled());
        assert_eq!(root.pending_request(), None);
    }

    #[test]
    fn test_empty_address_is_not_submitted() {
        let mut root = Root::default();
        assert_eq!(root.update(Msg::SubmitRequest), Cmd::None);
        assert_eq!(root.status().status(), Status::Idle);
        assert!(root.viewport().is_enabled());
    }

    #[test]
    fn test_spinner_stops_when_request_resolves() {
        let mut root = Root::default().with_address("/slow");
        let leaves = root.update(Msg::SubmitRequest).flatten();
        let tick = leaves
            .iter()
            .find_map(|c| match c {
                Cmd::Tick { msg, .. } => Some(msg.clone()),
                _ => None,
            })
            .unwrap();
        let (id, _) = fetches(&leaves)[0].clone();

        // Ticks keep coming back while processing, whatever has focus
        root.update(Msg::Key(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT)));
        assert_eq!(ticks(&root.update(tick.clone()).flatten()), 1);

        root.update(Msg::Response(response(id, "ok")));
        assert_eq!(ticks(&root.update(tick).flatten()), 0);
    }

    #[test]
    fn test_failure_sets_error_and_reenables() {
        let mut root = Root::default().with_address("/users");
        let (id, _) = fetches(&root.update(Msg::SubmitRequest).flatten())[0].clone();

        root.update(Msg::RequestFailed {
            id,
            reason: String::from("Connection failed: refused"),
        });

        assert_eq!(root.status().status(), Status::Error);
        assert_eq!(root.status().message(), "Connection failed: refused");
        assert!(root.viewport().is_enabled());

        // The next submit is accepted again
        assert_eq!(fetches(&root.update(Msg::SubmitRequest).flatten()).len(), 1);
    }

    #[test]
    fn test_stale_response_is_ignored() {
        let mut root = Root::default().with_address("/users");
        let (id, _) = fetches(&root.update(Msg::SubmitRequest).flatten())[0].clone();

        root.update(Msg::Response(response(id + 7, "stale")));
        assert_eq!(root.status().status(), Status::Processing);
        assert!(!root.viewport().is_enabled());
        assert_eq!(root.viewport().response_body(), "");
    }

    #[test]
    fn test_headers_snapshot_travels_with_request() {
        let mut root = Root::default().with_address("/users");
        let cmd = root.update(Msg::HeaderItem(HeaderItem::new("X-Token", "abc")));
        settle_cmd(&mut root, cmd);

        let scheduled = fetches(&root.update(Msg::SubmitRequest).flatten());
        assert_eq!(scheduled[0].1.headers.get("x-token"), Some("abc"));
        assert_eq!(scheduled[0].1.body, None);
    }

    #[test]
    fn test_capitals_typed_into_viewport_editors() {
        let mut root = Root::default();
        root.update(Msg::Key(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT)));
        root.update(Msg::SelectTab(Tab::Headers));
        for c in "Authorization: Bearer x".chars() {
            root.update(Msg::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::SHIFT)));
        }
        let cmd = root.update(key(KeyCode::Enter));
        settle_cmd(&mut root, cmd);
        assert_eq!(root.viewport().active_tab(), Tab::Headers);
        assert_eq!(root.viewport().headers().get("authorization"), Some("Bearer x"));

        root.update(Msg::SelectTab(Tab::RequestBody));
        type_text(&mut root, r#"{"Foo":1}"#);
        assert_eq!(root.viewport().active_tab(), Tab::RequestBody);
        assert_eq!(root.viewport().request_body(), r#"{"Foo":1}"#);

        // The default tab keys still move between tabs
        root.update(Msg::Key(KeyEvent::new(KeyCode::Right, KeyModifiers::ALT)));
        assert_eq!(root.viewport().active_tab(), Tab::Response);
    }

    #[test]
    fn test_body_travels_with_request() {
        let mut root = Root::default().with_address("POST /shops");
        root.update(Msg::Key(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT)));
        root.update(Msg::SelectTab(Tab::RequestBody));
        type_text(&mut root, "{}");

        let scheduled = fetches(&root.update(Msg::SubmitRequest).flatten());
        assert_eq!(scheduled[0].1.body.as_deref(), Some("{}"));
    }

    #[test]
    fn test_end_to_end_get_users() {
        let mut root = Root::default();
        type_text(&mut root, "GET /users");

        let cmd = root.update(key(KeyCode::Enter));
        let leaves = settle_cmd(&mut root, cmd);

        assert!(!root.viewport().is_enabled());
        assert_eq!(root.status().status(), Status::Processing);
        let scheduled = fetches(&leaves);
        assert_eq!(scheduled.len(), 1);
        let (id, request) = scheduled[0].clone();
        assert_eq!(request.address.method, "GET");
        assert_eq!(request.address.url, "/users");

        // The transport comes back with a body
        let cmd = root.update(Msg::Response(response(id, r#"{"id":1}"#)));
        settle_cmd(&mut root, cmd);

        assert_eq!(root.viewport().response_body(), r#"{"id":1}"#);
        assert_eq!(root.status().status(), Status::Idle);
        assert_eq!(root.status().message(), "200 OK · 12 ms");
        assert!(root.viewport().is_enabled());
    }
}
