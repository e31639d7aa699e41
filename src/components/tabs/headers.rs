//! Headers pane - `Key: Value` input plus the current header set

use crossterm::event::{Event, KeyCode};
use ratatui::{prelude::*, widgets::*};
use tui_input::{backend::crossterm::EventHandler, Input};

use crate::components::tabs::ScrollState;
use crate::components::Component;
use crate::messages::{Cmd, Msg};
use crate::models::{HeaderItem, HeaderSet};
use crate::ui;

const PROMPT: &str = "+ ";

#[derive(Debug, Default)]
pub struct HeadersPane {
    input: Input,
    headers: HeaderSet,
    /// Scrolls the list below the input line
    scroll: ScrollState,
}

impl HeadersPane {
    pub fn input(&self) -> &str {
        self.input.value()
    }

    /// Replaces the displayed header set with the owner's latest snapshot
    pub fn set_headers(&mut self, headers: HeaderSet) {
        self.headers = headers;
        self.scroll.set_content(self.headers.len());
        self.scroll.to_end();
    }

    pub fn scroll(&self) -> ScrollState {
        self.scroll
    }

    pub fn headers(&self) -> &HeaderSet {
        &self.headers
    }
}

impl Component for HeadersPane {
    fn update(&mut self, msg: &Msg) -> Cmd {
        match msg {
            Msg::Resize { height, .. } => {
                self.scroll.set_height(height.saturating_sub(1));
                Cmd::None
            }
            // Home/End stay with the input line
            Msg::Key(key)
                if matches!(
                    key.code,
                    KeyCode::Up | KeyCode::Down | KeyCode::PageUp | KeyCode::PageDown
                ) =>
            {
                self.scroll.handle_key(key.code);
                Cmd::None
            }
            Msg::Key(key) if key.code == KeyCode::Enter => {
                match HeaderItem::parse(self.input.value()) {
                    Some(item) => {
                        self.input.reset();
                        Cmd::msg(Msg::HeaderItem(item))
                    }
                    None => {
                        tracing::debug!(input = self.input.value(), "Ignoring malformed header");
                        Cmd::None
                    }
                }
            }
            Msg::Key(key) => {
                self.input.handle_event(&Event::Key(*key));
                Cmd::None
            }
            _ => Cmd::None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(area);

        let input = if self.input.value().is_empty() {
            Line::from(vec![
                Span::raw(PROMPT),
                Span::styled("Key: Value, Enter to add", ui::muted()),
            ])
        } else {
            Line::from(vec![Span::raw(PROMPT), Span::raw(self.input.value().to_string())])
        };
        frame.render_widget(Paragraph::new(input), chunks[0]);

        let lines: Vec<Line> = self
            .headers
            .iter()
            .map(|h| {
                Line::from(vec![
                    Span::styled(h.key.clone(), Style::default().fg(Color::Cyan)),
                    Span::raw(": "),
                    Span::raw(h.value.clone()),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines).scroll((self.scroll.offset(), 0)), chunks[1]);

        if focused {
            let x = area.x + PROMPT.len() as u16 + self.input.visual_cursor() as u16;
            frame.set_cursor_position(Position::new(x.min(area.right().saturating_sub(1)), area.y));
        }
    }
}
