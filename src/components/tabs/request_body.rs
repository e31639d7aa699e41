//! Request body pane - free-form multi-line buffer

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{prelude::*, widgets::*};

use crate::components::tabs::ScrollState;
use crate::components::Component;
use crate::messages::{Cmd, Msg};
use crate::ui;

#[derive(Debug, Default)]
pub struct RequestBodyPane {
    body: String,
    scroll: ScrollState,
}

impl RequestBodyPane {
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn scroll(&self) -> ScrollState {
        self.scroll
    }

    fn line_count(&self) -> usize {
        // A trailing newline opens an empty line the cursor sits on
        self.body.split('\n').count()
    }

    fn edited(&mut self) {
        self.scroll.set_content(self.line_count());
        self.scroll.to_end();
    }
}

impl Component for RequestBodyPane {
    fn update(&mut self, msg: &Msg) -> Cmd {
        match msg {
            Msg::Resize { height, .. } => self.scroll.set_height(*height),
            Msg::Key(key) => match key.code {
                KeyCode::Char(c)
                    if !key
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
                {
                    self.body.push(c);
                    self.edited();
                }
                KeyCode::Enter => {
                    self.body.push('\n');
                    self.edited();
                }
                KeyCode::Tab => {
                    self.body.push_str("  ");
                    self.edited();
                }
                KeyCode::Backspace => {
                    self.body.pop();
                    self.edited();
                }
                code => {
                    self.scroll.handle_key(code);
                }
            },
            _ => {}
        }
        Cmd::None
    }

    fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        if self.body.is_empty() && !focused {
            frame.render_widget(Paragraph::new("Empty body.").style(ui::muted()), area);
            return;
        }

        let body = Paragraph::new(self.body.as_str()).scroll((self.scroll.offset(), 0));
        frame.render_widget(body, area);

        if focused {
            let last = self.body.rsplit('\n').next().unwrap_or("");
            let row = (self.line_count() as u16)
                .saturating_sub(1)
                .saturating_sub(self.scroll.offset());
            let x = (area.x + last.chars().count() as u16).min(area.right().saturating_sub(1));
            let y = (area.y + row).min(area.bottom().saturating_sub(1));
            frame.set_cursor_position(Position::new(x, y));
        }
    }
}
