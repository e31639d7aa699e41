//! Response pane - read-only view of the last body

use ratatui::{prelude::*, widgets::*};

use crate::components::tabs::ScrollState;
use crate::components::Component;
use crate::messages::{Cmd, Msg};
use crate::ui;

#[derive(Debug, Default)]
pub struct ResponsePane {
    body: String,
    scroll: ScrollState,
}

impl ResponsePane {
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn scroll(&self) -> ScrollState {
        self.scroll
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
        self.scroll.set_content(self.body.lines().count());
        self.scroll.reset();
    }
}

impl Component for ResponsePane {
    fn update(&mut self, msg: &Msg) -> Cmd {
        match msg {
            Msg::Resize { height, .. } => self.scroll.set_height(*height),
            Msg::Key(key) => {
                self.scroll.handle_key(key.code);
            }
            _ => {}
        }
        Cmd::None
    }

    fn render(&self, frame: &mut Frame, area: Rect, _focused: bool) {
        if self.body.is_empty() {
            let hint = Paragraph::new("No response yet. Press Enter in the address bar to send.")
                .style(ui::muted());
            frame.render_widget(hint, area);
            return;
        }

        let body = Paragraph::new(ui::highlight_json(&self.body)).scroll((self.scroll.offset(), 0));
        frame.render_widget(body, area);
    }
}
