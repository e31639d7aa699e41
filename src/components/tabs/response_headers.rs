//! Response headers pane - read-only list from the last response

use ratatui::{prelude::*, widgets::*};

use crate::components::tabs::ScrollState;
use crate::components::Component;
use crate::messages::{Cmd, Msg};
use crate::ui;

#[derive(Debug, Default)]
pub struct ResponseHeadersPane {
    headers: Vec<(String, String)>,
    scroll: ScrollState,
}

impl ResponseHeadersPane {
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn scroll(&self) -> ScrollState {
        self.scroll
    }

    pub fn set_headers(&mut self, headers: Vec<(String, String)>) {
        self.headers = headers;
        self.scroll.set_content(self.headers.len());
        self.scroll.reset();
    }
}

impl Component for ResponseHeadersPane {
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
        if self.headers.is_empty() {
            frame.render_widget(Paragraph::new("No response headers.").style(ui::muted()), area);
            return;
        }

        let lines: Vec<Line> = self
            .headers
            .iter()
            .map(|(key, value)| {
                Line::from(vec![
                    Span::styled(key.clone(), Style::default().fg(Color::Cyan)),
                    Span::raw(": "),
                    Span::raw(value.clone()),
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(lines).scroll((self.scroll.offset(), 0)), area);
    }
}
