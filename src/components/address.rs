//! Address bar - single-line `[METHOD] URL` input

use crossterm::event::{Event, KeyCode};
use ratatui::{prelude::*, widgets::*};
use tui_input::{backend::crossterm::EventHandler, Input};

use crate::components::Component;
use crate::constants::{ADDRESS_BAR_HEIGHT, ADDRESS_PLACEHOLDER, ADDRESS_PROMPT};
use crate::messages::{Cmd, Msg};
use crate::models::{Address, AddressError};
use crate::ui;

#[derive(Debug, Default)]
pub struct AddressBar {
    input: Input,
}

impl AddressBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        AddressBar {
            input: Input::new(value.into()),
        }
    }

    pub fn value(&self) -> &str {
        self.input.value()
    }

    /// Parses the buffer as it is right now
    pub fn current_address(&self) -> Result<Address, AddressError> {
        Address::parse(self.input.value())
    }

    pub fn height(&self) -> u16 {
        ADDRESS_BAR_HEIGHT
    }
}

impl Component for AddressBar {
    fn update(&mut self, msg: &Msg) -> Cmd {
        match msg {
            Msg::Key(key) if key.code == KeyCode::Enter => Cmd::msg(Msg::SubmitRequest),
            Msg::Key(key) => {
                self.input.handle_event(&Event::Key(*key));
                Cmd::None
            }
            _ => Cmd::None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(ui::border_style(focused))
            .title(" Address ");

        let prompt_width = ADDRESS_PROMPT.chars().count() as u16;
        let text_width = area.width.saturating_sub(2 + prompt_width) as usize;
        let scroll = self.input.visual_scroll(text_width);

        let line = if self.input.value().is_empty() {
            Line::from(vec![
                Span::raw(ADDRESS_PROMPT),
                Span::styled(ADDRESS_PLACEHOLDER, ui::muted()),
            ])
        } else {
            let value: String = self.input.value().chars().skip(scroll).collect();
            let method_color = self
                .current_address()
                .ok()
                .map(|address| ui::method_color(&address.method));
            match (value.split_once(' '), method_color) {
                (Some((method, rest)), Some(color)) if !method.is_empty() => Line::from(vec![
                    Span::raw(ADDRESS_PROMPT),
                    Span::styled(method.to_string(), Style::default().fg(color).bold()),
                    Span::raw(format!(" {}", rest)),
                ]),
                _ => Line::from(vec![Span::raw(ADDRESS_PROMPT), Span::raw(value)]),
            }
        };

        frame.render_widget(Paragraph::new(line).block(block), area);

        if focused {
            let cursor = (self.input.visual_cursor().saturating_sub(scroll)) as u16;
            let max_x = area.x + area.width.saturating_sub(2);
            let x = (area.x + 1 + prompt_width + cursor).min(max_x);
            frame.set_cursor_position(Position::new(x, area.y + 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Msg {
        Msg::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_typing_fills_buffer() {
        let mut bar = AddressBar::new();
        for c in "get /users".chars() {
            assert_eq!(bar.update(&key(KeyCode::Char(c))), Cmd::None);
        }
        bar.update(&key(KeyCode::Backspace));
        assert_eq!(bar.value(), "get /user");
        assert_eq!(
            bar.current_address(),
            Ok(Address {
                method: String::from("GET"),
                url: String::from("/user"),
            })
        );
    }

    #[test]
    fn test_enter_emits_submit_without_parsing() {
        let mut bar = AddressBar::new();
        assert_eq!(bar.update(&key(KeyCode::Enter)), Cmd::Msg(Msg::SubmitRequest));
        assert_eq!(bar.current_address(), Err(AddressError::Empty));
    }

    #[test]
    fn test_ignores_non_key_messages() {
        let mut bar = AddressBar::with_value("/shops");
        let cmd = bar.update(&Msg::Resize {
            width: 10,
            height: 10,
        });
        assert_eq!(cmd, Cmd::None);
        assert_eq!(bar.value(), "/shops");
    }
}
