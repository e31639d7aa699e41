//! UI events - terminal input translated into messages, plus the key-binding table

use std::fmt;
use std::str::FromStr;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use serde::Deserialize;
use thiserror::Error;

use crate::messages::Msg;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyBindingError {
    #[error("empty key binding")]
    Empty,
    #[error("unknown modifier `{0}`")]
    UnknownModifier(String),
    #[error("unknown key `{0}`")]
    UnknownKey(String),
}

/// A physical key plus modifiers, e.g. `ctrl+c` or `shift+tab`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        KeyBinding { code, modifiers }
    }

    /// Shift is carried by the key code itself (upper-case chars, BackTab),
    /// so it is ignored when comparing modifiers.
    pub fn matches(&self, key: &KeyEvent) -> bool {
        let relevant = KeyModifiers::CONTROL | KeyModifiers::ALT;
        key.code == self.code && (key.modifiers & relevant) == (self.modifiers & relevant)
    }
}

impl FromStr for KeyBinding {
    type Err = KeyBindingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(KeyBindingError::Empty);
        }

        // A lone "+" is the plus key, not a separator
        let (mods, key) = match s.rsplit_once('+') {
            Some((mods, "")) => (mods.trim_end_matches('+'), "+"),
            Some((mods, key)) => (mods, key),
            None => ("", s),
        };

        let mut modifiers = KeyModifiers::NONE;
        let mut shift = false;
        for part in mods.split('+').filter(|p| !p.is_empty()) {
            match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
                "alt" | "option" => modifiers |= KeyModifiers::ALT,
                "shift" => shift = true,
                other => return Err(KeyBindingError::UnknownModifier(other.to_string())),
            }
        }

        let code = match key.to_ascii_lowercase().as_str() {
            "tab" if shift => KeyCode::BackTab,
            "tab" => KeyCode::Tab,
            "backtab" => KeyCode::BackTab,
            "esc" | "escape" => KeyCode::Esc,
            "enter" | "return" => KeyCode::Enter,
            "backspace" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "space" => KeyCode::Char(' '),
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" => KeyCode::PageUp,
            "pagedown" => KeyCode::PageDown,
            lower => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if shift => KeyCode::Char(c.to_ascii_uppercase()),
                    (Some(c), None) => KeyCode::Char(c),
                    _ => match lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                        Some(n) if (1..=12).contains(&n) => KeyCode::F(n),
                        _ => return Err(KeyBindingError::UnknownKey(key.to_string())),
                    },
                }
            }
        };

        Ok(KeyBinding::new(code, modifiers))
    }
}

impl TryFrom<String> for KeyBinding {
    type Error = KeyBindingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            write!(f, "ctrl+")?;
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            write!(f, "alt+")?;
        }
        match self.code {
            KeyCode::BackTab => write!(f, "shift+tab"),
            KeyCode::Char(' ') => write!(f, "space"),
            KeyCode::Char(c) => write!(f, "{}", c),
            KeyCode::F(n) => write!(f, "f{}", n),
            other => f.write_str(&format!("{:?}", other).to_lowercase()),
        }
    }
}

/// Global and viewport key bindings
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub region_switch: KeyBinding,
    pub command_toggle: KeyBinding,
    pub quit: KeyBinding,
    pub next_tab: KeyBinding,
    pub previous_tab: KeyBinding,
}

impl Default for KeyBindings {
    fn default() -> Self {
        KeyBindings {
            region_switch: KeyBinding::new(KeyCode::BackTab, KeyModifiers::NONE),
            command_toggle: KeyBinding::new(KeyCode::Esc, KeyModifiers::NONE),
            quit: KeyBinding::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            next_tab: KeyBinding::new(KeyCode::Right, KeyModifiers::ALT),
            previous_tab: KeyBinding::new(KeyCode::Left, KeyModifiers::ALT),
        }
    }
}

/// Convert a terminal event into a message, dropping key releases and repeats
pub fn event_to_msg(event: Event) -> Option<Msg> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(Msg::Key(key)),
        Event::Resize(width, height) => Some(Msg::Resize { width, height }),
        _ => None,
    }
}
