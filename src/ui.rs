use ratatui::{prelude::*, widgets::*};

use crate::models::{Severity, Status, Tab};

/// Tab bar for the viewport. Each title carries its command-mode shortcut.
pub fn render_tabs(selected: Tab, enabled: bool) -> Tabs<'static> {
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .map(|t| Line::from(format!("{} ({})", t.title(), t.shortcut())))
        .collect();

    let highlight = if enabled {
        Style::default().fg(Color::Yellow).bold()
    } else {
        Style::default().fg(Color::DarkGray).bold()
    };

    Tabs::new(titles)
        .select(selected.index())
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(highlight)
        .divider("|")
}

/// Border style for a region or pane
pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

pub fn muted() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Status color: codes split at 300 and 400
pub fn status_color(status: &Status) -> Color {
    match status {
        Status::Code(code) if *code < 300 => Color::Green,
        Status::Code(code) if *code < 400 => Color::Cyan,
        other => match other.severity() {
            Severity::Neutral => Color::Gray,
            Severity::Ok => Color::Green,
            Severity::Error => Color::Red,
        },
    }
}

/// Method color
pub fn method_color(method: &str) -> Color {
    match method {
        "GET" => Color::Green,
        "POST" => Color::Yellow,
        "PUT" => Color::Blue,
        "PATCH" => Color::Cyan,
        "DELETE" => Color::Red,
        _ => Color::White,
    }
}

/// Line-by-line JSON coloring. Keys, strings, numbers, literals and
/// punctuation get their own colors; anything else is left raw.
pub fn highlight_json(text: &str) -> Vec<Line<'static>> {
    text.lines().map(highlight_json_line).collect()
}

fn highlight_json_line(line: &str) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '"' => {
                let start = i;
                i += 1;
                while i < chars.len() && chars[i] != '"' {
                    if chars[i] == '\\' {
                        i += 1;
                    }
                    i += 1;
                }
                i = (i + 1).min(chars.len());
                let literal: String = chars[start..i].iter().collect();
                let is_key = chars[i..]
                    .iter()
                    .find(|c| !c.is_whitespace())
                    .is_some_and(|c| *c == ':');
                let color = if is_key { Color::Cyan } else { Color::Green };
                spans.push(Span::styled(literal, Style::default().fg(color)));
            }
            '{' | '}' | '[' | ']' => {
                spans.push(Span::styled(c.to_string(), Style::default().fg(Color::Yellow)));
                i += 1;
            }
            c if c == '-' || c.is_ascii_digit() => {
                let start = i;
                while i < chars.len()
                    && (chars[i].is_ascii_digit() || matches!(chars[i], '-' | '+' | '.' | 'e' | 'E'))
                {
                    i += 1;
                }
                let number: String = chars[start..i].iter().collect();
                spans.push(Span::styled(number, Style::default().fg(Color::Yellow)));
            }
            c if c.is_ascii_alphabetic() => {
                let start = i;
                while i < chars.len() && chars[i].is_ascii_alphabetic() {
                    i += 1;
                }
                let word: String = chars[start..i].iter().collect();
                let style = match word.as_str() {
                    "true" | "false" | "null" => Style::default().fg(Color::Magenta),
                    _ => Style::default(),
                };
                spans.push(Span::styled(word, style));
            }
            _ => {
                let start = i;
                while i < chars.len()
                    && !matches!(chars[i], '"' | '{' | '}' | '[' | ']' | '-')
                    && !chars[i].is_ascii_alphanumeric()
                {
                    i += 1;
                }
                spans.push(Span::raw(chars[start..i].iter().collect::<String>()));
            }
        }
    }

    Line::from(spans)
}
