use std::fmt;

use thiserror::Error;

/// Parsed request target
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Address {
    pub method: String,
    pub url: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("empty address")]
    Empty,
    #[error("unexpected tokens between method and url: {0}")]
    UnexpectedTokens(String),
}

impl Address {
    /// Parses `[METHOD] URL`. A lone token is a GET.
    pub fn parse(input: &str) -> Result<Address, AddressError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(AddressError::Empty);
        }

        let parts: Vec<&str> = trimmed.split(' ').filter(|p| !p.is_empty()).collect();
        match parts.as_slice() {
            [url] => Ok(Address {
                method: String::from("GET"),
                url: url.to_string(),
            }),
            [method, url] => Ok(Address {
                method: method.to_uppercase(),
                url: url.to_string(),
            }),
            [_, middle @ .., _] => Err(AddressError::UnexpectedTokens(middle.join(" "))),
            [] => Err(AddressError::Empty),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}

/// Input routing mode
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    Command,
}

impl Mode {
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Normal => "NORMAL",
            Mode::Command => "COMMAND",
        }
    }
}

/// Viewport sub-views, in tab-bar order
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Headers,
    RequestBody,
    Response,
    ResponseHeaders,
}

impl Tab {
    pub const ALL: [Tab; 4] = [
        Tab::Headers,
        Tab::RequestBody,
        Tab::Response,
        Tab::ResponseHeaders,
    ];

    pub fn index(&self) -> usize {
        match self {
            Tab::Headers => 0,
            Tab::RequestBody => 1,
            Tab::Response => 2,
            Tab::ResponseHeaders => 3,
        }
    }

    pub fn from_index(index: usize) -> Tab {
        Tab::ALL[index % Tab::ALL.len()]
    }

    pub fn next(&self) -> Tab {
        Tab::from_index(self.index() + 1)
    }

    pub fn prev(&self) -> Tab {
        Tab::from_index(self.index() + Tab::ALL.len() - 1)
    }

    /// Command-mode token that jumps to this tab
    pub fn shortcut(&self) -> &'static str {
        match self {
            Tab::Headers => ":q",
            Tab::RequestBody => ":w",
            Tab::Response => ":e",
            Tab::ResponseHeaders => ":r",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Headers => "Headers",
            Tab::RequestBody => "Request Body",
            Tab::Response => "Response",
            Tab::ResponseHeaders => "Response Headers",
        }
    }
}

/// Request/UI state shown in the status line
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Status {
    #[default]
    Idle,
    Processing,
    Error,
    Code(u16),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Neutral,
    Ok,
    Error,
}

impl Status {
    pub fn severity(&self) -> Severity {
        match self {
            Status::Idle | Status::Processing => Severity::Neutral,
            Status::Error => Severity::Error,
            Status::Code(code) if *code < 400 => Severity::Ok,
            Status::Code(_) => Severity::Error,
        }
    }

    pub fn label(&self) -> String {
        match self {
            Status::Idle => String::from("Idle"),
            Status::Processing => String::from("Processing"),
            Status::Error => String::from("Error"),
            Status::Code(code) => code.to_string(),
        }
    }
}

/// One request header being edited
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderItem {
    pub key: String,
    pub value: String,
}

impl HeaderItem {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        HeaderItem {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Parses a `Key: Value` line. The key must be non-empty.
    pub fn parse(line: &str) -> Option<HeaderItem> {
        let (key, value) = line.split_once(':')?;
        let key = key.trim();
        if key.is_empty() || key.contains(char::is_whitespace) {
            return None;
        }
        Some(HeaderItem::new(key, value.trim()))
    }
}

/// Request headers with case-insensitively unique keys, in insertion order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeaderSet {
    items: Vec<HeaderItem>,
}

impl HeaderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the value for `item.key`
    pub fn set(&mut self, item: HeaderItem) {
        match self
            .items
            .iter_mut()
            .find(|h| h.key.eq_ignore_ascii_case(&item.key))
        {
            Some(existing) => existing.value = item.value,
            None => self.items.push(item),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|h| h.key.eq_ignore_ascii_case(key))
            .map(|h| h.value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &HeaderItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// What the Request Lifecycle sends over the wire
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchRequest {
    pub address: Address,
    pub headers: HeaderSet,
    pub body: Option<String>,
}

/// Result of a completed request
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Response {
    pub id: u64,
    pub status: u16,
    pub reason: Option<String>,
    pub headers: Vec<(String, String)>,
    pub body: String,
    pub time_ms: u64,
}

impl Response {
    /// Short status-line annotation, e.g. `200 OK · 35 ms`
    pub fn summary(&self) -> String {
        match &self.reason {
            Some(reason) => format!("{} {} · {} ms", self.status, reason, self.time_ms),
            None => format!("{} · {} ms", self.status, self.time_ms),
        }
    }
}
