//! Application constants
//!
//! Centralized location for magic strings and layout defaults.

use std::time::Duration;

/// Shown in the address bar while it is empty
pub const ADDRESS_PLACEHOLDER: &str = "GET https://httpbin.org/get";

/// Drawn in front of the address text
pub const ADDRESS_PROMPT: &str = "¬ ";

/// Bordered single-line input
pub const ADDRESS_BAR_HEIGHT: u16 = 3;

pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Rows the viewport keeps for its tab bar and border
pub const VIEWPORT_CHROME: u16 = 3;

/// Status-line marker while typing a command
pub const COMMAND_MARKER: &str = ">";

pub const SPINNER_FRAMES: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

pub const SPINNER_INTERVAL: Duration = Duration::from_millis(100);

/// Config directory under the home directory
pub const CONFIG_DIR: &str = ".gurl";

pub const CONFIG_FILE: &str = "config.yaml";

pub const DEFAULT_LOG_FILE: &str = "gurl.log";
