//! Command dispatcher - turns submitted command-mode text into messages

use crate::messages::Msg;
use crate::models::Tab;

/// Maps a submitted command to a message, `None` for anything unrecognized
pub fn dispatch(command: &str) -> Option<Msg> {
    let command = command.trim();
    Tab::ALL
        .iter()
        .find(|tab| tab.shortcut() == command)
        .map(|tab| Msg::SelectTab(*tab))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_shortcuts() {
        assert_eq!(dispatch(":q"), Some(Msg::SelectTab(Tab::Headers)));
        assert_eq!(dispatch(":w"), Some(Msg::SelectTab(Tab::RequestBody)));
        assert_eq!(dispatch(" :e "), Some(Msg::SelectTab(Tab::Response)));
        assert_eq!(dispatch(":r"), Some(Msg::SelectTab(Tab::ResponseHeaders)));
    }

    #[test]
    fn test_unknown_commands_are_ignored() {
        assert_eq!(dispatch(""), None);
        assert_eq!(dispatch(":wq"), None);
        assert_eq!(dispatch("e"), None);
    }
}
