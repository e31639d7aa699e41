//! Deferred commands returned from component updates

use std::time::Duration;

use crate::messages::Msg;
use crate::models::FetchRequest;

/// Work for the event loop to run after an update
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Cmd {
    #[default]
    None,
    Batch(Vec<Cmd>),
    /// Post a message back onto the queue
    Msg(Msg),
    /// Post a message once `after` has elapsed
    Tick { after: Duration, msg: Msg },
    /// Schedule a Request Lifecycle
    Fetch { id: u64, request: FetchRequest },
    Quit,
}

impl Cmd {
    pub fn msg(msg: Msg) -> Cmd {
        Cmd::Msg(msg)
    }

    /// Combines commands, dropping `None`s
    pub fn batch(cmds: impl IntoIterator<Item = Cmd>) -> Cmd {
        let mut cmds: Vec<Cmd> = cmds.into_iter().filter(|c| !c.is_none()).collect();
        match cmds.len() {
            0 => Cmd::None,
            1 => cmds.remove(0),
            _ => Cmd::Batch(cmds),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Cmd::None)
    }

    /// Leaf commands in execution order
    pub fn flatten(self) -> Vec<Cmd> {
        match self {
            Cmd::None => Vec::new(),
            Cmd::Batch(cmds) => cmds.into_iter().flat_map(Cmd::flatten).collect(),
            other => vec![other],
        }
    }
}
