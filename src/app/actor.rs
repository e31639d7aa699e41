//! App actor - the single event loop
//!
//! Terminal events, posted messages and network results are pulled one at a
//! time, handed to the Root, and the returned commands are executed before
//! the next message is taken.

use std::io;

use crossterm::event::Event;
use futures_util::{Stream, StreamExt};
use ratatui::{backend::Backend, Terminal};
use tokio::sync::mpsc;

use crate::app::Root;
use crate::messages::ui_events::event_to_msg;
use crate::messages::{Cmd, Msg, NetworkCommand, NetworkResponse};

/// App actor that owns the Root and runs its deferred commands
pub struct AppActor {
    root: Root,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    msg_tx: mpsc::UnboundedSender<Msg>,
    msg_rx: mpsc::UnboundedReceiver<Msg>,
}

impl AppActor {
    pub fn new(root: Root, network_tx: mpsc::UnboundedSender<NetworkCommand>) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        AppActor {
            root,
            network_tx,
            msg_tx,
            msg_rx,
        }
    }

    /// Run until a quit command or the end of the event stream.
    /// Returns the Root in its final state.
    pub async fn run<B, S>(
        mut self,
        terminal: &mut Terminal<B>,
        mut events: S,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) -> anyhow::Result<Root>
    where
        B: Backend,
        S: Stream<Item = io::Result<Event>> + Unpin,
    {
        let size = terminal.size()?;
        let cmd = self.root.update(Msg::Resize {
            width: size.width,
            height: size.height,
        });
        self.execute(cmd);

        loop {
            terminal.draw(|f| self.root.render(f))?;

            let msg = tokio::select! {
                biased;

                // Posted messages first so a command's follow-ups stay in order
                Some(msg) = self.msg_rx.recv() => msg,

                Some(response) = net_rx.recv() => response.into_msg(),

                event = events.next() => match event {
                    Some(Ok(event)) => match event_to_msg(event) {
                        Some(msg) => msg,
                        None => continue,
                    },
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                },
            };

            let cmd = self.root.update(msg);
            if self.execute(cmd) {
                break;
            }
        }

        let _ = self.network_tx.send(NetworkCommand::Shutdown);
        Ok(self.root)
    }

    /// Runs a command, returns true if quit was requested
    fn execute(&mut self, cmd: Cmd) -> bool {
        let mut quit = false;

        for cmd in cmd.flatten() {
            match cmd {
                Cmd::None | Cmd::Batch(_) => {}
                Cmd::Msg(msg) => {
                    let _ = self.msg_tx.send(msg);
                }
                Cmd::Tick { after, msg } => {
                    let msg_tx = self.msg_tx.clone();
                    tokio::spawn(async move {
                        tokio::time::sleep(after).await;
                        let _ = msg_tx.send(msg);
                    });
                }
                Cmd::Fetch { id, request } => {
                    if self
                        .network_tx
                        .send(NetworkCommand::Execute { id, request })
                        .is_err()
                    {
                        tracing::error!(id, "Network layer is gone");
                        let _ = self.msg_tx.send(Msg::RequestFailed {
                            id,
                            reason: String::from("Network layer unavailable"),
                        });
                    }
                }
                Cmd::Quit => quit = true,
            }
        }

        quit
    }
}
