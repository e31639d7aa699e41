//! gurl - terminal HTTP client
//!
//! Architecture:
//! - App actor - single event loop owning the Root dispatcher
//! - Network actor (Tokio) - async HTTP execution

use std::io;

use crossterm::{
    event::EventStream,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tokio::sync::mpsc;

use gurl::messages::{NetworkCommand, NetworkResponse};
use gurl::{logging, AppActor, Config, NetworkActor, ReqwestTransport, Root};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;
    let _log = logging::init(&config.log_file)?;
    tracing::info!(
        base_url = ?config.base_url,
        quit = %config.keys.quit,
        command_toggle = %config.keys.command_toggle,
        "Config loaded"
    );

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();

    // Spawn network actor
    let network_actor = NetworkActor::new(ReqwestTransport::new(config.base_url.clone()), net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Run the event loop on this task until quit
    let app_actor = AppActor::new(Root::new(config.keys.clone()), net_cmd_tx);
    app_actor
        .run(&mut terminal, EventStream::new(), net_resp_rx)
        .await?;

    tracing::info!("Shutting down");
    Ok(())
}
