//! Network actor - runs Request Lifecycles off the event loop

use std::time::Instant;

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::FetchRequest;
use crate::network::client::Transport;

/// Network actor that executes fetch commands through a transport
pub struct NetworkActor<T: Transport> {
    transport: T,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl<T: Transport> NetworkActor<T> {
    pub fn new(transport: T, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            transport,
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Execute { id, request }) => {
                            let transport = self.transport.clone();
                            let response_tx = self.response_tx.clone();

                            self.active_requests.spawn(async move {
                                let response = execute(&transport, id, request).await;
                                let _ = response_tx.send(response);
                            });
                        }

                        Some(NetworkCommand::Shutdown) | None => {
                            self.active_requests.abort_all();
                            break;
                        }
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.active_requests.join_next() => {}
            }
        }
    }
}

/// One Request Lifecycle: always resolves, never aborts the process
pub async fn execute<T: Transport>(transport: &T, id: u64, request: FetchRequest) -> NetworkResponse {
    tracing::info!(id, address = %request.address, "Executing request");
    let start = Instant::now();
    let result = transport.fetch(request).await;
    let time_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(fetched) => {
            tracing::info!(id, status = fetched.status, time_ms, "Request completed");
            NetworkResponse::Success {
                id,
                status: fetched.status,
                reason: fetched.reason,
                headers: fetched.headers,
                body: fetched.body,
                time_ms,
            }
        }
        Err(e) => {
            tracing::warn!(id, error = %e, time_ms, "Request failed");
            NetworkResponse::Error {
                id,
                message: e.to_string(),
                time_ms,
            }
        }
    }
}
