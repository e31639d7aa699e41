//! Network messages - communication between the App and Network layers

use crate::messages::Msg;
use crate::models::{FetchRequest, Response};

/// Commands sent from the App layer to the Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Run one Request Lifecycle
    Execute { id: u64, request: FetchRequest },
    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from the Network layer back to the App layer
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkResponse {
    Success {
        id: u64,
        status: u16,
        reason: Option<String>,
        headers: Vec<(String, String)>,
        body: String,
        time_ms: u64,
    },
    Error {
        id: u64,
        message: String,
        time_ms: u64,
    },
}

impl NetworkResponse {
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::Success { id, .. } => *id,
            NetworkResponse::Error { id, .. } => *id,
        }
    }

    /// Converts the response into the message the Root consumes
    pub fn into_msg(self) -> Msg {
        match self {
            NetworkResponse::Success {
                id,
                status,
                reason,
                headers,
                body,
                time_ms,
            } => Msg::Response(Response {
                id,
                status,
                reason,
                headers,
                body,
                time_ms,
            }),
            NetworkResponse::Error { id, message, .. } => Msg::RequestFailed {
                id,
                reason: message,
            },
        }
    }
}
