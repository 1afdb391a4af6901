use std::fmt::Display;

use serde::{Deserialize, Serialize};

use kms_core::host::Host;

pub const CLUSTER_STATUS_PATH: &'static str = "/v1/cluster/status";
pub const CLUSTER_ADD_PATH: &'static str = "/v1/cluster/add";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddNodeRequest {
    pub host: Host,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorResponse {
    pub(crate) message: String,
}

/// Extracts the server message from an error body, falling back to the raw text.
pub(crate) fn error_message<E: Display>(body: Result<String, E>) -> String {
    match body {
        Ok(body) => match serde_json::from_str::<ErrorResponse>(&body) {
            Ok(error) => error.message,
            Err(_) => body.trim().to_string(),
        },
        Err(error) => format!("cannot read error body: {}", error),
    }
}
