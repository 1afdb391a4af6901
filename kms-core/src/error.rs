use thiserror::Error;

use crate::host::Host;

#[derive(Error, Debug)]
pub enum KmsError {
    #[error("operation cancelled")]
    Cancelled,
    #[error("no target host to send the request to")]
    NoHosts,
    #[error("endpoint {0} is not a valid host")]
    InvalidEndpoint(String),
    #[error("{host} responded with {status}: {message}")]
    UnexpectedStatus {
        host: Host,
        status: u16,
        message: String,
    },
}
