use thiserror::Error;

use crate::transport::TransportError;

/// Unified error taxonomy for node requests. Every failure is terminal for
/// its request; nothing is retried and nothing is silently dropped.
#[derive(Debug, Error)]
pub enum RpcError {
    /// No usable node or credential to address the request to.
    #[error("no eligible node: {0}")]
    Configuration(String),
    #[error("url compose: {0}")]
    Url(#[from] url::ParseError),
    /// Transport failure; carries the transport's message verbatim.
    #[error("transport: {0}")]
    Transport(String),
    /// HTTP 401 from the node.
    #[error("node credentials look incorrect, double check them")]
    Credentials,
    /// HTTP 404 from the node.
    #[error("command not found")]
    CommandNotFound,
    /// Any other non-2xx status.
    #[error("unable to decode the response from the node, http status code: {0}")]
    HttpStatus(u16),
    #[error("unable to decode response: {0}")]
    Decode(String),
    /// Structured error returned by a JSON-RPC node.
    #[error("node returned error code={code} message={message}")]
    Node { code: i64, message: String },
}

impl RpcError {
    pub(crate) fn from_status(status: u16) -> Self {
        match status {
            401 => RpcError::Credentials,
            404 => RpcError::CommandNotFound,
            code => RpcError::HttpStatus(code),
        }
    }
}

impl From<TransportError> for RpcError {
    fn from(err: TransportError) -> Self {
        RpcError::Transport(err.to_string())
    }
}
