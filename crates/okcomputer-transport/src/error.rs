/// Errors that can occur while performing a remote read call.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The HTTP request could not be completed.
    #[cfg(feature = "http")]
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success HTTP status.
    #[error("endpoint returned HTTP {status}")]
    Status { status: u16 },

    /// The node returned a JSON-RPC error object.
    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// The call executed and reverted.
    #[error("execution reverted: {message}")]
    Reverted {
        message: String,
        /// Revert payload as returned by the node, if any.
        data: Option<String>,
    },

    /// The response body was not a usable JSON-RPC result.
    #[error("invalid rpc response: {0}")]
    InvalidResponse(String),

    /// JSON serialization/deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TransportError {
    /// True when the remote call itself reverted (as opposed to a delivery failure).
    pub fn is_revert(&self) -> bool {
        matches!(self, TransportError::Reverted { .. })
    }

    /// True when the request timed out before a response arrived.
    pub fn is_timeout(&self) -> bool {
        match self {
            #[cfg(feature = "http")]
            TransportError::Http(err) => err.is_timeout(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, TransportError>;
