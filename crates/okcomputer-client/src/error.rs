use okcomputer_abi::AbiError;
use okcomputer_transport::TransportError;

/// Errors that can occur in contract reads and transaction building.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Return data did not match the function's return schema.
    #[error("malformed response: {0}")]
    MalformedResponse(#[from] AbiError),

    /// `getMessage` reverted because the index is not below the channel count.
    #[error("message index {index} is out of range")]
    IndexOutOfRange { index: u64 },

    /// A payload exceeds its documented limit; nothing was encoded.
    #[error("{field} too large ({size} {unit}, max {max})")]
    PayloadTooLarge {
        field: &'static str,
        size: usize,
        max: usize,
        unit: &'static str,
    },

    /// The transport failed; passed through unchanged.
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),
}

pub type Result<T> = std::result::Result<T, ClientError>;
