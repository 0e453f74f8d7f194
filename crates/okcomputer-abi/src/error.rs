use crate::primitives::U256;

/// Errors that can occur while decoding return data or parsing primitives.
#[derive(Debug, thiserror::Error)]
pub enum AbiError {
    /// The buffer ends before a required 32-byte word.
    #[error("response truncated ({available} bytes, need at least {needed})")]
    Truncated { needed: usize, available: usize },

    /// A dynamic-field offset points outside the buffer.
    #[error("offset {offset} points outside the {len}-byte response")]
    OffsetOutOfBounds { offset: U256, len: usize },

    /// A length prefix claims more bytes than remain in the buffer.
    #[error("declared length {length} exceeds the {remaining} bytes remaining")]
    LengthOutOfBounds { length: U256, remaining: usize },

    /// A string field holds bytes that are not valid UTF-8.
    #[error("string field is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// A bool word is something other than 0 or 1.
    #[error("invalid bool word")]
    InvalidBool,

    /// An address word has non-zero bytes above the low 20.
    #[error("address word has non-zero high bytes")]
    InvalidAddressWord,

    /// An integer word does not fit the declared width.
    #[error("value does not fit in {ty}")]
    ValueOutOfRange { ty: String },

    /// A decoded token did not have the shape the caller asked for.
    #[error("unexpected token shape (expected {expected})")]
    UnexpectedToken { expected: &'static str },

    /// An address string could not be parsed.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// A hex string could not be parsed.
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

pub type Result<T> = std::result::Result<T, AbiError>;
