use std::fmt;

use crate::encode::WORD_SIZE;
use crate::primitives::{Address, ChannelKey, U256};

/// A parameter type in a call or return schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
    /// `uint<N>`; the width is in bits.
    Uint(usize),
    /// `bytes<N>`; the width is in bytes (1..=32).
    FixedBytes(usize),
    Address,
    Bool,
    String,
    Bytes,
    Tuple(Vec<ParamType>),
}

impl ParamType {
    /// Dynamic types live in the tail and are referenced by an offset.
    pub fn is_dynamic(&self) -> bool {
        match self {
            ParamType::String | ParamType::Bytes => true,
            ParamType::Tuple(items) => items.iter().any(ParamType::is_dynamic),
            _ => false,
        }
    }

    /// Bytes this type occupies in the head of its enclosing tuple.
    pub fn head_size(&self) -> usize {
        match self {
            _ if self.is_dynamic() => WORD_SIZE,
            ParamType::Tuple(items) => items.iter().map(ParamType::head_size).sum(),
            _ => WORD_SIZE,
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Uint(bits) => write!(f, "uint{bits}"),
            ParamType::FixedBytes(len) => write!(f, "bytes{len}"),
            ParamType::Address => f.write_str("address"),
            ParamType::Bool => f.write_str("bool"),
            ParamType::String => f.write_str("string"),
            ParamType::Bytes => f.write_str("bytes"),
            ParamType::Tuple(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// A typed value in a call or return tuple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Uint(U256),
    /// Left-aligned in its word; at most 32 bytes.
    FixedBytes(Vec<u8>),
    Address(Address),
    Bool(bool),
    String(String),
    Bytes(Vec<u8>),
    Tuple(Vec<Token>),
}

impl Token {
    pub fn is_dynamic(&self) -> bool {
        match self {
            Token::String(_) | Token::Bytes(_) => true,
            Token::Tuple(items) => items.iter().any(Token::is_dynamic),
            _ => false,
        }
    }

    /// Bytes this token occupies in the head of its enclosing tuple.
    pub fn head_size(&self) -> usize {
        match self {
            _ if self.is_dynamic() => WORD_SIZE,
            Token::Tuple(items) => items.iter().map(Token::head_size).sum(),
            _ => WORD_SIZE,
        }
    }

    pub fn into_uint(self) -> Option<U256> {
        match self {
            Token::Uint(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_address(self) -> Option<Address> {
        match self {
            Token::Address(a) => Some(a),
            _ => None,
        }
    }

    pub fn into_bool(self) -> Option<bool> {
        match self {
            Token::Bool(b) => Some(b),
            _ => None,
        }
    }

    pub fn into_string(self) -> Option<String> {
        match self {
            Token::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn into_fixed_bytes(self) -> Option<Vec<u8>> {
        match self {
            Token::FixedBytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn into_tuple(self) -> Option<Vec<Token>> {
        match self {
            Token::Tuple(items) => Some(items),
            _ => None,
        }
    }
}

impl From<U256> for Token {
    fn from(value: U256) -> Self {
        Token::Uint(value)
    }
}

impl From<u64> for Token {
    fn from(value: u64) -> Self {
        Token::Uint(U256::from(value))
    }
}

impl From<Address> for Token {
    fn from(value: Address) -> Self {
        Token::Address(value)
    }
}

impl From<ChannelKey> for Token {
    fn from(value: ChannelKey) -> Self {
        Token::FixedBytes(value.as_bytes().to_vec())
    }
}

impl From<bool> for Token {
    fn from(value: bool) -> Self {
        Token::Bool(value)
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Token::String(value.to_string())
    }
}

impl From<String> for Token {
    fn from(value: String) -> Self {
        Token::String(value)
    }
}
