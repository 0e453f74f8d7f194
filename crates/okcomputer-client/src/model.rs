//! Typed records built from decoded tuples.

use bytes::Bytes;
use okcomputer_abi::{
    derive_key, to_hex, Address, AbiError, ChannelKey, Token, PAGE, U256, USERNAME,
};
use serde::{Serialize, Serializer};

/// One message in a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    /// Zero-based position in the channel; stable once written.
    pub index: u64,
    pub channel_key: ChannelKey,
    /// Token that posted the message.
    pub token_id: u64,
    /// Seconds since the Unix epoch.
    pub timestamp: u64,
    /// Wallet that submitted the transaction.
    pub sender: Address,
    /// Reserved; always zero today.
    pub metadata: U256,
    pub text: String,
}

impl Message {
    /// Build from the six fields of a decoded `getMessage` tuple.
    pub fn from_tokens(index: u64, tokens: Vec<Token>) -> Result<Self, AbiError> {
        let [key, token_id, timestamp, sender, metadata, text]: [Token; 6] = tokens
            .try_into()
            .map_err(|_| AbiError::UnexpectedToken {
                expected: "6-field message tuple",
            })?;

        let key = key
            .into_fixed_bytes()
            .and_then(|b| <[u8; 32]>::try_from(b).ok())
            .map(ChannelKey::new)
            .ok_or(AbiError::UnexpectedToken { expected: "bytes32" })?;

        Ok(Self {
            index,
            channel_key: key,
            token_id: narrow(token_id)?,
            timestamp: narrow(timestamp)?,
            sender: sender
                .into_address()
                .ok_or(AbiError::UnexpectedToken { expected: "address" })?,
            metadata: metadata
                .into_uint()
                .ok_or(AbiError::UnexpectedToken { expected: "uint256" })?,
            text: text
                .into_string()
                .ok_or(AbiError::UnexpectedToken { expected: "string" })?,
        })
    }

    /// The return tuple the contract would produce for this message.
    pub fn to_tokens(&self) -> Vec<Token> {
        vec![Token::Tuple(vec![
            Token::from(self.channel_key),
            Token::from(self.token_id),
            Token::from(self.timestamp),
            Token::from(self.sender),
            Token::from(self.metadata),
            Token::from(self.text.as_str()),
        ])]
    }
}

fn narrow(token: Token) -> Result<u64, AbiError> {
    token
        .into_uint()
        .ok_or(AbiError::UnexpectedToken { expected: "uint256" })?
        .to_u64()
        .ok_or(AbiError::ValueOutOfRange {
            ty: "uint64".to_string(),
        })
}

/// Which logical entity a stored string represents.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StoredKind {
    /// Webpage HTML, key `page`.
    Page,
    /// Display name, key `username`.
    Username,
    /// Caller-chosen key.
    Data(String),
}

impl StoredKind {
    /// Map a key name to its kind; `page` and `username` are reserved.
    pub fn from_key_name(name: &str) -> Self {
        match name {
            PAGE => StoredKind::Page,
            USERNAME => StoredKind::Username,
            other => StoredKind::Data(other.to_string()),
        }
    }

    pub fn key_name(&self) -> &str {
        match self {
            StoredKind::Page => PAGE,
            StoredKind::Username => USERNAME,
            StoredKind::Data(name) => name.as_str(),
        }
    }

    pub fn key(&self) -> ChannelKey {
        derive_key(self.key_name())
    }
}

/// A per-token string value in the key-value store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredString {
    pub token_id: u64,
    pub key_name: String,
    pub key: ChannelKey,
    pub value: String,
}

/// An unsigned transaction for an external signer.
///
/// Serializes to `{"to", "data", "value", "chainId"}`, the shape signers
/// and submission services expect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDescriptor {
    pub to: Address,
    #[serde(serialize_with = "serialize_hex")]
    pub data: Bytes,
    pub value: U256,
    pub chain_id: u64,
}

impl TransactionDescriptor {
    /// The 4-byte selector at the start of `data`.
    pub fn selector(&self) -> Option<[u8; 4]> {
        self.data.get(..4).and_then(|s| s.try_into().ok())
    }

    /// `data` as `0x`-prefixed hex.
    pub fn data_hex(&self) -> String {
        to_hex(&self.data)
    }
}

fn serialize_hex<S: Serializer>(data: &Bytes, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&to_hex(data))
}

/// Message count of one channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelStats {
    pub channel: String,
    pub messages: u64,
}
