//! One typed wrapper per remote function.
//!
//! Positional [`Token`] lists never leave this module: each wrapper fixes the
//! selector, argument order and return schema of its function, so callers
//! cannot swap a key and a token ID by accident.

use bytes::Bytes;
use okcomputer_abi::{
    decode_tuple, encode_call, Address, AbiError, ChannelKey, ParamType, Selector, Token, U256,
};
use okcomputer_transport::Transport;

use crate::config::Deployment;
use crate::error::{ClientError, Result};
use crate::model::Message;

/// Which of the two contracts a function lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contract {
    Nft,
    Storage,
}

/// The remote functions this client depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    OwnerOf,
    SubmitMessage,
    GetMessageCount,
    GetMessage,
    StoreString,
    GetStringOrDefault,
    HasData,
    RemoveData,
}

impl Function {
    pub const ALL: [Function; 8] = [
        Function::OwnerOf,
        Function::SubmitMessage,
        Function::GetMessageCount,
        Function::GetMessage,
        Function::StoreString,
        Function::GetStringOrDefault,
        Function::HasData,
        Function::RemoveData,
    ];

    /// Canonical Solidity signature.
    pub fn signature(self) -> &'static str {
        match self {
            Function::OwnerOf => "ownerOf(uint256)",
            Function::SubmitMessage => "submitMessage(uint256,bytes32,string,uint256)",
            Function::GetMessageCount => "getMessageCount(bytes32)",
            Function::GetMessage => "getMessage(bytes32,uint256)",
            Function::StoreString => "storeString(uint256,bytes32,string)",
            Function::GetStringOrDefault => "getStringOrDefault(uint256,bytes32,string)",
            Function::HasData => "hasData(uint256,bytes32)",
            Function::RemoveData => "removeData(uint256,bytes32)",
        }
    }

    /// Four documented selectors are pinned; the rest derive from the signature.
    pub fn selector(self) -> Selector {
        match self {
            Function::OwnerOf => Selector::new([0x63, 0x52, 0x21, 0x1e]),
            Function::SubmitMessage => Selector::new([0x3b, 0x80, 0xa7, 0x4a]),
            Function::GetMessageCount => Selector::new([0xa7, 0x81, 0xa5, 0x55]),
            Function::GetMessage => Selector::new([0xde, 0xb8, 0xa4, 0x61]),
            other => Selector::from_signature(other.signature()),
        }
    }

    pub fn contract(self) -> Contract {
        match self {
            Function::OwnerOf => Contract::Nft,
            _ => Contract::Storage,
        }
    }

    /// Argument schema, in signature order.
    pub fn inputs(self) -> Vec<ParamType> {
        let uint = || ParamType::Uint(256);
        let key = || ParamType::FixedBytes(32);
        match self {
            Function::OwnerOf => vec![uint()],
            Function::SubmitMessage => vec![uint(), key(), ParamType::String, uint()],
            Function::GetMessageCount => vec![key()],
            Function::GetMessage => vec![key(), uint()],
            Function::StoreString | Function::GetStringOrDefault => {
                vec![uint(), key(), ParamType::String]
            }
            Function::HasData | Function::RemoveData => vec![uint(), key()],
        }
    }

    /// Return schema. Write-only functions return nothing the client reads.
    pub fn outputs(self) -> Vec<ParamType> {
        match self {
            Function::OwnerOf => vec![ParamType::Address],
            Function::GetMessageCount => vec![ParamType::Uint(256)],
            Function::GetMessage => vec![ParamType::Tuple(vec![
                ParamType::FixedBytes(32),
                ParamType::Uint(256),
                ParamType::Uint(256),
                ParamType::Address,
                ParamType::Uint(256),
                ParamType::String,
            ])],
            Function::GetStringOrDefault => vec![ParamType::String],
            Function::HasData => vec![ParamType::Bool],
            Function::SubmitMessage | Function::StoreString | Function::RemoveData => Vec::new(),
        }
    }

    /// Short name, as used in logs.
    pub fn name(self) -> &'static str {
        let sig = self.signature();
        sig.split('(').next().unwrap_or(sig)
    }
}

/// Call data for `submitMessage(tokenId, key, text, metadata)`.
pub fn submit_message(token_id: u64, key: &ChannelKey, text: &str, metadata: U256) -> Bytes {
    encode_call(
        Function::SubmitMessage.selector(),
        &[
            Token::from(token_id),
            Token::from(*key),
            Token::from(text),
            Token::from(metadata),
        ],
    )
}

/// Call data for `storeString(tokenId, key, data)`.
pub fn store_string(token_id: u64, key: &ChannelKey, data: &str) -> Bytes {
    encode_call(
        Function::StoreString.selector(),
        &[Token::from(token_id), Token::from(*key), Token::from(data)],
    )
}

/// Call data for `removeData(tokenId, key)`.
pub fn remove_data(token_id: u64, key: &ChannelKey) -> Bytes {
    encode_call(
        Function::RemoveData.selector(),
        &[Token::from(token_id), Token::from(*key)],
    )
}

/// Read wrappers bound to a transport and a deployment.
#[derive(Debug, Clone)]
pub struct Contracts<T> {
    transport: T,
    deployment: Deployment,
}

impl<T: Transport> Contracts<T> {
    pub fn new(transport: T, deployment: Deployment) -> Self {
        Self {
            transport,
            deployment,
        }
    }

    pub fn deployment(&self) -> &Deployment {
        &self.deployment
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// `ownerOf(tokenId)` on the NFT contract.
    pub fn owner_of(&self, token_id: u64) -> Result<Address> {
        let mut out = self.read(Function::OwnerOf, &[Token::from(token_id)])?;
        take(&mut out, "address", Token::into_address)
    }

    /// `getMessageCount(key)`.
    pub fn get_message_count(&self, key: &ChannelKey) -> Result<u64> {
        let mut out = self.read(Function::GetMessageCount, &[Token::from(*key)])?;
        let count = take(&mut out, "uint256", Token::into_uint)?;
        count.to_u64().ok_or_else(|| {
            AbiError::ValueOutOfRange {
                ty: "uint64".to_string(),
            }
            .into()
        })
    }

    /// `getMessage(key, index)`.
    ///
    /// A revert is reported as [`ClientError::IndexOutOfRange`].
    pub fn get_message(&self, key: &ChannelKey, index: u64) -> Result<Message> {
        let args = [Token::from(*key), Token::from(index)];
        let mut out = match self.read(Function::GetMessage, &args) {
            Err(ClientError::Transport(err)) if err.is_revert() => {
                tracing::debug!(index, key = %key, "getMessage reverted");
                return Err(ClientError::IndexOutOfRange { index });
            }
            other => other?,
        };
        let fields = take(&mut out, "message tuple", Token::into_tuple)?;
        Ok(Message::from_tokens(index, fields)?)
    }

    /// `getStringOrDefault(tokenId, key, default)`. Missing data yields `default`.
    pub fn get_string_or_default(
        &self,
        token_id: u64,
        key: &ChannelKey,
        default: &str,
    ) -> Result<String> {
        let mut out = self.read(
            Function::GetStringOrDefault,
            &[Token::from(token_id), Token::from(*key), Token::from(default)],
        )?;
        take(&mut out, "string", Token::into_string)
    }

    /// `hasData(tokenId, key)`.
    pub fn has_data(&self, token_id: u64, key: &ChannelKey) -> Result<bool> {
        let mut out = self.read(
            Function::HasData,
            &[Token::from(token_id), Token::from(*key)],
        )?;
        take(&mut out, "bool", Token::into_bool)
    }

    fn read(&self, function: Function, args: &[Token]) -> Result<Vec<Token>> {
        let to = self.deployment.address_of(function.contract());
        let selector = function.selector();
        let data = encode_call(selector, args);
        tracing::debug!(function = function.name(), selector = %selector, to = %to, "contract read");

        let raw = self.transport.call(&to, &data)?;
        tracing::trace!(function = function.name(), response_bytes = raw.len(), "contract response");
        Ok(decode_tuple(&raw, &function.outputs())?)
    }
}

/// Pop the single return value and check its shape.
fn take<V>(
    tokens: &mut Vec<Token>,
    expected: &'static str,
    convert: impl FnOnce(Token) -> Option<V>,
) -> Result<V> {
    tokens
        .pop()
        .and_then(convert)
        .ok_or(ClientError::MalformedResponse(AbiError::UnexpectedToken {
            expected,
        }))
}
