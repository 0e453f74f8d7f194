//! Contract ABI codec and channel key derivation for OK Computers.
//!
//! This is the protocol-correctness layer of okcomputer. It owns:
//! - Channel key derivation (keccak-256 over the UTF-8 channel name)
//! - Call data encoding: a 4-byte selector followed by 32-byte head slots,
//!   with dynamic values placed in a trailing tail region
//! - Bounds-checked decoding of return data into typed [`Token`]s
//!
//! Nothing here performs I/O.

pub mod channel;
pub mod decode;
pub mod encode;
pub mod error;
pub mod primitives;
pub mod token;

pub use channel::{
    derive_key, describe_channel, email_channel, parse_email_channel, ANNOUNCEMENT, BOARD, GM,
    MESSAGE_CHANNELS, OK, PAGE, SUGGEST, USERNAME, WELL_KNOWN_CHANNELS,
};
pub use decode::{decode, decode_tuple};
pub use encode::{encode, encode_call, WORD_SIZE};
pub use error::{AbiError, Result};
pub use primitives::{from_hex, keccak256, to_hex, Address, ChannelKey, Selector, U256};
pub use token::{ParamType, Token};
