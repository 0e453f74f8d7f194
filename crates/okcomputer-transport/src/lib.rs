//! Read-only contract call transport.
//!
//! The codec layers above never talk to the network directly. They hand a
//! contract address and call data to a [`Transport`] and get raw return data
//! back. Any failure (network, HTTP status, JSON-RPC error, revert) surfaces as
//! a [`TransportError`], never as an empty successful response.
//!
//! [`HttpTransport`] (behind the `http` feature) implements the trait with a
//! blocking JSON-RPC `eth_call`.

pub mod config;
pub mod error;
pub mod rpc;
pub mod traits;

#[cfg(feature = "http")]
pub mod http;

pub use config::{RpcConfig, DEFAULT_BLOCK_TAG, DEFAULT_RPC_URL, DEFAULT_TIMEOUT};
pub use error::{Result, TransportError};
pub use traits::Transport;

#[cfg(feature = "http")]
pub use http::HttpTransport;
