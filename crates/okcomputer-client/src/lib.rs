//! Typed contract calls, paginated reads and unsigned transaction builders.
//!
//! This is the layer applications use. Reads go through a [`ChannelReader`]
//! backed by any [`Transport`](okcomputer_transport::Transport); writes go
//! through a [`TxBuilder`] and come back as [`TransactionDescriptor`]s for an
//! external signer. The builder never touches the network.

pub mod builder;
pub mod calls;
pub mod config;
pub mod error;
pub mod model;
pub mod reader;

pub use builder::TxBuilder;
pub use calls::{remove_data, store_string, submit_message, Contract, Contracts, Function};
pub use config::{
    Deployment, Limits, ReaderConfig, BASE_CHAIN_ID, BASE_MAINNET, DEFAULT_MAX_MESSAGE_BYTES,
    MAX_DATA_BYTES, MAX_PAGE_BYTES, MAX_USERNAME_CHARS,
};
pub use error::{ClientError, Result};
pub use model::{ChannelStats, Message, StoredKind, StoredString, TransactionDescriptor};
pub use reader::{ChannelReader, ReadOrder};
