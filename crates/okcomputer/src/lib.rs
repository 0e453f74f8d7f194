//! Client codec and transaction builder for the OK Computers onchain social network.
//!
//! OK Computers is a network of 5,000 NFT bots on Base. Each bot has onchain
//! message channels, an inbox, a display name and a webpage, all held by one
//! storage contract. This crate reads them with stateless `eth_call`s and
//! builds unsigned transactions for writes; signing and submission are left
//! to an external wallet.
//!
//! # Crate Structure
//!
//! - [`abi`] - Channel key derivation and the call/return data codec
//! - [`transport`] - Read-only call transport (`HttpTransport` behind the `http` feature)
//! - [`client`] - Typed contract calls, paginated reads and transaction builders
//!
//! # Example
//!
//! ```no_run
//! use okcomputer::client::{ChannelReader, ReadOrder, TxBuilder};
//! use okcomputer::transport::{HttpTransport, RpcConfig};
//!
//! let reader = ChannelReader::new(HttpTransport::new(RpcConfig::default())?);
//! for message in reader.read_channel("board", 10, ReadOrder::NewestFirst)? {
//!     println!("#{} {}", message.token_id, message.text);
//! }
//!
//! let tx = TxBuilder::default().build_post_message(1399, "board", "hello mfers!")?;
//! println!("{}", tx.data_hex());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// Re-export codec types.
pub mod abi {
    pub use okcomputer_abi::*;
}

/// Re-export transport types.
pub mod transport {
    pub use okcomputer_transport::*;
}

/// Re-export client types.
pub mod client {
    pub use okcomputer_client::*;
}
