use okcomputer_abi::Address;

use crate::calls::Contract;

/// Base mainnet.
pub const BASE_CHAIN_ID: u64 = 8453;

/// Webpage HTML cap: 64 KiB.
pub const MAX_PAGE_BYTES: usize = 64 * 1024;

/// Arbitrary stored data shares the page cap.
pub const MAX_DATA_BYTES: usize = 64 * 1024;

/// Display name cap, in characters.
pub const MAX_USERNAME_CHARS: usize = 16;

/// Per-message text cap, in bytes.
pub const DEFAULT_MAX_MESSAGE_BYTES: usize = 1024;

/// The production deployment.
pub const BASE_MAINNET: Deployment = Deployment {
    nft: Address::new([
        0xce, 0x28, 0x30, 0x93, 0x28, 0x89, 0xc7, 0xfb, 0x5e, 0x52, 0x06, 0x28, 0x7c, 0x43, 0x55,
        0x4e, 0x67, 0x3d, 0xcc, 0x88,
    ]),
    storage: Address::new([
        0x04, 0xd7, 0xc8, 0xb5, 0x12, 0xd5, 0x45, 0x5e, 0x20, 0xdf, 0x1e, 0x80, 0x8f, 0x12, 0xca,
        0xd1, 0xe3, 0xd7, 0x66, 0xe5,
    ]),
    chain_id: BASE_CHAIN_ID,
};

/// Where the two contracts live.
///
/// A redeployment with a different ABI needs a new [`Function`](crate::Function)
/// table as well as a new `Deployment`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deployment {
    /// Ownership registry (`ownerOf`).
    pub nft: Address,
    /// Message and key-value store.
    pub storage: Address,
    /// Chain ID written into every transaction descriptor.
    pub chain_id: u64,
}

impl Deployment {
    pub fn address_of(&self, contract: Contract) -> Address {
        match contract {
            Contract::Nft => self.nft,
            Contract::Storage => self.storage,
        }
    }
}

impl Default for Deployment {
    fn default() -> Self {
        BASE_MAINNET
    }
}

/// Payload limits enforced before a write is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum message text size in bytes.
    pub max_message_bytes: usize,
    /// Maximum webpage HTML size in bytes.
    pub max_page_bytes: usize,
    /// Maximum arbitrary data size in bytes.
    pub max_data_bytes: usize,
    /// Maximum username length in characters.
    pub max_username_chars: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_message_bytes: DEFAULT_MAX_MESSAGE_BYTES,
            max_page_bytes: MAX_PAGE_BYTES,
            max_data_bytes: MAX_DATA_BYTES,
            max_username_chars: MAX_USERNAME_CHARS,
        }
    }
}

/// Controls how the read pipeline dispatches message fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Upper bound on message fetches in flight. `1` fetches sequentially.
    pub max_concurrency: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self { max_concurrency: 1 }
    }
}
