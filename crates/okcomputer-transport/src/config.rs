use std::time::Duration;

/// Public Base mainnet endpoint.
pub const DEFAULT_RPC_URL: &str = "https://mainnet.base.org";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Reads are evaluated against the latest block.
pub const DEFAULT_BLOCK_TAG: &str = "latest";

/// Endpoint configuration for JSON-RPC transports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcConfig {
    /// JSON-RPC endpoint URL.
    pub url: String,
    /// Timeout for a single request, connect included.
    pub timeout: Duration,
    /// Block tag or number passed as the second `eth_call` parameter.
    pub block_tag: String,
}

impl RpcConfig {
    /// Default configuration pointed at `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_RPC_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            block_tag: DEFAULT_BLOCK_TAG.to_string(),
        }
    }
}
