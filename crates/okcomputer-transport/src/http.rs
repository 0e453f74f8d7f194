use std::sync::atomic::{AtomicU64, Ordering};

use bytes::Bytes;
use okcomputer_abi::Address;

use crate::config::RpcConfig;
use crate::error::{Result, TransportError};
use crate::rpc::{parse_eth_call_response, EthCallRequest};
use crate::traits::Transport;

/// Blocking JSON-RPC transport over HTTP(S).
///
/// Each call is one `eth_call` POST. There is no retry; the caller owns
/// retry and backoff policy.
#[derive(Debug)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    config: RpcConfig,
    next_id: AtomicU64,
}

impl HttpTransport {
    /// Build a transport for the configured endpoint.
    pub fn new(config: RpcConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("okcomputer/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            config,
            next_id: AtomicU64::new(1),
        })
    }

    /// Current transport configuration.
    pub fn config(&self) -> &RpcConfig {
        &self.config
    }
}

impl Transport for HttpTransport {
    fn call(&self, to: &Address, data: &[u8]) -> Result<Bytes> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = EthCallRequest::new(to, data, &self.config.block_tag, id);
        tracing::debug!(id, to = %to, call_bytes = data.len(), "eth_call");

        let response = self.client.post(&self.config.url).json(&request).send()?;
        let status = response.status();
        if !status.is_success() {
            tracing::debug!(id, status = status.as_u16(), "eth_call rejected");
            return Err(TransportError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes()?;
        tracing::trace!(id, body_bytes = body.len(), "eth_call response");
        parse_eth_call_response(&body)
    }
}
