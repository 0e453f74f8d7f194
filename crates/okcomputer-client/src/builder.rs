use bytes::Bytes;
use okcomputer_abi::{derive_key, email_channel, U256};

use crate::calls::{remove_data, store_string, submit_message};
use crate::config::{Deployment, Limits};
use crate::error::{ClientError, Result};
use crate::model::{StoredKind, TransactionDescriptor};

/// Builds unsigned transactions for every mutating operation.
///
/// Pure and synchronous: the same inputs always produce the same descriptor.
/// Ownership is not checked here; the storage contract rejects writes from a
/// wallet that does not own the token.
#[derive(Debug, Clone, Default)]
pub struct TxBuilder {
    deployment: Deployment,
    limits: Limits,
}

impl TxBuilder {
    pub fn new(deployment: Deployment, limits: Limits) -> Self {
        Self { deployment, limits }
    }

    pub fn deployment(&self) -> &Deployment {
        &self.deployment
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Post `text` to `channel` as `token_id`.
    pub fn build_post_message(&self, token_id: u64, channel: &str, text: &str) -> Result<TransactionDescriptor> {
        check_size("message", text.len(), self.limits.max_message_bytes, "bytes")?;
        let data = submit_message(token_id, &derive_key(channel), text, U256::ZERO);
        Ok(self.descriptor(data))
    }

    /// Send a direct message from `from_token_id` to the inbox of `target_token_id`.
    pub fn build_send_email(
        &self,
        from_token_id: u64,
        target_token_id: u64,
        text: &str,
    ) -> Result<TransactionDescriptor> {
        self.build_post_message(from_token_id, &email_channel(target_token_id), text)
    }

    /// Set the display name of `token_id`.
    pub fn build_set_username(&self, token_id: u64, name: &str) -> Result<TransactionDescriptor> {
        check_size(
            "username",
            name.chars().count(),
            self.limits.max_username_chars,
            "characters",
        )?;
        Ok(self.store(token_id, &StoredKind::Username, name))
    }

    /// Set the webpage of `token_id`. The HTML itself is not validated.
    pub fn build_set_page(&self, token_id: u64, html: &str) -> Result<TransactionDescriptor> {
        check_size("page", html.len(), self.limits.max_page_bytes, "bytes")?;
        Ok(self.store(token_id, &StoredKind::Page, html))
    }

    /// Store arbitrary string data under `key_name`.
    pub fn build_store_data(&self, token_id: u64, key_name: &str, data: &str) -> Result<TransactionDescriptor> {
        check_size("data", data.len(), self.limits.max_data_bytes, "bytes")?;
        Ok(self.store(token_id, &StoredKind::from_key_name(key_name), data))
    }

    /// Remove whatever is stored under `key_name`.
    pub fn build_remove_data(&self, token_id: u64, key_name: &str) -> Result<TransactionDescriptor> {
        let data = remove_data(token_id, &derive_key(key_name));
        Ok(self.descriptor(data))
    }

    fn store(&self, token_id: u64, kind: &StoredKind, value: &str) -> TransactionDescriptor {
        self.descriptor(store_string(token_id, &kind.key(), value))
    }

    fn descriptor(&self, data: Bytes) -> TransactionDescriptor {
        TransactionDescriptor {
            to: self.deployment.storage,
            data,
            value: U256::ZERO,
            chain_id: self.deployment.chain_id,
        }
    }
}

fn check_size(field: &'static str, size: usize, max: usize, unit: &'static str) -> Result<()> {
    if size > max {
        tracing::debug!(field, size, max, "payload rejected");
        return Err(ClientError::PayloadTooLarge {
            field,
            size,
            max,
            unit,
        });
    }
    Ok(())
}
