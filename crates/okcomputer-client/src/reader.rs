use std::ops::Range;

use okcomputer_abi::{derive_key, email_channel, Address, ChannelKey, MESSAGE_CHANNELS};
use okcomputer_transport::Transport;

use crate::calls::Contracts;
use crate::config::{Deployment, ReaderConfig};
use crate::error::Result;
use crate::model::{ChannelStats, Message, StoredKind, StoredString};

/// Result ordering for channel reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadOrder {
    /// Highest index first.
    #[default]
    NewestFirst,
    /// Ascending index order.
    OldestFirst,
}

/// Paginated reads over a transport.
///
/// Every read is a fresh snapshot: a later call may see messages appended in
/// between, and the count and message fetches of a single read are not
/// isolated from concurrent writers either.
#[derive(Debug, Clone)]
pub struct ChannelReader<T> {
    contracts: Contracts<T>,
    config: ReaderConfig,
}

impl<T: Transport> ChannelReader<T> {
    /// Reader for the mainnet deployment with default configuration.
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, Deployment::default(), ReaderConfig::default())
    }

    /// Reader with explicit deployment and configuration.
    pub fn with_config(transport: T, deployment: Deployment, config: ReaderConfig) -> Self {
        Self {
            contracts: Contracts::new(transport, deployment),
            config,
        }
    }

    /// The underlying typed call surface.
    pub fn contracts(&self) -> &Contracts<T> {
        &self.contracts
    }

    /// Current reader configuration.
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Wallet that owns `token_id`.
    pub fn owner_of(&self, token_id: u64) -> Result<Address> {
        self.contracts.owner_of(token_id)
    }

    /// Number of messages ever posted to `channel`.
    pub fn message_count(&self, channel: &str) -> Result<u64> {
        self.contracts.get_message_count(&derive_key(channel))
    }

    /// The last `count` messages of `channel`.
    ///
    /// `count` is clamped to the channel size. A zero `count` or an empty
    /// channel costs exactly one remote call (the count query).
    pub fn read_channel(&self, channel: &str, count: usize, order: ReadOrder) -> Result<Vec<Message>> {
        let key = derive_key(channel);
        let total = self.contracts.get_message_count(&key)?;
        let window = last_n(total, count);
        tracing::debug!(channel, total, start = window.start, end = window.end, "reading channel");

        if window.is_empty() {
            return Ok(Vec::new());
        }

        let mut messages = self.fetch_window(key, window)?;
        if order == ReadOrder::NewestFirst {
            messages.reverse();
        }
        Ok(messages)
    }

    /// Direct messages sent to `token_id`.
    pub fn read_emails(&self, token_id: u64, count: usize, order: ReadOrder) -> Result<Vec<Message>> {
        self.read_channel(&email_channel(token_id), count, order)
    }

    /// A stored string as a typed record.
    pub fn read_stored(&self, token_id: u64, kind: &StoredKind, default: &str) -> Result<StoredString> {
        let key = kind.key();
        let value = self.contracts.get_string_or_default(token_id, &key, default)?;
        Ok(StoredString {
            token_id,
            key_name: kind.key_name().to_string(),
            key,
            value,
        })
    }

    /// The value stored under `key_name`, or `default` when nothing is stored.
    pub fn read_stored_value(&self, token_id: u64, key_name: &str, default: &str) -> Result<String> {
        self.contracts
            .get_string_or_default(token_id, &derive_key(key_name), default)
    }

    /// Webpage HTML; empty when unset.
    pub fn read_page(&self, token_id: u64) -> Result<String> {
        Ok(self.read_stored(token_id, &StoredKind::Page, "")?.value)
    }

    /// Display name; empty when unset.
    pub fn read_username(&self, token_id: u64) -> Result<String> {
        Ok(self.read_stored(token_id, &StoredKind::Username, "")?.value)
    }

    /// Arbitrary data stored under `key_name`.
    pub fn read_data(&self, token_id: u64, key_name: &str, default: &str) -> Result<String> {
        self.read_stored_value(token_id, key_name, default)
    }

    /// Whether anything is stored under `key_name`.
    pub fn has_stored_value(&self, token_id: u64, key_name: &str) -> Result<bool> {
        self.contracts.has_data(token_id, &derive_key(key_name))
    }

    /// Message counts of the public message channels.
    ///
    /// Fails as a whole if any count fails; a failed count is never reported as zero.
    pub fn network_stats(&self) -> Result<Vec<ChannelStats>> {
        MESSAGE_CHANNELS
            .iter()
            .map(|channel| {
                Ok(ChannelStats {
                    channel: channel.to_string(),
                    messages: self.message_count(channel)?,
                })
            })
            .collect()
    }

    /// Fetch every index in `window`, in ascending order.
    fn fetch_window(&self, key: ChannelKey, window: Range<u64>) -> Result<Vec<Message>> {
        let workers = self.config.max_concurrency.max(1);
        let indices: Vec<u64> = window.collect();

        if workers == 1 || indices.len() == 1 {
            return indices
                .iter()
                .map(|index| self.contracts.get_message(&key, *index))
                .collect();
        }

        let chunk_size = indices.len().div_ceil(workers);
        std::thread::scope(|scope| {
            let handles: Vec<_> = indices
                .chunks(chunk_size)
                .map(|chunk| {
                    scope.spawn(move || {
                        chunk
                            .iter()
                            .map(|index| self.contracts.get_message(&key, *index))
                            .collect::<Result<Vec<_>>>()
                    })
                })
                .collect();

            let mut messages = Vec::with_capacity(indices.len());
            for handle in handles {
                match handle.join() {
                    Ok(part) => messages.extend(part?),
                    Err(panic) => std::panic::resume_unwind(panic),
                }
            }
            Ok(messages)
        })
    }
}

/// Index window of the last `count` of `total` messages.
fn last_n(total: u64, count: usize) -> Range<u64> {
    let count = u64::try_from(count).unwrap_or(u64::MAX);
    total.saturating_sub(count)..total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_is_clamped() {
        assert_eq!(last_n(3, 2), 1..3);
        assert_eq!(last_n(3, 3), 0..3);
        assert_eq!(last_n(3, 53), 0..3);
        assert_eq!(last_n(3, 0), 3..3);
        assert_eq!(last_n(0, 10), 0..0);
        assert_eq!(last_n(u64::MAX, usize::MAX), 0..u64::MAX);
    }

    #[test]
    fn newest_first_is_default() {
        assert_eq!(ReadOrder::default(), ReadOrder::NewestFirst);
    }
}
