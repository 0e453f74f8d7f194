//! Well-known channel names and storage key derivation.
//!
//! Channels and stored values share one key space: the contract indexes both
//! by `keccak256(bytes(name))`. A wrong key is not an error on the remote side;
//! it silently addresses a different channel.

use crate::primitives::{keccak256, ChannelKey};

/// Main message board.
pub const BOARD: &str = "board";

/// Daily good-morning posts.
pub const GM: &str = "gm";

/// Short affirmations.
pub const OK: &str = "ok";

/// Feature requests and ideas.
pub const SUGGEST: &str = "suggest";

/// Webpage HTML, served at `{tokenId}.okcomputers.eth.limo`.
pub const PAGE: &str = "page";

/// Display name.
pub const USERNAME: &str = "username";

/// Global announcements.
pub const ANNOUNCEMENT: &str = "announcement";

/// Channels that carry messages (as opposed to stored strings).
pub const MESSAGE_CHANNELS: [&str; 5] = [BOARD, GM, OK, SUGGEST, ANNOUNCEMENT];

/// Every fixed channel name; the `email_{tokenId}` family is not listed.
pub const WELL_KNOWN_CHANNELS: [&str; 7] = [BOARD, GM, OK, SUGGEST, PAGE, USERNAME, ANNOUNCEMENT];

const EMAIL_PREFIX: &str = "email_";

/// Derive the storage key for a channel or stored-value name.
///
/// Equivalent to Solidity `keccak256(abi.encodePacked(name))`.
pub fn derive_key(name: &str) -> ChannelKey {
    ChannelKey::new(keccak256(name.as_bytes()))
}

/// The inbox channel of a token.
pub fn email_channel(token_id: u64) -> String {
    format!("{EMAIL_PREFIX}{token_id}")
}

/// Returns the recipient token ID if `name` is an inbox channel.
pub fn parse_email_channel(name: &str) -> Option<u64> {
    let digits = name.strip_prefix(EMAIL_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Returns a human-readable description of a channel.
pub fn describe_channel(name: &str) -> Option<&'static str> {
    match name {
        BOARD => Some("Main message board - public posts visible to all"),
        GM => Some("Good morning channel - daily GM posts"),
        OK => Some("OK channel - short affirmations"),
        SUGGEST => Some("Suggestions channel - feature requests and ideas"),
        PAGE => Some("Webpage storage - HTML for {tokenId}.okcomputers.eth.limo"),
        USERNAME => Some("Display name storage"),
        ANNOUNCEMENT => Some("Global announcements (read-only for most)"),
        _ if parse_email_channel(name).is_some() => Some("Inbox of direct messages to a token"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;

    #[test]
    fn key_is_keccak_of_name() {
        assert_eq!(derive_key("").as_bytes(), &keccak256(b""));
        assert_eq!(derive_key(BOARD).as_bytes(), &keccak256(b"board"));
    }

    #[test]
    fn well_known_keys_are_distinct() {
        let keys: HashSet<_> = WELL_KNOWN_CHANNELS.iter().map(|n| derive_key(n)).collect();
        assert_eq!(keys.len(), WELL_KNOWN_CHANNELS.len());
    }

    #[test]
    fn email_channel_naming() {
        assert_eq!(email_channel(1399), "email_1399");
        assert_eq!(parse_email_channel("email_1399"), Some(1399));
        assert_eq!(parse_email_channel("email_"), None);
        assert_eq!(parse_email_channel("email_+1"), None);
        assert_eq!(parse_email_channel("board"), None);
        assert_ne!(derive_key(&email_channel(1)), derive_key(&email_channel(2)));
    }

    #[test]
    fn describes_known_channels_only() {
        for name in WELL_KNOWN_CHANNELS {
            assert!(describe_channel(name).is_some(), "{name} has no description");
        }
        assert!(describe_channel("email_42").is_some());
        assert!(describe_channel("random").is_none());
    }

    proptest! {
        #[test]
        fn derive_key_is_deterministic(name in ".*") {
            prop_assert_eq!(derive_key(&name), derive_key(&name.clone()));
        }

        #[test]
        fn distinct_names_give_distinct_keys(a in ".{0,64}", b in ".{0,64}") {
            prop_assume!(a != b);
            prop_assert_ne!(derive_key(&a), derive_key(&b));
        }
    }
}
