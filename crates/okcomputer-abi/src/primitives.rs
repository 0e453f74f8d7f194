//! Fixed-width primitive values used on the wire.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use sha3::{Digest, Keccak256};

use crate::error::{AbiError, Result};

/// Keccak-256 (the pre-standard SHA-3 variant used by the EVM).
pub fn keccak256(data: impl AsRef<[u8]>) -> [u8; 32] {
    let digest = Keccak256::digest(data.as_ref());
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    out
}

/// Lowercase hex with a `0x` prefix.
pub fn to_hex(data: impl AsRef<[u8]>) -> String {
    format!("0x{}", hex::encode(data.as_ref()))
}

/// Parse hex with or without a `0x` prefix.
pub fn from_hex(input: &str) -> Result<Vec<u8>> {
    let digits = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input);
    Ok(hex::decode(digits)?)
}

/// A 20-byte account or contract address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Address([u8; 20]);

impl Address {
    pub const ZERO: Address = Address([0u8; 20]);

    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// EIP-55 mixed-case checksum encoding.
    ///
    /// Each hex letter is uppercased when the matching nibble of
    /// `keccak256(lowercase_hex)` is 8 or greater.
    pub fn to_checksum(&self) -> String {
        let lower = hex::encode(self.0);
        let hash = keccak256(lower.as_bytes());

        let mut out = String::with_capacity(42);
        out.push_str("0x");
        for (i, c) in lower.chars().enumerate() {
            let byte = hash[i / 2];
            let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
            if c.is_ascii_alphabetic() && nibble >= 8 {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
        }
        out
    }
}

impl FromStr for Address {
    type Err = AbiError;

    /// Accepts any letter case; the checksum is not enforced.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        if digits.len() != 40 {
            return Err(AbiError::InvalidAddress(s.to_string()));
        }
        let mut bytes = [0u8; 20];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|_| AbiError::InvalidAddress(s.to_string()))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_checksum())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_checksum())
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_checksum())
    }
}

/// A 256-bit unsigned integer stored as 32 big-endian bytes.
///
/// Only the conversions the contracts need are provided; there is no arithmetic.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct U256([u8; 32]);

impl U256 {
    pub const ZERO: U256 = U256([0u8; 32]);

    pub const fn from_be_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn to_be_bytes(&self) -> [u8; 32] {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    /// Number of significant bits.
    pub fn bits(&self) -> usize {
        match self.0.iter().position(|b| *b != 0) {
            Some(i) => (32 - i) * 8 - self.0[i].leading_zeros() as usize,
            None => 0,
        }
    }

    /// Returns `None` when the value needs more than 64 bits.
    pub fn to_u64(&self) -> Option<u64> {
        if self.bits() > 64 {
            return None;
        }
        let mut low = [0u8; 8];
        low.copy_from_slice(&self.0[24..]);
        Some(u64::from_be_bytes(low))
    }

    /// Returns `None` when the value does not fit in `usize`.
    pub fn to_usize(&self) -> Option<usize> {
        self.to_u64().and_then(|v| usize::try_from(v).ok())
    }
}

impl From<u64> for U256 {
    fn from(value: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[24..].copy_from_slice(&value.to_be_bytes());
        Self(bytes)
    }
}

impl From<usize> for U256 {
    fn from(value: usize) -> Self {
        Self::from(value as u64)
    }
}

impl fmt::Display for U256 {
    /// Decimal, by repeated long division of the byte array by 10.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("0");
        }
        let mut n = self.0;
        let mut digits = Vec::with_capacity(78);
        while n.iter().any(|b| *b != 0) {
            let mut rem = 0u32;
            for byte in n.iter_mut() {
                let cur = (rem << 8) | u32::from(*byte);
                *byte = (cur / 10) as u8;
                rem = cur % 10;
            }
            digits.push(b'0' + rem as u8);
        }
        digits.reverse();
        f.write_str(std::str::from_utf8(&digits).map_err(|_| fmt::Error)?)
    }
}

impl fmt::Debug for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U256({self})")
    }
}

impl Serialize for U256 {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The 32-byte storage key of a channel or stored value.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelKey([u8; 32]);

impl ChannelKey {
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for ChannelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_hex(self.0))
    }
}

impl fmt::Debug for ChannelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChannelKey({})", to_hex(self.0))
    }
}

impl Serialize for ChannelKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&to_hex(self.0))
    }
}

/// The 4-byte function identifier at the start of call data.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selector([u8; 4]);

impl Selector {
    pub const fn new(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// First four bytes of `keccak256(signature)`.
    ///
    /// The signature must be canonical: no spaces, no parameter names,
    /// `uint256` rather than `uint`.
    pub fn from_signature(signature: &str) -> Self {
        let hash = keccak256(signature.as_bytes());
        Self([hash[0], hash[1], hash[2], hash[3]])
    }

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_hex(self.0))
    }
}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Selector({})", to_hex(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keccak_empty_input() {
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn selector_known_answers() {
        assert_eq!(
            Selector::from_signature("transfer(address,uint256)").as_bytes(),
            &[0xa9, 0x05, 0x9c, 0xbb]
        );
        assert_eq!(
            Selector::from_signature("balanceOf(address)").as_bytes(),
            &[0x70, 0xa0, 0x82, 0x31]
        );
    }

    #[test]
    fn checksum_vectors() {
        for expected in [
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
            "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
            "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
            "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
        ] {
            let parsed: Address = expected.to_lowercase().parse().unwrap();
            assert_eq!(parsed.to_checksum(), expected);
        }
    }

    #[test]
    fn address_parse_rejects_bad_input() {
        assert!("0x1234".parse::<Address>().is_err());
        assert!("0xzz2830932889c7fb5e5206287c43554e673dcc88"
            .parse::<Address>()
            .is_err());
        assert!("ce2830932889c7fb5e5206287c43554e673dcc88"
            .parse::<Address>()
            .is_ok());
    }

    #[test]
    fn u256_decimal_display() {
        assert_eq!(U256::ZERO.to_string(), "0");
        assert_eq!(U256::from(8453u64).to_string(), "8453");
        assert_eq!(U256::from(u64::MAX).to_string(), "18446744073709551615");
        assert_eq!(
            U256::from_be_bytes([0xff; 32]).to_string(),
            "115792089237316195423570985008687907853269984665640564039457584007913129639935"
        );
    }

    #[test]
    fn u256_narrowing() {
        assert_eq!(U256::from(1399u64).to_u64(), Some(1399));
        let mut wide = [0u8; 32];
        wide[23] = 1;
        assert_eq!(U256::from_be_bytes(wide).to_u64(), None);
        assert_eq!(U256::from_be_bytes(wide).bits(), 65);
        assert_eq!(U256::ZERO.bits(), 0);
    }

    #[test]
    fn hex_helpers() {
        assert_eq!(to_hex([0xde, 0xad]), "0xdead");
        assert_eq!(from_hex("0xDEAD").unwrap(), vec![0xde, 0xad]);
        assert_eq!(from_hex("beef").unwrap(), vec![0xbe, 0xef]);
        assert!(from_hex("0xabc").is_err());
    }

    #[test]
    fn serializes_as_strings() {
        let addr: Address = "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed".parse().unwrap();
        assert_eq!(
            serde_json::to_string(&addr).unwrap(),
            "\"0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed\""
        );
        assert_eq!(serde_json::to_string(&U256::from(7u64)).unwrap(), "\"7\"");
    }
}
