//! Address and network identifiers.
//!
//! `Address` normalizes the mixed-case (EIP-55 checksummed) and lowercase hex
//! forms seen on the wire into a fixed 20-byte value, so equality and map
//! lookups are case-insensitive by construction.

use std::fmt;
use std::str::FromStr;

use primitive_types::{H160, H256};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ParseError;

/// A 20-byte EVM account or contract address.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(H160);

impl Address {
    pub const fn new(inner: H160) -> Self {
        Self(inner)
    }

    /// Extracts the address from the low 20 bytes of a 32-byte word, as used
    /// by indexed event topics and ABI-encoded arguments.
    pub fn from_word(word: &H256) -> Self {
        Self(H160::from_slice(&word.as_bytes()[12..]))
    }

    /// The address left-padded into a 32-byte word (topic form).
    pub fn into_word(self) -> H256 {
        let mut word = H256::zero();
        word.as_bytes_mut()[12..].copy_from_slice(self.0.as_bytes());
        word
    }

    pub fn as_h160(&self) -> &H160 {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl FromStr for Address {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex_part = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if hex_part.len() != 40 {
            return Err(ParseError::InvalidAddress(s.to_string()));
        }
        let bytes =
            hex::decode(hex_part).map_err(|_| ParseError::InvalidAddress(s.to_string()))?;
        Ok(Self(H160::from_slice(&bytes)))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0.as_bytes()))
    }
}

impl From<H160> for Address {
    fn from(inner: H160) -> Self {
        Self(inner)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Identifier of the chain an entity belongs to (e.g. `"mainnet"`).
///
/// Asset catalogs and name lookups are scoped per network.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Network(String);

impl Network {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Network {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        let checksummed: Address = "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"
            .parse()
            .unwrap();
        let lowercase: Address = "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"
            .parse()
            .unwrap();
        assert_eq!(checksummed, lowercase);
    }

    #[test]
    fn test_display_is_lowercase() {
        let addr: Address = "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"
            .parse()
            .unwrap();
        assert_eq!(
            addr.to_string(),
            "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"
        );
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!("0x1234".parse::<Address>().is_err());
        assert!("not-an-address".parse::<Address>().is_err());
        assert!("0xzz2aaa39b223fe8d0a0e5c4f27ead9083c756cc2"
            .parse::<Address>()
            .is_err());
    }

    #[test]
    fn test_word_round_trip() {
        let addr: Address = "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"
            .parse()
            .unwrap();
        assert_eq!(Address::from_word(&addr.into_word()), addr);
    }

    #[test]
    fn test_serde_as_string() {
        let addr: Address = "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"
            .parse()
            .unwrap();
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2\"");
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }
}
