//! Wallet address type.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::MycoinError;

/// A MyCoin wallet address: 40 lowercase hex characters.
///
/// Derived from the wallet's public key by SHA-256 over its uncompressed hex
/// encoding, keeping the last 40 characters. The derivation is one-way and
/// carries no checksum; the ledger matches addresses byte-for-byte.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// Number of hex characters in an address.
    pub const LEN: usize = 40;

    /// Create an address from a string already known to be well-formed.
    ///
    /// # Panics
    /// Panics if the string is not exactly 40 hex characters.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        assert!(is_well_formed(&s), "address must be 40 hex characters");
        Self(s.to_ascii_lowercase())
    }

    /// Parse an untrusted address string (surrounding whitespace ignored).
    pub fn parse(raw: &str) -> Result<Self, MycoinError> {
        let trimmed = raw.trim();
        if !is_well_formed(trimmed) {
            return Err(MycoinError::InvalidAddress(format!(
                "expected {} hex characters, got {:?}",
                Self::LEN,
                trimmed
            )));
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_well_formed(s: &str) -> bool {
    s.len() == Address::LEN && s.bytes().all(|b| b.is_ascii_hexdigit())
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Address {
    type Error = MycoinError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}

impl std::str::FromStr for Address {
    type Err = MycoinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
