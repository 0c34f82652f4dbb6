//! Cryptographic key types for wallet identity and signing.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::MycoinError;

/// A secp256k1 public key in SEC1 uncompressed form (`04 || X || Y`).
///
/// Only the encoding is checked here; whether the point lies on the curve is
/// checked by `mycoin-crypto` when the key is used.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PublicKey(pub [u8; 65]);

/// A 32-byte secp256k1 private key (secret scalar).
///
/// This type intentionally does not implement `Debug`, `Serialize`, or `Clone`
/// to prevent accidental exposure. Key bytes are zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey(pub [u8; 32]);

/// A 64-byte BIP-39 seed. Zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Seed(pub [u8; 64]);

/// A DER-encoded ECDSA signature. Empty means "not signed yet".
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Signature(pub Vec<u8>);

/// A secp256k1 key pair (public + private).
///
/// Use `mycoin_crypto::keypair_from_seed()` or `mycoin_crypto::keypair_from_private()`
/// to construct key pairs. This struct is intentionally just data.
pub struct KeyPair {
    pub public: PublicKey,
    pub private: PrivateKey,
}

impl PublicKey {
    /// Length of an uncompressed SEC1 point.
    pub const LEN: usize = 65;

    pub fn as_bytes(&self) -> &[u8; 65] {
        &self.0
    }

    /// Lowercase hex of the uncompressed point (130 characters).
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse a 130-character uncompressed hex public key.
    pub fn from_hex(s: &str) -> Result<Self, MycoinError> {
        let bytes = hex::decode(s.trim()).map_err(|e| MycoinError::InvalidHex(e.to_string()))?;
        let arr: [u8; 65] = bytes.try_into().map_err(|v: Vec<u8>| {
            MycoinError::InvalidPublicKey(format!("expected 65 bytes, got {}", v.len()))
        })?;
        if arr[0] != 0x04 {
            return Err(MycoinError::InvalidPublicKey(
                "expected uncompressed point (0x04 prefix)".to_string(),
            ));
        }
        Ok(Self(arr))
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

impl Seed {
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }
}

impl Signature {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, MycoinError> {
        hex::decode(s.trim())
            .map(Self)
            .map_err(|e| MycoinError::InvalidSignature(e.to_string()))
    }
}

// Signatures travel as hex strings; unsigned inputs carry "".
impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
