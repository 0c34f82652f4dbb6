//! Wallet address derivation from public keys.
//!
//! Address format: the last 40 hex characters of
//! `SHA-256(lowercase hex of the uncompressed public key)`.
//!
//! The hash input is the ASCII hex string, not the raw point bytes, and there
//! is no checksum or version byte. Both are part of the ledger's wire format
//! and must not change.

use mycoin_types::{Address, PublicKey};

use crate::hash::sha256_hex;

/// Derive the wallet address of a public key.
pub fn derive_address(public_key: &PublicKey) -> Address {
    let digest = sha256_hex(public_key.to_hex().as_bytes());
    Address::new(&digest[digest.len() - Address::LEN..])
}

/// Validate that an address string is well-formed.
///
/// Addresses carry no checksum, so this only checks the shape.
pub fn validate_address(address: &str) -> bool {
    Address::parse(address).is_ok()
}
