//! secp256k1 key derivation.
//!
//! Private keys are raw 32-byte scalars. A scalar outside `[1, n-1]` is an
//! error at every entry point; nothing is reduced or clamped.

use k256::ecdsa::{SigningKey, VerifyingKey};
use mycoin_types::{KeyPair, PrivateKey, PublicKey, Seed};
use rand::rngs::OsRng;
use zeroize::Zeroizing;

use crate::CryptoError;

/// Generate a new key pair from the OS random source.
pub fn generate_keypair() -> KeyPair {
    let signing_key = SigningKey::random(&mut OsRng);
    let public = encode_public(signing_key.verifying_key());
    KeyPair {
        public,
        private: PrivateKey(signing_key.to_bytes().into()),
    }
}

/// Derive the public key from a private key.
pub fn public_from_private(private: &PrivateKey) -> Result<PublicKey, CryptoError> {
    let signing_key = signing_key(private)?;
    Ok(encode_public(signing_key.verifying_key()))
}

/// Reconstruct a full key pair from a private key.
pub fn keypair_from_private(private: PrivateKey) -> Result<KeyPair, CryptoError> {
    let public = public_from_private(&private)?;
    Ok(KeyPair { public, private })
}

/// Derive a key pair from a BIP-39 seed (deterministic).
///
/// The first 32 bytes of the seed are used unmodified as the private scalar.
pub fn keypair_from_seed(seed: &Seed) -> Result<KeyPair, CryptoError> {
    let mut scalar = [0u8; 32];
    scalar.copy_from_slice(&seed.as_bytes()[..32]);
    keypair_from_private(PrivateKey(scalar))
}

/// Parse a hex private key (64 hex chars, optional `0x` prefix).
pub fn private_key_from_hex(s: &str) -> Result<PrivateKey, CryptoError> {
    let trimmed = s.trim();
    let body = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    let bytes = Zeroizing::new(
        hex::decode(body).map_err(|e| CryptoError::InvalidPrivateKey(e.to_string()))?,
    );
    if bytes.len() != 32 {
        return Err(CryptoError::InvalidPrivateKey(format!(
            "expected 32 bytes, got {}",
            bytes.len()
        )));
    }

    let mut key = PrivateKey([0u8; 32]);
    key.0.copy_from_slice(&bytes);
    signing_key(&key)?;
    Ok(key)
}

/// Encode a private key as 64 lowercase hex characters.
pub fn private_key_to_hex(private: &PrivateKey) -> Zeroizing<String> {
    Zeroizing::new(hex::encode(private.0))
}

/// Parse a public key and check that it is a point on the curve.
pub fn verifying_key(public: &PublicKey) -> Result<VerifyingKey, CryptoError> {
    VerifyingKey::from_sec1_bytes(public.as_bytes())
        .map_err(|_| CryptoError::InvalidPublicKey("not a point on secp256k1".to_string()))
}

pub(crate) fn signing_key(private: &PrivateKey) -> Result<SigningKey, CryptoError> {
    SigningKey::from_slice(&private.0).map_err(|_| {
        CryptoError::InvalidPrivateKey("scalar outside the secp256k1 group order".to_string())
    })
}

fn encode_public(verifying_key: &VerifyingKey) -> PublicKey {
    let point = verifying_key.to_encoded_point(false);
    let mut bytes = [0u8; 65];
    bytes.copy_from_slice(point.as_bytes());
    PublicKey(bytes)
}
