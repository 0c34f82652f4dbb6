//! Cryptographic primitives for the MyCoin wallet.
//!
//! - **BIP-39** mnemonics and PBKDF2 seed derivation
//! - **secp256k1** keys, with ECDSA signing and verification
//! - **SHA-256** for addresses and transaction ids
//! - Address derivation (last 40 hex chars of the public key hash)

pub mod address;
pub mod error;
pub mod hash;
pub mod keys;
pub mod mnemonic;
pub mod sign;

pub use address::{derive_address, validate_address};
pub use error::CryptoError;
pub use hash::{sha256, sha256_hex};
pub use keys::{
    generate_keypair, keypair_from_private, keypair_from_seed, private_key_from_hex,
    private_key_to_hex, public_from_private, verifying_key,
};
pub use mnemonic::{
    derive_seed, generate_mnemonic, mnemonic_words, parse_mnemonic, seed_from_phrase,
    validate_mnemonic, WordCount,
};
pub use sign::{sign_digest, verify_digest};
