//! Top-level error type shared across crates.

use thiserror::Error;

/// Errors raised while parsing or validating the fundamental types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MycoinError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid signature encoding: {0}")]
    InvalidSignature(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("invalid hex: {0}")]
    InvalidHex(String),
}
