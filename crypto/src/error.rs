use thiserror::Error;

/// Errors arising from key derivation, mnemonic handling and signing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    #[error("invalid mnemonic phrase: {0}")]
    InvalidMnemonic(String),

    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("signing failed: {0}")]
    Signing(String),

    #[error("key derivation failed: {0}")]
    DerivationFailed(String),
}
