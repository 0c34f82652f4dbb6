//! BIP-39 mnemonic generation, validation and seed derivation.
//!
//! Entropy comes only from the OS random source. The seed is standard BIP-39:
//! PBKDF2-HMAC-SHA512 over the NFKD-normalised phrase, salted with
//! `"mnemonic" || NFKD(passphrase)`, 2048 rounds, 64 bytes.

use bip39::{Language, Mnemonic};
use mycoin_types::Seed;
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

use crate::CryptoError;

/// Supported phrase lengths.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WordCount {
    /// 128 bits of entropy.
    #[default]
    Twelve,
    /// 256 bits of entropy.
    TwentyFour,
}

impl WordCount {
    pub fn words(self) -> usize {
        match self {
            Self::Twelve => 12,
            Self::TwentyFour => 24,
        }
    }

    pub fn entropy_bytes(self) -> usize {
        match self {
            Self::Twelve => 16,
            Self::TwentyFour => 32,
        }
    }

    /// Map a word count to the enum. Only 12 and 24 are supported.
    pub fn from_words(words: usize) -> Option<Self> {
        match words {
            12 => Some(Self::Twelve),
            24 => Some(Self::TwentyFour),
            _ => None,
        }
    }
}

/// Generate a new English mnemonic from fresh OS entropy.
pub fn generate_mnemonic(word_count: WordCount) -> Result<String, CryptoError> {
    let mut buf = Zeroizing::new([0u8; 32]);
    let entropy = &mut buf[..word_count.entropy_bytes()];
    OsRng.fill_bytes(entropy);

    let mnemonic = Mnemonic::from_entropy_in(Language::English, entropy)
        .map_err(|e| CryptoError::DerivationFailed(e.to_string()))?;
    Ok(mnemonic.to_string())
}

/// Parse and fully validate a phrase: dictionary, word count and checksum.
///
/// Surrounding whitespace is ignored. Only 12- and 24-word phrases are
/// accepted even though BIP-39 also defines 15, 18 and 21.
pub fn parse_mnemonic(phrase: &str) -> Result<Mnemonic, CryptoError> {
    let mnemonic = Mnemonic::parse_in(Language::English, phrase.trim())
        .map_err(|e| CryptoError::InvalidMnemonic(e.to_string()))?;
    if WordCount::from_words(mnemonic.word_count()).is_none() {
        return Err(CryptoError::InvalidMnemonic(format!(
            "expected 12 or 24 words, got {}",
            mnemonic.word_count()
        )));
    }
    Ok(mnemonic)
}

/// Validate that a phrase is a usable mnemonic.
pub fn validate_mnemonic(phrase: &str) -> bool {
    parse_mnemonic(phrase).is_ok()
}

/// Derive the 64-byte seed from a validated mnemonic and passphrase.
///
/// The passphrase is trimmed, then NFKD-normalised by the BIP-39 routine.
pub fn derive_seed(mnemonic: &Mnemonic, passphrase: &str) -> Seed {
    Seed(mnemonic.to_seed(passphrase.trim()))
}

/// Validate a phrase and derive its seed. Invalid phrases never reach the KDF.
pub fn seed_from_phrase(phrase: &str, passphrase: &str) -> Result<Seed, CryptoError> {
    let mnemonic = parse_mnemonic(phrase)?;
    Ok(derive_seed(&mnemonic, passphrase))
}

/// Split a phrase into its words.
pub fn mnemonic_words(phrase: &str) -> Vec<String> {
    phrase.split_whitespace().map(str::to_owned).collect()
}
