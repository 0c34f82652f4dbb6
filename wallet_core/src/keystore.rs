//! Argon2id encrypted keystore for secp256k1 private keys.
//!
//! Encrypts a 32-byte private key with a user-chosen password:
//! 1. Argon2id derives a 32-byte encryption key from the password + random salt
//! 2. AES-256-GCM encrypts the private key with a random nonce
//! 3. The result is stored as a JSON file with all parameters for future decryption
//!
//! The `algo` field names the whole scheme (`argon2id-aes-256-gcm`). A future
//! scheme gets a new `algo` value; files written under an older value keep
//! decrypting as long as that value is still matched here.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use argon2::{Algorithm, Argon2, Params, Version};
use mycoin_types::{Address, PrivateKey, Timestamp};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::path::Path;
use zeroize::Zeroizing;

use crate::error::WalletError;

/// Current keystore file version.
pub const KEYSTORE_VERSION: u32 = 1;
/// Scheme identifier written to `crypto.algo`.
pub const KEYSTORE_ALGO: &str = "argon2id-aes-256-gcm";
/// Minimum length for a newly chosen keystore password.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Argon2id parameters: 64 MB memory, 3 iterations, 1 lane of parallelism.
const ARGON2_MEMORY_KIB: u32 = 65536; // 64 MB
const ARGON2_ITERATIONS: u32 = 3;
const ARGON2_PARALLELISM: u32 = 1;
const ARGON2_OUTPUT_LEN: usize = 32;

// Upper bounds accepted from a file, so a hostile keystore cannot demand
// unbounded memory or time.
const MAX_MEMORY_KIB: u32 = 1 << 20; // 1 GB
const MAX_ITERATIONS: u32 = 64;
const MAX_PARALLELISM: u32 = 16;

/// Salt length in bytes.
const SALT_LEN: usize = 32;
const MIN_SALT_LEN: usize = 8;
/// AES-GCM nonce length in bytes (96 bits).
const NONCE_LEN: usize = 12;

/// The top-level keystore file structure, serializable to/from JSON.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KeystoreFile {
    #[serde(default = "default_version")]
    pub version: u32,
    /// Address of the encrypted key.
    pub address: Address,
    pub crypto: KeystoreCrypto,
}

/// The crypto section of the keystore, containing all encryption parameters.
///
/// Only `ciphertext` and `algo` are required by the file format; the other
/// fields are required by the `argon2id-aes-256-gcm` scheme.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KeystoreCrypto {
    /// Hex-encoded ciphertext (key + 16-byte GCM tag).
    pub ciphertext: String,
    pub algo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kdf_params: Option<KdfParams>,
    /// Hex-encoded salt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salt: Option<String>,
    /// Hex-encoded nonce.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
}

/// KDF parameters for Argon2id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdfParams {
    /// Memory cost in KiB.
    pub memory: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            memory: ARGON2_MEMORY_KIB,
            iterations: ARGON2_ITERATIONS,
            parallelism: ARGON2_PARALLELISM,
        }
    }
}

impl KdfParams {
    fn check_bounds(&self) -> Result<(), WalletError> {
        if self.memory > MAX_MEMORY_KIB
            || self.iterations == 0
            || self.iterations > MAX_ITERATIONS
            || self.parallelism == 0
            || self.parallelism > MAX_PARALLELISM
        {
            return Err(WalletError::MalformedKeystore(format!(
                "kdf parameters out of range: {:?}",
                self
            )));
        }
        Ok(())
    }
}

fn default_version() -> u32 {
    KEYSTORE_VERSION
}

/// Encrypt a private key with a password using the default Argon2id parameters.
pub fn encrypt_keystore(
    private_key: &PrivateKey,
    password: &str,
) -> Result<KeystoreFile, WalletError> {
    encrypt_keystore_with_params(private_key, password, KdfParams::default())
}

/// Encrypt a private key with a password using explicit Argon2id parameters.
pub fn encrypt_keystore_with_params(
    private_key: &PrivateKey,
    password: &str,
    params: KdfParams,
) -> Result<KeystoreFile, WalletError> {
    let public = mycoin_crypto::public_from_private(private_key)?;
    let address = mycoin_crypto::derive_address(&public);

    // Generate random salt and nonce
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);

    let mut nonce_bytes = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce_bytes);

    // Derive encryption key via Argon2id
    let derived_key = derive_key(password, &salt, &params)
        .map_err(|e| WalletError::Key(format!("Argon2 key derivation failed: {e}")))?;

    // Encrypt with AES-256-GCM
    let cipher = Aes256Gcm::new_from_slice(&derived_key[..])
        .map_err(|e| WalletError::Key(format!("AES key init failed: {}", e)))?;

    let nonce = Nonce::from_slice(&nonce_bytes);
    let ciphertext = cipher
        .encrypt(nonce, &private_key.0[..])
        .map_err(|e| WalletError::Key(format!("encryption failed: {}", e)))?;

    tracing::debug!(%address, algo = KEYSTORE_ALGO, "keystore encrypted");

    Ok(KeystoreFile {
        version: KEYSTORE_VERSION,
        address,
        crypto: KeystoreCrypto {
            ciphertext: hex::encode(&ciphertext),
            algo: KEYSTORE_ALGO.to_string(),
            kdf_params: Some(params),
            salt: Some(hex::encode(salt)),
            nonce: Some(hex::encode(nonce_bytes)),
        },
    })
}

/// Decrypt a keystore file with the given password, returning the private key.
///
/// Structural problems are `MalformedKeystore`; anything that means the
/// password did not open the file is `WrongPassword`. No partial key is ever
/// returned.
pub fn decrypt_keystore(
    keystore: &KeystoreFile,
    password: &str,
) -> Result<PrivateKey, WalletError> {
    if keystore.version != KEYSTORE_VERSION {
        return Err(WalletError::MalformedKeystore(format!(
            "unsupported keystore version: {}",
            keystore.version
        )));
    }

    let crypto = &keystore.crypto;
    if crypto.algo != KEYSTORE_ALGO {
        return Err(WalletError::MalformedKeystore(format!(
            "unsupported algo: {:?}",
            crypto.algo
        )));
    }
    if crypto.ciphertext.is_empty() {
        return Err(WalletError::MalformedKeystore("empty ciphertext".to_string()));
    }

    let params = crypto
        .kdf_params
        .ok_or_else(|| missing_field("crypto.kdf_params"))?;
    params.check_bounds()?;

    let salt = decode_field("crypto.salt", crypto.salt.as_deref())?;
    let nonce_bytes = decode_field("crypto.nonce", crypto.nonce.as_deref())?;
    let ciphertext = decode_field("crypto.ciphertext", Some(&crypto.ciphertext))?;

    if nonce_bytes.len() != NONCE_LEN {
        return Err(WalletError::MalformedKeystore(format!(
            "invalid nonce length: expected {}, got {}",
            NONCE_LEN,
            nonce_bytes.len()
        )));
    }
    if salt.len() < MIN_SALT_LEN {
        return Err(WalletError::MalformedKeystore(format!(
            "salt too short: {} bytes",
            salt.len()
        )));
    }

    // Derive the same encryption key from password + salt
    let derived_key = derive_key(password, &salt, &params)
        .map_err(|e| WalletError::MalformedKeystore(format!("kdf rejected parameters: {e}")))?;

    // Decrypt with AES-256-GCM
    let cipher = Aes256Gcm::new_from_slice(&derived_key[..])
        .map_err(|e| WalletError::Key(format!("AES key init failed: {}", e)))?;

    let nonce = Nonce::from_slice(&nonce_bytes);
    let plaintext = Zeroizing::new(
        cipher
            .decrypt(nonce, &ciphertext[..])
            .map_err(|_| WalletError::WrongPassword)?,
    );

    if plaintext.len() != 32 {
        return Err(WalletError::WrongPassword);
    }

    let mut key = PrivateKey([0u8; 32]);
    key.0.copy_from_slice(&plaintext);

    let public = mycoin_crypto::public_from_private(&key).map_err(|_| WalletError::WrongPassword)?;
    let address = mycoin_crypto::derive_address(&public);
    if address != keystore.address {
        return Err(WalletError::MalformedKeystore(format!(
            "decrypted key belongs to {address}, file claims {}",
            keystore.address
        )));
    }

    tracing::debug!(%address, "keystore decrypted");
    Ok(key)
}

/// Check a newly chosen password and its confirmation.
///
/// Both are trimmed; the password must be at least [`MIN_PASSWORD_LEN`]
/// characters and the two must match.
pub fn validate_new_password(password: &str, confirmation: &str) -> Result<(), WalletError> {
    let password = password.trim();
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(WalletError::WeakPassword(format!(
            "password length must be at least {MIN_PASSWORD_LEN}"
        )));
    }
    if password != confirmation.trim() {
        return Err(WalletError::WeakPassword("passwords don't match".to_string()));
    }
    Ok(())
}

/// Parse a keystore from its JSON text.
pub fn parse_keystore(json: &str) -> Result<KeystoreFile, WalletError> {
    serde_json::from_str(json)
        .map_err(|e| WalletError::MalformedKeystore(format!("invalid keystore JSON: {}", e)))
}

/// Serialize a keystore to pretty JSON.
pub fn keystore_to_json(keystore: &KeystoreFile) -> Result<String, WalletError> {
    serde_json::to_string_pretty(keystore)
        .map_err(|e| WalletError::Key(format!("JSON serialization failed: {}", e)))
}

/// Conventional download file name: `UTC--<secs>--<address>.json`.
pub fn keystore_file_name(keystore: &KeystoreFile, created: Timestamp) -> String {
    format!("UTC--{}--{}.json", created.as_secs(), keystore.address)
}

/// Save a keystore to a JSON file.
pub fn save_keystore(keystore: &KeystoreFile, path: &Path) -> Result<(), WalletError> {
    let json = keystore_to_json(keystore)?;
    std::fs::write(path, json)?;
    tracing::info!(path = %path.display(), address = %keystore.address, "keystore written");
    Ok(())
}

/// Load a keystore from a JSON file.
pub fn load_keystore(path: &Path) -> Result<KeystoreFile, WalletError> {
    let json = std::fs::read_to_string(path)?;
    parse_keystore(&json)
}

/// Derive a 32-byte key from a password and salt using Argon2id.
fn derive_key(
    password: &str,
    salt: &[u8],
    params: &KdfParams,
) -> Result<Zeroizing<[u8; 32]>, argon2::Error> {
    let params = Params::new(
        params.memory,
        params.iterations,
        params.parallelism,
        Some(ARGON2_OUTPUT_LEN),
    )?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut output = Zeroizing::new([0u8; 32]);
    argon2.hash_password_into(password.as_bytes(), salt, &mut output[..])?;
    Ok(output)
}

fn missing_field(name: &str) -> WalletError {
    WalletError::MalformedKeystore(format!("missing field {name}"))
}

fn decode_field(name: &str, value: Option<&str>) -> Result<Vec<u8>, WalletError> {
    let value = value.ok_or_else(|| missing_field(name))?;
    hex::decode(value).map_err(|e| WalletError::MalformedKeystore(format!("invalid {name} hex: {e}")))
}
