//! CLI configuration with TOML file support.

use std::path::{Path, PathBuf};

use mycoin_crypto::WordCount;
use mycoin_types::Amount;
use mycoin_utils::LogFormat;
use mycoin_wallet_core::{KdfParams, DEFAULT_FAUCET_AMOUNT, DEFAULT_LEDGER_URL};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {reason}")]
    Io { path: PathBuf, reason: String },

    #[error("invalid config: {0}")]
    Parse(String),

    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// Settings for the `mycoin` tool.
///
/// Loaded from a TOML file via [`CliConfig::from_toml_file`]; every field has
/// a default so an empty file is valid. Command-line flags and `MYCOIN_*`
/// environment variables are applied on top by the caller.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CliConfig {
    /// Base URL of the ledger service.
    #[serde(default = "default_ledger_url")]
    pub ledger_url: String,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Where new keystore files are written.
    #[serde(default = "default_keystore_dir")]
    pub keystore_dir: PathBuf,

    /// Words in a newly generated phrase: 12 or 24.
    #[serde(default = "default_word_count")]
    pub default_word_count: usize,

    /// Argon2id memory cost in KiB for new keystores.
    #[serde(default = "default_kdf_memory_kib")]
    pub kdf_memory_kib: u32,

    #[serde(default = "default_kdf_iterations")]
    pub kdf_iterations: u32,

    #[serde(default = "default_kdf_parallelism")]
    pub kdf_parallelism: u32,

    /// Amount requested by `mycoin faucet` when `--amount` is not given.
    #[serde(default = "default_faucet_amount")]
    pub faucet_amount: Amount,
}

// ── Defaults ───────────────────────────────────────────────────────────

fn default_ledger_url() -> String {
    DEFAULT_LEDGER_URL.to_string()
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_keystore_dir() -> PathBuf {
    PathBuf::from("./keystores")
}

fn default_word_count() -> usize {
    12
}

fn default_kdf_memory_kib() -> u32 {
    KdfParams::default().memory
}

fn default_kdf_iterations() -> u32 {
    KdfParams::default().iterations
}

fn default_kdf_parallelism() -> u32 {
    KdfParams::default().parallelism
}

fn default_faucet_amount() -> Amount {
    DEFAULT_FAUCET_AMOUNT
}

// ── Impl ───────────────────────────────────────────────────────────────

impl CliConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn log_format(&self) -> Result<LogFormat, ConfigError> {
        self.log_format
            .parse()
            .map_err(|e: mycoin_utils::UnknownLogFormat| ConfigError::Invalid(e.to_string()))
    }

    pub fn word_count(&self) -> Result<WordCount, ConfigError> {
        WordCount::from_words(self.default_word_count).ok_or_else(|| {
            ConfigError::Invalid(format!(
                "default_word_count must be 12 or 24, got {}",
                self.default_word_count
            ))
        })
    }

    pub fn kdf_params(&self) -> KdfParams {
        KdfParams {
            memory: self.kdf_memory_kib,
            iterations: self.kdf_iterations,
            parallelism: self.kdf_parallelism,
        }
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            ledger_url: default_ledger_url(),
            log_format: default_log_format(),
            log_level: default_log_level(),
            keystore_dir: default_keystore_dir(),
            default_word_count: default_word_count(),
            kdf_memory_kib: default_kdf_memory_kib(),
            kdf_iterations: default_kdf_iterations(),
            kdf_parallelism: default_kdf_parallelism(),
            faucet_amount: default_faucet_amount(),
        }
    }
}
