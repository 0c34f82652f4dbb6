//! Wallet core library for MyCoin.
//!
//! Provides everything a wallet application needs:
//! - Wallet creation and restore (mnemonic + passphrase, keystore, raw key)
//! - The current-wallet session slot
//! - Recovery-phrase verification for new wallets
//! - Password-encrypted keystore files
//! - Transaction building and signing
//! - An HTTP client for the ledger service

pub mod error;
pub mod keystore;
pub mod ledger;
pub mod recovery;
pub mod session;
pub mod transaction_builder;
pub mod wallet;

pub use error::WalletError;
pub use keystore::{
    decrypt_keystore, encrypt_keystore, encrypt_keystore_with_params, load_keystore,
    parse_keystore, save_keystore, validate_new_password, KdfParams, KeystoreFile,
};
pub use ledger::{LedgerClient, DEFAULT_FAUCET_AMOUNT, DEFAULT_LEDGER_URL};
pub use recovery::{Question, Quiz, QuizOption, RecoveryChallenge, RecoveryStage};
pub use session::WalletSession;
pub use transaction_builder::{build_transaction, exclude_pending, select_unspent, sign_transaction};
pub use wallet::{KeystoreMeta, Wallet, WalletOrigin};
