//! Fundamental types for the MyCoin wallet.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! keys, signatures, addresses, amounts, timestamps, and the transaction and block records
//! exchanged with the ledger.

pub mod address;
pub mod amount;
pub mod block;
pub mod error;
pub mod keys;
pub mod time;
pub mod transaction;

pub use address::Address;
pub use amount::Amount;
pub use block::{Block, ChainPage, TransactionPage};
pub use error::MycoinError;
pub use keys::{KeyPair, PrivateKey, PublicKey, Seed, Signature};
pub use time::Timestamp;
pub use transaction::{Transaction, TxIn, TxOut, UnspentTxOut};
