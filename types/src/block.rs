//! Block and pagination records served by the ledger's explorer endpoints.

use serde::{Deserialize, Serialize};

use crate::{Timestamp, Transaction};

/// A mined block as reported by the ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub index: u64,
    pub timestamp: Timestamp,
    pub transactions: Vec<Transaction>,
    pub previous_hash: String,
    pub nonce: u64,
    pub difficulty: u32,
    pub hash: String,
    /// Empty for the genesis block.
    #[serde(default)]
    pub miner_address: String,
}

/// One page of the chain, newest first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainPage {
    pub blocks: Vec<Block>,
    pub current_page: u32,
    pub total_pages: u32,
    pub total_blocks: u64,
}

/// One page of confirmed transactions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPage {
    pub transactions: Vec<Transaction>,
    pub current_page: u32,
    pub total_pages: u32,
    pub total_transactions: u64,
}
