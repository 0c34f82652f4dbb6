use mycoin_types::Amount;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransactionError {
    #[error("transaction has no inputs")]
    NoInputs,

    #[error("input {tx_out_id}:{tx_out_index} references an unknown unspent output")]
    UnknownInput { tx_out_id: String, tx_out_index: u32 },

    #[error("input {tx_out_id}:{tx_out_index} is spent twice")]
    DuplicateInput { tx_out_id: String, tx_out_index: u32 },

    #[error("invalid signature on input {index} of transaction {tx_id}")]
    InvalidSignature { tx_id: String, index: usize },

    #[error("transaction id {actual} does not match its contents (expected {expected})")]
    IdMismatch { expected: String, actual: String },

    #[error("outputs ({outputs}) exceed referenced inputs ({inputs})")]
    OutputsExceedInputs { outputs: Amount, inputs: Amount },

    #[error("output {position} carries index {index}")]
    OutputIndexMismatch { position: usize, index: u32 },

    #[error("public key does not own address {0}")]
    NotOwner(String),
}
