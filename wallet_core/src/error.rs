use mycoin_crypto::CryptoError;
use mycoin_transactions::TransactionError;
use mycoin_types::Amount;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    #[error("malformed keystore: {0}")]
    MalformedKeystore(String),

    #[error("wrong password")]
    WrongPassword,

    #[error("insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: Amount, available: Amount },

    #[error("recovery phrase verification failed")]
    VerificationFailed,

    #[error("operation not allowed in the {0} stage")]
    InvalidStage(&'static str),

    #[error("no option {option} for question {question}")]
    InvalidSelection { question: usize, option: usize },

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("signing key owns none of the transaction's inputs")]
    NoOwnedInputs,

    #[error("no wallet is open")]
    NoWallet,

    #[error("weak password: {0}")]
    WeakPassword(String),

    #[error("key error: {0}")]
    Key(String),

    #[error("transaction error: {0}")]
    Transaction(#[from] TransactionError),

    #[error("ledger error: {0}")]
    Ledger(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<CryptoError> for WalletError {
    fn from(err: CryptoError) -> Self {
        match err {
            CryptoError::InvalidMnemonic(msg) => Self::InvalidMnemonic(msg),
            other => Self::Key(other.to_string()),
        }
    }
}
