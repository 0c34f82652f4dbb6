//! The "current wallet" slot owned by the caller.

use crate::error::WalletError;
use crate::wallet::Wallet;

/// Holds at most one open wallet.
///
/// Opening a wallet replaces the previous one, which is dropped and zeroized.
#[derive(Default)]
pub struct WalletSession {
    current: Option<Wallet>,
}

impl WalletSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `wallet` the current wallet.
    pub fn open(&mut self, wallet: Wallet) -> &Wallet {
        tracing::info!(address = %wallet.address, origin = ?wallet.origin, "wallet session opened");
        self.current.insert(wallet)
    }

    pub fn current(&self) -> Option<&Wallet> {
        self.current.as_ref()
    }

    /// The current wallet, or [`WalletError::NoWallet`].
    pub fn require(&self) -> Result<&Wallet, WalletError> {
        self.current.as_ref().ok_or(WalletError::NoWallet)
    }

    pub fn is_connected(&self) -> bool {
        self.current.is_some()
    }

    /// Close the current wallet, if any.
    pub fn clear(&mut self) {
        if let Some(wallet) = self.current.take() {
            tracing::info!(address = %wallet.address, "wallet session cleared");
        }
    }
}
