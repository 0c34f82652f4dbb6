//! HTTP client for the MyCoin ledger service.
//!
//! Only public data crosses this boundary: addresses, public keys and signed
//! transactions. Private keys never leave the wallet.

use std::time::Duration;

use mycoin_types::{
    Address, Amount, ChainPage, PublicKey, Transaction, TransactionPage, UnspentTxOut,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::WalletError;

/// Ledger base URL used when none is configured.
pub const DEFAULT_LEDGER_URL: &str = "http://localhost:3000";
/// Amount requested from the faucet when none is given.
pub const DEFAULT_FAUCET_AMOUNT: Amount = Amount::from_coins(50);

/// HTTP client for communicating with a MyCoin ledger.
///
/// Wraps `reqwest::Client` with the ledger's base URL and provides typed
/// methods for each route the wallet needs.
#[derive(Clone)]
pub struct LedgerClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct BalanceResponse {
    #[serde(default)]
    balance: Amount,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FaucetRequest<'a> {
    address: &'a Address,
    public_key: &'a PublicKey,
    amount: Amount,
}

impl LedgerClient {
    /// Create a new client targeting the given base URL (e.g. `http://localhost:3000`).
    pub fn new(base_url: impl Into<String>) -> Result<Self, WalletError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| WalletError::Ledger(format!("failed to create HTTP client: {e}")))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    /// The configured ledger URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, WalletError> {
        tracing::debug!(path, "ledger GET");
        let response = self
            .http
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| WalletError::Ledger(format!("request failed: {e}")))?;
        Self::decode(path, response).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, WalletError> {
        tracing::debug!(path, "ledger POST");
        let response = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| WalletError::Ledger(format!("request failed: {e}")))?;
        Self::decode(path, response).await
    }

    async fn decode<T: DeserializeOwned>(
        path: &str,
        response: reqwest::Response,
    ) -> Result<T, WalletError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WalletError::Ledger(format!(
                "{path} returned HTTP {status}: {body}"
            )));
        }
        response
            .json()
            .await
            .map_err(|e| WalletError::Ledger(format!("invalid {path} response: {e}")))
    }

    /// Confirmed balance of an address.
    pub async fn balance(&self, address: &Address) -> Result<Amount, WalletError> {
        let resp: BalanceResponse = self
            .get_json(&format!("/address/{address}/balance"))
            .await?;
        Ok(resp.balance)
    }

    /// Unspent outputs owned by an address.
    pub async fn unspent_outputs(&self, address: &Address) -> Result<Vec<UnspentTxOut>, WalletError> {
        self.get_json(&format!("/address/{address}/unspent")).await
    }

    /// Transactions waiting to be mined.
    pub async fn pending_transactions(&self) -> Result<Vec<Transaction>, WalletError> {
        self.get_json("/pending").await
    }

    /// Submit a signed transaction. Returns the ledger's response body.
    pub async fn submit_transaction(
        &self,
        tx: &Transaction,
    ) -> Result<serde_json::Value, WalletError> {
        tracing::info!(tx_id = %tx.id, "submitting transaction");
        self.post_json("/transactions", tx).await
    }

    /// One page of blocks.
    pub async fn chain_page(&self, page: u32, limit: u32) -> Result<ChainPage, WalletError> {
        self.get_json(&format!("/chain?page={page}&limit={limit}"))
            .await
    }

    /// One page of confirmed transactions.
    pub async fn transaction_page(
        &self,
        page: u32,
        limit: u32,
    ) -> Result<TransactionPage, WalletError> {
        self.get_json(&format!("/transactions?page={page}&limit={limit}"))
            .await
    }

    /// Ask the faucet to fund an address.
    pub async fn faucet(
        &self,
        address: &Address,
        public_key: &PublicKey,
        amount: Amount,
    ) -> Result<serde_json::Value, WalletError> {
        tracing::info!(%address, %amount, "requesting faucet funds");
        let body = FaucetRequest {
            address,
            public_key,
            amount,
        };
        self.post_json("/faucet", &body).await
    }
}
