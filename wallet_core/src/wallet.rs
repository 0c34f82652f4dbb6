//! The unlocked wallet: key pair, address and where the key came from.

use mycoin_crypto::{
    derive_address, derive_seed, generate_mnemonic, keypair_from_private, keypair_from_seed,
    parse_mnemonic, private_key_from_hex, private_key_to_hex, WordCount,
};
use mycoin_types::{
    Address, Amount, KeyPair, PrivateKey, PublicKey, Timestamp, Transaction, UnspentTxOut,
};
use zeroize::Zeroizing;

use crate::error::WalletError;
use crate::keystore::{decrypt_keystore, encrypt_keystore_with_params, KdfParams, KeystoreFile};
use crate::transaction_builder::{build_transaction, sign_transaction};

/// How the wallet's private key was obtained.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalletOrigin {
    Mnemonic,
    Keystore,
    PrivateKey,
}

/// Public part of the keystore the wallet was opened from or saved to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeystoreMeta {
    pub ciphertext: String,
    pub algo: String,
}

impl From<&KeystoreFile> for KeystoreMeta {
    fn from(file: &KeystoreFile) -> Self {
        Self {
            ciphertext: file.crypto.ciphertext.clone(),
            algo: file.crypto.algo.clone(),
        }
    }
}

/// A MyCoin wallet.
pub struct Wallet {
    /// Key pair used for signing.
    pub keys: KeyPair,
    /// Address derived from the public key.
    pub address: Address,
    pub origin: WalletOrigin,
    mnemonic: Option<Zeroizing<String>>,
    passphrase: Option<Zeroizing<String>>,
    pub keystore: Option<KeystoreMeta>,
}

impl Wallet {
    /// Create a wallet from a freshly generated mnemonic and no passphrase.
    pub fn generate(word_count: WordCount) -> Result<Self, WalletError> {
        let phrase = Zeroizing::new(generate_mnemonic(word_count)?);
        Self::from_mnemonic(&phrase, "")
    }

    /// Restore a wallet from a mnemonic phrase and optional passphrase.
    ///
    /// Both are trimmed. An invalid phrase never reaches seed derivation.
    pub fn from_mnemonic(phrase: &str, passphrase: &str) -> Result<Self, WalletError> {
        let mnemonic = parse_mnemonic(phrase)?;
        let seed = derive_seed(&mnemonic, passphrase);
        let keys = keypair_from_seed(&seed)?;
        let address = derive_address(&keys.public);

        tracing::info!(%address, words = mnemonic.word_count(), "wallet restored from mnemonic");

        let passphrase = passphrase.trim();
        Ok(Self {
            keys,
            address,
            origin: WalletOrigin::Mnemonic,
            mnemonic: Some(Zeroizing::new(mnemonic.to_string())),
            passphrase: (!passphrase.is_empty()).then(|| Zeroizing::new(passphrase.to_string())),
            keystore: None,
        })
    }

    /// Open a wallet from an encrypted keystore.
    pub fn from_keystore(file: &KeystoreFile, password: &str) -> Result<Self, WalletError> {
        let private = decrypt_keystore(file, password)?;
        let mut wallet = Self::from_private_key(private)?;
        wallet.origin = WalletOrigin::Keystore;
        wallet.keystore = Some(KeystoreMeta::from(file));
        tracing::info!(address = %wallet.address, "wallet opened from keystore");
        Ok(wallet)
    }

    /// Open a wallet from a hex-encoded private key, with or without `0x`.
    ///
    /// The key is used unmodified; out-of-range scalars are rejected.
    pub fn from_private_key_hex(hex: &str) -> Result<Self, WalletError> {
        let wallet = Self::from_private_key(private_key_from_hex(hex)?)?;
        tracing::info!(address = %wallet.address, "wallet opened from private key");
        Ok(wallet)
    }

    /// Open a wallet from a raw private key.
    pub fn from_private_key(private: PrivateKey) -> Result<Self, WalletError> {
        let keys = keypair_from_private(private)?;
        let address = derive_address(&keys.public);
        Ok(Self {
            keys,
            address,
            origin: WalletOrigin::PrivateKey,
            mnemonic: None,
            passphrase: None,
            keystore: None,
        })
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.keys.public
    }

    /// The recovery phrase, if the wallet was built from one.
    pub fn mnemonic(&self) -> Option<&str> {
        self.mnemonic.as_deref().map(String::as_str)
    }

    /// The extra word, if one was set.
    pub fn passphrase(&self) -> Option<&str> {
        self.passphrase.as_deref().map(String::as_str)
    }

    /// Hex form of the private key, for backup. Zeroized on drop.
    pub fn private_key_hex(&self) -> Zeroizing<String> {
        private_key_to_hex(&self.keys.private)
    }

    /// Encrypt the private key into a keystore with default KDF parameters.
    pub fn to_keystore(&mut self, password: &str) -> Result<KeystoreFile, WalletError> {
        self.to_keystore_with_params(password, KdfParams::default())
    }

    /// Encrypt the private key into a keystore and remember its metadata.
    pub fn to_keystore_with_params(
        &mut self,
        password: &str,
        params: KdfParams,
    ) -> Result<KeystoreFile, WalletError> {
        let file = encrypt_keystore_with_params(&self.keys.private, password, params)?;
        self.keystore = Some(KeystoreMeta::from(&file));
        Ok(file)
    }

    /// Sign the inputs of `tx` this wallet owns.
    pub fn sign_transaction(
        &self,
        tx: &mut Transaction,
        unspent: &[UnspentTxOut],
    ) -> Result<(), WalletError> {
        sign_transaction(tx, &self.keys.private, unspent)
    }

    /// Build and sign a transfer of `amount` to `to`.
    pub fn transfer(
        &self,
        to: &Address,
        amount: Amount,
        unspent: &[UnspentTxOut],
        timestamp: Timestamp,
    ) -> Result<Transaction, WalletError> {
        let mut tx = build_transaction(
            &self.address,
            to,
            amount,
            unspent,
            &self.keys.public,
            timestamp,
        )?;
        self.sign_transaction(&mut tx, unspent)?;
        tracing::info!(tx_id = %tx.id, from = %self.address, %to, %amount, "transfer ready");
        Ok(tx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mycoin_transactions::validate_transaction;

    const ABANDON: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    const FAST: KdfParams = KdfParams {
        memory: 1024,
        iterations: 1,
        parallelism: 1,
    };

    #[test]
    fn mnemonic_wallet_matches_known_address() {
        let wallet = Wallet::from_mnemonic(ABANDON, "").unwrap();
        assert_eq!(wallet.address.as_str(), "7a6e3b7894be12d1d1a666e1e1ceef780bbe6f75");
        assert_eq!(
            wallet.private_key_hex().as_str(),
            "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc1"
        );
        assert_eq!(wallet.origin, WalletOrigin::Mnemonic);
        assert_eq!(wallet.mnemonic(), Some(ABANDON));
        assert_eq!(wallet.passphrase(), None);
    }

    #[test]
    fn passphrase_changes_address() {
        let wallet = Wallet::from_mnemonic(ABANDON, "TREZOR").unwrap();
        assert_eq!(wallet.address.as_str(), "c87f3bbeadec4261af784b43cdfd5a35e48aab04");
        assert_eq!(wallet.passphrase(), Some("TREZOR"));
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let padded = Wallet::from_mnemonic(&format!("  {ABANDON}\n"), " TREZOR ").unwrap();
        assert_eq!(padded.address.as_str(), "c87f3bbeadec4261af784b43cdfd5a35e48aab04");
    }

    #[test]
    fn invalid_mnemonic_rejected() {
        let bad = ABANDON.replace("about", "abandon");
        assert!(matches!(
            Wallet::from_mnemonic(&bad, ""),
            Err(WalletError::InvalidMnemonic(_))
        ));
    }

    #[test]
    fn generated_wallets_are_unique() {
        let a = Wallet::generate(WordCount::Twelve).unwrap();
        let b = Wallet::generate(WordCount::TwentyFour).unwrap();
        assert_ne!(a.address, b.address);
        assert_eq!(b.mnemonic().map(|m| m.split_whitespace().count()), Some(24));
    }

    #[test]
    fn keystore_roundtrip_keeps_address() {
        let mut wallet = Wallet::from_mnemonic(ABANDON, "").unwrap();
        let file = wallet.to_keystore_with_params("password1", FAST).unwrap();
        assert!(wallet.keystore.is_some());

        let opened = Wallet::from_keystore(&file, "password1").unwrap();
        assert_eq!(opened.address, wallet.address);
        assert_eq!(opened.origin, WalletOrigin::Keystore);
        assert_eq!(opened.keystore, wallet.keystore);
        assert_eq!(opened.mnemonic(), None);
    }

    #[test]
    fn private_key_hex_roundtrip() {
        let wallet = Wallet::from_mnemonic(ABANDON, "").unwrap();
        let opened = Wallet::from_private_key_hex(&wallet.private_key_hex()).unwrap();
        assert_eq!(opened.address, wallet.address);
        assert_eq!(opened.origin, WalletOrigin::PrivateKey);
        assert_eq!(wallet.private_key_hex().len(), 64);
    }

    #[test]
    fn private_key_import_rejects_garbage() {
        assert!(matches!(Wallet::from_private_key_hex("xyz"), Err(WalletError::Key(_))));
        assert!(Wallet::from_private_key_hex(&"00".repeat(32)).is_err());
    }

    #[test]
    fn transfer_is_valid_for_the_ledger() {
        let wallet = Wallet::from_mnemonic(ABANDON, "").unwrap();
        let unspent = vec![UnspentTxOut {
            id: "ab".repeat(32),
            index: 0,
            address: wallet.address.clone(),
            amount: Amount::from(50),
        }];
        let to = Address::new("de113504a9c4e115aede71f2384ce2890465fee7");
        let tx = wallet
            .transfer(
                &to,
                Amount::from(20),
                &unspent,
                Timestamp::from_millis(1_700_000_000_000),
            )
            .unwrap();
        assert_eq!(tx.tx_outs[0].amount, Amount::from(20));
        assert_eq!(tx.tx_outs[1].amount, Amount::from(30));
        validate_transaction(&tx, &unspent).unwrap();
    }
}
