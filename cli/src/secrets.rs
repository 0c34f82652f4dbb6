//! Reading secrets and opening the wallet a command acts on.
//!
//! Secrets come from an environment variable when it is set, otherwise from
//! the next line of stdin. They are never taken from command-line flags and
//! never printed.

use std::io::BufRead;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Args;
use mycoin_wallet_core::{load_keystore, Wallet};
use zeroize::Zeroizing;

pub const MNEMONIC_VAR: &str = "MYCOIN_MNEMONIC";
pub const PASSPHRASE_VAR: &str = "MYCOIN_PASSPHRASE";
pub const PRIVATE_KEY_VAR: &str = "MYCOIN_PRIVATE_KEY";
pub const PASSWORD_VAR: &str = "MYCOIN_PASSWORD";
pub const NEW_PASSWORD_VAR: &str = "MYCOIN_NEW_PASSWORD";
pub const NEW_PASSWORD_CONFIRM_VAR: &str = "MYCOIN_NEW_PASSWORD_CONFIRM";

/// Where the wallet's key comes from.
#[derive(Args, Debug, Clone)]
pub struct WalletArgs {
    /// Open the wallet from this keystore file (password from MYCOIN_PASSWORD or stdin).
    #[arg(long, conflicts_with = "private_key")]
    pub keystore: Option<PathBuf>,

    /// Use a raw hex private key (from MYCOIN_PRIVATE_KEY or stdin) instead of a
    /// recovery phrase.
    #[arg(long)]
    pub private_key: bool,
}

/// Read a secret from `var`, or from one line of stdin when unset.
pub fn read_secret(var: &str, what: &str) -> anyhow::Result<Zeroizing<String>> {
    if let Ok(value) = std::env::var(var) {
        return Ok(Zeroizing::new(value));
    }
    read_line(&mut std::io::stdin().lock())
        .with_context(|| format!("reading {what} from stdin (or set {var})"))
}

/// Read an optional secret; unset means empty.
pub fn optional_secret(var: &str) -> Zeroizing<String> {
    Zeroizing::new(std::env::var(var).unwrap_or_default())
}

/// Read one line, without its line ending.
pub fn read_line(input: &mut impl BufRead) -> anyhow::Result<Zeroizing<String>> {
    let mut line = Zeroizing::new(String::new());
    if input.read_line(&mut line)? == 0 {
        bail!("unexpected end of input");
    }
    let trimmed = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(trimmed);
    Ok(line)
}

/// Open the wallet described by `args`.
pub fn open_wallet(args: &WalletArgs) -> anyhow::Result<Wallet> {
    if let Some(path) = &args.keystore {
        let file = load_keystore(path)
            .with_context(|| format!("loading keystore {}", path.display()))?;
        let password = read_secret(PASSWORD_VAR, "keystore password")?;
        return Wallet::from_keystore(&file, &password).context("opening keystore");
    }

    if args.private_key {
        let key = read_secret(PRIVATE_KEY_VAR, "private key")?;
        return Wallet::from_private_key_hex(&key).context("importing private key");
    }

    let phrase = read_secret(MNEMONIC_VAR, "recovery phrase")?;
    let passphrase = optional_secret(PASSPHRASE_VAR);
    Wallet::from_mnemonic(&phrase, &passphrase).context("restoring from recovery phrase")
}
