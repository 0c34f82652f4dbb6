//! `mycoin`: command-line wallet for the MyCoin ledger.

mod config;
mod quiz;
mod secrets;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use mycoin_crypto::{parse_mnemonic, WordCount};
use mycoin_types::{Address, Amount, Timestamp};
use mycoin_wallet_core::keystore::keystore_file_name;
use mycoin_wallet_core::{
    exclude_pending, save_keystore, validate_new_password, LedgerClient, RecoveryChallenge,
    Wallet,
};

use crate::config::CliConfig;
use crate::secrets::{
    open_wallet, optional_secret, read_secret, WalletArgs, MNEMONIC_VAR, NEW_PASSWORD_CONFIRM_VAR,
    NEW_PASSWORD_VAR, PASSPHRASE_VAR,
};

#[derive(Parser)]
#[command(name = "mycoin", about = "MyCoin wallet", version)]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; flags and env vars override them.
    #[arg(long, env = "MYCOIN_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Ledger service base URL.
    #[arg(long, env = "MYCOIN_LEDGER_URL", global = true)]
    ledger_url: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "MYCOIN_LOG_FORMAT", global = true)]
    log_format: Option<String>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "MYCOIN_LOG_LEVEL", global = true)]
    log_level: Option<String>,

    /// Directory new keystore files are written to.
    #[arg(long, env = "MYCOIN_KEYSTORE_DIR", global = true)]
    keystore_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate or check recovery phrases.
    Mnemonic {
        #[command(subcommand)]
        action: MnemonicAction,
    },

    /// Print the address and public key of a wallet.
    Address {
        #[command(flatten)]
        wallet: WalletArgs,
    },

    /// Create or open password-encrypted keystore files.
    Keystore {
        #[command(subcommand)]
        action: KeystoreAction,
    },

    /// Show the confirmed balance of an address.
    Balance { address: Address },

    /// Request test funds for a wallet.
    Faucet {
        #[command(flatten)]
        wallet: WalletArgs,

        /// Amount to request (defaults to `faucet_amount` from the config).
        #[arg(long)]
        amount: Option<Amount>,
    },

    /// Build, sign and submit a transfer.
    Send {
        #[command(flatten)]
        wallet: WalletArgs,

        /// Recipient address.
        #[arg(long)]
        to: Address,

        /// Amount to send; fractions are allowed (e.g. 0.5).
        #[arg(long)]
        amount: Amount,
    },

    /// Show transactions waiting to be mined.
    Pending,

    /// Show a page of blocks.
    Chain {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },

    /// Show a page of confirmed transactions.
    Transactions {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
}

#[derive(Subcommand)]
enum MnemonicAction {
    /// Generate a new recovery phrase.
    New {
        /// 12 or 24 (defaults to `default_word_count` from the config).
        #[arg(long)]
        words: Option<usize>,

        /// Quiz the user on the phrase before printing the wallet address.
        #[arg(long)]
        verify: bool,
    },
    /// Check a recovery phrase (from MYCOIN_MNEMONIC or stdin).
    Check,
}

#[derive(Subcommand)]
enum KeystoreAction {
    /// Encrypt a wallet's key into a new keystore file.
    Create {
        #[command(flatten)]
        wallet: WalletArgs,

        /// Output file (defaults to a generated name in the keystore dir).
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Decrypt a keystore and print its address.
    Open { path: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    mycoin_utils::init_logging(config.log_format()?, &config.log_level);

    match cli.command {
        Command::Mnemonic { action } => match action {
            MnemonicAction::New { words, verify } => new_mnemonic(&config, words, verify)?,
            MnemonicAction::Check => {
                let phrase = read_secret(MNEMONIC_VAR, "recovery phrase")?;
                let mnemonic = parse_mnemonic(&phrase).context("invalid recovery phrase")?;
                println!("valid ({} words)", mnemonic.word_count());
            }
        },
        Command::Address { wallet } => {
            let wallet = open_wallet(&wallet)?;
            println!("address:    {}", wallet.address);
            println!("public key: {}", wallet.public_key().to_hex());
        }
        Command::Keystore { action } => match action {
            KeystoreAction::Create { wallet, out } => {
                let mut wallet = open_wallet(&wallet)?;
                let path = create_keystore(&config, &mut wallet, out)?;
                println!("{}", path.display());
            }
            KeystoreAction::Open { path } => {
                let wallet = open_wallet(&WalletArgs {
                    keystore: Some(path),
                    private_key: false,
                })?;
                println!("{}", wallet.address);
            }
        },
        Command::Balance { address } => {
            let balance = ledger(&config)?.balance(&address).await?;
            println!("{balance}");
        }
        Command::Faucet { wallet, amount } => {
            let wallet = open_wallet(&wallet)?;
            let amount = amount.unwrap_or(config.faucet_amount);
            let resp = ledger(&config)?
                .faucet(&wallet.address, wallet.public_key(), amount)
                .await?;
            println!("{}", serde_json::to_string_pretty(&resp)?);
        }
        Command::Send { wallet, to, amount } => {
            let wallet = open_wallet(&wallet)?;
            send(&config, &wallet, &to, amount).await?;
        }
        Command::Pending => {
            let pending = ledger(&config)?.pending_transactions().await?;
            println!("{}", serde_json::to_string_pretty(&pending)?);
        }
        Command::Chain { page, limit } => {
            let page = ledger(&config)?.chain_page(page, limit).await?;
            println!("{}", serde_json::to_string_pretty(&page)?);
        }
        Command::Transactions { page, limit } => {
            let page = ledger(&config)?.transaction_page(page, limit).await?;
            println!("{}", serde_json::to_string_pretty(&page)?);
        }
    }

    Ok(())
}

/// File settings first, then flags and env vars on top.
fn load_config(cli: &Cli) -> anyhow::Result<CliConfig> {
    let mut config = match &cli.config {
        Some(path) => CliConfig::from_toml_file(path)?,
        None => CliConfig::default(),
    };
    if let Some(url) = &cli.ledger_url {
        config.ledger_url = url.clone();
    }
    if let Some(format) = &cli.log_format {
        config.log_format = format.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(dir) = &cli.keystore_dir {
        config.keystore_dir = dir.clone();
    }
    Ok(config)
}

fn ledger(config: &CliConfig) -> anyhow::Result<LedgerClient> {
    Ok(LedgerClient::new(config.ledger_url.clone())?)
}

fn new_mnemonic(config: &CliConfig, words: Option<usize>, verify: bool) -> anyhow::Result<()> {
    let word_count = match words {
        Some(n) => WordCount::from_words(n)
            .with_context(|| format!("--words must be 12 or 24, got {n}"))?,
        None => config.word_count()?,
    };

    let mut challenge = RecoveryChallenge::new(word_count)?;
    println!("{}", challenge.mnemonic());
    if !verify {
        return Ok(());
    }

    let passphrase = optional_secret(PASSPHRASE_VAR);
    challenge.set_passphrase(&passphrase)?;

    let mut rng = rand::thread_rng();
    challenge.continue_to_verify(&mut rng)?;
    quiz::run_quiz(
        &mut challenge,
        &mut rng,
        &mut std::io::stdin().lock(),
        &mut std::io::stdout().lock(),
    )
    .context("recovery quiz")?;

    let wallet = challenge.into_wallet()?;
    println!("verified; address {}", wallet.address);
    Ok(())
}

fn create_keystore(
    config: &CliConfig,
    wallet: &mut Wallet,
    out: Option<PathBuf>,
) -> anyhow::Result<PathBuf> {
    let password = read_secret(NEW_PASSWORD_VAR, "new keystore password")?;
    let confirmation = read_secret(NEW_PASSWORD_CONFIRM_VAR, "password confirmation")?;
    validate_new_password(&password, &confirmation)?;

    let file = wallet.to_keystore_with_params(password.trim(), config.kdf_params())?;
    let path = match out {
        Some(path) => path,
        None => {
            std::fs::create_dir_all(&config.keystore_dir).with_context(|| {
                format!("creating keystore dir {}", config.keystore_dir.display())
            })?;
            config
                .keystore_dir
                .join(keystore_file_name(&file, Timestamp::now()))
        }
    };
    save_keystore(&file, &path)?;
    Ok(path)
}

async fn send(
    config: &CliConfig,
    wallet: &Wallet,
    to: &Address,
    amount: Amount,
) -> anyhow::Result<()> {
    let client = ledger(config)?;
    let unspent = client.unspent_outputs(&wallet.address).await?;
    let pending = client.pending_transactions().await?;
    let spendable = exclude_pending(&unspent, &pending);

    let tx = wallet.transfer(to, amount, &spendable, Timestamp::now())?;
    let resp = client
        .submit_transaction(&tx)
        .await
        .with_context(|| format!("submitting transaction {}", tx.id))?;
    tracing::info!(tx_id = %tx.id, "transaction submitted");
    println!("{}", tx.id);
    if !resp.is_null() {
        println!("{}", serde_json::to_string_pretty(&resp)?);
    }
    Ok(())
}
