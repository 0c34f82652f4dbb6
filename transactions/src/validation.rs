//! Transaction validation logic.
//!
//! [`verify_signature`] is the contract shared with the ledger: a signature
//! produced by the wallet must pass it, and the ledger runs the same check
//! before accepting a spend.

use std::collections::HashSet;

use mycoin_crypto::{derive_address, verify_digest};
use mycoin_types::{Amount, PublicKey, Transaction, TxIn, UnspentTxOut};

use crate::error::TransactionError;
use crate::signing_digest;

/// Check that `tx_in` validly spends `referenced` under `public_key`.
///
/// True only if the input references that output, the output belongs to the
/// address of `public_key`, the transaction id matches its contents, and the
/// signature verifies over the id digest.
pub fn verify_signature(
    tx: &Transaction,
    tx_in: &TxIn,
    referenced: &UnspentTxOut,
    public_key: &PublicKey,
) -> bool {
    if !referenced.is_referenced_by(tx_in) {
        return false;
    }
    if derive_address(public_key) != referenced.address {
        return false;
    }
    let Ok(digest) = signing_digest(tx) else {
        return false;
    };
    verify_digest(&digest, &tx_in.signature, public_key)
}

/// Validate a transaction's structure against the caller's unspent set.
///
/// This performs stateless validation only. Whether the referenced outputs are
/// still unspent on chain is the ledger's concern. Structural problems (id,
/// empty or duplicate inputs, output indices) are reported before any
/// signature is checked.
pub fn validate_transaction(
    tx: &Transaction,
    unspent: &[UnspentTxOut],
) -> Result<(), TransactionError> {
    signing_digest(tx)?;

    if tx.tx_ins.is_empty() {
        return Err(TransactionError::NoInputs);
    }

    for (position, tx_out) in tx.tx_outs.iter().enumerate() {
        if tx_out.index as usize != position {
            return Err(TransactionError::OutputIndexMismatch {
                position,
                index: tx_out.index,
            });
        }
    }

    let mut seen = HashSet::new();
    for tx_in in &tx.tx_ins {
        if !seen.insert((tx_in.tx_out_id.as_str(), tx_in.tx_out_index)) {
            return Err(TransactionError::DuplicateInput {
                tx_out_id: tx_in.tx_out_id.clone(),
                tx_out_index: tx_in.tx_out_index,
            });
        }
    }

    let owner = derive_address(&tx.public_key);
    let mut total_in = Amount::ZERO;

    for (index, tx_in) in tx.tx_ins.iter().enumerate() {
        let referenced = Transaction::find_referenced(tx_in, unspent).ok_or_else(|| {
            TransactionError::UnknownInput {
                tx_out_id: tx_in.tx_out_id.clone(),
                tx_out_index: tx_in.tx_out_index,
            }
        })?;

        if referenced.address != owner {
            return Err(TransactionError::NotOwner(referenced.address.to_string()));
        }

        if !verify_signature(tx, tx_in, referenced, &tx.public_key) {
            return Err(TransactionError::InvalidSignature {
                tx_id: tx.id.clone(),
                index,
            });
        }

        total_in = total_in + referenced.amount;
    }

    let total_out = tx.total_output();
    if total_out > total_in {
        return Err(TransactionError::OutputsExceedInputs {
            outputs: total_out,
            inputs: total_in,
        });
    }

    Ok(())
}
