//! MyCoin transfer transactions.
//!
//! A transaction id is the hex SHA-256 of a canonical string built from the
//! spend-relevant fields, in order:
//!
//! - every input as `txOutId ‖ txOutIndex`
//! - every output as `address ‖ amount`
//! - the timestamp in epoch milliseconds
//!
//! Amounts are written the way the ledger prints a JSON number (`50`, `12.5`,
//! `1e-8`), so ids agree with the ledger's for fractional values too.
//!
//! Signatures cover the 32-byte id digest, so they commit to exactly these
//! fields. Signatures themselves and the public key are not part of the id.

pub mod error;
pub mod validation;

pub use error::TransactionError;
pub use validation::{validate_transaction, verify_signature};

use mycoin_crypto::sha256_hex;
use mycoin_types::{Timestamp, Transaction, TxIn, TxOut};

/// Build the canonical string a transaction id is hashed from.
pub fn canonical_payload(tx_ins: &[TxIn], tx_outs: &[TxOut], timestamp: Timestamp) -> String {
    let mut payload = String::new();
    for tx_in in tx_ins {
        payload.push_str(&tx_in.tx_out_id);
        payload.push_str(&tx_in.tx_out_index.to_string());
    }
    for tx_out in tx_outs {
        payload.push_str(tx_out.address.as_str());
        payload.push_str(&tx_out.amount.to_string());
    }
    payload.push_str(&timestamp.as_millis().to_string());
    payload
}

/// Compute the id for a set of inputs, outputs and timestamp.
pub fn transaction_id(tx_ins: &[TxIn], tx_outs: &[TxOut], timestamp: Timestamp) -> String {
    sha256_hex(canonical_payload(tx_ins, tx_outs, timestamp).as_bytes())
}

/// Recompute the id of `tx` from its contents.
pub fn compute_id(tx: &Transaction) -> String {
    transaction_id(&tx.tx_ins, &tx.tx_outs, tx.timestamp)
}

/// The 32-byte digest every input signature covers.
///
/// Fails if the stored id no longer matches the transaction's contents.
pub fn signing_digest(tx: &Transaction) -> Result<[u8; 32], TransactionError> {
    let expected = compute_id(tx);
    if !expected.eq_ignore_ascii_case(&tx.id) {
        return Err(TransactionError::IdMismatch {
            expected,
            actual: tx.id.clone(),
        });
    }
    let mut digest = [0u8; 32];
    // `expected` is always 64 hex characters.
    hex::decode_to_slice(&expected, &mut digest).map_err(|_| TransactionError::IdMismatch {
        expected: expected.clone(),
        actual: tx.id.clone(),
    })?;
    Ok(digest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mycoin_types::{Address, Amount, Signature};

    fn sample_ins() -> Vec<TxIn> {
        vec![TxIn {
            tx_out_id: "aa".into(),
            tx_out_index: 3,
            signature: Signature::default(),
        }]
    }

    fn sample_outs() -> Vec<TxOut> {
        vec![TxOut {
            address: Address::new("de113504a9c4e115aede71f2384ce2890465fee7"),
            amount: Amount::from(50),
            index: 0,
        }]
    }

    #[test]
    fn payload_layout() {
        let payload = canonical_payload(&sample_ins(), &sample_outs(), Timestamp::from_millis(1700));
        assert_eq!(payload, "aa3de113504a9c4e115aede71f2384ce2890465fee7501700");
    }

    #[test]
    fn fractional_amounts_and_millisecond_timestamps() {
        let mut outs = sample_outs();
        outs[0].amount = Amount::new(12.5).unwrap();
        outs.push(TxOut {
            address: Address::new("7a6e3b7894be12d1d1a666e1e1ceef780bbe6f75"),
            amount: Amount::new(0.00000001).unwrap(),
            index: 1,
        });
        let payload = canonical_payload(
            &sample_ins(),
            &outs,
            Timestamp::from_millis(1_700_000_000_123),
        );
        assert_eq!(
            payload,
            "aa3de113504a9c4e115aede71f2384ce2890465fee712.5\
             7a6e3b7894be12d1d1a666e1e1ceef780bbe6f751e-8\
             1700000000123"
        );
    }

    #[test]
    fn id_is_sha256_of_payload() {
        let id = transaction_id(&sample_ins(), &sample_outs(), Timestamp::from_millis(1700));
        assert_eq!(
            id,
            sha256_hex(b"aa3de113504a9c4e115aede71f2384ce2890465fee7501700")
        );
        assert_eq!(id.len(), 64);
    }

    #[test]
    fn id_ignores_signatures() {
        let mut signed = sample_ins();
        signed[0].signature = Signature(vec![1, 2, 3]);
        assert_eq!(
            transaction_id(&signed, &sample_outs(), Timestamp::from_millis(1)),
            transaction_id(&sample_ins(), &sample_outs(), Timestamp::from_millis(1))
        );
    }

    #[test]
    fn id_commits_to_timestamp_and_amount() {
        let base = transaction_id(&sample_ins(), &sample_outs(), Timestamp::from_millis(1));
        assert_ne!(
            base,
            transaction_id(&sample_ins(), &sample_outs(), Timestamp::from_millis(2))
        );
        let mut outs = sample_outs();
        outs[0].amount = Amount::from(51);
        assert_ne!(base, transaction_id(&sample_ins(), &outs, Timestamp::from_millis(1)));
    }
}
