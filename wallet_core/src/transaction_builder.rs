//! Transaction building helpers.
//!
//! Building and signing are separate steps: [`build_transaction`] assembles an
//! unsigned transfer from the sender's unspent outputs, [`sign_transaction`]
//! fills in the input signatures.

use std::collections::HashSet;

use mycoin_crypto::{derive_address, public_from_private, sign_digest};
use mycoin_transactions::{signing_digest, transaction_id, TransactionError};
use mycoin_types::{
    Address, Amount, PrivateKey, PublicKey, Timestamp, Transaction, TxIn, TxOut, UnspentTxOut,
};

use crate::error::WalletError;

/// Outputs picked to fund a transfer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    pub inputs: Vec<UnspentTxOut>,
    pub total: Amount,
    pub change: Amount,
}

/// Pick outputs owned by `owner`, first-fit in the given order, until they
/// cover `amount`.
pub fn select_unspent(
    owner: &Address,
    amount: Amount,
    unspent: &[UnspentTxOut],
) -> Result<Selection, WalletError> {
    let mut inputs = Vec::new();
    let mut total = Amount::ZERO;

    for output in unspent.iter().filter(|o| &o.address == owner) {
        if total >= amount {
            break;
        }
        total = total + output.amount;
        inputs.push(output.clone());
    }

    let change = total
        .checked_sub(amount)
        .ok_or(WalletError::InsufficientFunds {
            needed: amount,
            available: total,
        })?;

    Ok(Selection {
        inputs,
        total,
        change,
    })
}

/// Drop outputs that a pending transaction already spends.
pub fn exclude_pending(unspent: &[UnspentTxOut], pending: &[Transaction]) -> Vec<UnspentTxOut> {
    let spent: HashSet<(&str, u32)> = pending
        .iter()
        .flat_map(|tx| tx.tx_ins.iter())
        .map(|tx_in| (tx_in.tx_out_id.as_str(), tx_in.tx_out_index))
        .collect();

    unspent
        .iter()
        .filter(|o| !spent.contains(&(o.id.as_str(), o.index)))
        .cloned()
        .collect()
}

/// Assemble an unsigned transfer of `amount` from `from` to `to`.
///
/// The recipient output is always at index 0; a change output back to `from`
/// follows at index 1 only when the selected inputs exceed `amount`.
pub fn build_transaction(
    from: &Address,
    to: &Address,
    amount: Amount,
    unspent: &[UnspentTxOut],
    public_key: &PublicKey,
    timestamp: Timestamp,
) -> Result<Transaction, WalletError> {
    if amount.is_zero() {
        return Err(WalletError::InvalidAmount("amount must be positive".into()));
    }
    if &derive_address(public_key) != from {
        return Err(TransactionError::NotOwner(from.to_string()).into());
    }

    let selection = select_unspent(from, amount, unspent)?;

    let tx_ins: Vec<TxIn> = selection.inputs.iter().map(TxIn::unsigned).collect();
    let mut tx_outs = vec![TxOut {
        address: to.clone(),
        amount,
        index: 0,
    }];
    if !selection.change.is_zero() {
        tx_outs.push(TxOut {
            address: from.clone(),
            amount: selection.change,
            index: 1,
        });
    }

    let tx = Transaction {
        id: transaction_id(&tx_ins, &tx_outs, timestamp),
        tx_ins,
        tx_outs,
        public_key: public_key.clone(),
        timestamp,
    };

    tracing::debug!(
        tx_id = %tx.id,
        %from,
        %to,
        %amount,
        inputs = tx.tx_ins.len(),
        change = %selection.change,
        "transaction built"
    );
    Ok(tx)
}

/// Sign every input of `tx` whose referenced output belongs to the signer.
///
/// Inputs owned by other addresses are left as they are. Fails if the id does
/// not match the contents, if an input references an output missing from
/// `unspent`, or if the signer owns none of the inputs.
pub fn sign_transaction(
    tx: &mut Transaction,
    private_key: &PrivateKey,
    unspent: &[UnspentTxOut],
) -> Result<(), WalletError> {
    let public = public_from_private(private_key)?;
    if public != tx.public_key {
        return Err(TransactionError::NotOwner(derive_address(&public).to_string()).into());
    }
    let signer = derive_address(&public);
    let digest = signing_digest(tx)?;

    let mut signed = 0usize;
    for tx_in in tx.tx_ins.iter_mut() {
        let referenced = Transaction::find_referenced(tx_in, unspent).ok_or_else(|| {
            TransactionError::UnknownInput {
                tx_out_id: tx_in.tx_out_id.clone(),
                tx_out_index: tx_in.tx_out_index,
            }
        })?;
        if referenced.address != signer {
            continue;
        }
        tx_in.signature = sign_digest(&digest, private_key)?;
        signed += 1;
    }

    if signed == 0 {
        return Err(WalletError::NoOwnedInputs);
    }

    tracing::debug!(tx_id = %tx.id, signed, "transaction signed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mycoin_crypto::generate_keypair;
    use mycoin_transactions::{validate_transaction, verify_signature};
    use mycoin_types::KeyPair;

    fn utxo(owner: &Address, id: &str, index: u32, amount: f64) -> UnspentTxOut {
        UnspentTxOut {
            id: id.to_string(),
            index,
            address: owner.clone(),
            amount: coins(amount),
        }
    }

    fn coins(value: f64) -> Amount {
        Amount::new(value).unwrap()
    }

    fn recipient() -> Address {
        Address::new("de113504a9c4e115aede71f2384ce2890465fee7")
    }

    fn owner(kp: &KeyPair) -> Address {
        derive_address(&kp.public)
    }

    fn at(millis: u64) -> Timestamp {
        Timestamp::from_millis(millis)
    }

    #[test]
    fn selection_is_first_fit() {
        let kp = generate_keypair();
        let me = owner(&kp);
        let unspent = vec![
            utxo(&me, "a", 0, 30.0),
            utxo(&recipient(), "x", 0, 1000.0),
            utxo(&me, "b", 0, 30.0),
            utxo(&me, "c", 0, 30.0),
        ];
        let selection = select_unspent(&me, coins(50.0), &unspent).unwrap();
        assert_eq!(selection.inputs.len(), 2);
        assert_eq!(selection.inputs[0].id, "a");
        assert_eq!(selection.inputs[1].id, "b");
        assert_eq!(selection.total, coins(60.0));
        assert_eq!(selection.change, coins(10.0));
    }

    #[test]
    fn insufficient_funds_reports_totals() {
        let kp = generate_keypair();
        let me = owner(&kp);
        let unspent = vec![utxo(&me, "a", 0, 30.0), utxo(&me, "b", 1, 10.0)];
        let err = select_unspent(&me, coins(100.0), &unspent).unwrap_err();
        match err {
            WalletError::InsufficientFunds { needed, available } => {
                assert_eq!(needed, coins(100.0));
                assert_eq!(available, coins(40.0));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn pending_spends_are_excluded() {
        let kp = generate_keypair();
        let me = owner(&kp);
        let a = utxo(&me, "a", 0, 30.0);
        let b = utxo(&me, "b", 0, 30.0);
        let pending = build_transaction(
            &me,
            &recipient(),
            coins(30.0),
            std::slice::from_ref(&a),
            &kp.public,
            at(1),
        )
        .unwrap();
        let left = exclude_pending(&[a, b.clone()], &[pending]);
        assert_eq!(left, vec![b]);
    }

    #[test]
    fn exact_amount_has_no_change_output() {
        let kp = generate_keypair();
        let me = owner(&kp);
        let unspent = vec![utxo(&me, "a", 0, 40.0)];
        let tx = build_transaction(&me, &recipient(), coins(40.0), &unspent, &kp.public, at(5))
            .unwrap();
        assert_eq!(tx.tx_outs.len(), 1);
        assert_eq!(tx.tx_outs[0].index, 0);
        assert_eq!(tx.tx_outs[0].address, recipient());
    }

    #[test]
    fn change_goes_back_to_sender_at_index_one() {
        let kp = generate_keypair();
        let me = owner(&kp);
        let unspent = vec![utxo(&me, "a", 0, 100.0)];
        let tx = build_transaction(&me, &recipient(), coins(60.0), &unspent, &kp.public, at(5))
            .unwrap();
        assert_eq!(tx.tx_outs.len(), 2);
        assert_eq!(tx.tx_outs[1].address, me);
        assert_eq!(tx.tx_outs[1].amount, coins(40.0));
        assert_eq!(tx.tx_outs[1].index, 1);
        assert!(tx.tx_ins.iter().all(|i| !i.is_signed()));
    }

    #[test]
    fn fractional_ledger_outputs_fund_a_transfer() {
        let kp = generate_keypair();
        let me = owner(&kp);
        let ledger_json = format!(
            r#"[{{"id":"a","index":0,"address":"{me}","amount":12.5}},
                {{"id":"b","index":1,"address":"{me}","amount":0.25}}]"#
        );
        let unspent: Vec<UnspentTxOut> = serde_json::from_str(&ledger_json).unwrap();

        let mut tx = build_transaction(
            &me,
            &recipient(),
            coins(12.6),
            &unspent,
            &kp.public,
            at(1_700_000_000_000),
        )
        .unwrap();
        assert_eq!(tx.tx_ins.len(), 2);
        assert_eq!(tx.tx_outs[0].amount.to_string(), "12.6");
        assert_eq!(tx.tx_outs[1].amount, coins(12.75 - 12.6));

        sign_transaction(&mut tx, &kp.private, &unspent).unwrap();
        validate_transaction(&tx, &unspent).unwrap();
    }

    #[test]
    fn zero_amount_rejected() {
        let kp = generate_keypair();
        let me = owner(&kp);
        let unspent = vec![utxo(&me, "a", 0, 100.0)];
        assert!(matches!(
            build_transaction(&me, &recipient(), Amount::ZERO, &unspent, &kp.public, at(5)),
            Err(WalletError::InvalidAmount(_))
        ));
    }

    #[test]
    fn foreign_sender_rejected() {
        let kp = generate_keypair();
        let unspent = vec![utxo(&recipient(), "a", 0, 100.0)];
        assert!(matches!(
            build_transaction(
                &recipient(),
                &owner(&kp),
                coins(10.0),
                &unspent,
                &kp.public,
                at(5)
            ),
            Err(WalletError::Transaction(TransactionError::NotOwner(_)))
        ));
    }

    #[test]
    fn built_and_signed_transfer_validates() {
        let kp = generate_keypair();
        let me = owner(&kp);
        let unspent = vec![utxo(&me, "a", 0, 30.0), utxo(&me, "b", 2, 30.0)];
        let mut tx =
            build_transaction(&me, &recipient(), coins(50.0), &unspent, &kp.public, at(9))
                .unwrap();
        sign_transaction(&mut tx, &kp.private, &unspent).unwrap();

        for tx_in in &tx.tx_ins {
            let referenced = Transaction::find_referenced(tx_in, &unspent).unwrap();
            assert!(verify_signature(&tx, tx_in, referenced, &kp.public));
        }
        validate_transaction(&tx, &unspent).unwrap();
    }

    #[test]
    fn signing_unknown_input_fails() {
        let kp = generate_keypair();
        let me = owner(&kp);
        let unspent = vec![utxo(&me, "a", 0, 30.0)];
        let mut tx =
            build_transaction(&me, &recipient(), coins(10.0), &unspent, &kp.public, at(9))
                .unwrap();
        assert!(matches!(
            sign_transaction(&mut tx, &kp.private, &[]),
            Err(WalletError::Transaction(TransactionError::UnknownInput { .. }))
        ));
    }

    #[test]
    fn signing_with_other_key_fails() {
        let kp = generate_keypair();
        let other = generate_keypair();
        let me = owner(&kp);
        let unspent = vec![utxo(&me, "a", 0, 30.0)];
        let mut tx =
            build_transaction(&me, &recipient(), coins(10.0), &unspent, &kp.public, at(9))
                .unwrap();
        assert!(sign_transaction(&mut tx, &other.private, &unspent).is_err());
    }

    #[test]
    fn signer_owning_no_inputs_fails() {
        let kp = generate_keypair();
        let me = owner(&kp);
        let funded = vec![utxo(&me, "a", 0, 30.0)];
        let mut tx =
            build_transaction(&me, &recipient(), coins(10.0), &funded, &kp.public, at(9))
                .unwrap();
        // Same outpoint, but the ledger now says someone else owns it.
        let reassigned = vec![utxo(&recipient(), "a", 0, 30.0)];
        assert!(matches!(
            sign_transaction(&mut tx, &kp.private, &reassigned),
            Err(WalletError::NoOwnedInputs)
        ));
    }

    #[test]
    fn tampered_transaction_cannot_be_signed() {
        let kp = generate_keypair();
        let me = owner(&kp);
        let unspent = vec![utxo(&me, "a", 0, 30.0)];
        let mut tx =
            build_transaction(&me, &recipient(), coins(10.0), &unspent, &kp.public, at(9))
                .unwrap();
        tx.tx_outs[0].amount = coins(11.0);
        assert!(matches!(
            sign_transaction(&mut tx, &kp.private, &unspent),
            Err(WalletError::Transaction(TransactionError::IdMismatch { .. }))
        ));
    }
}
