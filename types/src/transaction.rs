//! Transfer transaction records exchanged with the ledger.
//!
//! Field names follow the ledger's camelCase JSON (`txIns`, `txOutId`, ...).

use serde::{Deserialize, Serialize};

use crate::{Address, Amount, PublicKey, Signature, Timestamp};

/// A transaction input: a reference to a spent output plus its signature.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxIn {
    pub tx_out_id: String,
    pub tx_out_index: u32,
    #[serde(default)]
    pub signature: Signature,
}

/// A transaction output: destination address and amount.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOut {
    pub address: Address,
    pub amount: Amount,
    /// Position within the owning transaction.
    #[serde(default)]
    pub index: u32,
}

/// A transfer transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Hex SHA-256 over the canonical spend fields.
    pub id: String,
    pub tx_ins: Vec<TxIn>,
    pub tx_outs: Vec<TxOut>,
    /// Public key of the sender; owns every referenced output.
    pub public_key: PublicKey,
    pub timestamp: Timestamp,
}

/// A spendable output as reported by the ledger.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnspentTxOut {
    /// Id of the transaction that created the output.
    #[serde(alias = "txOutId")]
    pub id: String,
    #[serde(alias = "txOutIndex")]
    pub index: u32,
    pub address: Address,
    pub amount: Amount,
}

impl TxIn {
    /// An input referencing `output`, not yet signed.
    pub fn unsigned(output: &UnspentTxOut) -> Self {
        Self {
            tx_out_id: output.id.clone(),
            tx_out_index: output.index,
            signature: Signature::default(),
        }
    }

    pub fn is_signed(&self) -> bool {
        !self.signature.is_empty()
    }
}

impl UnspentTxOut {
    /// Whether `tx_in` spends this output.
    pub fn is_referenced_by(&self, tx_in: &TxIn) -> bool {
        self.id == tx_in.tx_out_id && self.index == tx_in.tx_out_index
    }
}

impl Transaction {
    /// Sum of all output amounts.
    pub fn total_output(&self) -> Amount {
        self.tx_outs.iter().map(|o| o.amount).sum()
    }

    /// Find the unspent output `tx_in` refers to.
    pub fn find_referenced<'a>(
        tx_in: &TxIn,
        unspent: &'a [UnspentTxOut],
    ) -> Option<&'a UnspentTxOut> {
        unspent.iter().find(|u| u.is_referenced_by(tx_in))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEDGER_JSON: &str = r#"{
        "id": "c0ffee",
        "txIns": [{ "txOutId": "abcd", "txOutIndex": 1, "signature": "3045" }],
        "txOuts": [
            { "address": "de113504a9c4e115aede71f2384ce2890465fee7", "amount": 40 },
            { "address": "7a6e3b7894be12d1d1a666e1e1ceef780bbe6f75", "amount": 10, "index": 1 }
        ],
        "publicKey": "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8",
        "timestamp": 1700000000000
    }"#;

    #[test]
    fn parses_ledger_json() {
        let tx: Transaction = serde_json::from_str(LEDGER_JSON).unwrap();
        assert_eq!(tx.tx_ins[0].tx_out_index, 1);
        assert_eq!(tx.tx_ins[0].signature.as_bytes(), &[0x30, 0x45]);
        assert_eq!(tx.tx_outs[0].index, 0);
        assert_eq!(tx.total_output(), Amount::from(50));
        assert_eq!(tx.timestamp.as_millis(), 1_700_000_000_000);
    }

    #[test]
    fn serializes_camel_case() {
        let tx: Transaction = serde_json::from_str(LEDGER_JSON).unwrap();
        let json = serde_json::to_value(&tx).unwrap();
        assert!(json.get("txIns").is_some());
        assert!(json.get("publicKey").is_some());
        assert_eq!(json["txIns"][0]["txOutId"], "abcd");
    }

    #[test]
    fn unspent_accepts_ledger_aliases() {
        let utxo: UnspentTxOut = serde_json::from_str(
            r#"{"txOutId":"ab","txOutIndex":2,"address":"de113504a9c4e115aede71f2384ce2890465fee7","amount":5}"#,
        )
        .unwrap();
        assert_eq!(utxo.id, "ab");
        assert_eq!(utxo.index, 2);
        assert!(utxo.is_referenced_by(&TxIn::unsigned(&utxo)));
    }

    #[test]
    fn unsigned_input_has_empty_signature() {
        let utxo = UnspentTxOut {
            id: "ab".into(),
            index: 0,
            address: Address::new("de113504a9c4e115aede71f2384ce2890465fee7"),
            amount: Amount::from(1),
        };
        assert!(!TxIn::unsigned(&utxo).is_signed());
    }

    #[test]
    fn fractional_amounts_parse() {
        let utxo: UnspentTxOut = serde_json::from_str(
            r#"{"id":"ab","index":0,"address":"de113504a9c4e115aede71f2384ce2890465fee7","amount":12.5}"#,
        )
        .unwrap();
        assert_eq!(utxo.amount.value(), 12.5);

        let json = LEDGER_JSON.replace(r#""amount": 40"#, r#""amount": 39.99999999"#);
        let tx: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(tx.tx_outs[0].amount.to_string(), "39.99999999");
    }

    #[test]
    fn negative_amount_rejected() {
        let result = serde_json::from_str::<UnspentTxOut>(
            r#"{"id":"ab","index":0,"address":"de113504a9c4e115aede71f2384ce2890465fee7","amount":-1}"#,
        );
        assert!(result.is_err());
    }
}
