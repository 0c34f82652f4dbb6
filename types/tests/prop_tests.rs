use proptest::prelude::*;

use mycoin_types::{Address, Amount, PublicKey, Signature, Timestamp, TxIn, UnspentTxOut};

proptest! {
    /// Any 40 hex characters parse, and parsing is case-insensitive.
    #[test]
    fn address_parse_is_case_insensitive(s in "[0-9a-fA-F]{40}") {
        let addr = Address::parse(&s).unwrap();
        prop_assert_eq!(addr.as_str(), s.to_ascii_lowercase());
        prop_assert_eq!(Address::parse(&s.to_ascii_uppercase()).unwrap(), addr);
    }

    /// Anything that is not exactly 40 hex characters is rejected.
    #[test]
    fn address_wrong_length_rejected(s in "[0-9a-f]{0,39}|[0-9a-f]{41,60}") {
        prop_assert!(Address::parse(&s).is_err());
    }

    /// Public keys keep their bytes through the hex wire form.
    #[test]
    fn public_key_hex_preserves_bytes(body in prop::collection::vec(any::<u8>(), 64)) {
        let mut bytes = [0u8; 65];
        bytes[0] = 0x04;
        bytes[1..].copy_from_slice(&body);
        let pk = PublicKey(bytes);
        let json = serde_json::to_string(&pk).unwrap();
        let back: PublicKey = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back.as_bytes(), &bytes);
    }

    /// Signatures of any length survive the hex wire form.
    #[test]
    fn signature_hex_preserves_bytes(bytes in prop::collection::vec(any::<u8>(), 0..80)) {
        let sig = Signature(bytes.clone());
        let back = Signature::from_hex(&sig.to_hex()).unwrap();
        prop_assert_eq!(back.as_bytes(), bytes.as_slice());
    }

    /// Timestamp ordering: from_millis(a) <= from_millis(b) iff a <= b.
    #[test]
    fn timestamp_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let ta = Timestamp::from_millis(a);
        let tb = Timestamp::from_millis(b);
        prop_assert_eq!(ta <= tb, a <= b);
        prop_assert_eq!(ta == tb, a == b);
    }

    /// An unsigned input always references the output it was built from,
    /// and never a sibling output with a different index.
    #[test]
    fn unsigned_input_references_its_output(id in "[0-9a-f]{64}", index in 0u32..16, amount in 1u32..) {
        let utxo = UnspentTxOut {
            id: id.clone(),
            index,
            address: Address::new("de113504a9c4e115aede71f2384ce2890465fee7"),
            amount: Amount::from(amount),
        };
        let tx_in = TxIn::unsigned(&utxo);
        prop_assert!(utxo.is_referenced_by(&tx_in));
        let sibling = UnspentTxOut { index: index + 1, ..utxo };
        prop_assert!(!sibling.is_referenced_by(&tx_in));
    }

    /// Any non-negative finite amount survives JSON and its rendered text
    /// parses back to the same value.
    #[test]
    fn amount_text_round_trips(value in 0.0f64..1e25) {
        let amount = Amount::new(value).unwrap();
        let back: Amount = serde_json::from_str(&serde_json::to_string(&amount).unwrap()).unwrap();
        prop_assert_eq!(back, amount);
        let reparsed: f64 = amount.to_string().parse().unwrap();
        prop_assert_eq!(reparsed, value);
    }
}
