#![no_main]

use libfuzzer_sys::fuzz_target;
use mycoin_types::{ChainPage, Transaction, UnspentTxOut};

fuzz_target!(|data: &[u8]| {
    // Ledger responses are untrusted: decoding and validating them must never panic.
    if let Ok(tx) = serde_json::from_slice::<Transaction>(data) {
        let _ = mycoin_transactions::compute_id(&tx);
        let _ = mycoin_transactions::validate_transaction(&tx, &[]);
    }
    let _ = serde_json::from_slice::<Vec<UnspentTxOut>>(data);
    let _ = serde_json::from_slice::<ChainPage>(data);
});
