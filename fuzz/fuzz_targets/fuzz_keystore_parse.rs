#![no_main]

use libfuzzer_sys::fuzz_target;
use mycoin_wallet_core::{decrypt_keystore, parse_keystore};

fuzz_target!(|data: &[u8]| {
    // Parsing and decrypting a hostile keystore must fail cleanly, never panic.
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(keystore) = parse_keystore(text) else {
        return;
    };

    // Only run the KDF for cheap parameters so each input stays fast.
    let cheap = keystore
        .crypto
        .kdf_params
        .is_some_and(|p| p.memory <= 256 && p.iterations <= 2 && p.parallelism <= 2);
    if cheap {
        let _ = decrypt_keystore(&keystore, "password");
    }
});
