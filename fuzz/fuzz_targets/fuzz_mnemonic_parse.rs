#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(phrase) = std::str::from_utf8(data) else {
        return;
    };

    // Anything that parses must be a 12 or 24 word phrase that round-trips.
    if let Ok(mnemonic) = mycoin_crypto::parse_mnemonic(phrase) {
        let words = mnemonic.word_count();
        assert!(words == 12 || words == 24);
        assert!(mycoin_crypto::validate_mnemonic(&mnemonic.to_string()));
    }
    let _ = mycoin_crypto::mnemonic_words(phrase);
});
