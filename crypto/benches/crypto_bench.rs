use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mycoin_crypto::WordCount;

const PHRASE: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

fn seed_derivation_bench(c: &mut Criterion) {
    c.bench_function("bip39_seed_pbkdf2_2048", |b| {
        b.iter(|| mycoin_crypto::seed_from_phrase(black_box(PHRASE), "TREZOR").unwrap())
    });
}

fn mnemonic_generate_bench(c: &mut Criterion) {
    c.bench_function("mnemonic_generate_24", |b| {
        b.iter(|| mycoin_crypto::generate_mnemonic(black_box(WordCount::TwentyFour)).unwrap())
    });
}

fn keypair_and_address_bench(c: &mut Criterion) {
    let seed = mycoin_crypto::seed_from_phrase(PHRASE, "").unwrap();

    c.bench_function("keypair_from_seed", |b| {
        b.iter(|| mycoin_crypto::keypair_from_seed(black_box(&seed)).unwrap())
    });

    let kp = mycoin_crypto::keypair_from_seed(&seed).unwrap();
    c.bench_function("derive_address", |b| {
        b.iter(|| mycoin_crypto::derive_address(black_box(&kp.public)))
    });
}

fn ecdsa_sign_bench(c: &mut Criterion) {
    let kp = mycoin_crypto::generate_keypair();
    let digest = mycoin_crypto::sha256(&[42u8; 128]);

    c.bench_function("ecdsa_sign_digest", |b| {
        b.iter(|| mycoin_crypto::sign_digest(black_box(&digest), &kp.private).unwrap())
    });
}

fn ecdsa_verify_bench(c: &mut Criterion) {
    let kp = mycoin_crypto::generate_keypair();
    let digest = mycoin_crypto::sha256(&[42u8; 128]);
    let sig = mycoin_crypto::sign_digest(&digest, &kp.private).unwrap();

    c.bench_function("ecdsa_verify_digest", |b| {
        b.iter(|| mycoin_crypto::verify_digest(black_box(&digest), &sig, &kp.public))
    });
}

criterion_group!(
    benches,
    seed_derivation_bench,
    mnemonic_generate_bench,
    keypair_and_address_bench,
    ecdsa_sign_bench,
    ecdsa_verify_bench,
);
criterion_main!(benches);
