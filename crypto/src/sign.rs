//! ECDSA (secp256k1) signing and verification over 32-byte digests.
//!
//! Signatures are deterministic (RFC 6979), low-S normalised and DER encoded.
//! The digest is signed as-is; callers hash their canonical payload first.

use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use k256::ecdsa::Signature as EcdsaSignature;
use mycoin_types::{PrivateKey, PublicKey, Signature};

use crate::keys::{signing_key, verifying_key};
use crate::CryptoError;

/// Sign a 32-byte digest with a private key, returning a DER signature.
pub fn sign_digest(digest: &[u8; 32], private_key: &PrivateKey) -> Result<Signature, CryptoError> {
    let key = signing_key(private_key)?;
    let sig: EcdsaSignature = key
        .sign_prehash(digest)
        .map_err(|e| CryptoError::Signing(e.to_string()))?;
    Ok(Signature(sig.to_der().as_bytes().to_vec()))
}

/// Verify a DER signature over a digest.
///
/// Returns `false` for malformed encodings, off-curve keys and high-S
/// signatures as well as for plain mismatches.
pub fn verify_digest(digest: &[u8; 32], signature: &Signature, public_key: &PublicKey) -> bool {
    let Ok(key) = verifying_key(public_key) else {
        return false;
    };
    let Ok(sig) = EcdsaSignature::from_der(signature.as_bytes()) else {
        return false;
    };
    key.verify_prehash(digest, &sig).is_ok()
}
