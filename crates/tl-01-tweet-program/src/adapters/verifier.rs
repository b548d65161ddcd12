//! Ed25519 implementation of the `SignatureVerifier` port.

use crate::domain::value_objects::{Pubkey, Signature};
use crate::ports::outbound::SignatureVerifier;

/// Verifies strict Ed25519 signatures via `shared-crypto`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ed25519Verifier;

impl SignatureVerifier for Ed25519Verifier {
    fn verify(&self, signer: &Pubkey, message: &[u8], signature: &Signature) -> bool {
        shared_crypto::verify_raw(signer.as_bytes(), message, signature.as_bytes())
    }
}
