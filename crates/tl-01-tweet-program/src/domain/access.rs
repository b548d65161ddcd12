//! # Access Control
//!
//! Ownership is proven by recomputation, not looked up in a permission table.
//! A mutation is allowed only when
//!
//! 1. the transaction signature verifies for the claimed author, and
//! 2. the claimed author and the stored seed derive exactly the targeted
//!    address, with the stored bump being the canonical one.
//!
//! Signature checking itself lives behind the `SignatureVerifier` port; this
//! module consumes only its boolean verdict.

use crate::domain::address::{self, DerivationTag};
use crate::domain::value_objects::{Pubkey, UniqueSeed};
use crate::errors::TweetError;
use tracing::debug;

/// Inputs to an authorization decision.
#[derive(Clone, Copy, Debug)]
pub struct AuthorizationRequest<'a> {
    /// Identity the submitter claims to be.
    pub claimed_author: &'a Pubkey,
    /// Address the instruction targets.
    pub record_address: &'a Pubkey,
    /// Seed the address was derived from.
    pub unique_seed: &'a UniqueSeed,
    /// Bump the address was derived with.
    pub bump: u8,
}

/// Authorizes a request.
///
/// `signature_valid` is asked about the claimed author only; it is not called
/// with any other identity.
///
/// # Errors
///
/// `AuthorizationViolation` if either check fails.
pub fn authorize<F>(
    tag: &DerivationTag,
    request: &AuthorizationRequest<'_>,
    signature_valid: F,
) -> Result<(), TweetError>
where
    F: FnOnce(&Pubkey) -> bool,
{
    if !signature_valid(request.claimed_author) {
        debug!(author = %request.claimed_author, "signature does not match claimed author");
        return Err(TweetError::AuthorizationViolation);
    }

    let canonical_bump = address::derive(tag, request.claimed_author, request.unique_seed)
        .map(|(_, bump)| bump)
        .ok();
    if canonical_bump != Some(request.bump)
        || !address::verify(
            tag,
            request.claimed_author,
            request.unique_seed,
            request.record_address,
            request.bump,
        )
    {
        debug!(
            author = %request.claimed_author,
            address = %request.record_address,
            "derivation does not reproduce target address"
        );
        return Err(TweetError::AuthorizationViolation);
    }

    Ok(())
}
