//! # Address Derivation
//!
//! Record addresses are never chosen by the caller. They are computed as
//!
//! ```text
//! SHA-256(prefix ‖ author ‖ unique_seed ‖ [bump] ‖ program_id ‖ "ProgramDerivedAddress")
//! ```
//!
//! trying `bump` from 255 down to 0 and keeping the first output that is not
//! a valid Ed25519 point. An off-curve address has no private key, so only
//! the program can ever sign for it.

use crate::domain::value_objects::{Pubkey, UniqueSeed};
use crate::errors::TweetError;
use shared_crypto::{hashv, is_on_curve};

/// Seed prefix for tweet records.
pub const TWEET_SEED_PREFIX: &[u8] = b"tweet";

/// Suffix separating derived addresses from other SHA-256 uses.
pub const PDA_MARKER: &[u8] = b"ProgramDerivedAddress";

/// Domain separation for a family of derived addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DerivationTag {
    /// Leading seed bytes.
    pub prefix: &'static [u8],
    /// Program that owns the derived accounts.
    pub program_id: Pubkey,
}

impl DerivationTag {
    /// Tag for tweet records owned by `program_id`.
    #[must_use]
    pub const fn tweets(program_id: Pubkey) -> Self {
        Self {
            prefix: TWEET_SEED_PREFIX,
            program_id,
        }
    }
}

/// Hashes one candidate. Returns None when the output lands on the curve.
#[must_use]
pub fn create_address(
    tag: &DerivationTag,
    author: &Pubkey,
    seed: &UniqueSeed,
    bump: u8,
) -> Option<Pubkey> {
    let hash = hashv(&[
        tag.prefix,
        author.as_bytes(),
        seed.as_bytes(),
        &[bump],
        tag.program_id.as_bytes(),
        PDA_MARKER,
    ]);
    if is_on_curve(&hash) {
        None
    } else {
        Some(Pubkey::new(hash))
    }
}

/// Finds the canonical `(address, bump)` for an author and seed.
///
/// # Errors
///
/// `AddressSpaceExhausted` if every bump yields an on-curve point.
pub fn derive(
    tag: &DerivationTag,
    author: &Pubkey,
    seed: &UniqueSeed,
) -> Result<(Pubkey, u8), TweetError> {
    (0..=u8::MAX)
        .rev()
        .find_map(|bump| create_address(tag, author, seed, bump).map(|addr| (addr, bump)))
        .ok_or(TweetError::AddressSpaceExhausted)
}

/// Recomputes a single candidate and compares it against `address`.
#[must_use]
pub fn verify(
    tag: &DerivationTag,
    author: &Pubkey,
    seed: &UniqueSeed,
    address: &Pubkey,
    bump: u8,
) -> bool {
    create_address(tag, author, seed, bump).as_ref() == Some(address)
}
