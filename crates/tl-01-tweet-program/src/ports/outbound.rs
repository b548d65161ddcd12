//! # Driven Ports (SPI - Outbound)
//!
//! Interfaces the tweet program depends on:
//! - Replicated ledger storage
//! - Signature verification (identity provider)
//! - Wall clock

use crate::domain::entities::{Account, StateChange};
use crate::domain::query::RecordQuery;
use crate::domain::value_objects::{Pubkey, Signature};
use crate::errors::LedgerError;
use async_trait::async_trait;

// =============================================================================
// LEDGER STATE
// =============================================================================

/// Access to replicated account storage.
///
/// ## Implementation Notes
///
/// `commit` must be all-or-nothing: validate every change against current
/// state first, then apply them together. Partial application is never
/// observable.
#[async_trait]
pub trait LedgerState: Send + Sync {
    /// Reads an account.
    ///
    /// # Returns
    ///
    /// * `Some(Account)` - If an account lives at `address`
    /// * `None` - If the address is vacant
    async fn get_account(&self, address: &Pubkey) -> Result<Option<Account>, LedgerError>;

    /// Applies staged changes atomically.
    async fn commit(&self, changes: Vec<StateChange>) -> Result<(), LedgerError>;

    /// Returns accounts owned by `owner` whose data satisfy `query`,
    /// ordered by address.
    async fn scan(
        &self,
        owner: &Pubkey,
        query: &RecordQuery,
    ) -> Result<Vec<(Pubkey, Account)>, LedgerError>;

    /// Lamports held at `address` (zero if vacant).
    async fn balance(&self, address: &Pubkey) -> Result<u64, LedgerError> {
        Ok(self
            .get_account(address)
            .await?
            .map_or(0, |account| account.lamports))
    }
}

// =============================================================================
// SIGNATURE VERIFIER
// =============================================================================

/// Verified-signature predicate supplied by the identity provider.
pub trait SignatureVerifier: Send + Sync {
    /// True if `signature` over `message` was produced by `signer`.
    fn verify(&self, signer: &Pubkey, message: &[u8], signature: &Signature) -> bool;
}

// =============================================================================
// CLOCK
// =============================================================================

/// Source of record timestamps.
pub trait Clock: Send + Sync {
    /// Current Unix time in milliseconds.
    fn now_millis(&self) -> i64;
}
