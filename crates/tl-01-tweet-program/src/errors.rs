//! # Error Types
//!
//! All error types for the tweet program. Messages are part of the external
//! contract: submission layers match on the exact text.

use crate::domain::value_objects::Pubkey;
use thiserror::Error;

// =============================================================================
// PROGRAM ERRORS
// =============================================================================

/// Errors surfaced by a tweet instruction or read.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TweetError {
    /// Topic or content failed the size rules.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Signer or address-derivation check failed.
    #[error("A seeds constraint was violated")]
    AuthorizationViolation,

    /// An account already lives at the derived address.
    #[error("Account already in use")]
    AlreadyExists,

    /// No record lives at the targeted address.
    #[error("The program expected this account to be already initialized")]
    NotFound,

    /// No nonce in 255..=0 produced an off-curve address.
    #[error("Unable to find a viable program address bump seed")]
    AddressSpaceExhausted,

    /// Stored bytes do not form a valid record.
    #[error("Failed to deserialize the account: {0}")]
    DecodeError(#[from] LayoutError),

    /// The author cannot fund the record's storage deposit.
    #[error("Insufficient lamports to fund the account: need {needed}, have {available}")]
    InsufficientFunds {
        /// Deposit required.
        needed: u64,
        /// Lamports held by the payer.
        available: u64,
    },

    /// Instruction bytes could not be decoded.
    #[error("Invalid instruction data: {0}")]
    InvalidInstruction(String),

    /// Storage backend failure.
    #[error("Ledger error: {0}")]
    Ledger(String),
}

// =============================================================================
// VALIDATION ERRORS
// =============================================================================

/// Text-field rule violations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Topic longer than 50 characters.
    #[error("The provided topic should be 50 characters long maximum.")]
    TopicTooLong,

    /// Content empty or longer than 280 characters.
    #[error("The provided content should be 280 characters long maximum.")]
    ContentTooLong,
}

// =============================================================================
// LAYOUT ERRORS
// =============================================================================

/// Record encoding/decoding failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// Leading type tag is not the tweet discriminator.
    #[error("8 byte discriminator did not match what was expected")]
    DiscriminatorMismatch,

    /// Buffer ends before a fixed-width field.
    #[error("buffer too short for {field}: need {needed} bytes, have {available}")]
    BufferTooShort {
        /// Field being read.
        field: &'static str,
        /// Bytes required from the current position.
        needed: usize,
        /// Bytes remaining.
        available: usize,
    },

    /// A length prefix points past the end of the buffer.
    #[error("{field} length {declared} overruns buffer ({available} bytes left)")]
    LengthOverrun {
        /// Variable-length field.
        field: &'static str,
        /// Length from the prefix.
        declared: usize,
        /// Bytes remaining after the prefix.
        available: usize,
    },

    /// String bytes are not UTF-8.
    #[error("{field} is not valid UTF-8")]
    InvalidUtf8 {
        /// Offending field.
        field: &'static str,
    },

    /// Encoded record does not fit the allocated account.
    #[error("record of {len} bytes exceeds account size {max}")]
    RecordTooLarge {
        /// Encoded length.
        len: usize,
        /// Account capacity.
        max: usize,
    },
}

// =============================================================================
// LEDGER ERRORS
// =============================================================================

/// Errors from the ledger storage port.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Account creation targeted an occupied address.
    #[error("account already exists: {0:?}")]
    AccountExists(Pubkey),

    /// Change targeted an address with no account.
    #[error("account not found: {0:?}")]
    AccountMissing(Pubkey),

    /// Payer cannot cover a transfer.
    #[error("insufficient lamports in {address:?}: required {required}, available {available}")]
    InsufficientLamports {
        /// Payer account.
        address: Pubkey,
        /// Lamports required.
        required: u64,
        /// Lamports held.
        available: u64,
    },

    /// Lamport arithmetic overflowed.
    #[error("lamport overflow on {0:?}")]
    LamportOverflow(Pubkey),

    /// Lock poisoned by a panicking writer.
    #[error("ledger lock poisoned")]
    LockPoisoned,
}

impl From<LedgerError> for TweetError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::AccountExists(_) => TweetError::AlreadyExists,
            LedgerError::AccountMissing(_) => TweetError::NotFound,
            LedgerError::InsufficientLamports {
                required,
                available,
                ..
            } => TweetError::InsufficientFunds {
                needed: required,
                available,
            },
            other => TweetError::Ledger(other.to_string()),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
