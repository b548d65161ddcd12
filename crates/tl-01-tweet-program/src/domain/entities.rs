//! # Domain Entities
//!
//! Core data structures: the tweet record, ledger accounts, staged state
//! changes and program configuration.

use crate::domain::address::{self, DerivationTag};
use crate::domain::instruction::InstructionKind;
use crate::domain::value_objects::{Pubkey, UniqueSeed};
use crate::errors::TweetError;
use serde::{Deserialize, Serialize};
use shared_crypto::sha256;

// =============================================================================
// TWEET RECORD
// =============================================================================

/// The stored fields of one tweet.
///
/// The address is not stored; it is recomputed from `author`,
/// `unique_seed` and `bump`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TweetRecord {
    /// Owner; the only identity allowed to mutate or delete.
    pub author: Pubkey,
    /// Creation-time randomness used in the address derivation.
    pub unique_seed: UniqueSeed,
    /// Disambiguation nonce found at creation.
    pub bump: u8,
    /// Creation time, Unix milliseconds.
    pub created_at: i64,
    /// Last modification time, Unix milliseconds.
    pub updated_at: i64,
    /// 0-50 characters.
    pub topic: String,
    /// 1-280 characters.
    pub content: String,
}

impl TweetRecord {
    /// Recomputes the record's address and checks it against the stored bump.
    ///
    /// # Errors
    ///
    /// `AuthorizationViolation` if the stored fields do not derive a valid
    /// address with the stored bump.
    pub fn address(&self, tag: &DerivationTag) -> Result<Pubkey, TweetError> {
        address::create_address(tag, &self.author, &self.unique_seed, self.bump)
            .ok_or(TweetError::AuthorizationViolation)
    }

    /// True if the record was modified after creation.
    #[must_use]
    pub fn is_edited(&self) -> bool {
        self.updated_at > self.created_at
    }
}

/// A record together with the address it lives at.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tweet {
    /// Derived storage address.
    pub address: Pubkey,
    /// Stored fields.
    #[serde(flatten)]
    pub record: TweetRecord,
}

// =============================================================================
// LEDGER ACCOUNTS
// =============================================================================

/// One entry of ledger storage.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Account {
    /// Balance; for program accounts this is the storage deposit.
    pub lamports: u64,
    /// Program allowed to write `data`.
    pub owner: Pubkey,
    /// Raw account bytes.
    pub data: Vec<u8>,
}

impl Account {
    /// A plain lamport-holding account owned by the system program.
    #[must_use]
    pub fn wallet(lamports: u64) -> Self {
        Self {
            lamports,
            owner: SYSTEM_PROGRAM_ID,
            data: Vec::new(),
        }
    }
}

/// Owner of plain wallet accounts.
pub const SYSTEM_PROGRAM_ID: Pubkey = Pubkey::ZERO;

/// A single staged mutation. A transition commits its changes as one unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StateChange {
    /// Allocate a new account funded by `payer`.
    CreateAccount {
        /// New account address (must be vacant).
        address: Pubkey,
        /// Owner program.
        owner: Pubkey,
        /// Funding account.
        payer: Pubkey,
        /// Deposit moved from `payer`.
        lamports: u64,
        /// Initial data (full allocated size).
        data: Vec<u8>,
    },
    /// Replace an account's data in place.
    WriteData {
        /// Target account.
        address: Pubkey,
        /// New data (same size as before).
        data: Vec<u8>,
    },
    /// Erase an account and move all its lamports to `beneficiary`.
    CloseAccount {
        /// Account to erase.
        address: Pubkey,
        /// Receiver of the reclaimed deposit.
        beneficiary: Pubkey,
    },
}

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Storage deposit parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RentConfig {
    /// Lamports charged per byte per year.
    pub lamports_per_byte_year: u64,
    /// Years of rent that make an account exempt.
    pub exemption_threshold_years: u64,
    /// Fixed per-account metadata overhead in bytes.
    pub account_storage_overhead: u64,
}

impl Default for RentConfig {
    fn default() -> Self {
        Self {
            lamports_per_byte_year: 3480,
            exemption_threshold_years: 2,
            account_storage_overhead: 128,
        }
    }
}

impl RentConfig {
    /// Deposit required to keep `data_len` bytes alive indefinitely.
    #[must_use]
    pub fn minimum_balance(&self, data_len: usize) -> u64 {
        (self.account_storage_overhead + data_len as u64)
            .saturating_mul(self.lamports_per_byte_year)
            .saturating_mul(self.exemption_threshold_years)
    }
}

/// Tweet program configuration.
#[derive(Clone, Debug)]
pub struct ProgramConfig {
    /// Address of the program; owner of every tweet account.
    pub program_id: Pubkey,
    /// Deposit parameters.
    pub rent: RentConfig,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            program_id: default_program_id(),
            rent: RentConfig::default(),
        }
    }
}

/// Program id used when none is configured.
#[must_use]
pub fn default_program_id() -> Pubkey {
    Pubkey::new(sha256(b"tl-01-tweet-program"))
}

// =============================================================================
// RECEIPTS
// =============================================================================

/// Outcome of a committed instruction, handed back to the submission layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Instruction that produced this receipt.
    pub instruction: InstructionKind,
    /// Targeted record address.
    pub address: Pubkey,
    /// Record snapshot after the transition; None after deletion.
    pub tweet: Option<Tweet>,
    /// Deposit charged on create or refunded on delete; zero on update.
    pub lamports: u64,
}
