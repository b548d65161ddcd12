//! # TL-01 Tweet Program - Deterministic-Address Tweet Records
//!
//! **Subsystem ID:** 1
//! **Status:** Production-Ready
//!
//! ## Purpose
//!
//! Stores short public messages as accounts on a replicated ledger. Each
//! record lives at an address derived from its author and a random seed, so
//! ownership is proven by recomputing the address rather than by looking it
//! up.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Address derivation is deterministic and off-curve | `domain/address.rs` - `derive()` |
//! | Only the author can mutate or delete a record | `domain/access.rs` - `authorize()` |
//! | Topic ≤ 50 chars, content 1..=280 chars | `domain/validation.rs` - `validate()` |
//! | Field offsets are fixed per schema version | `domain/layout.rs` - `TWEET_SCHEMA_V1` |
//! | A rejected instruction leaves storage untouched | `service.rs` - single `commit()` per transition |
//!
//! ## Record Layout (v1)
//!
//! | Field | Offset | Width |
//! |-------|--------|-------|
//! | discriminator | 0 | 8 |
//! | author | 8 | 32 |
//! | unique_seed | 40 | 16 |
//! | bump | 56 | 1 |
//! | created_at | 57 | 8 |
//! | updated_at | 65 | 8 |
//! | topic (len + bytes) | 73 | 4 + n |
//! | content (len + bytes) | 77 + n | 4 + m |
//!
//! ## Outbound Dependencies
//!
//! | Collaborator | Trait | Purpose |
//! |--------------|-------|---------|
//! | Ledger | `LedgerState` | Account reads, atomic commits, filtered scans |
//! | Identity provider | `SignatureVerifier` | Verified-signature predicate |
//! | Time | `Clock` | Record timestamps |
//!
//! ## Usage Example
//!
//! ```ignore
//! use tl_01_tweet_program::prelude::*;
//!
//! let service = create_in_memory_service(ProgramConfig::default());
//! let address = service.tweet_address(&author, &seed)?;
//! let tx = SignedTransaction::sign(&program_id, address, &instruction, &keypair);
//! let receipt = service.execute(tx).await?;
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod domain;
pub mod errors;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain entities
    pub use crate::domain::entities::{
        default_program_id, Account, ProgramConfig, Receipt, RentConfig, StateChange, Tweet,
        TweetRecord, SYSTEM_PROGRAM_ID,
    };

    // Value objects
    pub use crate::domain::value_objects::{ParseKeyError, Pubkey, Signature, UniqueSeed};

    // Domain services
    pub use crate::domain::address::{derive, DerivationTag};
    pub use crate::domain::instruction::{InstructionKind, TweetInstruction};
    pub use crate::domain::layout::{TweetSchema, TWEET_ACCOUNT_LEN, TWEET_SCHEMA_V1};
    pub use crate::domain::query::{Filter, RecordQuery};
    pub use crate::domain::validation::{validate, MAX_CONTENT_CHARS, MAX_TOPIC_CHARS};

    // Ports
    pub use crate::ports::inbound::{SignedTransaction, TweetProgramApi};
    pub use crate::ports::outbound::{Clock, LedgerState, SignatureVerifier};

    // Adapters
    pub use crate::adapters::{Ed25519Verifier, InMemoryLedger, ManualClock, SystemClock};

    // Service
    pub use crate::service::{create_in_memory_service, ProgramStats, TweetProgramService};

    // Errors
    pub use crate::errors::{LayoutError, LedgerError, TweetError, ValidationError};
}

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Subsystem identifier.
pub const SUBSYSTEM_ID: u8 = 1;
