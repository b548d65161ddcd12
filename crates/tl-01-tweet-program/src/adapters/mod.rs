//! # Adapters
//!
//! Concrete implementations of the outbound ports.

pub mod clock;
pub mod memory_ledger;
pub mod verifier;

pub use clock::{ManualClock, SystemClock};
pub use memory_ledger::InMemoryLedger;
pub use verifier::Ed25519Verifier;
