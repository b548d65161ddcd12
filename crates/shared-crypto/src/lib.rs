//! # Shared Crypto - Ledger Cryptographic Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | SHA-256 | Address derivation, discriminators |
//! | `signatures` | Ed25519 | Transaction signing, author identity |
//! | `curve` | Edwards25519 decompression | Excluding on-curve derived addresses |
//!
//! ## Security Properties
//!
//! - **Ed25519**: Deterministic nonces, no RNG dependency when signing
//! - **SHA-256**: Multi-part hashing without intermediate allocation

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod curve;
pub mod errors;
pub mod hashing;
pub mod signatures;

// Re-exports
pub use curve::is_on_curve;
pub use errors::CryptoError;
pub use hashing::{hashv, sha256, Hash, Sha256Hasher};
pub use signatures::{verify_raw, Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
