//! # Value Objects
//!
//! Immutable ledger primitives: account keys, unique seeds and transaction
//! signatures. These types are defined by their bytes, not by identity.

use rand::RngCore;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// PUBKEY (32 bytes)
// =============================================================================

/// A 32-byte account key.
///
/// Used both for author identities (Ed25519 public keys) and for derived
/// record addresses, which are guaranteed to be off the curve.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Pubkey(pub [u8; 32]);

impl Pubkey {
    /// The all-zero key. Also the owner of plain lamport-holding accounts.
    pub const ZERO: Self = Self([0u8; 32]);

    /// Creates a key from a 32-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Creates a key from a slice. Returns None if wrong length.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        <[u8; 32]>::try_from(slice).ok().map(Self)
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Full lowercase hex encoding.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Display for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0[..4] {
            write!(f, "{byte:02x}")?;
        }
        write!(f, "..")?;
        for byte in &self.0[28..] {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Error returned when parsing a key or seed from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind}: expected {expected} hex-encoded bytes")]
pub struct ParseKeyError {
    kind: &'static str,
    expected: usize,
}

impl FromStr for Pubkey {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = ParseKeyError {
            kind: "pubkey",
            expected: 32,
        };
        let bytes = hex::decode(s.trim()).map_err(|_| err.clone())?;
        Self::from_slice(&bytes).ok_or(err)
    }
}

impl From<[u8; 32]> for Pubkey {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl From<Pubkey> for [u8; 32] {
    fn from(key: Pubkey) -> Self {
        key.0
    }
}

impl Serialize for Pubkey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Pubkey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// UNIQUE SEED (16 bytes)
// =============================================================================

/// 128 bits of caller-chosen randomness distinguishing records of one author.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct UniqueSeed(pub [u8; 16]);

impl UniqueSeed {
    /// Byte width of a seed.
    pub const LEN: usize = 16;

    /// Creates a seed from a 16-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Draws a fresh seed from the thread RNG.
    #[must_use]
    pub fn random() -> Self {
        let mut bytes = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

impl fmt::Debug for UniqueSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl FromStr for UniqueSeed {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = ParseKeyError {
            kind: "unique seed",
            expected: 16,
        };
        let bytes = hex::decode(s.trim()).map_err(|_| err.clone())?;
        <[u8; 16]>::try_from(bytes.as_slice())
            .map(Self)
            .map_err(|_| err)
    }
}

impl Serialize for UniqueSeed {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(self.0))
    }
}

impl<'de> Deserialize<'de> for UniqueSeed {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// SIGNATURE (64 bytes)
// =============================================================================

/// Ed25519 signature attached to a transaction.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature(pub [u8; 64]);

impl Signature {
    /// An all-zero placeholder that never verifies.
    pub const ZERO: Self = Self([0u8; 64]);

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..", hex::encode(&self.0[..8]))
    }
}

impl From<shared_crypto::Ed25519Signature> for Signature {
    fn from(sig: shared_crypto::Ed25519Signature) -> Self {
        Self(*sig.as_bytes())
    }
}

// =============================================================================
// TESTS
// =============================================================================
