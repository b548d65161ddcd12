//! # Edwards25519 Curve Membership
//!
//! Derived addresses must not be valid Ed25519 public keys, otherwise someone
//! could hold a private key for them. This module tests whether 32 bytes
//! decompress to a point on the curve.

use curve25519_dalek::edwards::CompressedEdwardsY;

/// Returns true if `bytes` is a valid compressed Edwards25519 point.
pub fn is_on_curve(bytes: &[u8; 32]) -> bool {
    CompressedEdwardsY(*bytes).decompress().is_some()
}
