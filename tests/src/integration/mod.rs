//! # Integration Tests
//!
//! Flows that cross crate boundaries: `shared-crypto` signing,
//! `tl-01-tweet-program` execution and `tl-node-runtime` wiring.

pub mod concurrency;
pub mod lifecycle;
pub mod queries;
pub mod runtime;
