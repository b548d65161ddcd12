//! # Ports Layer (Middle Hexagon)
//!
//! Trait definitions between the tweet program and the outside world.
//!
//! - **Driving Ports (Inbound)**: `TweetProgramApi`
//! - **Driven Ports (Outbound)**: `LedgerState`, `SignatureVerifier`, `Clock`

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
