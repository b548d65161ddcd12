//! # Command Handlers
//!
//! Request handlers that drive the tweet program from outside.

pub mod commands;

pub use commands::*;
