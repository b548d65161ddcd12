//! # Tweet Ledger Node Runtime Library
//!
//! This library exposes the internal modules of the node runtime for testing.
//! The main entry point is the `main.rs` binary.
//!
//! ## Modules
//!
//! - `container/` - Configuration and service wiring
//! - `handlers/` - JSON-lines command protocol

#![warn(missing_docs)]

pub mod container;
pub mod handlers;

pub use container::{ConfigError, NodeConfig, ProgramContainer};
pub use handlers::{Command, CommandHandler, Response};
