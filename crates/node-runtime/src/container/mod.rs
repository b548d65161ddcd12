//! # Program Container
//!
//! Configuration and dependency wiring for the node.

pub mod config;
pub mod program;

pub use config::{ConfigError, NodeConfig};
pub use program::{ConcreteTweetProgram, ProgramContainer};
