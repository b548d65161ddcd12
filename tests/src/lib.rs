//! # Tweet Ledger Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── benchmarks/       # Performance tests
//! │   └── tl_01_tweet_program.rs
//! │
//! └── integration/      # Cross-crate flows
//!     ├── lifecycle.rs  # create → update → delete through the public API
//!     ├── concurrency.rs# racing transitions
//!     ├── queries.rs    # read-side filters
//!     └── runtime.rs    # node runtime command protocol
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p tl-tests
//!
//! # By category
//! cargo test -p tl-tests integration::
//!
//! # Benchmarks
//! cargo bench -p tl-tests
//! ```

#![allow(unused_variables)]
#![allow(unused_imports)]
#![allow(dead_code)]

pub mod benchmarks;
pub mod fixtures;
pub mod integration;
