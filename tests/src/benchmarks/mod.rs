//! # Tweet Ledger Benchmarks
//!
//! Performance benchmarks for the hot paths of the tweet program.

pub mod tl_01_tweet_program;
