//! # Tweet Ledger Benchmarks
//!
//! | Path | Target |
//! |------|--------|
//! | Address derivation | < 50μs |
//! | Record encode/decode (1401 bytes) | < 5μs |
//! | Signed create | < 500μs |

use criterion::{criterion_group, criterion_main, Criterion};

fn benches(c: &mut Criterion) {
    tl_tests::benchmarks::tl_01_tweet_program::register_benchmarks(c);
}

criterion_group!(tweet_benches, benches);
criterion_main!(tweet_benches);
