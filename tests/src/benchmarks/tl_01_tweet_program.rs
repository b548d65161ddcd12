//! # TL-01 Tweet Program Benchmarks
//!
//! Hot paths:
//! - Address derivation (bump search with curve checks)
//! - Record encode/decode at the maximum size
//! - Filtered scans over a populated ledger
//! - Full signed create through the service

use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use shared_crypto::Ed25519KeyPair;
use std::time::Duration;
use tl_01_tweet_program::domain::layout;
use tl_01_tweet_program::prelude::*;
use tokio::runtime::Runtime;

use crate::fixtures::{pubkey, TestNet};

fn max_record() -> TweetRecord {
    TweetRecord {
        author: Pubkey::new([1; 32]),
        unique_seed: UniqueSeed::new([2; 16]),
        bump: 255,
        created_at: 1,
        updated_at: 1,
        topic: "🌱".repeat(MAX_TOPIC_CHARS),
        content: "🌱".repeat(MAX_CONTENT_CHARS),
    }
}

pub fn bench_address_derivation(c: &mut Criterion) {
    let mut group = c.benchmark_group("tl-01-address-derivation");
    let tag = DerivationTag::tweets(default_program_id());
    let author = Pubkey::new([7; 32]);

    group.bench_function("derive_random_seed", |b| {
        b.iter(|| black_box(derive(&tag, &author, &UniqueSeed::random())))
    });

    group.finish();
}

pub fn bench_record_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("tl-01-record-codec");
    let record = max_record();
    let encoded = layout::encode_account(&record).expect("encode");
    group.throughput(Throughput::Bytes(encoded.len() as u64));

    group.bench_function("encode_max_record", |b| {
        b.iter(|| black_box(layout::encode_account(&record)))
    });
    group.bench_function("decode_max_record", |b| {
        b.iter(|| black_box(layout::decode(&encoded)))
    });

    group.finish();
}

pub fn bench_filtered_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("tl-01-filtered-scan");
    group.measurement_time(Duration::from_secs(5));
    let rt = Runtime::new().expect("runtime");

    for size in [100usize, 1_000] {
        let net = TestNet::new();
        let authors: Vec<Ed25519KeyPair> = (0..10u8)
            .map(|i| {
                let author = net.user(i);
                net.ledger
                    .airdrop(pubkey(&author), 100_000_000_000)
                    .expect("airdrop");
                author
            })
            .collect();
        rt.block_on(async {
            for i in 0..size {
                let author = &authors[i % authors.len()];
                let topic = if i % 2 == 0 { "veganism" } else { "sleep" };
                net.send(author, UniqueSeed::random(), topic, "gm")
                    .await
                    .expect("send");
            }
        });
        let by_author = RecordQuery::by_author(&pubkey(&authors[0]));
        let by_topic = RecordQuery::by_topic("veganism");

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("by_author", size), &size, |b, _| {
            b.iter(|| black_box(rt.block_on(net.program.query(&by_author))))
        });
        group.bench_with_input(BenchmarkId::new("by_topic", size), &size, |b, _| {
            b.iter(|| black_box(rt.block_on(net.program.query(&by_topic))))
        });
    }

    group.finish();
}

pub fn bench_signed_create(c: &mut Criterion) {
    let mut group = c.benchmark_group("tl-01-signed-create");
    let rt = Runtime::new().expect("runtime");
    let net = TestNet::new();
    let author = net.user(1);
    net.ledger
        .airdrop(pubkey(&author), u64::MAX / 2)
        .expect("airdrop");

    group.bench_function("send_tweet", |b| {
        b.iter(|| {
            black_box(rt.block_on(net.send(&author, UniqueSeed::random(), "bench", "gm")))
        })
    });

    group.finish();
}

pub fn register_benchmarks(c: &mut Criterion) {
    bench_address_derivation(c);
    bench_record_codec(c);
    bench_filtered_scan(c);
    bench_signed_create(c);
}
