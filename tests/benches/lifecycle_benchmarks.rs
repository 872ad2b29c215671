//! # Asset Auction Benchmarks
//!
//! | Area | Operation |
//! |------|-----------|
//! | Signatures | Recover and compare the signer of a result digest |
//! | Hashing | Canonical result digest |
//! | Lifecycle | Full add/start/close/finalize through `ContractHandler` |

use asset_auction::domain::signature::verify_signature;
use asset_auction::{hash_auction_result, ContractHandler, InMemoryLedger};
use auction_tests::fixtures::{result_args, start_args, Bidder};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;
use std::time::Duration;

fn bench_signature_verification(c: &mut Criterion) {
    let mut group = c.benchmark_group("signature-verification");
    group.measurement_time(Duration::from_secs(5));

    let bidder = Bidder::random();
    let result = bidder.winning_result("ethereum", 1, 1_000);
    let digest = result.digest();

    group.bench_function("recover_and_compare", |b| {
        b.iter(|| {
            black_box(verify_signature(
                &digest,
                &result.signature,
                &result.highest_bidder,
            ))
        })
    });

    group.bench_function("reject_garbage", |b| {
        let garbage = vec![0xFFu8; 65];
        b.iter(|| black_box(verify_signature(&digest, &garbage, &result.highest_bidder)))
    });

    group.finish();
}

fn bench_result_hashing(c: &mut Criterion) {
    c.bench_function("hash_auction_result", |b| {
        b.iter(|| {
            black_box(hash_auction_result(
                "ethereum",
                black_box(42),
                "0x00000000000000000000000000000000000000aa",
                black_box(1_000_000),
                "0x00000000000000000000000000000000000000bb",
            ))
        })
    });
}

fn bench_full_lifecycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("lifecycle");
    group.measurement_time(Duration::from_secs(10));

    for assets in [1u64, 10, 50] {
        let bidder = Bidder::random();
        let results: Vec<_> = (1..=assets)
            .map(|id| result_args(&bidder.winning_result("ethereum", id, id * 10)))
            .collect();

        group.throughput(Throughput::Elements(assets));
        group.bench_with_input(BenchmarkId::new("auctions", assets), &assets, |b, &n| {
            b.iter(|| {
                let handler = ContractHandler::new(Arc::new(InMemoryLedger::new()));
                for i in 1..=n {
                    let asset_id = format!("asset-{}", i);
                    let id = i.to_string();
                    handler
                        .invoke("AddAsset", &[asset_id.as_str(), "owner"])
                        .expect("add");
                    handler
                        .invoke("StartAuction", &[start_args(&asset_id).as_str()])
                        .expect("start");
                    handler.invoke("CloseAuction", &[id.as_str()]).expect("close");
                    handler
                        .invoke("FinAuction", &[results[(i - 1) as usize].as_str(), "true"])
                        .expect("finalize");
                }
                black_box(handler)
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_signature_verification,
    bench_result_hashing,
    bench_full_lifecycle
);
criterion_main!(benches);
