//! Benchmark for matching engine performance.
//!
//! Run with: cargo bench --package slotforge_core --bench matching_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use slotforge_core::{AnyOf, BatchSolver, MatchEngine, ResourceLedger};

/// A 3x3 grid request over `types` resource types with random overlap.
fn random_request(seed: u64, types: u32) -> (ResourceLedger<u32>, Vec<AnyOf<u32>>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut ledger = ResourceLedger::new();
    for kind in 0..types {
        ledger.account(kind, rng.gen_range(0..128));
    }
    let slots = (0..9)
        .map(|_| {
            let choices = rng.gen_range(1..=4);
            AnyOf::new((0..choices).map(|_| rng.gen_range(0..types)))
        })
        .collect();
    (ledger, slots)
}

fn benchmark_single_probe(c: &mut Criterion) {
    let (mut ledger, slots) = random_request(7, 32);

    c.bench_function("try_pick_3x3_32_types", |b| {
        b.iter(|| {
            let mut engine = MatchEngine::new(&mut ledger, &slots);
            black_box(engine.try_pick(black_box(4)))
        });
    });
}

fn benchmark_batch_search(c: &mut Criterion) {
    let (mut ledger, slots) = random_request(11, 32);

    c.bench_function("max_batch_3x3_32_types", |b| {
        b.iter(|| {
            let mut solver = BatchSolver::for_request(&mut ledger, &slots);
            black_box(solver.max_feasible_quantity(64))
        });
    });
}

fn benchmark_contended_supply(c: &mut Criterion) {
    // Every slot competes for the same two types: worst case for path length.
    let mut ledger = ResourceLedger::new();
    ledger.account(0u32, 40);
    ledger.account(1u32, 41);
    let slots: Vec<AnyOf<u32>> = (0..9).map(|_| AnyOf::new([0, 1])).collect();

    c.bench_function("max_batch_contended_two_types", |b| {
        b.iter(|| {
            let mut solver = BatchSolver::for_request(&mut ledger, &slots);
            black_box(solver.max_feasible_quantity(64))
        });
    });
}

criterion_group!(
    benches,
    benchmark_single_probe,
    benchmark_batch_search,
    benchmark_contended_supply
);
criterion_main!(benches);
