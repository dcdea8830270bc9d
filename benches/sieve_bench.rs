use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use simd_sieve::block;
use simd_sieve::drivers::{drive, SieveDriver};
use simd_sieve::state::{ModeWord, PrimeType, State};
use simd_sieve::tables::{build_tables, Tables, Tier};

fn bench_build_tables(c: &mut Criterion) {
    c.bench_function("build_tables", |b| {
        b.iter(build_tables);
    });
}

fn bench_block_testers(c: &mut Criterion) {
    let t = build_tables();
    // Q picked far above block 0's largest prime so no tester short-circuits
    // on the self-collision edge case (see DESIGN.md).
    let q = 1_000_000_007u32;
    let r: Vec<u16> = t.primes[..block::BLOCK]
        .iter()
        .map(|&p| (q % p as u32) as u16)
        .collect();
    let inv = &t.inv[..block::BLOCK];
    let limit = &t.limit[..block::BLOCK];

    let mut group = c.benchmark_group("block_testers");
    group.bench_function("no_factor_plain", |b| {
        b.iter(|| block::no_factor_plain(black_box(&r), inv, limit));
    });
    group.bench_function("no_factor_twin", |b| {
        b.iter(|| block::no_factor_twin(black_box(&r), inv, limit));
    });
    group.bench_function("no_factor_safe", |b| {
        b.iter(|| block::no_factor_safe(black_box(&r), inv, limit));
    });
    group.finish();
}

fn bench_advance_block_scalar(c: &mut Criterion) {
    let t = build_tables();
    let r: Vec<u16> = t.primes[..block::BLOCK].iter().map(|&p| p / 2).collect();
    c.bench_function("advance_block_scalar", |b| {
        b.iter_batched(
            || r.clone(),
            |mut r| block::advance_block_scalar(black_box(&mut r), 4, &t.m2r[..block::BLOCK]),
            criterion::BatchSize::SmallInput,
        );
    });
}

/// Candidate big enough that every survivor the driver walks past the
/// table's largest prime in every tier (no self-collision).
const BENCH_Q: [u8; 5] = [0x05, 0xF5, 0xE1, 0x00, 0x01]; // 25_600_000_001

fn driver_for(tables: &Tables, tier: Tier) -> SieveDriver<'_> {
    let mode = ModeWord::new(PrimeType::Plain, tier).unwrap();
    let state = State::init(&BENCH_Q, tables, mode).unwrap();
    SieveDriver::new(state, tables)
}

fn bench_drive_throughput(c: &mut Criterion) {
    let tables = build_tables();
    let mut group = c.benchmark_group("drive_throughput");
    for tier in [Tier::S, Tier::M, Tier::L] {
        group.bench_with_input(BenchmarkId::from_parameter(tier), &tier, |b, &tier| {
            b.iter_batched(
                || driver_for(&tables, tier),
                |mut driver| {
                    let mut out = [0u64; 64];
                    drive(black_box(&mut driver), &mut out, 64)
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_build_tables,
    bench_block_testers,
    bench_advance_block_scalar,
    bench_drive_throughput,
);
criterion_main!(benches);
