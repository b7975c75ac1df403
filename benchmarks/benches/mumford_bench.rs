use criterion::{black_box, criterion_group, BatchSize, BenchmarkId, Criterion};
use divisor_witness::test_witness;
use divisor_witness::witness::mumford_witness;

use super::random_divisor;

fn mumford_witness_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("mumford_witness");

    for size in [4, 16, 64] {
        let divisor = random_divisor(size);

        group.bench_with_input(BenchmarkId::new("mumford_witness", size), &size, |b, &_size| {
            b.iter_batched(
                || divisor.clone(),
                |divisor| {
                    let _witness = mumford_witness(black_box(&divisor));
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn verification_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("test_witness");

    for size in [4, 16, 64] {
        let divisor = random_divisor(size);
        let witness = mumford_witness(&divisor).expect("random divisors are principal");

        group.bench_with_input(BenchmarkId::new("test_witness", size), &size, |b, &_size| {
            b.iter(|| test_witness(black_box(&witness), black_box(&divisor)))
        });
    }
    group.finish();
}

criterion_group!(
    name = benchmarks;
    config = Criterion::default().significance_level(0.1).sample_size(10);
    targets = mumford_witness_benchmark, verification_benchmark
);
