use criterion::{black_box, criterion_group, BatchSize, BenchmarkId, Criterion};
use divisor_witness::witness::incremental_witness;

use super::random_divisor;

fn incremental_witness_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("incremental_witness");

    for size in [4, 16, 64] {
        let divisor = random_divisor(size);

        group.bench_with_input(BenchmarkId::new("incremental_witness", size), &size, |b, &_size| {
            b.iter_batched(
                || divisor.clone(),
                |divisor| {
                    let _witness = incremental_witness(black_box(&divisor));
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(
    name = benchmarks;
    config = Criterion::default().significance_level(0.1).sample_size(10);
    targets = incremental_witness_benchmark
);
