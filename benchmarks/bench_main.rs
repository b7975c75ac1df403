use criterion::criterion_main;

mod benches;

criterion_main! {
    benches::incremental_bench::benchmarks,
    benches::mumford_bench::benchmarks,
}
