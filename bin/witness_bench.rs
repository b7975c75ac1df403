use anyhow::{ensure, Result};
use ark_bls12_381::{g1::Config, G1Affine};
use ark_std::rand::{rngs::StdRng, SeedableRng};
use ark_std::{end_timer, start_timer};
use clap::{Parser, ValueEnum};
use divisor_witness::curve::random_point;
use divisor_witness::witness::{IncrementalWitness, MumfordWitness};
use divisor_witness::{Divisor, WitnessScheme};
use rayon::prelude::*;
use std::time::Instant;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Method {
    Incremental,
    Mumford,
    Both,
}

#[derive(Parser, Debug)]
struct Args {
    /// Number of random points in each divisor, comma separated
    #[arg(long, value_delimiter = ',', default_values_t = [8usize, 32, 128])]
    points: Vec<usize>,

    /// Number of repetitions for each size
    #[arg(long, default_value = "5")]
    repeat: usize,

    /// Witness construction to run
    #[arg(long, value_enum, default_value_t = Method::Both)]
    method: Method,

    /// Seed for the point sampler
    #[arg(long, default_value = "0")]
    seed: u64,

    /// Number of threads to use for sampling points
    #[arg(long, default_value = "8")]
    prepare_threads: usize,
}

/// Samples `n` points, each from its own seeded generator so the result does
/// not depend on the thread count, and closes them into a principal divisor.
fn prepare_divisor(n: usize, seed: u64) -> Divisor<Config> {
    println!("Preparing divisor with {n} random points");
    let instant = Instant::now();
    let points: Vec<G1Affine> = (0..n)
        .into_par_iter()
        .map(|i| {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(i as u64));
            random_point::<Config, _>(&mut rng)
        })
        .collect();
    let divisor = Divisor::completing(&points);
    let duration = instant.elapsed().as_secs_f64();
    println!("Preparing divisor with {n} random points ....{duration}s");
    divisor
}

/// Runs one construction and its verification, returning the construction
/// time in milliseconds.
fn run_scheme<S: WitnessScheme<Config>>(label: &str, divisor: &Divisor<Config>) -> Result<u128> {
    let bench_timer =
        start_timer!(|| format!("{label} witness, {} places", divisor.support_size()));

    let instant = Instant::now();
    let witness = S::construct(divisor)?;
    let runtime = instant.elapsed();

    let verify_timer = start_timer!(|| "Verifying witness");
    let verified = S::verify(&witness, divisor)?;
    end_timer!(verify_timer);
    ensure!(verified, "{label} witness does not match the divisor");

    end_timer!(bench_timer);
    Ok(runtime.as_millis())
}

fn bench_witnesses(args: &Args) -> Result<()> {
    let pool_prepare = rayon::ThreadPoolBuilder::new()
        .num_threads(args.prepare_threads)
        .build()?;

    for &n in args.points.iter() {
        let divisor = pool_prepare.install(|| prepare_divisor(n, args.seed));

        let mut incremental_total = 0u128;
        let mut mumford_total = 0u128;
        for repeat_time in 0..args.repeat {
            println!("Running {n} points with repeat: {repeat_time}");
            if args.method != Method::Mumford {
                incremental_total +=
                    run_scheme::<IncrementalWitness<Config>>("Incremental", &divisor)?;
            }
            if args.method != Method::Incremental {
                mumford_total += run_scheme::<MumfordWitness<Config>>("Mumford", &divisor)?;
            }
        }
        println!(
            "points {n}, incremental total {incremental_total}ms, mumford total {mumford_total}ms"
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    bench_witnesses(&args)
}
