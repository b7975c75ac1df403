pub mod incremental_bench;
pub mod mumford_bench;

use ark_bls12_381::{g1::Config, G1Affine};
use divisor_witness::curve::random_point;
use divisor_witness::Divisor;

pub fn random_divisor(n: usize) -> Divisor<Config> {
    let rng = &mut ark_std::test_rng();
    let points: Vec<G1Affine> = (0..n).map(|_| random_point::<Config, _>(rng)).collect();
    Divisor::completing(&points)
}
