use ark_ec::short_weierstrass::SWCurveConfig;

pub mod arithmetic;
pub mod curve;
pub mod divisor;
pub mod errors;
pub mod function_field;
pub mod utils;
pub mod witness;

pub use arithmetic::{Polynomial, RationalFunction};
pub use curve::Place;
pub use divisor::Divisor;
pub use errors::WitnessError;
pub use function_field::FunctionFelt;
pub use witness::test_witness;

/// A construction of function field witnesses for principal divisors on
/// the curve described by `P`.
pub trait WitnessScheme<P: SWCurveConfig>: Sized {
    /// Builds a function whose divisor is `d`.
    ///
    /// Fails with `WitnessError::NonPrincipalDivisor` when no such function
    /// exists.
    fn construct(d: &Divisor<P>) -> Result<FunctionFelt<P>, WitnessError>;

    /// Checks that the divisor of `f` is exactly `d`.
    fn verify(f: &FunctionFelt<P>, d: &Divisor<P>) -> Result<bool, WitnessError> {
        test_witness(f, d)
    }
}
