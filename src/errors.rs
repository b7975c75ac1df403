use ark_std::string::String;
use displaydoc::Display;

// Errors raised while building or checking divisor witnesses
#[derive(Display, Debug, Clone, PartialEq, Eq)]
pub enum WitnessError {
    /// Divisor is not principal: {0}
    NonPrincipalDivisor(String),
    /// Invalid divisor: {0}
    InvalidDivisor(String),
    /// Division by the zero polynomial
    DivisionByZero,
    /// Evaluation at a pole of the denominator
    PoleEvaluation,
    /// Cannot evaluate a function field element at the point at infinity
    EvaluationAtInfinity,
    /// A line is only defined through two finite points
    LineThroughInfinity,
    /// Interpolation domain contains a repeated point
    DuplicateDomainPoint,
    /// Interpolation domain has {domain} points but {values} values were given
    InterpolationLengthMismatch { domain: usize, values: usize },
    /// Norm of a function field element did not reduce to a polynomial
    NonPolynomialNorm,
    /// Mumford representation is inconsistent: u does not divide x^3 + Ax + B - v^2
    InconsistentMumford,
}

impl std::error::Error for WitnessError {}
