/// Dense univariate polynomials over the curve base field
pub mod polynomial;

/// Field of fractions of the polynomial ring, kept in reduced form
pub mod rational_function;

pub use polynomial::Polynomial;
pub use rational_function::RationalFunction;
