use ark_ff::{Field, One, Zero};
use ark_serialize::{
    CanonicalDeserialize, CanonicalSerialize, Compress, Read, SerializationError, Valid, Validate,
    Write,
};
use ark_std::ops::{Add, Mul, Neg, Sub};

use super::polynomial::Polynomial;
use crate::errors::WitnessError;

/// Element of the field of fractions F(x), kept in canonical form:
/// numerator and denominator are coprime and the denominator is monic.
/// The zero function is stored as 0 / 1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RationalFunction<F: Field> {
    numerator: Polynomial<F>,
    denominator: Polynomial<F>,
}

impl<F: Field> RationalFunction<F> {
    pub fn new(numerator: Polynomial<F>, denominator: Polynomial<F>) -> Result<Self, WitnessError> {
        if denominator.is_zero() {
            return Err(WitnessError::DivisionByZero);
        }
        Ok(Self::reduce(numerator, denominator))
    }

    // Canonical reduction; `denominator` must be nonzero
    fn reduce(numerator: Polynomial<F>, denominator: Polynomial<F>) -> Self {
        if numerator.is_zero() {
            return Self::zero();
        }

        let g = numerator.gcd(&denominator);
        let (numerator, _) = numerator.divmod_unchecked(&g);
        let (denominator, _) = denominator.divmod_unchecked(&g);

        match denominator.leading_coefficient().and_then(|lc| lc.inverse()) {
            Some(inv) => Self {
                numerator: numerator.scale(inv),
                denominator: denominator.scale(inv),
            },
            None => Self {
                numerator,
                denominator,
            },
        }
    }

    pub fn from_polynomial(poly: Polynomial<F>) -> Self {
        Self {
            numerator: poly,
            denominator: Polynomial::one(),
        }
    }

    pub fn zero() -> Self {
        Self::from_polynomial(Polynomial::zero())
    }

    pub fn one() -> Self {
        Self::constant(F::one())
    }

    pub fn constant(c: F) -> Self {
        Self::from_polynomial(Polynomial::constant(c))
    }

    pub fn numerator(&self) -> &Polynomial<F> {
        &self.numerator
    }

    pub fn denominator(&self) -> &Polynomial<F> {
        &self.denominator
    }

    pub fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }

    /// True when the reduced denominator is the constant one.
    pub fn is_polynomial(&self) -> bool {
        self.denominator.is_constant()
    }

    pub fn into_polynomial(self) -> Option<Polynomial<F>> {
        if self.is_polynomial() {
            Some(self.numerator)
        } else {
            None
        }
    }

    pub fn scale(&self, c: F) -> Self {
        Self::reduce(self.numerator.scale(c), self.denominator.clone())
    }

    pub fn inverse(&self) -> Result<Self, WitnessError> {
        Self::new(self.denominator.clone(), self.numerator.clone())
    }

    pub fn checked_div(&self, other: &Self) -> Result<Self, WitnessError> {
        if other.is_zero() {
            return Err(WitnessError::DivisionByZero);
        }
        Ok(Self::reduce(
            &self.numerator * &other.denominator,
            &self.denominator * &other.numerator,
        ))
    }

    /// Evaluates the function at `x`, failing if `x` is a pole.
    pub fn evaluate(&self, x: &F) -> Result<F, WitnessError> {
        let den = self.denominator.evaluate(x);
        if den.is_zero() {
            return Err(WitnessError::PoleEvaluation);
        }
        let den_inv = den.inverse().ok_or(WitnessError::PoleEvaluation)?;
        Ok(self.numerator.evaluate(x) * den_inv)
    }
}

impl<'a, 'b, F: Field> Add<&'a RationalFunction<F>> for &'b RationalFunction<F> {
    type Output = RationalFunction<F>;

    fn add(self, other: &'a RationalFunction<F>) -> RationalFunction<F> {
        RationalFunction::reduce(
            &(&self.numerator * &other.denominator) + &(&other.numerator * &self.denominator),
            &self.denominator * &other.denominator,
        )
    }
}

impl<'a, 'b, F: Field> Sub<&'a RationalFunction<F>> for &'b RationalFunction<F> {
    type Output = RationalFunction<F>;

    fn sub(self, other: &'a RationalFunction<F>) -> RationalFunction<F> {
        RationalFunction::reduce(
            &(&self.numerator * &other.denominator) - &(&other.numerator * &self.denominator),
            &self.denominator * &other.denominator,
        )
    }
}

impl<'a, 'b, F: Field> Mul<&'a RationalFunction<F>> for &'b RationalFunction<F> {
    type Output = RationalFunction<F>;

    fn mul(self, other: &'a RationalFunction<F>) -> RationalFunction<F> {
        RationalFunction::reduce(
            &self.numerator * &other.numerator,
            &self.denominator * &other.denominator,
        )
    }
}

impl<'a, F: Field> Neg for &'a RationalFunction<F> {
    type Output = RationalFunction<F>;

    fn neg(self) -> RationalFunction<F> {
        RationalFunction {
            numerator: -&self.numerator,
            denominator: self.denominator.clone(),
        }
    }
}

impl<F: Field> From<Polynomial<F>> for RationalFunction<F> {
    fn from(poly: Polynomial<F>) -> Self {
        Self::from_polynomial(poly)
    }
}

impl<F: Field> CanonicalSerialize for RationalFunction<F> {
    fn serialize_with_mode<W: Write>(
        &self,
        mut writer: W,
        compress: Compress,
    ) -> Result<(), SerializationError> {
        self.numerator.serialize_with_mode(&mut writer, compress)?;
        self.denominator.serialize_with_mode(&mut writer, compress)
    }

    fn serialized_size(&self, compress: Compress) -> usize {
        self.numerator.serialized_size(compress) + self.denominator.serialized_size(compress)
    }
}

impl<F: Field> Valid for RationalFunction<F> {
    fn check(&self) -> Result<(), SerializationError> {
        self.numerator.check()?;
        self.denominator.check()
    }
}

/// Reading a rational function goes back through the constructor, so a
/// stored value with a zero denominator is rejected and an unreduced one
/// comes back canonical.
impl<F: Field> CanonicalDeserialize for RationalFunction<F> {
    fn deserialize_with_mode<R: Read>(
        mut reader: R,
        compress: Compress,
        validate: Validate,
    ) -> Result<Self, SerializationError> {
        let numerator = Polynomial::deserialize_with_mode(&mut reader, compress, validate)?;
        let denominator = Polynomial::deserialize_with_mode(&mut reader, compress, validate)?;
        Self::new(numerator, denominator).map_err(|_| SerializationError::InvalidData)
    }
}
