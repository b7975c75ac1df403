use ark_ff::{Field, One, Zero};
use ark_poly::{univariate::DensePolynomial, DenseUVPolynomial};
use ark_serialize::{
    CanonicalDeserialize, CanonicalSerialize, Compress, Read, SerializationError, Valid, Validate,
    Write,
};
use ark_std::ops::{Add, Mul, Neg, Sub};
use ark_std::vec::Vec;

use crate::errors::WitnessError;

/// Dense univariate polynomial over the field F.
///
/// Coefficients are stored from the constant term upwards and are always
/// trimmed, so the zero polynomial has no coefficients at all and two
/// polynomials are equal iff their coefficient vectors are.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Polynomial<F: Field> {
    inner: DensePolynomial<F>,
}

impl<F: Field> Polynomial<F> {
    /// Builds a polynomial from coefficients given in ascending order of power
    pub fn new(coeffs: Vec<F>) -> Self {
        Self {
            inner: DensePolynomial::from_coefficients_vec(coeffs),
        }
    }

    pub fn zero() -> Self {
        Self::new(Vec::new())
    }

    pub fn constant(c: F) -> Self {
        Self::new(vec![c])
    }

    pub fn one() -> Self {
        Self::constant(F::one())
    }

    /// The monomial x
    pub fn x() -> Self {
        Self::new(vec![F::zero(), F::one()])
    }

    /// The linear polynomial x - root
    pub fn linear(root: F) -> Self {
        Self::new(vec![-root, F::one()])
    }

    pub fn coeffs(&self) -> &[F] {
        &self.inner.coeffs
    }

    pub fn is_zero(&self) -> bool {
        self.inner.coeffs.is_empty()
    }

    /// Degree of the polynomial, `None` for the zero polynomial.
    pub fn degree(&self) -> Option<usize> {
        self.inner.coeffs.len().checked_sub(1)
    }

    pub fn is_constant(&self) -> bool {
        self.inner.coeffs.len() <= 1
    }

    pub fn leading_coefficient(&self) -> Option<F> {
        self.inner.coeffs.last().copied()
    }

    /// Evaluates the polynomial at `point` with Horner's rule.
    pub fn evaluate(&self, point: &F) -> F {
        self.inner
            .coeffs
            .iter()
            .rev()
            .fold(F::zero(), |acc, coeff| acc * point + coeff)
    }

    pub fn scale(&self, c: F) -> Self {
        Self::new(self.inner.coeffs.iter().map(|coeff| *coeff * c).collect())
    }

    /// Rescales the polynomial so that its leading coefficient is one.
    /// The zero polynomial is returned unchanged.
    pub fn monic(&self) -> Self {
        match self.leading_coefficient().and_then(|lc| lc.inverse()) {
            Some(inv) => self.scale(inv),
            None => self.clone(),
        }
    }

    pub fn pow(&self, exp: usize) -> Self {
        (0..exp).fold(Self::one(), |acc, _| &acc * self)
    }

    /// Polynomial long division.
    ///
    /// Returns `(quotient, remainder)` with `self = divisor * quotient + remainder`
    /// and `remainder.degree() < divisor.degree()`.
    pub fn divmod(&self, divisor: &Self) -> Result<(Self, Self), WitnessError> {
        if divisor.is_zero() {
            return Err(WitnessError::DivisionByZero);
        }
        Ok(self.divmod_unchecked(divisor))
    }

    // Long division by a divisor already known to be nonzero
    pub(crate) fn divmod_unchecked(&self, divisor: &Self) -> (Self, Self) {
        let divisor_coeffs = divisor.coeffs();
        let d = divisor_coeffs.len().saturating_sub(1);
        let lead_inv = match divisor.leading_coefficient().and_then(|lc| lc.inverse()) {
            Some(inv) => inv,
            None => return (Self::zero(), self.clone()),
        };

        if self.coeffs().len() <= d {
            return (Self::zero(), self.clone());
        }

        let mut rem = self.coeffs().to_vec();
        let mut quot = vec![F::zero(); rem.len() - d];

        for i in (0..quot.len()).rev() {
            let coeff = rem[i + d] * lead_inv;
            quot[i] = coeff;
            if coeff.is_zero() {
                continue;
            }
            for (j, dc) in divisor_coeffs.iter().enumerate() {
                rem[i + j] -= coeff * dc;
            }
        }

        rem.truncate(d);
        (Self::new(quot), Self::new(rem))
    }

    /// Greatest common divisor by the Euclidean algorithm, normalized to be
    /// monic. The gcd of two zero polynomials is zero.
    pub fn gcd(&self, other: &Self) -> Self {
        let (mut r0, mut r1) = (self.clone(), other.clone());
        while !r1.is_zero() {
            let (_, r) = r0.divmod_unchecked(&r1);
            r0 = ark_std::mem::replace(&mut r1, r);
        }
        r0.monic()
    }

    /// Extended Euclidean algorithm.
    ///
    /// Returns `(g, s, t)` with `g = s * self + t * other` and `g` the monic
    /// gcd of the two inputs.
    pub fn xgcd(&self, other: &Self) -> (Self, Self, Self) {
        let (mut r0, mut r1) = (self.clone(), other.clone());
        let (mut s0, mut s1) = (Self::one(), Self::zero());
        let (mut t0, mut t1) = (Self::zero(), Self::one());

        while !r1.is_zero() {
            let (q, r) = r0.divmod_unchecked(&r1);
            r0 = ark_std::mem::replace(&mut r1, r);

            let s = &s0 - &(&q * &s1);
            s0 = ark_std::mem::replace(&mut s1, s);

            let t = &t0 - &(&q * &t1);
            t0 = ark_std::mem::replace(&mut t1, t);
        }

        match r0.leading_coefficient().and_then(|lc| lc.inverse()) {
            Some(inv) => (r0.scale(inv), s0.scale(inv), t0.scale(inv)),
            None => (r0, s0, t0),
        }
    }

    /// Multiplicity of `root` as a root of the polynomial, `None` for the
    /// zero polynomial (which vanishes to every order).
    pub fn root_multiplicity(&self, root: &F) -> Option<usize> {
        if self.is_zero() {
            return None;
        }
        let factor = Self::linear(*root);
        let mut current = self.clone();
        let mut multiplicity = 0;
        loop {
            let (q, r) = current.divmod_unchecked(&factor);
            if !r.is_zero() {
                return Some(multiplicity);
            }
            current = q;
            multiplicity += 1;
        }
    }

    /// Lagrange interpolation: the unique polynomial of degree less than
    /// `domain.len()` taking `values[i]` at `domain[i]`.
    pub fn interpolate_domain(domain: &[F], values: &[F]) -> Result<Self, WitnessError> {
        if domain.len() != values.len() {
            return Err(WitnessError::InterpolationLengthMismatch {
                domain: domain.len(),
                values: values.len(),
            });
        }

        let mut result = Self::zero();
        for (i, (xi, yi)) in domain.iter().zip(values).enumerate() {
            let mut basis = Self::one();
            let mut denominator = F::one();
            for (j, xj) in domain.iter().enumerate() {
                if i == j {
                    continue;
                }
                if xi == xj {
                    return Err(WitnessError::DuplicateDomainPoint);
                }
                basis = &basis * &Self::linear(*xj);
                denominator *= *xi - xj;
            }
            let weight = denominator
                .inverse()
                .ok_or(WitnessError::DuplicateDomainPoint)?;
            result = &result + &basis.scale(*yi * weight);
        }

        Ok(result)
    }

    /// Checks whether the given `(x, y)` points lie on a common line.
    ///
    /// Points sharing a single x-coordinate lie on a vertical line. Otherwise
    /// the line is interpolated through two points with distinct x and every
    /// point has to satisfy it.
    pub fn is_collinear(points: &[(F, F)]) -> bool {
        let Some((x0, y0)) = points.first() else {
            return true;
        };
        let Some((x1, y1)) = points.iter().find(|(x, _)| x != x0) else {
            return true;
        };
        match Self::interpolate_domain(&[*x0, *x1], &[*y0, *y1]) {
            Ok(line) => points.iter().all(|(x, y)| line.evaluate(x) == *y),
            Err(_) => false,
        }
    }
}

impl<'a, 'b, F: Field> Add<&'a Polynomial<F>> for &'b Polynomial<F> {
    type Output = Polynomial<F>;

    fn add(self, other: &'a Polynomial<F>) -> Polynomial<F> {
        Polynomial {
            inner: &self.inner + &other.inner,
        }
    }
}

impl<'a, 'b, F: Field> Sub<&'a Polynomial<F>> for &'b Polynomial<F> {
    type Output = Polynomial<F>;

    fn sub(self, other: &'a Polynomial<F>) -> Polynomial<F> {
        Polynomial {
            inner: &self.inner - &other.inner,
        }
    }
}

impl<'a, F: Field> Neg for &'a Polynomial<F> {
    type Output = Polynomial<F>;

    fn neg(self) -> Polynomial<F> {
        Polynomial {
            inner: -self.inner.clone(),
        }
    }
}

/// Schoolbook multiplication: the coefficient vectors are convolved, giving
/// `m + n - 1` coefficients before trimming. The curve base fields are not
/// FFT friendly, so the ark-poly FFT product is not used here.
impl<'a, 'b, F: Field> Mul<&'a Polynomial<F>> for &'b Polynomial<F> {
    type Output = Polynomial<F>;

    fn mul(self, other: &'a Polynomial<F>) -> Polynomial<F> {
        if self.is_zero() || other.is_zero() {
            return Polynomial::zero();
        }
        let mut coeffs = vec![F::zero(); self.coeffs().len() + other.coeffs().len() - 1];
        for (i, a) in self.coeffs().iter().enumerate() {
            for (j, b) in other.coeffs().iter().enumerate() {
                coeffs[i + j] += *a * b;
            }
        }
        Polynomial::new(coeffs)
    }
}

impl<F: Field> From<DensePolynomial<F>> for Polynomial<F> {
    fn from(poly: DensePolynomial<F>) -> Self {
        Self::new(poly.coeffs)
    }
}

impl<F: Field> CanonicalSerialize for Polynomial<F> {
    fn serialize_with_mode<W: Write>(
        &self,
        writer: W,
        compress: Compress,
    ) -> Result<(), SerializationError> {
        self.inner.coeffs.serialize_with_mode(writer, compress)
    }

    fn serialized_size(&self, compress: Compress) -> usize {
        self.inner.coeffs.serialized_size(compress)
    }
}

impl<F: Field> Valid for Polynomial<F> {
    fn check(&self) -> Result<(), SerializationError> {
        self.inner.coeffs.check()
    }
}

impl<F: Field> CanonicalDeserialize for Polynomial<F> {
    fn deserialize_with_mode<R: Read>(
        reader: R,
        compress: Compress,
        validate: Validate,
    ) -> Result<Self, SerializationError> {
        let coeffs = Vec::<F>::deserialize_with_mode(reader, compress, validate)?;
        Ok(Self::new(coeffs))
    }
}
