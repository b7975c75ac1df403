use ark_ec::short_weierstrass::{Affine, SWCurveConfig};
use ark_ff::{Field, One, Zero};
use ark_serialize::{
    CanonicalDeserialize, CanonicalSerialize, Compress, Read, SerializationError, Valid, Validate,
    Write,
};
use ark_std::fmt;
use ark_std::ops::Mul;
use ark_std::rand::Rng;
use ark_std::UniformRand;

use crate::arithmetic::{Polynomial, RationalFunction};
use crate::curve::{curve_polynomial, Place};
use crate::errors::WitnessError;

/// Element of the function field of the curve y^2 = x^3 + A*x + B, written
/// as f(x, y) = a(x) - y*b(x) with a, b rational functions in x.
///
/// {1, y} is a basis of the function field over F(x), so with a and b in
/// canonical form the representation is unique and equality is structural.
pub struct FunctionFelt<P: SWCurveConfig> {
    pub a: RationalFunction<P::BaseField>,
    pub b: RationalFunction<P::BaseField>,
}

impl<P: SWCurveConfig> FunctionFelt<P> {
    pub fn new(a: RationalFunction<P::BaseField>, b: RationalFunction<P::BaseField>) -> Self {
        Self { a, b }
    }

    pub fn from_polynomials(a: Polynomial<P::BaseField>, b: Polynomial<P::BaseField>) -> Self {
        Self::new(a.into(), b.into())
    }

    pub fn one() -> Self {
        Self::constant(P::BaseField::one())
    }

    pub fn constant(c: P::BaseField) -> Self {
        Self::new(RationalFunction::constant(c), RationalFunction::zero())
    }

    pub fn is_zero(&self) -> bool {
        self.a.is_zero() && self.b.is_zero()
    }

    /// True when f lies in the coordinate ring F[x, y], i.e. has no pole at
    /// a finite place.
    pub fn is_polynomial(&self) -> bool {
        self.a.is_polynomial() && self.b.is_polynomial()
    }

    /// The vertical line x - x0, with divisor (x0, y0) + (x0, -y0) - 2O.
    pub fn vertical(x0: P::BaseField) -> Self {
        Self::from_polynomials(Polynomial::linear(x0), Polynomial::zero())
    }

    /// The line through two finite points, or the tangent at `p` when both
    /// arguments coincide. Written as m(x) - y, it vanishes at p, q and at
    /// -(p + q), with a pole of order three at infinity; when q = -p it is
    /// the vertical line through them instead. Fails with
    /// `LineThroughInfinity` if either point is the point at infinity.
    pub fn line(p: &Affine<P>, q: &Affine<P>) -> Result<Self, WitnessError> {
        if p.infinity || q.infinity {
            return Err(WitnessError::LineThroughInfinity);
        }
        let one = Polynomial::one();
        if p.x != q.x {
            let m = Polynomial::interpolate_domain(&[p.x, q.x], &[p.y, q.y])?;
            return Ok(Self::from_polynomials(m, one));
        }
        if p.y != q.y || p.y.is_zero() {
            return Ok(Self::vertical(p.x));
        }

        let x_sq = p.x.square();
        let slope = (x_sq + x_sq + x_sq + P::COEFF_A)
            * (p.y + p.y).inverse().ok_or(WitnessError::DivisionByZero)?;
        let m = Polynomial::new(vec![p.y - slope * p.x, slope]);
        Ok(Self::from_polynomials(m, one))
    }

    /// Multiplies both components by a function of x alone.
    pub fn scale(&self, r: &RationalFunction<P::BaseField>) -> Self {
        Self::new(&self.a * r, &self.b * r)
    }

    /// The conjugate a(x) + y*b(x), i.e. f composed with the negation map.
    pub fn conjugate(&self) -> Self {
        Self::new(self.a.clone(), -&self.b)
    }

    /// Norm N(f) = f(x, y) * f(x, -y) = a^2 - (x^3 + A*x + B) * b^2 as a
    /// rational function in x.
    pub fn norm_rational(&self) -> RationalFunction<P::BaseField> {
        let c = RationalFunction::from_polynomial(curve_polynomial::<P>());
        &(&self.a * &self.a) - &(&c * &(&self.b * &self.b))
    }

    /// Norm of f as a polynomial. Fails with `NonPolynomialNorm` when the
    /// denominators of a and b do not cancel.
    pub fn norm(&self) -> Result<Polynomial<P::BaseField>, WitnessError> {
        self.norm_rational()
            .into_polynomial()
            .ok_or(WitnessError::NonPolynomialNorm)
    }

    /// 1/f = (a + y*b) / N(f).
    pub fn inverse(&self) -> Result<Self, WitnessError> {
        let norm_inv = self.norm_rational().inverse()?;
        Ok(self.conjugate().scale(&norm_inv))
    }

    pub fn checked_div(&self, other: &Self) -> Result<Self, WitnessError> {
        Ok(self * &other.inverse()?)
    }

    /// Evaluates f at an affine point. The point at infinity has to be
    /// handled by the caller.
    pub fn evaluate(&self, point: &Affine<P>) -> Result<P::BaseField, WitnessError> {
        if point.infinity {
            return Err(WitnessError::EvaluationAtInfinity);
        }
        Ok(self.a.evaluate(&point.x)? - point.y * self.b.evaluate(&point.x)?)
    }

    /// Order of vanishing of f at `place` (negative for a pole), or `None`
    /// for the zero function.
    ///
    /// f is written over a common denominator as (A - y*B) / D with A, B, D
    /// polynomials. At infinity x and y have poles of order 2 and 3, and the
    /// two terms of A - y*B have orders of different parity, so the order is
    /// the smaller of the two. At a finite place the order of A - y*B is read
    /// off root multiplicities of its components and of its norm.
    pub fn order_at(&self, place: &Place<P::BaseField>) -> Option<i64> {
        if self.is_zero() {
            return None;
        }

        let (num_a, num_b, den) = self.common_denominator();
        match place {
            Place::Infinity => {
                let ord_a = num_a.degree().map(|d| -2 * d as i64);
                let ord_b = num_b.degree().map(|d| -3 - 2 * d as i64);
                let ord_num = match (ord_a, ord_b) {
                    (Some(oa), Some(ob)) => oa.min(ob),
                    (Some(o), None) | (None, Some(o)) => o,
                    (None, None) => return None,
                };
                let ord_den = -2 * den.degree().unwrap_or(0) as i64;
                Some(ord_num - ord_den)
            }
            Place::Finite { x, y } => {
                let ramification = if y.is_zero() { 2 } else { 1 };
                let ord_den = den.root_multiplicity(x).unwrap_or(0) * ramification;
                let ord_num = Self::finite_order(num_a, num_b, x, y)?;
                Some(ord_num as i64 - ord_den as i64)
            }
        }
    }

    // (A, B, D) with a = A / D and b = B / D, D = lcm of both denominators
    fn common_denominator(
        &self,
    ) -> (
        Polynomial<P::BaseField>,
        Polynomial<P::BaseField>,
        Polynomial<P::BaseField>,
    ) {
        let (den_a, den_b) = (self.a.denominator(), self.b.denominator());
        let g = den_a.gcd(den_b);
        let (cofactor_a, _) = den_b.divmod_unchecked(&g);
        let (cofactor_b, _) = den_a.divmod_unchecked(&g);
        (
            self.a.numerator() * &cofactor_a,
            self.b.numerator() * &cofactor_b,
            den_a * &cofactor_a,
        )
    }

    // Order at (x0, y0) of the coordinate ring element a - y*b
    fn finite_order(
        a: Polynomial<P::BaseField>,
        b: Polynomial<P::BaseField>,
        x0: &P::BaseField,
        y0: &P::BaseField,
    ) -> Option<usize> {
        let c = curve_polynomial::<P>();
        let norm = |a: &Polynomial<P::BaseField>, b: &Polynomial<P::BaseField>| {
            &(a * a) - &(&c * &(b * b))
        };

        // 2-torsion point: y is a uniformizer and x - x0 vanishes to order two
        if y0.is_zero() {
            return norm(&a, &b).root_multiplicity(x0);
        }

        // strip the largest power of x - x0 dividing f in the coordinate ring,
        // after which f vanishes at most at one of (x0, y0) and (x0, -y0)
        let shift = match (a.root_multiplicity(x0), b.root_multiplicity(x0)) {
            (Some(ma), Some(mb)) => ma.min(mb),
            (Some(m), None) | (None, Some(m)) => m,
            (None, None) => return None,
        };
        let factor = Polynomial::linear(*x0).pow(shift);
        let (a, _) = a.divmod_unchecked(&factor);
        let (b, _) = b.divmod_unchecked(&factor);

        if !(a.evaluate(x0) - *y0 * b.evaluate(x0)).is_zero() {
            return Some(shift);
        }
        Some(shift + norm(&a, &b).root_multiplicity(x0)?)
    }

    /// Random element whose components have numerators of degree at most
    /// `num_degree` and denominators of degree at most `den_degree`.
    pub fn gen_random<R: Rng + ?Sized>(rng: &mut R, num_degree: usize, den_degree: usize) -> Self {
        let a = random_rational(rng, num_degree, den_degree);
        let b = random_rational(rng, num_degree, den_degree);
        Self::new(a, b)
    }
}

fn random_rational<F: Field, R: Rng + ?Sized>(
    rng: &mut R,
    num_degree: usize,
    den_degree: usize,
) -> RationalFunction<F> {
    let num_len = rng.gen_range(1..=num_degree + 1);
    let numerator = Polynomial::new((0..num_len).map(|_| F::rand(rng)).collect());
    loop {
        let den_len = rng.gen_range(1..=den_degree + 1);
        let denominator = Polynomial::new((0..den_len).map(|_| F::rand(rng)).collect());
        if let Ok(r) = RationalFunction::new(numerator.clone(), denominator) {
            return r;
        }
    }
}

/// Product in the function field, reduced by y^2 = x^3 + A*x + B:
/// (a1 - y*b1)(a2 - y*b2) = (a1*a2 + c*b1*b2) - y*(a1*b2 + a2*b1).
impl<'a, 'b, P: SWCurveConfig> Mul<&'a FunctionFelt<P>> for &'b FunctionFelt<P> {
    type Output = FunctionFelt<P>;

    fn mul(self, other: &'a FunctionFelt<P>) -> FunctionFelt<P> {
        let c = RationalFunction::from_polynomial(curve_polynomial::<P>());
        let a = &(&self.a * &other.a) + &(&c * &(&self.b * &other.b));
        let b = &(&self.a * &other.b) + &(&other.a * &self.b);
        FunctionFelt::new(a, b)
    }
}

impl<P: SWCurveConfig> Clone for FunctionFelt<P> {
    fn clone(&self) -> Self {
        Self::new(self.a.clone(), self.b.clone())
    }
}

impl<P: SWCurveConfig> PartialEq for FunctionFelt<P> {
    fn eq(&self, other: &Self) -> bool {
        self.a == other.a && self.b == other.b
    }
}

impl<P: SWCurveConfig> Eq for FunctionFelt<P> {}

impl<P: SWCurveConfig> fmt::Debug for FunctionFelt<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionFelt")
            .field("a", &self.a)
            .field("b", &self.b)
            .finish()
    }
}

impl<P: SWCurveConfig> CanonicalSerialize for FunctionFelt<P> {
    fn serialize_with_mode<W: Write>(
        &self,
        mut writer: W,
        compress: Compress,
    ) -> Result<(), SerializationError> {
        self.a.serialize_with_mode(&mut writer, compress)?;
        self.b.serialize_with_mode(&mut writer, compress)
    }

    fn serialized_size(&self, compress: Compress) -> usize {
        self.a.serialized_size(compress) + self.b.serialized_size(compress)
    }
}

impl<P: SWCurveConfig> Valid for FunctionFelt<P> {
    fn check(&self) -> Result<(), SerializationError> {
        self.a.check()?;
        self.b.check()
    }
}

impl<P: SWCurveConfig> CanonicalDeserialize for FunctionFelt<P> {
    fn deserialize_with_mode<R: Read>(
        mut reader: R,
        compress: Compress,
        validate: Validate,
    ) -> Result<Self, SerializationError> {
        let a = RationalFunction::deserialize_with_mode(&mut reader, compress, validate)?;
        let b = RationalFunction::deserialize_with_mode(&mut reader, compress, validate)?;
        Ok(Self::new(a, b))
    }
}
