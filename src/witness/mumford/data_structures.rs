use ark_ec::short_weierstrass::{Affine, SWCurveConfig};
use ark_ff::One;
use ark_std::fmt;

use crate::arithmetic::{Polynomial, RationalFunction};
use crate::curve::curve_polynomial;
use crate::errors::WitnessError;
use crate::function_field::FunctionFelt;

/// Mumford representation `(u, v)` of a semi-reduced divisor `D` with no
/// support at infinity: `u` is monic with the x-coordinates of `D` as
/// roots (with multiplicity), `deg v < deg u`, `v(x_i) = y_i`, and `u`
/// divides `v^2 - (x^3 + A*x + B)`.
///
/// The value stands for the degree zero divisor `D - deg(u)[O]`.
pub struct MumfordDivisor<P: SWCurveConfig> {
    pub(crate) u: Polynomial<P::BaseField>,
    pub(crate) v: Polynomial<P::BaseField>,
}

impl<P: SWCurveConfig> MumfordDivisor<P> {
    /// The zero divisor, `(1, 0)`.
    pub fn identity() -> Self {
        Self {
            u: Polynomial::one(),
            v: Polynomial::zero(),
        }
    }

    /// `[P] - [O]`, i.e. `(x - x_P, y_P)`.
    pub fn from_point(point: &Affine<P>) -> Self {
        if point.infinity {
            return Self::identity();
        }
        Self {
            u: Polynomial::linear(point.x),
            v: Polynomial::constant(point.y),
        }
    }

    /// Validates and normalizes a pair `(u, v)`: `u` is made monic and `v`
    /// reduced modulo `u`.
    pub fn from_coordinates(
        u: Polynomial<P::BaseField>,
        v: Polynomial<P::BaseField>,
    ) -> Result<Self, WitnessError> {
        let u = u.monic();
        let (_, v) = v.divmod(&u)?;
        let (_, rem) = (&curve_polynomial::<P>() - &(&v * &v)).divmod(&u)?;
        if !rem.is_zero() {
            return Err(WitnessError::InconsistentMumford);
        }
        Ok(Self { u, v })
    }

    pub fn u(&self) -> &Polynomial<P::BaseField> {
        &self.u
    }

    pub fn v(&self) -> &Polynomial<P::BaseField> {
        &self.v
    }

    /// Number of finite points of the divisor, counted with multiplicity.
    pub fn degree(&self) -> usize {
        self.u.degree().unwrap_or(0)
    }

    pub fn is_identity(&self) -> bool {
        self.degree() == 0
    }

    /// Cantor composition. Returns `(D3, h)` with `D1 + D2 = D3 + div(h)`,
    /// where `h(x)` collects the pairs `P, -P` cancelled by the sum.
    pub fn compose(
        &self,
        other: &Self,
    ) -> Result<(Self, Polynomial<P::BaseField>), WitnessError> {
        let (u1, v1) = (&self.u, &self.v);
        let (u2, v2) = (&other.u, &other.v);

        let (d0, e1, e2) = u1.xgcd(u2);
        let (d, c1, s3) = d0.xgcd(&(v1 + v2));
        let s1 = &c1 * &e1;
        let s2 = &c1 * &e2;

        let (u, _) = (u1 * u2).divmod(&(&d * &d))?;
        let u = u.monic();

        let c = curve_polynomial::<P>();
        let numerator = &(&(&(&s1 * u1) * v2) + &(&(&s2 * u2) * v1)) + &(&s3 * &(&(v1 * v2) + &c));
        let (v, rem) = numerator.divmod(&d)?;
        if !rem.is_zero() {
            return Err(WitnessError::InconsistentMumford);
        }
        let (_, v) = v.divmod(&u)?;

        Ok((Self { u, v }, d))
    }

    /// One reduction step. Returns `(D', h)` with `D = D' + div(h)`, where
    /// `h = (y - v) / u'` and `deg u' < deg u` whenever `deg u > 1`.
    pub fn reduce(&self) -> Result<(Self, FunctionFelt<P>), WitnessError> {
        let c = curve_polynomial::<P>();
        let (u_next, rem) = (&c - &(&self.v * &self.v)).divmod(&self.u)?;
        if !rem.is_zero() {
            return Err(WitnessError::InconsistentMumford);
        }
        let u_next = u_next.monic();
        let (_, v_next) = (-&self.v).divmod(&u_next)?;

        // y - v(x) written as a - y*b
        let chord = FunctionFelt::new(
            RationalFunction::from_polynomial(-&self.v),
            RationalFunction::constant(-P::BaseField::one()),
        );
        let u_inv = RationalFunction::new(Polynomial::one(), u_next.clone())?;

        Ok((
            Self {
                u: u_next,
                v: v_next,
            },
            chord.scale(&u_inv),
        ))
    }
}

impl<P: SWCurveConfig> Clone for MumfordDivisor<P> {
    fn clone(&self) -> Self {
        Self {
            u: self.u.clone(),
            v: self.v.clone(),
        }
    }
}

impl<P: SWCurveConfig> PartialEq for MumfordDivisor<P> {
    fn eq(&self, other: &Self) -> bool {
        self.u == other.u && self.v == other.v
    }
}

impl<P: SWCurveConfig> Eq for MumfordDivisor<P> {}

impl<P: SWCurveConfig> fmt::Debug for MumfordDivisor<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MumfordDivisor")
            .field("u", &self.u)
            .field("v", &self.v)
            .finish()
    }
}
