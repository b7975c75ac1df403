//! Glue between the divisor machinery and arkworks short Weierstrass curves.

use ark_ec::short_weierstrass::{Affine, SWCurveConfig};
use ark_ff::{Field, One, Zero};
use ark_serialize::{
    CanonicalDeserialize, CanonicalSerialize, Compress, Read, SerializationError, Valid, Validate,
    Write,
};
use ark_std::rand::Rng;
use ark_std::UniformRand;

use crate::arithmetic::Polynomial;

/// A place of the curve's function field: an affine point, or the point at
/// infinity. Used as the key of a divisor, so infinity is a tag of its own
/// and can never collide with an affine coordinate pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Place<F> {
    Finite { x: F, y: F },
    Infinity,
}

impl<F: Field> Place<F> {
    pub fn finite(x: F, y: F) -> Self {
        Place::Finite { x, y }
    }

    pub fn is_infinity(&self) -> bool {
        matches!(self, Place::Infinity)
    }

    pub fn coordinates(&self) -> Option<(F, F)> {
        match self {
            Place::Finite { x, y } => Some((*x, *y)),
            Place::Infinity => None,
        }
    }

    /// Image under the curve negation (x, y) -> (x, -y).
    pub fn negate(&self) -> Self {
        match self {
            Place::Finite { x, y } => Place::Finite { x: *x, y: -*y },
            Place::Infinity => Place::Infinity,
        }
    }

    pub fn to_affine<P: SWCurveConfig<BaseField = F>>(&self) -> Affine<P> {
        match self {
            Place::Finite { x, y } => Affine::new_unchecked(*x, *y),
            Place::Infinity => Affine::identity(),
        }
    }

    pub fn is_on_curve<P: SWCurveConfig<BaseField = F>>(&self) -> bool {
        match self {
            Place::Finite { x, y } => curve_polynomial::<P>().evaluate(x) == y.square(),
            Place::Infinity => true,
        }
    }
}

impl<P: SWCurveConfig> From<Affine<P>> for Place<P::BaseField> {
    fn from(point: Affine<P>) -> Self {
        if point.infinity {
            Place::Infinity
        } else {
            Place::Finite {
                x: point.x,
                y: point.y,
            }
        }
    }
}

impl<P: SWCurveConfig> From<&Affine<P>> for Place<P::BaseField> {
    fn from(point: &Affine<P>) -> Self {
        Place::from(*point)
    }
}

/// The right hand side x^3 + A*x + B of the curve equation y^2 = x^3 + A*x + B.
pub fn curve_polynomial<P: SWCurveConfig>() -> Polynomial<P::BaseField> {
    Polynomial::new(vec![
        P::COEFF_B,
        P::COEFF_A,
        P::BaseField::zero(),
        P::BaseField::one(),
    ])
}

/// Samples a uniformly random affine point, never the point at infinity.
pub fn random_point<P: SWCurveConfig, R: Rng + ?Sized>(rng: &mut R) -> Affine<P> {
    loop {
        let point = Affine::<P>::rand(rng);
        if !point.infinity {
            return point;
        }
    }
}

const FINITE_TAG: u8 = 0;
const INFINITY_TAG: u8 = 1;

impl<F: Field> CanonicalSerialize for Place<F> {
    fn serialize_with_mode<W: Write>(
        &self,
        mut writer: W,
        compress: Compress,
    ) -> Result<(), SerializationError> {
        match self {
            Place::Finite { x, y } => {
                FINITE_TAG.serialize_with_mode(&mut writer, compress)?;
                x.serialize_with_mode(&mut writer, compress)?;
                y.serialize_with_mode(&mut writer, compress)
            }
            Place::Infinity => INFINITY_TAG.serialize_with_mode(&mut writer, compress),
        }
    }

    fn serialized_size(&self, compress: Compress) -> usize {
        match self {
            Place::Finite { x, y } => {
                FINITE_TAG.serialized_size(compress)
                    + x.serialized_size(compress)
                    + y.serialized_size(compress)
            }
            Place::Infinity => INFINITY_TAG.serialized_size(compress),
        }
    }
}

impl<F: Field> Valid for Place<F> {
    fn check(&self) -> Result<(), SerializationError> {
        match self {
            Place::Finite { x, y } => {
                x.check()?;
                y.check()
            }
            Place::Infinity => Ok(()),
        }
    }
}

impl<F: Field> CanonicalDeserialize for Place<F> {
    fn deserialize_with_mode<R: Read>(
        mut reader: R,
        compress: Compress,
        validate: Validate,
    ) -> Result<Self, SerializationError> {
        match u8::deserialize_with_mode(&mut reader, compress, validate)? {
            FINITE_TAG => {
                let x = F::deserialize_with_mode(&mut reader, compress, validate)?;
                let y = F::deserialize_with_mode(&mut reader, compress, validate)?;
                Ok(Place::Finite { x, y })
            }
            INFINITY_TAG => Ok(Place::Infinity),
            _ => Err(SerializationError::InvalidData),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bls12_381::{g1::Config, Fq, G1Affine};
    use ark_ec::{AffineRepr, CurveGroup};

    #[test]
    fn test_place_roundtrip_through_affine() {
        let rng = &mut ark_std::test_rng();
        let p = random_point::<Config, _>(rng);
        let place = Place::from(p);
        assert_eq!(place.to_affine::<Config>(), p);
        assert!(place.is_on_curve::<Config>());
        assert_eq!(place.negate().to_affine::<Config>(), -p);

        assert_eq!(Place::from(G1Affine::identity()), Place::Infinity);
        assert!(Place::<Fq>::Infinity.to_affine::<Config>().infinity);
    }

    #[test]
    fn test_curve_polynomial_matches_points() {
        let rng = &mut ark_std::test_rng();
        let c = curve_polynomial::<Config>();
        assert_eq!(c.degree(), Some(3));
        for _ in 0..5 {
            let p = random_point::<Config, _>(rng);
            assert_eq!(c.evaluate(&p.x), p.y.square());
        }
        let g = (G1Affine::generator() + G1Affine::generator()).into_affine();
        assert!(Place::from(g).is_on_curve::<Config>());
        assert!(!Place::finite(g.x, g.y + Fq::one()).is_on_curve::<Config>());
    }

    #[test]
    fn test_infinity_is_a_distinct_key() {
        let zero_point = Place::finite(Fq::zero(), Fq::zero());
        assert_ne!(zero_point, Place::Infinity);
        assert!(zero_point < Place::Infinity);
    }
}
