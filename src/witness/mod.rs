use ark_ec::short_weierstrass::SWCurveConfig;
use ark_std::{cfg_iter, end_timer, start_timer};
use ark_std::vec::Vec;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::curve::Place;
use crate::divisor::Divisor;
use crate::errors::WitnessError;
use crate::function_field::FunctionFelt;

pub mod incremental;
pub mod mumford;

pub use incremental::{incremental_witness, IncrementalWitness};
pub use mumford::{mumford_witness, MumfordDivisor, MumfordWitness};

/// Checks that `f` witnesses `d`, i.e. that the divisor of `f` is exactly
/// `d`.
///
/// The divisor must list only zeros at finite points: a finite point with a
/// negative multiplicity, or one that is not on the curve, is rejected with
/// `WitnessError::InvalidDivisor`. The poles of `f` are then all at
/// infinity, and `f` passes iff it is a nonzero element of the coordinate
/// ring whose order at every finite point of `d` and at infinity matches
/// the multiplicity in `d`. Since `d` has degree zero, this leaves no room
/// for zeros outside the support.
pub fn test_witness<P: SWCurveConfig>(
    f: &FunctionFelt<P>,
    d: &Divisor<P>,
) -> Result<bool, WitnessError> {
    for (place, multiplicity) in d.iter() {
        if place.is_infinity() {
            continue;
        }
        if multiplicity < 0 {
            return Err(WitnessError::InvalidDivisor(format!(
                "finite point with negative multiplicity {multiplicity}"
            )));
        }
        if !place.is_on_curve::<P>() {
            return Err(WitnessError::InvalidDivisor(
                "point is not on the curve".to_string(),
            ));
        }
    }

    if d.degree() != 0 || f.is_zero() || !f.is_polynomial() {
        return Ok(false);
    }

    let check_timer = start_timer!(|| format!("Checking orders at {} places", d.support_size()));

    let places: Vec<(Place<P::BaseField>, i64)> = d
        .iter()
        .filter(|(place, _)| !place.is_infinity())
        .map(|(place, multiplicity)| (*place, multiplicity))
        .chain([(Place::Infinity, d.multiplicity(&Place::Infinity))])
        .collect();

    let valid = cfg_iter!(places).all(|(place, multiplicity)| {
        f.order_at(place) == Some(*multiplicity)
    });

    end_timer!(check_timer);
    Ok(valid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::random_point;
    use ark_bls12_381::{g1::Config, Fq, G1Affine};
    use ark_ec::CurveGroup;
    use ark_ff::One;

    fn triangle() -> (G1Affine, G1Affine, G1Affine, Divisor<Config>) {
        let rng = &mut ark_std::test_rng();
        let p = random_point::<Config, _>(rng);
        let q = random_point::<Config, _>(rng);
        let r = (-(p + q)).into_affine();
        let d = Divisor::completing(&[p, q]);
        (p, q, r, d)
    }

    #[test]
    fn test_line_witnesses_triangle() {
        let (p, q, _, d) = triangle();
        let line = FunctionFelt::line(&p, &q).unwrap();
        assert!(test_witness(&line, &d).unwrap());
    }

    #[test]
    fn test_wrong_order_is_rejected() {
        let (p, q, _, d) = triangle();
        let line = FunctionFelt::line(&p, &q).unwrap();

        // extra zeros at the vertical line through p
        let too_many = &line * &FunctionFelt::vertical(p.x);
        assert!(!test_witness(&too_many, &d).unwrap());

        // vanishes at the right points but has the wrong pole order
        let tangent = FunctionFelt::line(&p, &p).unwrap();
        assert!(!test_witness(&tangent, &d).unwrap());
        assert!(!test_witness(&FunctionFelt::one(), &d).unwrap());
    }

    #[test]
    fn test_invalid_divisors() {
        let (p, q, r, _) = triangle();
        let line = FunctionFelt::line(&p, &q).unwrap();

        let negative = Divisor::from_affine([(p, 1), (q, 1), (r, -1), (G1Affine::identity(), -1)]);
        assert!(matches!(
            test_witness(&line, &negative),
            Err(WitnessError::InvalidDivisor(_))
        ));

        let off_curve = Divisor::<Config>::new([
            (Place::finite(p.x, p.y + Fq::one()), 1),
            (Place::Infinity, -1),
        ]);
        assert!(matches!(
            test_witness(&line, &off_curve),
            Err(WitnessError::InvalidDivisor(_))
        ));
    }

    #[test]
    fn test_nonzero_degree_or_pole_fails() {
        let (p, q, _, _) = triangle();
        let line = FunctionFelt::line(&p, &q).unwrap();
        let unbalanced = Divisor::from_affine([(p, 1), (q, 1), (G1Affine::identity(), -1)]);
        assert!(!test_witness(&line, &unbalanced).unwrap());

        let with_pole = FunctionFelt::vertical(p.x).inverse().unwrap();
        assert!(!test_witness(&with_pole, &Divisor::completing(&[p, -p])).unwrap());
    }
}
