use ark_ec::short_weierstrass::{Affine, SWCurveConfig};
use ark_std::marker::PhantomData;
use ark_std::{add_to_trace, end_timer, start_timer};

use crate::arithmetic::{Polynomial, RationalFunction};
use crate::divisor::Divisor;
use crate::errors::WitnessError;
use crate::function_field::FunctionFelt;
use crate::WitnessScheme;

mod data_structures;
pub use data_structures::*;

/// Witness construction through Mumford representations.
///
/// The points of the divisor are folded one at a time into a Mumford
/// representation with Cantor composition, and the result is reduced
/// until `deg u <= 1`. Every function split off along the way (the gcd
/// factors of the compositions, the inverse verticals of negative
/// multiplicities and the `(y - v) / u'` of each reduction step) is
/// multiplied into the witness. A principal divisor reduces to `u = 1`.
pub struct MumfordWitness<P: SWCurveConfig> {
    _curve: PhantomData<P>,
}

impl<P: SWCurveConfig> WitnessScheme<P> for MumfordWitness<P> {
    fn construct(d: &Divisor<P>) -> Result<FunctionFelt<P>, WitnessError> {
        mumford_witness(d)
    }
}

pub fn mumford_witness<P: SWCurveConfig>(d: &Divisor<P>) -> Result<FunctionFelt<P>, WitnessError> {
    let witness_timer = start_timer!(|| format!("Mumford witness for {} places", d.support_size()));

    d.ensure_principal()?;

    let compose_timer = start_timer!(|| "Composing points");
    let mut acc = MumfordDivisor::identity();
    let mut witness = FunctionFelt::one();
    for (point, multiplicity) in d.finite_points() {
        let (acc_next, factor) = absorb(&acc, &point, multiplicity)?;
        acc = acc_next;
        witness = &witness * &factor;
    }
    end_timer!(compose_timer);

    let reduce_timer = start_timer!(|| format!("Reducing from degree {}", acc.degree()));
    let mut steps = 0usize;
    while acc.degree() > 1 {
        let (acc_next, h) = acc.reduce()?;
        acc = acc_next;
        witness = &witness * &h;
        steps += 1;
    }
    add_to_trace!(|| "Mumford reduction steps", || format!("{steps}"));
    end_timer!(reduce_timer);

    if !acc.is_identity() {
        end_timer!(witness_timer);
        return Err(WitnessError::NonPrincipalDivisor(format!(
            "reduced Mumford representation has degree {}",
            acc.degree()
        )));
    }

    end_timer!(witness_timer);
    Ok(witness)
}

// Adds multiplicity * ([P] - [O]) to `acc`, returning the new representation
// and the function split off
fn absorb<P: SWCurveConfig>(
    acc: &MumfordDivisor<P>,
    point: &Affine<P>,
    multiplicity: i64,
) -> Result<(MumfordDivisor<P>, FunctionFelt<P>), WitnessError> {
    let count = multiplicity.unsigned_abs() as usize;

    // -([P] - [O]) = [-P] - [O] - div(x - x_P)
    let (summand, mut factor) = if multiplicity < 0 {
        let vertical = Polynomial::linear(point.x).pow(count);
        (
            MumfordDivisor::from_point(&-*point),
            FunctionFelt::new(
                RationalFunction::new(Polynomial::one(), vertical)?,
                RationalFunction::zero(),
            ),
        )
    } else {
        (MumfordDivisor::from_point(point), FunctionFelt::one())
    };

    let mut acc = acc.clone();
    let mut gcd_product = Polynomial::one();
    for _ in 0..count {
        let (acc_next, h) = acc.compose(&summand)?;
        acc = acc_next;
        gcd_product = &gcd_product * &h;
    }
    factor = factor.scale(&RationalFunction::from_polynomial(gcd_product));
    Ok((acc, factor))
}
